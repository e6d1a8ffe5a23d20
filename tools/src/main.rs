//! dash-runner: headless driver for the operations dashboard core.
//!
//! Usage:
//!   dash-runner --email admin@1oral.com --password admin123
//!   dash-runner --data-dir ./data --subscribers 1000 --leads 200
//!   dash-runner --as-of 2026-02-08T18:00:00Z --ipc-mode

use anyhow::Result;
use opsdash_core::{
    command::{CommandReply, OperatorCommand},
    config::DashConfig,
    dashboard::Dashboard,
    session::{OperatorDirectory, RoleGate},
};
use std::env;
use std::io::{self, BufRead, Write};
use std::path::Path;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let data_dir = parse_str(&args, "--data-dir").unwrap_or("./data");
    let email = parse_str(&args, "--email").unwrap_or("admin@1oral.com");
    let password = parse_str(&args, "--password").unwrap_or("admin123");

    let mut config = if Path::new(data_dir).join("dashboard.json").exists() {
        DashConfig::load(data_dir)?
    } else {
        log::info!("no dashboard.json under {data_dir}, using defaults");
        DashConfig::default()
    };
    config.subscriber_count = parse_arg(&args, "--subscribers", config.subscriber_count);
    config.lead_count = parse_arg(&args, "--leads", config.lead_count);
    config.subscriber_seed = parse_arg(&args, "--subscriber-seed", config.subscriber_seed);
    config.lead_seed = parse_arg(&args, "--lead-seed", config.lead_seed);
    if let Some(as_of) = parse_str(&args, "--as-of") {
        let pinned = chrono::DateTime::parse_from_rfc3339(as_of)
            .map_err(|e| anyhow::anyhow!("--as-of must be RFC 3339: {e}"))?;
        config.reference_time = Some(pinned.with_timezone(&chrono::Utc));
    }

    if !ipc_mode {
        println!("Ops dashboard: dash-runner");
        println!("  data_dir:     {data_dir}");
        println!("  generator:    {:?}", config.generator);
        println!("  subscribers:  {} (seed {})", config.subscriber_count, config.subscriber_seed);
        println!("  leads:        {} (seed {})", config.lead_count, config.lead_seed);
        println!();
    }

    let clock = config.clock();
    let directory = OperatorDirectory::new(config.operators.clone());
    let session = directory.login(email, password)?;
    let store = Dashboard::build_store(&config, clock);
    let dashboard = Dashboard::open(session, &RoleGate::default(), store, clock)?;

    if ipc_mode {
        run_ipc_loop(&dashboard)?;
    } else {
        print_summary(&dashboard)?;
    }

    Ok(())
}

/// One JSON command per stdin line, one JSON reply per stdout line.
/// Command errors are reported inline and do not end the loop.
fn run_ipc_loop(dashboard: &Dashboard) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let cmd: OperatorCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };

        match dashboard.execute(cmd) {
            Ok(reply) => {
                writeln!(stdout, "{}", serde_json::to_string(&reply)?)?;
                if matches!(reply, CommandReply::Bye) {
                    stdout.flush()?;
                    break;
                }
            }
            Err(e) => {
                log::warn!("command failed: {e}");
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{}", err_json)?;
            }
        }
        stdout.flush()?;
    }
    Ok(())
}

fn print_summary(dashboard: &Dashboard) -> Result<()> {
    let overview = dashboard.overview()?;

    println!("=== OVERVIEW ({}) ===", dashboard.operator().name);
    println!("  as of:              {}", dashboard.clock().now().to_rfc3339());
    println!("  monthly revenue:    ${}", overview.monthly_recurring_revenue);
    println!("  subscribers:        {}", overview.total_subscribers);
    println!("  active:             {}", overview.active_subscribers);
    println!("  leads:              {}", overview.total_leads);
    println!("  new this week:      {}", overview.new_leads_this_week);
    println!("  today's leads:      {}", overview.leads_today);

    println!();
    println!("=== LEADS BY SOLUTION ===");
    for (solution, count) in &overview.leads_by_solution {
        println!("  {:<12} {count}", solution.label());
    }

    println!();
    println!("=== FIRST SUBSCRIBERS ===");
    for subscriber in dashboard.subscribers()?.iter().take(5) {
        println!(
            "  {} | {:<28} | {:<9} | next billing {}",
            subscriber.id,
            subscriber.name,
            subscriber.status.label(),
            subscriber.next_billing_label(),
        );
    }

    println!();
    println!("=== RECENT LEADS ===");
    for lead in &overview.recent_leads {
        println!(
            "  {} | {:<28} | {:<10} | {:<9} | {}",
            lead.id,
            lead.name.as_deref().unwrap_or(&lead.email),
            lead.solution.label(),
            lead.status.label(),
            lead.created_at.format("%Y-%m-%d %H:%M"),
        );
    }
    Ok(())
}

fn parse_str<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
