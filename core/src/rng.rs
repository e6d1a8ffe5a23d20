//! Deterministic random number generation.
//!
//! RULE: Nothing in the synthesizer may call any platform RNG.
//! All randomness flows through StreamRng instances handed out by
//! the RngBank, one per record collection.
//!
//! Each collection gets its own stream, seeded from its own configured
//! seed. This means:
//!   - Regenerating subscribers never perturbs the lead stream.
//!   - Each collection is fully reproducible in isolation.

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;
use serde::{Deserialize, Serialize};

pub const LCG_MULTIPLIER: u64 = 9301;
pub const LCG_INCREMENT: u64 = 49297;
pub const LCG_MODULUS: u64 = 233280;

/// A stateful stream of floats in [0.0, 1.0).
///
/// Every helper below consumes exactly one draw. Synthesizers rely on
/// that when they document their draw order.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;

    /// Uniform integer in [lo, hi], inclusive on both ends.
    fn uniform_int(&mut self, lo: u64, hi: u64) -> u64 {
        assert!(lo <= hi, "uniform_int: lo must be <= hi");
        let span = hi - lo + 1;
        let offset = (self.next_f64() * span as f64).floor() as u64;
        lo + offset.min(span - 1)
    }

    /// Bernoulli trial: returns true with probability p.
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Pick one entry from a non-empty table.
    fn pick<'a, T>(&mut self, table: &'a [T]) -> &'a T {
        assert!(!table.is_empty(), "pick from empty table");
        let index = (self.next_f64() * table.len() as f64) as usize;
        &table[index.min(table.len() - 1)]
    }
}

/// Linear congruential generator with the reference parameters.
///
/// `state = (state * 9301 + 49297) mod 233280`, emitted as
/// `state / 233280`. Seeds are reduced modulo 233280 up front, which
/// yields the same sequence as applying the recurrence to the raw seed.
#[derive(Debug, Clone)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self { state: seed % LCG_MODULUS }
    }
}

impl RandomSource for Lcg {
    fn next_f64(&mut self) -> f64 {
        self.state = (self.state * LCG_MULTIPLIER + LCG_INCREMENT) % LCG_MODULUS;
        self.state as f64 / LCG_MODULUS as f64
    }
}

impl RandomSource for Pcg64Mcg {
    fn next_f64(&mut self) -> f64 {
        use rand::RngCore;
        let bits = self.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }
}

/// Which algorithm backs each stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorKind {
    /// Reference LCG. Output matches existing fixtures.
    #[default]
    Lcg,
    /// PCG-64 (MCG). Better statistical quality, no fixture parity.
    Pcg,
}

enum StreamInner {
    Lcg(Lcg),
    Pcg(Pcg64Mcg),
}

/// A named, deterministic RNG for a single record collection.
pub struct StreamRng {
    pub name: &'static str,
    inner: StreamInner,
}

impl StreamRng {
    pub fn new(kind: GeneratorKind, seed: u64) -> Self {
        let inner = match kind {
            GeneratorKind::Lcg => StreamInner::Lcg(Lcg::new(seed)),
            GeneratorKind::Pcg => StreamInner::Pcg(Pcg64Mcg::seed_from_u64(seed)),
        };
        Self { name: "unnamed", inner }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }
}

impl RandomSource for StreamRng {
    fn next_f64(&mut self) -> f64 {
        match &mut self.inner {
            StreamInner::Lcg(lcg) => lcg.next_f64(),
            StreamInner::Pcg(pcg) => pcg.next_f64(),
        }
    }
}

/// Stream factory for one dataset, holding one seed per collection.
#[derive(Debug, Clone)]
pub struct RngBank {
    kind:            GeneratorKind,
    subscriber_seed: u64,
    lead_seed:       u64,
}

impl RngBank {
    pub fn new(kind: GeneratorKind, subscriber_seed: u64, lead_seed: u64) -> Self {
        Self { kind, subscriber_seed, lead_seed }
    }

    /// A fresh stream positioned at the start of the slot's sequence.
    pub fn for_stream(&self, slot: StreamSlot) -> StreamRng {
        StreamRng::new(self.kind, self.seed_for(slot)).with_name(slot.name())
    }

    pub fn seed_for(&self, slot: StreamSlot) -> u64 {
        match slot {
            StreamSlot::Subscribers => self.subscriber_seed,
            StreamSlot::Leads       => self.lead_seed,
        }
    }
}

/// Stable stream assignments. Append only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StreamSlot {
    Subscribers,
    Leads,
}

impl StreamSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Subscribers => "subscribers",
            Self::Leads => "leads",
        }
    }
}
