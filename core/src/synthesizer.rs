//! Population synthesizer, the production DatasetSource.
//!
//! Output is a pure function of (seed, count, reference clock, static
//! tables). Every call starts a fresh stream from the slot's seed, so
//! repeated calls return identical collections.

use crate::{
    clock::ReferenceClock,
    config::DashConfig,
    error::{DashError, DashResult},
    lead::{Lead, LeadSynthesizer},
    rng::{RngBank, StreamSlot},
    source::DatasetSource,
    subscriber::{Subscriber, SubscriberSynthesizer},
};
use std::time::Instant;

pub struct Synthesizer {
    bank:             RngBank,
    subscribers:      SubscriberSynthesizer,
    leads:            LeadSynthesizer,
    subscriber_count: usize,
    lead_count:       usize,
    max_records:      usize,
}

impl Synthesizer {
    pub fn new(config: &DashConfig, clock: ReferenceClock) -> Self {
        Self {
            bank:             config.rng_bank(),
            subscribers:      SubscriberSynthesizer::new(config.monthly_amount, clock),
            leads:            LeadSynthesizer::new(clock),
            subscriber_count: config.subscriber_count,
            lead_count:       config.lead_count,
            max_records:      config.max_records,
        }
    }

    pub fn synthesize_subscribers(&self, count: usize) -> DashResult<Vec<Subscriber>> {
        self.check_count("subscribers", count)?;
        let started = Instant::now();
        let mut rng = self.bank.for_stream(StreamSlot::Subscribers);
        let subscribers = self.subscribers.synthesize(&mut rng, count);
        log::info!(
            "synthesized {count} subscribers (stream={} seed={}) in {:?}",
            rng.name,
            self.bank.seed_for(StreamSlot::Subscribers),
            started.elapsed()
        );
        Ok(subscribers)
    }

    pub fn synthesize_leads(&self, count: usize) -> DashResult<Vec<Lead>> {
        self.check_count("leads", count)?;
        let started = Instant::now();
        let mut rng = self.bank.for_stream(StreamSlot::Leads);
        let leads = self.leads.synthesize(&mut rng, count);
        log::info!(
            "synthesized {count} leads (stream={} seed={}) in {:?}",
            rng.name,
            self.bank.seed_for(StreamSlot::Leads),
            started.elapsed()
        );
        Ok(leads)
    }

    fn check_count(&self, collection: &'static str, requested: usize) -> DashResult<()> {
        if requested > self.max_records {
            return Err(DashError::CountOutOfBounds {
                collection,
                requested,
                max: self.max_records,
            });
        }
        Ok(())
    }
}

impl DatasetSource for Synthesizer {
    fn name(&self) -> &'static str {
        "synthesizer"
    }

    fn subscribers(&self) -> DashResult<Vec<Subscriber>> {
        self.synthesize_subscribers(self.subscriber_count)
    }

    fn leads(&self) -> DashResult<Vec<Lead>> {
        self.synthesize_leads(self.lead_count)
    }
}
