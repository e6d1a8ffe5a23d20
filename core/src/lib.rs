//! Core of the operations dashboard: deterministic dataset synthesis,
//! a process-lifetime dataset cache, and the aggregations the overview,
//! subscriber and lead views are built from.

pub mod aggregation;
pub mod catalog;
pub mod clock;
pub mod command;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod event;
pub mod lead;
pub mod name_generator;
pub mod rng;
pub mod session;
pub mod source;
pub mod store;
pub mod subscriber;
pub mod synthesizer;
pub mod types;
