//! Screening core for the Russian registry mention-matching pipeline: alias
//! expansion (§4.E) over registry entries, compiled into a multi-pattern
//! automaton (§4.G) that the scanner (§4.I) runs against arbitrary text.
//! The HTTP front-end, CSV producer, and downstream LLM verifier are out of
//! scope — this crate's only external surface is [`ScreeningService`].

pub mod alias;
pub mod automaton;
pub mod cache;
pub mod classify;
pub mod config;
pub mod diminutives;
pub mod error;
pub mod filter;
pub mod morphology;
pub mod nameparse;
pub mod normalize;
pub mod registry;
pub mod scanner;
pub mod service;
pub mod telemetry;
pub mod translit;

pub use config::{ScreeningConfig, Strictness};
pub use error::ScreeningError;
pub use registry::{EntryType, Registry, RegistryEntry};
pub use scanner::Candidate;
pub use service::{HealthStatus, ScreeningService};

/// Initialize structured logging for a hosting process. Idempotent — safe to
/// call more than once (e.g. once per test binary).
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
