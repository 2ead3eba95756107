//! Runtime wiring: the [`EtaSystem`] orchestrator and tracing setup.

pub mod eta_system;
pub mod tracing;

pub use eta_system::EtaSystem;
pub use self::tracing::setup_tracing;
