//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → wait_for_signal() resolves
//!
//! Shutdown (shutdown.rs):
//!     trigger() → every subscriber's recv() resolves
//!     → HTTP server stops accepting → in-flight requests drain → exit
//! ```
//!
//! # Design Decisions
//! - One coordinator per process, created in main
//! - Servers receive a subscription, not the coordinator, so tests can
//!   drive shutdown directly

pub mod shutdown;
pub mod signals;

pub use shutdown::{Shutdown, ShutdownListener};
pub use signals::wait_for_signal;
