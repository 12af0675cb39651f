//! Trellis Loader
//!
//! Composition of a service's registration phases, plus the host
//! configuration and logging bootstrap every Trellis service shares.
//!
//! # Example
//!
//! ```
//! use trellis_core::ManagedError;
//! use trellis_loader::{LoadPhase, LoaderPhases};
//!
//! let phases = LoaderPhases::<Vec<&str>, (), ManagedError>::new()
//!     .with_registrations(|registry, _| {
//!         registry.push("customer-service");
//!         Ok(())
//!     });
//!
//! let mut registry = Vec::new();
//! phases.load(&mut registry, &()).unwrap();
//! assert_eq!(registry, ["customer-service"]);
//! assert_eq!(LoadPhase::ORDER.len(), 3);
//! ```

pub mod config;
pub mod loader;
pub mod telemetry;

pub use config::{ConfigError, HostConfig};
pub use loader::{load, LoadError, LoadPhase, LoaderPhases};
pub use telemetry::{init_tracing, TelemetryError};
