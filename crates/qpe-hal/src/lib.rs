//! Backend abstraction for phase-estimation circuits.
//!
//! The HAL hides how a circuit is executed. A [`Backend`] accepts a
//! [`qpe_ir::Circuit`] and a shot count and eventually yields an
//! [`ExecutionResult`] whose [`Counts`] map measured bitstrings to their
//! number of occurrences.
//!
//! # Example
//!
//! ```ignore
//! use qpe_hal::Backend;
//! use qpe_adapter_sim::SimulatorBackend;
//!
//! let backend = SimulatorBackend::new();
//! let result = backend.run(&circuit, 1000).await?;
//! if let Some((bitstring, count)) = result.counts.most_frequent() {
//!     println!("Most frequent: {bitstring} ({count} times)");
//! }
//! ```

pub mod backend;
pub mod capability;
pub mod error;
pub mod job;
pub mod result;

pub use backend::{Backend, BackendAvailability, BackendConfig, BackendFactory, ValidationResult};
pub use capability::{Capabilities, GateSet};
pub use error::{HalError, HalResult};
pub use job::{Job, JobId, JobStatus};
pub use result::{Counts, ExecutionResult};
