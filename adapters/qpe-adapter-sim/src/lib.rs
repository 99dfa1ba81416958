//! Local statevector simulator.
//!
//! Exact noiseless simulation of `qpe-ir` circuits, with measurement
//! outcomes sampled from the final state. Boxes and controlled boxes are
//! flattened before simulation, so phase-estimation circuits run as built.
//!
//! | Qubits | Memory  |
//! |--------|---------|
//! | 10     | ~16 KB  |
//! | 15     | ~512 KB |
//! | 20     | ~16 MB  |
//!
//! # Example
//!
//! ```no_run
//! use qpe_adapter_sim::SimulatorBackend;
//! use qpe_hal::Backend;
//! use qpe_ir::{Circuit, ClbitId, QubitId};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = SimulatorBackend::with_seed(7);
//!
//! let mut circuit = Circuit::with_size("bell", 2, 2);
//! circuit.h(QubitId(0))?.cx(QubitId(0), QubitId(1))?;
//! circuit.measure_qubits(&[QubitId(0), QubitId(1)], &[ClbitId(0), ClbitId(1)])?;
//!
//! let result = backend.run(&circuit, 1000).await?;
//! assert_eq!(result.counts.get("00") + result.counts.get("11"), 1000);
//! # Ok(())
//! # }
//! ```

mod simulator;
mod statevector;

pub use simulator::SimulatorBackend;
