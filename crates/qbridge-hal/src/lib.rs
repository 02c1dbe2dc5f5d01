//! qbridge Simulator Abstraction Layer
//!
//! This crate defines what the framework expects from a state-vector
//! simulator, independent of the engine behind it:
//! - The [`QuantumSimulator`] trait for sampling, exact expectation values
//!   and wavefunction access
//! - Result types [`Measurements`] and [`ExpectationValues`]
//! - [`UsageCounters`] for circuits-run / jobs-run bookkeeping
//! - [`BackendConfig`] and [`BackendFactory`] for configuration-driven
//!   construction
//!
//! # Example: Implementing a Simulator
//!
//! ```ignore
//! use qbridge_hal::{
//!     ExpectationValues, HalResult, Measurements, QuantumSimulator, UsageCounters,
//! };
//! use qbridge_ir::{Circuit, Instruction, PauliSum, Wavefunction};
//!
//! struct MySimulator {
//!     usage: UsageCounters,
//! }
//!
//! impl QuantumSimulator for MySimulator {
//!     fn name(&self) -> &str { "my_simulator" }
//!     fn usage(&self) -> &UsageCounters { &self.usage }
//!     // ... run_circuit_and_measure, get_exact_expectation_values,
//!     // wavefunction_from_native_circuit, can_be_executed_natively
//! }
//! ```

pub mod backend;
pub mod error;
pub mod result;
pub mod simulator;
pub mod usage;

pub use backend::{BackendConfig, BackendFactory};
pub use error::{HalError, HalResult};
pub use result::{ExpectationValues, Measurements};
pub use simulator::QuantumSimulator;
pub use usage::UsageCounters;
