//! pet-sim: setup and drive for a porous electrode cell DAE simulation.
//!
//! Provides:
//! - Domain allocation: the index spaces the cell's variables live over
//! - State initialization: fresh analytic defaults or checkpoint restart
//! - Time-stepping driver over an external DAE solver contract
//!
//! The solver itself (residuals, Jacobians, integration, event
//! detection) is an external collaborator behind the [`DaeSolver`]
//! trait.

pub mod domain;
pub mod driver;
pub mod error;
pub mod init;
pub mod sim;
pub mod state;

// Re-exports for public API
pub use domain::{CellDomain, ParticleDomain, TrodeDomain};
pub use driver::{
    DaeSolver, Driver, DriverState, RunOutcome, StepRecord, StopMode, StopReason, drive,
};
pub use error::{SimError, SimResult};
pub use init::{FreshStart, InitialValues, Restart, SYMMETRY_EPS, initialize_state};
pub use sim::{PrevRun, Simulation};
pub use state::{CellState, ElectrolyteState, ParticleState, TrodeState};
