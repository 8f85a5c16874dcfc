//! Error types for simulation setup and time stepping.

use pet_core::ParticleRef;
use thiserror::Error;

pub type SimResult<T> = Result<T, SimError>;

/// Errors surfacing during simulation setup and integration. All are
/// unrecoverable at this layer and propagate to the caller; a solver
/// halting early at a discontinuity is not one of these.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Configuration error: {0}")]
    Config(#[from] pet_config::ConfigError),

    #[error("Restart data error: {0}")]
    Restart(#[from] pet_restart::RestartError),

    #[error("Unknown solid type {tag:?} for particle {part}")]
    UnknownSolidType { tag: String, part: ParticleRef },

    #[error("Setup step out of order: {what}")]
    PrematureInitialization { what: &'static str },

    #[error("Cell domains are already allocated")]
    DomainAlreadyBuilt,

    #[error("Integration failed: {message}")]
    Integration { message: String },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}

impl From<pet_config::ValidationError> for SimError {
    fn from(e: pet_config::ValidationError) -> Self {
        SimError::Config(pet_config::ConfigError::Validation(e))
    }
}
