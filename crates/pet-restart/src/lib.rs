//! pet-restart: read-only access to a prior run's checkpoint record.
//!
//! A checkpoint is a flat mapping from string keys to 2-D numeric arrays,
//! produced by a prior run's reporting layer. Restarted simulations consume
//! only the last time sample of each array.

pub mod keys;
pub mod store;
pub mod types;

pub use keys::PartField;
pub use store::{CHECKPOINT_FILE, load_checkpoint, save_checkpoint};
pub use types::CheckpointRecord;

pub type RestartResult<T> = Result<T, RestartError>;

#[derive(thiserror::Error, Debug)]
pub enum RestartError {
    #[error("Checkpoint is missing required key {key:?}")]
    MissingKey { key: String },

    #[error("Checkpoint shape mismatch for {key:?} (expected {expected} values, found {found})")]
    ShapeMismatch {
        key: String,
        expected: usize,
        found: usize,
    },

    #[error("Checkpoint series {key:?} holds no time samples")]
    EmptySeries { key: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
