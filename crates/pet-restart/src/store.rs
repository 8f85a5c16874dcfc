//! Checkpoint file I/O.

use crate::types::CheckpointRecord;
use crate::RestartResult;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// File name of the checkpoint inside a run directory.
pub const CHECKPOINT_FILE: &str = "output_data.json";

/// Read a prior run's checkpoint fully into memory.
pub fn load_checkpoint(run_dir: &Path) -> RestartResult<CheckpointRecord> {
    let content = fs::read_to_string(run_dir.join(CHECKPOINT_FILE))?;
    let data: HashMap<String, Vec<Vec<f64>>> = serde_json::from_str(&content)?;
    Ok(CheckpointRecord::new(data))
}

/// Write a checkpoint record. The simulation core never calls this; it
/// exists for the reporting layer and for fabricating fixtures in tests.
pub fn save_checkpoint(
    run_dir: &Path,
    data: &HashMap<String, Vec<Vec<f64>>>,
) -> RestartResult<()> {
    if !run_dir.exists() {
        fs::create_dir_all(run_dir)?;
    }
    let content = serde_json::to_string(data)?;
    fs::write(run_dir.join(CHECKPOINT_FILE), content)?;
    Ok(())
}
