//! Configuration bundle validation.

use crate::schema::{ConfigBundle, ElectrodeConfig, SystemConfig};
use pet_core::Electrode;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Missing electrode data: {what} for electrode {trode}")]
    MissingElectrode { trode: Electrode, what: &'static str },

    #[error("Dimension mismatch: {what} (expected {expected}, found {found})")]
    DimensionMismatch {
        what: String,
        expected: usize,
        found: usize,
    },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Solid-type tag {tag:?} appears in both kind-sets")]
    OverlappingKindSets { tag: String },
}

pub fn validate_bundle(bundle: &ConfigBundle) -> Result<(), ValidationError> {
    let sys = &bundle.system;

    if sys.nvol.c < 1 {
        return Err(ValidationError::InvalidValue {
            field: "nvol.c".to_string(),
            value: sys.nvol.c.to_string(),
            reason: "cathode must have at least one volume".to_string(),
        });
    }

    for tag in &sys.one_var_types {
        if sys.two_var_types.contains(tag) {
            return Err(ValidationError::OverlappingKindSets { tag: tag.clone() });
        }
    }

    for trode in sys.trodes() {
        validate_electrode(sys, trode, bundle.electrodes.get(trode))?;
    }

    Ok(())
}

fn validate_electrode(
    sys: &SystemConfig,
    trode: Electrode,
    elec: Option<&ElectrodeConfig>,
) -> Result<(), ValidationError> {
    let nvol = sys.nvol(trode);
    let npart = match sys.npart.get(trode) {
        Some(&n) => n,
        None => {
            return Err(ValidationError::MissingElectrode {
                trode,
                what: "npart",
            });
        }
    };
    let psd = sys.psd_num.get(trode).ok_or(ValidationError::MissingElectrode {
        trode,
        what: "psd_num",
    })?;
    let elec = elec.ok_or(ValidationError::MissingElectrode {
        trode,
        what: "electrode parameters",
    })?;

    check_table_dims(&format!("psd_num.{trode}"), psd.len(), nvol)?;
    for (i, row) in psd.iter().enumerate() {
        check_table_dims(&format!("psd_num.{trode}[{i}]"), row.len(), npart)?;
        for (j, &count) in row.iter().enumerate() {
            // Counts arrive as floats and are truncated on read; anything
            // that truncates below 1 cannot discretize a particle.
            if !count.is_finite() || count.trunc() < 1.0 {
                return Err(ValidationError::InvalidValue {
                    field: format!("psd_num.{trode}[{i}][{j}]"),
                    value: count.to_string(),
                    reason: "particle discretization count must truncate to a positive integer"
                        .to_string(),
                });
            }
        }
    }

    check_table_dims(&format!("electrodes.{trode}.particles"), elec.particles.len(), nvol)?;
    for (i, row) in elec.particles.iter().enumerate() {
        check_table_dims(
            &format!("electrodes.{trode}.particles[{i}]"),
            row.len(),
            npart,
        )?;
    }

    Ok(())
}

fn check_table_dims(what: &str, found: usize, expected: usize) -> Result<(), ValidationError> {
    if found != expected {
        return Err(ValidationError::DimensionMismatch {
            what: what.to_string(),
            expected,
            found,
        });
    }
    Ok(())
}
