//! Cell domain allocation.
//!
//! Structural setup only: this builds the index spaces the model's
//! variables are defined over. It runs exactly once, before any initial
//! condition is assigned, and allocations are never resized afterwards.

use crate::error::{SimError, SimResult};
use pet_config::{SystemConfig, ValidationError};
use pet_core::Electrode;

/// Index spaces for one particle: its internal discretization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParticleDomain {
    pub npoints: usize,
}

/// Index spaces for one electrode: volumes, particles per volume, and
/// each particle's internal discretization.
#[derive(Debug, Clone)]
pub struct TrodeDomain {
    pub trode: Electrode,
    pub nvol: usize,
    pub npart: usize,
    /// Indexed `[vol][part]`.
    pub particles: Vec<Vec<ParticleDomain>>,
}

/// Allocated index spaces for the whole cell.
#[derive(Debug, Clone)]
pub struct CellDomain {
    /// Separator volume count; `None` when the configuration has no
    /// separator volumes.
    pub separator_nvol: Option<usize>,
    pub trodes: Vec<TrodeDomain>,
}

impl CellDomain {
    /// Allocate index spaces from the system configuration.
    ///
    /// Particle discretization counts arrive as floats from upstream
    /// size-distribution tooling and are read truncated; a count that
    /// truncates below one is rejected.
    pub fn build(sys: &SystemConfig) -> SimResult<Self> {
        let separator_nvol = if sys.nvol.s >= 1 { Some(sys.nvol.s) } else { None };

        let mut trodes = Vec::new();
        for trode in sys.trodes() {
            let nvol = sys.nvol(trode);
            let npart = sys.npart(trode);
            let psd = sys
                .psd_num
                .get(trode)
                .ok_or(ValidationError::MissingElectrode {
                    trode,
                    what: "psd_num",
                })?;

            let mut particles = Vec::with_capacity(nvol);
            for i in 0..nvol {
                let mut row = Vec::with_capacity(npart);
                for j in 0..npart {
                    let count = *psd
                        .get(i)
                        .and_then(|r| r.get(j))
                        .ok_or(ValidationError::MissingElectrode {
                            trode,
                            what: "psd_num entry",
                        })?;
                    let npoints = count.trunc() as usize;
                    if npoints == 0 {
                        return Err(SimError::InvalidArg {
                            what: "particle discretization count must be positive",
                        });
                    }
                    row.push(ParticleDomain { npoints });
                }
                particles.push(row);
            }
            trodes.push(TrodeDomain {
                trode,
                nvol,
                npart,
                particles,
            });
        }

        Ok(Self {
            separator_nvol,
            trodes,
        })
    }
}
