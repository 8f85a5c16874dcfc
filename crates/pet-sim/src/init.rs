//! State initialization.
//!
//! Every variable in the domain receives either an exact initial
//! condition (differential variables) or a starting guess (algebraic
//! variables) before the first integration step. The value source is a
//! strategy selected once at construction: analytic defaults for a fresh
//! start, or the last time sample of a prior run's checkpoint for a
//! restart. The structural traversal is shared between modes.

use crate::domain::CellDomain;
use crate::error::{SimError, SimResult};
use crate::state::{CellState, ElectrolyteState, ParticleState, TrodeState};
use pet_config::{ConfigBundle, SolidKind, SystemConfig, ValidationError};
use pet_core::{Electrode, ParticleRef, Region, mean};
use pet_restart::types::CheckpointRecord;
use pet_restart::{PartField, keys};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Magnitude of the symmetric per-point perturbation applied to fresh
/// two-field concentration profiles. Breaks the exact symmetry between
/// the two fields so the solver does not start at a degenerate fixed
/// point. Tunable, but the default is load-bearing for reproducing prior
/// runs.
pub const SYMMETRY_EPS: f64 = 5.0e-5;

/// Source of initial values and guesses, chosen once per simulation.
pub trait InitialValues {
    /// Filling-fraction guess for one electrode.
    fn ffrac(&mut self, trode: Electrode) -> SimResult<f64>;

    /// Volumetric reaction-rate guesses, one per volume.
    fn reaction_rates(&mut self, trode: Electrode, nvol: usize) -> SimResult<Vec<f64>>;

    /// Bulk-phase potential guesses, one per volume.
    fn phi_bulk(&mut self, trode: Electrode, nvol: usize) -> SimResult<Vec<f64>>;

    /// Concentration fields for one particle of the given kind and
    /// discretization size.
    fn particle(
        &mut self,
        part: ParticleRef,
        kind: SolidKind,
        npoints: usize,
    ) -> SimResult<ParticleState>;

    /// Electrolyte concentration conditions and potential guesses over
    /// one region's volumes.
    fn electrolyte(&mut self, region: Region, nvol: usize) -> SimResult<ElectrolyteState>;

    /// Applied-potential guess.
    fn phi_applied(&mut self) -> SimResult<f64>;
}

/// Analytic defaults for a fresh start.
pub struct FreshStart<'a> {
    sys: &'a SystemConfig,
    rng: StdRng,
}

impl<'a> FreshStart<'a> {
    pub fn new(sys: &'a SystemConfig) -> Self {
        Self {
            sys,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic variant for reproducible runs and tests.
    pub fn with_seed(sys: &'a SystemConfig, seed: u64) -> Self {
        Self {
            sys,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn cs0(&self, trode: Electrode) -> SimResult<f64> {
        self.sys
            .cs0
            .get(trode)
            .copied()
            .ok_or_else(|| ValidationError::MissingElectrode { trode, what: "cs0" }.into())
    }

    /// A de-meaned symmetric perturbation sequence in ±[`SYMMETRY_EPS`]
    /// (before centering). Its values sum to zero.
    fn perturbation(&mut self, n: usize) -> Vec<f64> {
        let mut seq: Vec<f64> = (0..n)
            .map(|_| 2.0 * SYMMETRY_EPS * (self.rng.random::<f64>() - 0.5))
            .collect();
        let m = mean(&seq);
        for v in &mut seq {
            *v -= m;
        }
        seq
    }
}

impl InitialValues for FreshStart<'_> {
    fn ffrac(&mut self, trode: Electrode) -> SimResult<f64> {
        self.cs0(trode)
    }

    fn reaction_rates(&mut self, _trode: Electrode, nvol: usize) -> SimResult<Vec<f64>> {
        Ok(vec![0.0; nvol])
    }

    fn phi_bulk(&mut self, trode: Electrode, nvol: usize) -> SimResult<Vec<f64>> {
        let phi = match trode {
            Electrode::Anode => 0.0,
            Electrode::Cathode => self.sys.phi_cathode,
        };
        Ok(vec![phi; nvol])
    }

    fn particle(
        &mut self,
        part: ParticleRef,
        kind: SolidKind,
        npoints: usize,
    ) -> SimResult<ParticleState> {
        let cs0 = self.cs0(part.trode)?;
        match kind {
            SolidKind::SingleField => Ok(ParticleState::Single {
                cbar: cs0,
                c: vec![cs0; npoints],
            }),
            SolidKind::TwoField => {
                // Independent perturbations per field keep the two
                // profiles from starting identical.
                let rnd1 = self.perturbation(npoints);
                let rnd2 = self.perturbation(npoints);
                Ok(ParticleState::Two {
                    c1bar: cs0,
                    c2bar: cs0,
                    cbar: cs0,
                    c1: rnd1.iter().map(|r| cs0 + r).collect(),
                    c2: rnd2.iter().map(|r| cs0 + r).collect(),
                })
            }
        }
    }

    fn electrolyte(&mut self, _region: Region, nvol: usize) -> SimResult<ElectrolyteState> {
        Ok(ElectrolyteState {
            c: vec![self.sys.c0; nvol],
            phi: vec![0.0; nvol],
        })
    }

    fn phi_applied(&mut self) -> SimResult<f64> {
        Ok(0.0)
    }
}

/// Last-sample values from a prior run's checkpoint. No perturbation is
/// applied; the stored profiles already carry any symmetry breaking.
pub struct Restart<'a> {
    record: &'a CheckpointRecord,
}

impl<'a> Restart<'a> {
    pub fn new(record: &'a CheckpointRecord) -> Self {
        Self { record }
    }
}

impl InitialValues for Restart<'_> {
    fn ffrac(&mut self, trode: Electrode) -> SimResult<f64> {
        Ok(self.record.last_scalar(&keys::ffrac(trode))?)
    }

    fn reaction_rates(&mut self, trode: Electrode, nvol: usize) -> SimResult<Vec<f64>> {
        Ok(self.record.last_row(&keys::reaction_rate(trode), nvol)?.to_vec())
    }

    fn phi_bulk(&mut self, trode: Electrode, nvol: usize) -> SimResult<Vec<f64>> {
        Ok(self.record.last_row(&keys::phi_bulk(trode), nvol)?.to_vec())
    }

    fn particle(
        &mut self,
        part: ParticleRef,
        kind: SolidKind,
        npoints: usize,
    ) -> SimResult<ParticleState> {
        let scalar = |field: PartField| -> SimResult<f64> {
            Ok(self.record.last_scalar(&keys::particle(part, field))?)
        };
        let row = |field: PartField| -> SimResult<Vec<f64>> {
            Ok(self
                .record
                .last_row(&keys::particle(part, field), npoints)?
                .to_vec())
        };
        match kind {
            SolidKind::SingleField => Ok(ParticleState::Single {
                cbar: scalar(PartField::Cbar)?,
                c: row(PartField::C)?,
            }),
            SolidKind::TwoField => Ok(ParticleState::Two {
                c1bar: scalar(PartField::C1bar)?,
                c2bar: scalar(PartField::C2bar)?,
                cbar: scalar(PartField::Cbar)?,
                c1: row(PartField::C1)?,
                c2: row(PartField::C2)?,
            }),
        }
    }

    fn electrolyte(&mut self, region: Region, nvol: usize) -> SimResult<ElectrolyteState> {
        Ok(ElectrolyteState {
            c: self.record.last_row(&keys::c_lyte(region), nvol)?.to_vec(),
            phi: self.record.last_row(&keys::phi_lyte(region), nvol)?.to_vec(),
        })
    }

    fn phi_applied(&mut self) -> SimResult<f64> {
        Ok(self.record.last_scalar(keys::phi_applied())?)
    }
}

/// One structural traversal of the allocated domain, pulling every value
/// from the selected source.
pub fn initialize_state(
    domain: &CellDomain,
    bundle: &ConfigBundle,
    source: &mut dyn InitialValues,
) -> SimResult<CellState> {
    let mut trodes = Vec::with_capacity(domain.trodes.len());
    for trode_dmn in &domain.trodes {
        let trode = trode_dmn.trode;
        let elec = bundle
            .electrodes
            .get(trode)
            .ok_or(ValidationError::MissingElectrode {
                trode,
                what: "electrode parameters",
            })?;

        let ffrac = source.ffrac(trode)?;
        let reaction_rate = source.reaction_rates(trode, trode_dmn.nvol)?;
        let phi_bulk = source.phi_bulk(trode, trode_dmn.nvol)?;

        let mut particles = Vec::with_capacity(trode_dmn.nvol);
        for (i, row) in trode_dmn.particles.iter().enumerate() {
            let mut vol_particles = Vec::with_capacity(row.len());
            for (j, part_dmn) in row.iter().enumerate() {
                let part = ParticleRef::new(trode, i, j);
                let tag = &elec.particles[i][j].solid_type;
                // Kind resolution happens before any value is assigned
                // for this particle.
                let kind = bundle
                    .system
                    .classify_solid(tag)
                    .ok_or_else(|| SimError::UnknownSolidType {
                        tag: tag.clone(),
                        part,
                    })?;
                vol_particles.push(source.particle(part, kind, part_dmn.npoints)?);
            }
            particles.push(vol_particles);
        }

        let lyte = source.electrolyte(Region::Electrode(trode), trode_dmn.nvol)?;
        trodes.push(TrodeState {
            trode,
            ffrac,
            reaction_rate,
            phi_bulk,
            lyte,
            particles,
        });
    }

    let separator_lyte = match domain.separator_nvol {
        Some(nvol) => Some(source.electrolyte(Region::Separator, nvol)?),
        None => None,
    };

    Ok(CellState {
        trodes,
        separator_lyte,
        phi_applied: source.phi_applied()?,
        cutoff_marker: 0.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn fresh_source() -> SystemConfig {
        use pet_config::{PerElectrode, VolumeCounts};
        SystemConfig {
            nvol: VolumeCounts { a: 0, c: 1, s: 0 },
            npart: PerElectrode { a: None, c: 1 },
            psd_num: PerElectrode {
                a: None,
                c: vec![vec![16.0]],
            },
            one_var_types: vec!["ACR".to_string()],
            two_var_types: vec!["CHR2".to_string()],
            cs0: PerElectrode { a: None, c: 0.02 },
            c0: 1.0,
            phi_cathode: 1.2,
            prev_dir: None,
        }
    }

    #[test]
    fn perturbation_is_demeaned() {
        let sys = fresh_source();
        let mut fresh = FreshStart::with_seed(&sys, 7);
        let seq = fresh.perturbation(33);
        let sum: f64 = seq.iter().sum();
        assert!(sum.abs() < 1e-15 * seq.len() as f64 + 1e-18);
    }

    proptest! {
        #[test]
        fn perturbation_bounds_hold(seed in any::<u64>(), n in 1usize..64) {
            let sys = fresh_source();
            let mut fresh = FreshStart::with_seed(&sys, seed);
            let seq = fresh.perturbation(n);
            prop_assert_eq!(seq.len(), n);
            // Raw draws are within ±eps; centering can shift each value
            // by at most the mean's magnitude, itself bounded by eps.
            for v in &seq {
                prop_assert!(v.abs() <= 2.0 * SYMMETRY_EPS);
            }
            let sum: f64 = seq.iter().sum();
            prop_assert!(sum.abs() < 1e-12);
        }
    }

    #[test]
    fn fresh_phi_bulk_distinguishes_electrodes() {
        let sys = fresh_source();
        let mut fresh = FreshStart::with_seed(&sys, 0);
        assert_eq!(fresh.phi_bulk(Electrode::Anode, 2).unwrap(), vec![0.0; 2]);
        assert_eq!(
            fresh.phi_bulk(Electrode::Cathode, 2).unwrap(),
            vec![1.2; 2]
        );
    }
}
