//! Simulation lifecycle: construct, allocate domains, initialize
//! variables, run.

use crate::domain::CellDomain;
use crate::driver::{self, DaeSolver, RunOutcome};
use crate::error::{SimError, SimResult};
use crate::init::{FreshStart, Restart, initialize_state};
use crate::state::CellState;
use pet_config::{ConfigBundle, validate_bundle};
use pet_restart::types::CheckpointRecord;
use pet_restart::{keys, load_checkpoint};

/// Scalars carried over from a prior run; zeros on a fresh start.
///
/// Derived at construction and held alongside the configuration rather
/// than injected into it. The caller's bundle is never mutated.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PrevRun {
    pub current: f64,
    pub phi_applied: f64,
}

/// One simulation run of the porous electrode cell.
///
/// Setup is ordered: domains are allocated once, then variables are
/// initialized, then the driver integrates through the reporting times.
/// Performing a step out of order is an error.
pub struct Simulation {
    bundle: ConfigBundle,
    checkpoint: Option<CheckpointRecord>,
    prev: PrevRun,
    init_seed: Option<u64>,
    domain: Option<CellDomain>,
    state: Option<CellState>,
}

impl Simulation {
    /// Validate the bundle and, when a restart directory is configured,
    /// load the prior run's checkpoint fully into memory and derive the
    /// previous-run scalars from its last samples.
    pub fn new(bundle: ConfigBundle) -> SimResult<Self> {
        validate_bundle(&bundle).map_err(pet_config::ConfigError::from)?;

        let checkpoint = match &bundle.system.prev_dir {
            Some(dir) => Some(load_checkpoint(dir)?),
            None => None,
        };
        let prev = match &checkpoint {
            Some(record) => PrevRun {
                current: record.last_scalar(keys::current())?,
                phi_applied: record.last_scalar(keys::phi_applied())?,
            },
            None => PrevRun::default(),
        };

        Ok(Self {
            bundle,
            checkpoint,
            prev,
            init_seed: None,
            domain: None,
            state: None,
        })
    }

    /// Seed the fresh-start perturbation generator for reproducible
    /// initialization. Ignored on restart.
    pub fn with_init_seed(mut self, seed: u64) -> Self {
        self.init_seed = Some(seed);
        self
    }

    pub fn bundle(&self) -> &ConfigBundle {
        &self.bundle
    }

    pub fn prev_run(&self) -> PrevRun {
        self.prev
    }

    pub fn domain(&self) -> Option<&CellDomain> {
        self.domain.as_ref()
    }

    pub fn state(&self) -> Option<&CellState> {
        self.state.as_ref()
    }

    /// Allocate the cell's index spaces. Runs exactly once.
    pub fn set_up_domains(&mut self) -> SimResult<()> {
        if self.domain.is_some() {
            return Err(SimError::DomainAlreadyBuilt);
        }
        self.domain = Some(CellDomain::build(&self.bundle.system)?);
        Ok(())
    }

    /// Assign an initial condition or guess to every variable, from the
    /// mode selected at construction: analytic defaults, or the
    /// checkpoint's last time samples.
    pub fn set_up_variables(&mut self) -> SimResult<()> {
        let domain = self
            .domain
            .as_ref()
            .ok_or(SimError::PrematureInitialization {
                what: "variables initialized before domain allocation",
            })?;

        let state = match &self.checkpoint {
            Some(record) => {
                let mut source = Restart::new(record);
                initialize_state(domain, &self.bundle, &mut source)?
            }
            None => {
                let mut source = match self.init_seed {
                    Some(seed) => FreshStart::with_seed(&self.bundle.system, seed),
                    None => FreshStart::new(&self.bundle.system),
                };
                initialize_state(domain, &self.bundle, &mut source)?
            }
        };
        self.state = Some(state);
        Ok(())
    }

    /// Drive the solver through its reporting times. `time_scale_s`
    /// converts nondimensional clock values to seconds for log output.
    pub fn run<S: DaeSolver + ?Sized>(
        &mut self,
        solver: &mut S,
        time_scale_s: f64,
    ) -> SimResult<RunOutcome> {
        if self.state.is_none() {
            return Err(SimError::PrematureInitialization {
                what: "run requested before variable initialization",
            });
        }
        driver::drive(solver, time_scale_s)
    }
}
