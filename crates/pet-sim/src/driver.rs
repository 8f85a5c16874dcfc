//! Time-stepping driver.
//!
//! Walks the solver's ordered reporting times, integrating up to each
//! one and recording the result. The solver may halt early at a model
//! discontinuity (e.g. a voltage cutoff); that is a normal run boundary,
//! not an error, and no further reporting times are attempted.

use crate::error::{SimError, SimResult};

/// Discontinuity handling requested from the solver for one integration
/// call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopMode {
    /// Halt integration at a detected model discontinuity.
    StopAtDiscontinuity,
    /// Integrate through discontinuities to the target time.
    IgnoreDiscontinuity,
}

/// Contract of the external DAE solver this layer drives. Residual
/// assembly, Jacobians, Newton iteration, step-size control, and event
/// detection all live behind this trait.
pub trait DaeSolver {
    /// Ordered reporting times for the run.
    fn reporting_times(&self) -> Vec<f64>;

    /// Simulation clock value reached so far.
    fn current_time(&self) -> f64;

    /// Total simulated horizon, for progress reporting.
    fn time_horizon(&self) -> f64;

    /// Integrate from the current clock value up to `target`, returning
    /// the clock value actually reached. A reached value strictly below
    /// `target` signals an early halt at a discontinuity.
    fn integrate_until(&mut self, target: f64, mode: StopMode) -> SimResult<f64>;

    /// Record results at the given clock value.
    fn record_data(&mut self, time: f64) -> SimResult<()>;

    /// Progress observation, as the fraction of the horizon elapsed.
    fn set_progress(&mut self, fraction: f64);
}

/// Driver lifecycle over one simulation clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// Before the first step.
    Idle,
    /// Between reporting times.
    Integrating,
    /// Terminal: reporting times exhausted or early halt.
    Stopped,
}

/// One completed step: the time requested and the time the solver
/// actually reached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepRecord {
    pub requested: f64,
    pub reached: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Every reporting time was processed.
    ReportTimesExhausted,
    /// The solver halted before a requested reporting time.
    Discontinuity,
}

/// Result of driving a run to its terminal state.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub steps: Vec<StepRecord>,
    pub reason: StopReason,
}

/// Drives one simulation run end-to-end. Single-threaded; control passes
/// to the solver for the duration of each integration call.
#[derive(Debug)]
pub struct Driver {
    /// Nondimensional time is scaled by this factor for log output, in
    /// seconds.
    time_scale_s: f64,
    state: DriverState,
    steps: Vec<StepRecord>,
}

impl Driver {
    pub fn new(time_scale_s: f64) -> Self {
        Self {
            time_scale_s,
            state: DriverState::Idle,
            steps: Vec::new(),
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn steps(&self) -> &[StepRecord] {
        &self.steps
    }

    /// Run the solver through its reporting times until a terminal state.
    pub fn run<S: DaeSolver + ?Sized>(&mut self, solver: &mut S) -> SimResult<RunOutcome> {
        if self.state != DriverState::Idle {
            return Err(SimError::InvalidArg {
                what: "driver already ran; one driver drives one run",
            });
        }
        let horizon = solver.time_horizon();
        if !(horizon > 0.0) {
            return Err(SimError::InvalidArg {
                what: "time horizon must be positive",
            });
        }

        let mut reason = StopReason::ReportTimesExhausted;
        for next_time in solver.reporting_times() {
            self.state = DriverState::Integrating;
            tracing::info!(
                "Integrating from {:.2} to {:.2} s ...",
                solver.current_time() * self.time_scale_s,
                next_time * self.time_scale_s
            );
            let reached = solver.integrate_until(next_time, StopMode::StopAtDiscontinuity)?;
            let now = solver.current_time();
            solver.record_data(now)?;
            solver.set_progress((now / horizon).clamp(0.0, 1.0));
            self.steps.push(StepRecord {
                requested: next_time,
                reached,
            });
            if reached < next_time {
                // The solver returned before the requested time: it
                // stopped at a discontinuity. Treat as a natural run
                // boundary.
                reason = StopReason::Discontinuity;
                break;
            }
        }
        self.state = DriverState::Stopped;

        Ok(RunOutcome {
            steps: self.steps.clone(),
            reason,
        })
    }
}

/// Convenience wrapper: drive a fresh [`Driver`] over one run.
pub fn drive<S: DaeSolver + ?Sized>(solver: &mut S, time_scale_s: f64) -> SimResult<RunOutcome> {
    Driver::new(time_scale_s).run(solver)
}
