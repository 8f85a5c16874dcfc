//! Initialized variable values for the cell.
//!
//! Differential variables (concentration profiles, electrolyte
//! concentration) carry exact initial conditions; algebraic variables
//! (potentials, averages, reaction rates, filling fractions) carry
//! starting guesses consumed by the solver's initial nonlinear solve.

use pet_core::Electrode;

/// Per-particle concentration fields. The shape is fixed by the solid
/// kind resolved once at initialization.
#[derive(Debug, Clone, PartialEq)]
pub enum ParticleState {
    /// One profile plus its spatial average.
    Single {
        /// Average concentration (guess).
        cbar: f64,
        /// Per-point concentration profile (initial condition).
        c: Vec<f64>,
    },
    /// Two independent profiles, each with its own average, plus a
    /// combined average.
    Two {
        c1bar: f64,
        c2bar: f64,
        /// Combined average (guess).
        cbar: f64,
        /// Per-point profiles (initial conditions).
        c1: Vec<f64>,
        c2: Vec<f64>,
    },
}

impl ParticleState {
    pub fn npoints(&self) -> usize {
        match self {
            ParticleState::Single { c, .. } => c.len(),
            ParticleState::Two { c1, .. } => c1.len(),
        }
    }
}

/// Electrolyte variables over one region's volumes.
#[derive(Debug, Clone, PartialEq)]
pub struct ElectrolyteState {
    /// Concentration per volume (initial condition).
    pub c: Vec<f64>,
    /// Potential per volume (guess).
    pub phi: Vec<f64>,
}

/// Initialized variables for one electrode.
#[derive(Debug, Clone, PartialEq)]
pub struct TrodeState {
    pub trode: Electrode,
    /// Filling fraction (guess).
    pub ffrac: f64,
    /// Volumetric reaction rate per volume (guess).
    pub reaction_rate: Vec<f64>,
    /// Bulk electron-conducting phase potential per volume (guess).
    pub phi_bulk: Vec<f64>,
    pub lyte: ElectrolyteState,
    /// Indexed `[vol][part]`.
    pub particles: Vec<Vec<ParticleState>>,
}

/// Every initialized variable in the cell, written exactly once before
/// the first integration step.
#[derive(Debug, Clone, PartialEq)]
pub struct CellState {
    pub trodes: Vec<TrodeState>,
    /// Present iff the domain has separator volumes.
    pub separator_lyte: Option<ElectrolyteState>,
    /// Applied cell potential (guess).
    pub phi_applied: f64,
    /// Always-zero marker consumed by the model's voltage-cutoff
    /// condition.
    pub cutoff_marker: f64,
}

impl CellState {
    pub fn trode(&self, trode: Electrode) -> Option<&TrodeState> {
        self.trodes.iter().find(|t| t.trode == trode)
    }
}
