//! Configuration schema definitions.
//!
//! Two nested mappings make up the configuration bundle: system-level
//! parameters (discretization counts, initial concentrations, restart
//! directory) and electrode-level parameters (per-particle metadata).
//! The bundle is immutable once simulation setup begins.

use pet_core::Electrode;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A value held per electrode. The anode is optional (half cells run
/// without one); the cathode is always present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PerElectrode<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a: Option<T>,
    pub c: T,
}

impl<T> PerElectrode<T> {
    pub fn get(&self, trode: Electrode) -> Option<&T> {
        match trode {
            Electrode::Anode => self.a.as_ref(),
            Electrode::Cathode => Some(&self.c),
        }
    }
}

/// Volume counts per region. The separator may have zero volumes; the
/// anode is absent when its count is zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VolumeCounts {
    #[serde(default)]
    pub a: usize,
    pub c: usize,
    #[serde(default)]
    pub s: usize,
}

/// Classification of a solid-type tag: how many concentration fields the
/// particle carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolidKind {
    /// One concentration profile plus its spatial average.
    SingleField,
    /// Two independent concentration profiles, each with its own average,
    /// plus a combined average.
    TwoField,
}

/// System-level parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SystemConfig {
    /// Volumes per region.
    pub nvol: VolumeCounts,
    /// Particles per volume, per electrode.
    pub npart: PerElectrode<usize>,
    /// Particle-size-distribution point counts, indexed `[vol][part]`.
    /// Stored as floats by upstream tooling; read truncated to integers.
    pub psd_num: PerElectrode<Vec<Vec<f64>>>,
    /// Solid-type tags owning a single concentration field.
    #[serde(default = "default_one_var_types")]
    pub one_var_types: Vec<String>,
    /// Solid-type tags owning two concentration fields.
    #[serde(default = "default_two_var_types")]
    pub two_var_types: Vec<String>,
    /// Initial solid filling fraction, per electrode.
    pub cs0: PerElectrode<f64>,
    /// Initial electrolyte concentration.
    pub c0: f64,
    /// Cathode reference potential.
    pub phi_cathode: f64,
    /// Directory holding a prior run's checkpoint; `None` for a fresh start.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev_dir: Option<PathBuf>,
}

fn default_one_var_types() -> Vec<String> {
    ["ACR", "diffn", "CHR", "homog", "homog_sdn"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_two_var_types() -> Vec<String> {
    ["diffn2", "CHR2", "homog2", "homog2_sdn"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl SystemConfig {
    /// Electrodes present in this cell: the cathode always, the anode when
    /// it has at least one volume.
    pub fn trodes(&self) -> Vec<Electrode> {
        let mut trodes = vec![Electrode::Cathode];
        if self.nvol.a >= 1 {
            trodes.push(Electrode::Anode);
        }
        trodes
    }

    pub fn nvol(&self, trode: Electrode) -> usize {
        match trode {
            Electrode::Anode => self.nvol.a,
            Electrode::Cathode => self.nvol.c,
        }
    }

    pub fn npart(&self, trode: Electrode) -> usize {
        self.npart.get(trode).copied().unwrap_or(0)
    }

    /// Classify a solid-type tag against the two closed kind-sets.
    /// `None` when the tag belongs to neither.
    pub fn classify_solid(&self, tag: &str) -> Option<SolidKind> {
        if self.one_var_types.iter().any(|t| t == tag) {
            Some(SolidKind::SingleField)
        } else if self.two_var_types.iter().any(|t| t == tag) {
            Some(SolidKind::TwoField)
        } else {
            None
        }
    }

    /// Whether this configuration restarts from a prior run's checkpoint.
    pub fn is_restart(&self) -> bool {
        self.prev_dir.is_some()
    }
}

/// Per-particle metadata for one electrode, indexed `[vol][part]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ElectrodeConfig {
    pub particles: Vec<Vec<ParticleDef>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParticleDef {
    /// Solid-type tag, drawn from one of the two closed kind-sets.
    #[serde(rename = "type")]
    pub solid_type: String,
}

/// The full configuration bundle supplied by the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConfigBundle {
    pub system: SystemConfig,
    pub electrodes: PerElectrode<ElectrodeConfig>,
}
