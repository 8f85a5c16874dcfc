use core::fmt;

/// Electrode label used throughout the cell model.
///
/// Labels are part of the checkpoint key alphabet and must stay stable:
/// `"a"` for the anode, `"c"` for the cathode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Electrode {
    #[cfg_attr(feature = "serde", serde(rename = "a"))]
    Anode,
    #[cfg_attr(feature = "serde", serde(rename = "c"))]
    Cathode,
}

impl Electrode {
    pub fn label(self) -> &'static str {
        match self {
            Electrode::Anode => "a",
            Electrode::Cathode => "c",
        }
    }
}

impl fmt::Display for Electrode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A discretized region of the cell: an electrode or the separator.
///
/// The separator carries electrolyte volumes but no particles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    Separator,
    Electrode(Electrode),
}

impl Region {
    pub fn label(self) -> &'static str {
        match self {
            Region::Separator => "s",
            Region::Electrode(e) => e.label(),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Reference to one particle: (electrode, volume index, particle index).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ParticleRef {
    pub trode: Electrode,
    pub vol: usize,
    pub part: usize,
}

impl ParticleRef {
    pub fn new(trode: Electrode, vol: usize, part: usize) -> Self {
        Self { trode, vol, part }
    }

    /// Checkpoint key prefix for this particle's fields, e.g.
    /// `partTrodecvol0part2_`.
    pub fn key_prefix(&self) -> String {
        format!(
            "partTrode{l}vol{i}part{j}_",
            l = self.trode.label(),
            i = self.vol,
            j = self.part
        )
    }
}

impl fmt::Display for ParticleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.trode, self.vol, self.part)
    }
}
