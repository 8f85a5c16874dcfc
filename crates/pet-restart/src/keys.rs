//! Checkpoint key construction.
//!
//! Key names follow the reporting layer's convention: a quantity name,
//! optionally qualified by region label and volume/particle indices.

use pet_core::{Electrode, ParticleRef, Region};

pub fn current() -> &'static str {
    "current"
}

pub fn phi_applied() -> &'static str {
    "phi_applied"
}

pub fn ffrac(trode: Electrode) -> String {
    format!("ffrac_{trode}")
}

pub fn reaction_rate(trode: Electrode) -> String {
    format!("R_Vp_{trode}")
}

pub fn phi_bulk(trode: Electrode) -> String {
    format!("phi_bulk_{trode}")
}

pub fn c_lyte(region: Region) -> String {
    format!("c_lyte_{region}")
}

pub fn phi_lyte(region: Region) -> String {
    format!("phi_lyte_{region}")
}

/// Per-particle field suffixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartField {
    /// Concentration profile (single-field particles).
    C,
    /// Spatial average (both kinds; the combined average for two-field).
    Cbar,
    /// First/second field profiles and averages (two-field particles).
    C1,
    C2,
    C1bar,
    C2bar,
}

impl PartField {
    pub fn suffix(self) -> &'static str {
        match self {
            PartField::C => "c",
            PartField::Cbar => "cbar",
            PartField::C1 => "c1",
            PartField::C2 => "c2",
            PartField::C1bar => "c1bar",
            PartField::C2bar => "c2bar",
        }
    }
}

pub fn particle(part: ParticleRef, field: PartField) -> String {
    format!("{}{}", part.key_prefix(), field.suffix())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_match_reporting_convention() {
        assert_eq!(ffrac(Electrode::Cathode), "ffrac_c");
        assert_eq!(reaction_rate(Electrode::Anode), "R_Vp_a");
        assert_eq!(phi_bulk(Electrode::Cathode), "phi_bulk_c");
        assert_eq!(c_lyte(Region::Separator), "c_lyte_s");
        assert_eq!(phi_lyte(Region::Electrode(Electrode::Anode)), "phi_lyte_a");
    }

    #[test]
    fn particle_keys_carry_all_indices() {
        let p = ParticleRef::new(Electrode::Cathode, 1, 4);
        assert_eq!(particle(p, PartField::C), "partTrodecvol1part4_c");
        assert_eq!(particle(p, PartField::C2bar), "partTrodecvol1part4_c2bar");
    }
}
