//! Restart initialization: every quantity comes from the checkpoint's
//! last time sample, with no perturbation.

use pet_config::{
    ConfigBundle, ElectrodeConfig, ParticleDef, PerElectrode, SystemConfig, VolumeCounts,
};
use pet_restart::save_checkpoint;
use pet_sim::{ParticleState, SimError, Simulation};
use std::collections::HashMap;
use std::path::PathBuf;

fn cathode_cell(prev_dir: Option<PathBuf>) -> ConfigBundle {
    ConfigBundle {
        system: SystemConfig {
            nvol: VolumeCounts { a: 0, c: 2, s: 1 },
            npart: PerElectrode { a: None, c: 1 },
            psd_num: PerElectrode {
                a: None,
                c: vec![vec![3.0], vec![4.0]],
            },
            one_var_types: vec!["ACR".to_string()],
            two_var_types: vec!["CHR2".to_string()],
            cs0: PerElectrode { a: None, c: 0.01 },
            c0: 1.0,
            phi_cathode: 0.0,
            prev_dir,
        },
        electrodes: PerElectrode {
            a: None,
            c: ElectrodeConfig {
                particles: vec![
                    vec![ParticleDef {
                        solid_type: "ACR".to_string(),
                    }],
                    vec![ParticleDef {
                        solid_type: "CHR2".to_string(),
                    }],
                ],
            },
        },
    }
}

fn checkpoint_data() -> HashMap<String, Vec<Vec<f64>>> {
    let mut data = HashMap::new();
    let scalar = |v: f64| vec![vec![0.0, v]];
    data.insert("current".to_string(), scalar(0.25));
    data.insert("phi_applied".to_string(), scalar(-0.95));
    data.insert("ffrac_c".to_string(), scalar(0.4));
    data.insert(
        "R_Vp_c".to_string(),
        vec![vec![0.0, 0.0], vec![0.11, 0.22]],
    );
    data.insert(
        "phi_bulk_c".to_string(),
        vec![vec![0.0, 0.0], vec![1.1, 1.2]],
    );
    data.insert("c_lyte_s".to_string(), vec![vec![1.0], vec![0.85]]);
    data.insert("phi_lyte_s".to_string(), vec![vec![0.0], vec![-0.05]]);
    data.insert(
        "c_lyte_c".to_string(),
        vec![vec![1.0, 1.0], vec![0.8, 0.75]],
    );
    data.insert(
        "phi_lyte_c".to_string(),
        vec![vec![0.0, 0.0], vec![-0.1, -0.12]],
    );
    data.insert("partTrodecvol0part0_cbar".to_string(), scalar(0.35));
    data.insert(
        "partTrodecvol0part0_c".to_string(),
        vec![vec![0.01, 0.01, 0.01], vec![0.3, 0.35, 0.4]],
    );
    data.insert("partTrodecvol1part0_c1bar".to_string(), scalar(0.31));
    data.insert("partTrodecvol1part0_c2bar".to_string(), scalar(0.33));
    data.insert("partTrodecvol1part0_cbar".to_string(), scalar(0.32));
    data.insert(
        "partTrodecvol1part0_c1".to_string(),
        vec![vec![0.0; 4], vec![0.30, 0.31, 0.32, 0.33]],
    );
    data.insert(
        "partTrodecvol1part0_c2".to_string(),
        vec![vec![0.0; 4], vec![0.33, 0.32, 0.31, 0.30]],
    );
    data
}

fn write_checkpoint(name: &str, data: &HashMap<String, Vec<Vec<f64>>>) -> PathBuf {
    let dir = std::env::temp_dir().join(name);
    let _ = std::fs::remove_dir_all(&dir);
    save_checkpoint(&dir, data).unwrap();
    dir
}

#[test]
fn restart_reproduces_checkpoint_last_samples() {
    let dir = write_checkpoint("pet_sim_restart_full", &checkpoint_data());
    let mut sim = Simulation::new(cathode_cell(Some(dir))).unwrap();

    // Previous-run scalars are derived at construction, without mutating
    // the configuration bundle.
    assert_eq!(sim.prev_run().current, 0.25);
    assert_eq!(sim.prev_run().phi_applied, -0.95);
    assert_eq!(sim.bundle().system.c0, 1.0);

    sim.set_up_domains().unwrap();
    sim.set_up_variables().unwrap();
    let state = sim.state().unwrap();

    assert_eq!(state.phi_applied, -0.95);

    let cathode = &state.trodes[0];
    assert_eq!(cathode.ffrac, 0.4);
    assert_eq!(cathode.reaction_rate, vec![0.11, 0.22]);
    assert_eq!(cathode.phi_bulk, vec![1.1, 1.2]);
    assert_eq!(cathode.lyte.c, vec![0.8, 0.75]);
    assert_eq!(cathode.lyte.phi, vec![-0.1, -0.12]);

    let sep = state.separator_lyte.as_ref().unwrap();
    assert_eq!(sep.c, vec![0.85]);
    assert_eq!(sep.phi, vec![-0.05]);

    match &cathode.particles[0][0] {
        ParticleState::Single { cbar, c } => {
            assert_eq!(*cbar, 0.35);
            assert_eq!(c, &vec![0.3, 0.35, 0.4]);
        }
        other => panic!("expected single-field particle, got {other:?}"),
    }
    match &cathode.particles[1][0] {
        ParticleState::Two {
            c1bar,
            c2bar,
            cbar,
            c1,
            c2,
        } => {
            assert_eq!((*c1bar, *c2bar, *cbar), (0.31, 0.33, 0.32));
            assert_eq!(c1, &vec![0.30, 0.31, 0.32, 0.33]);
            assert_eq!(c2, &vec![0.33, 0.32, 0.31, 0.30]);
        }
        other => panic!("expected two-field particle, got {other:?}"),
    }
}

#[test]
fn missing_checkpoint_key_fails_deterministically() {
    let mut data = checkpoint_data();
    data.remove("partTrodecvol1part0_c2bar");
    let dir = write_checkpoint("pet_sim_restart_missing_key", &data);

    let mut sim = Simulation::new(cathode_cell(Some(dir))).unwrap();
    sim.set_up_domains().unwrap();
    let err = sim.set_up_variables().unwrap_err();
    match err {
        SimError::Restart(pet_restart::RestartError::MissingKey { key }) => {
            assert_eq!(key, "partTrodecvol1part0_c2bar");
        }
        other => panic!("expected MissingKey, got {other}"),
    }
}

#[test]
fn profile_shape_mismatch_is_rejected() {
    let mut data = checkpoint_data();
    // Live configuration expects 4 points for this particle.
    data.insert(
        "partTrodecvol1part0_c1".to_string(),
        vec![vec![0.3, 0.31, 0.32]],
    );
    let dir = write_checkpoint("pet_sim_restart_bad_shape", &data);

    let mut sim = Simulation::new(cathode_cell(Some(dir))).unwrap();
    sim.set_up_domains().unwrap();
    let err = sim.set_up_variables().unwrap_err();
    assert!(matches!(
        err,
        SimError::Restart(pet_restart::RestartError::ShapeMismatch { .. })
    ));
}
