//! Full setup-and-run sequence against a trivial solver stub.

use pet_config::{
    ConfigBundle, ElectrodeConfig, ParticleDef, PerElectrode, SystemConfig, VolumeCounts,
};
use pet_sim::{DaeSolver, SimError, SimResult, Simulation, StopMode, StopReason};

struct PassthroughSolver {
    clock: f64,
}

impl DaeSolver for PassthroughSolver {
    fn reporting_times(&self) -> Vec<f64> {
        vec![0.5, 1.0]
    }

    fn current_time(&self) -> f64 {
        self.clock
    }

    fn time_horizon(&self) -> f64 {
        1.0
    }

    fn integrate_until(&mut self, target: f64, _mode: StopMode) -> SimResult<f64> {
        self.clock = target;
        Ok(self.clock)
    }

    fn record_data(&mut self, _time: f64) -> SimResult<()> {
        Ok(())
    }

    fn set_progress(&mut self, _fraction: f64) {}
}

fn bundle() -> ConfigBundle {
    ConfigBundle {
        system: SystemConfig {
            nvol: VolumeCounts { a: 0, c: 1, s: 0 },
            npart: PerElectrode { a: None, c: 1 },
            psd_num: PerElectrode {
                a: None,
                c: vec![vec![6.0]],
            },
            one_var_types: vec!["homog".to_string()],
            two_var_types: vec!["homog2".to_string()],
            cs0: PerElectrode { a: None, c: 0.5 },
            c0: 1.0,
            phi_cathode: 0.0,
            prev_dir: None,
        },
        electrodes: PerElectrode {
            a: None,
            c: ElectrodeConfig {
                particles: vec![vec![ParticleDef {
                    solid_type: "homog".to_string(),
                }]],
            },
        },
    }
}

#[test]
fn setup_then_run_completes() {
    let mut sim = Simulation::new(bundle()).unwrap().with_init_seed(1);
    sim.set_up_domains().unwrap();
    sim.set_up_variables().unwrap();

    let mut solver = PassthroughSolver { clock: 0.0 };
    let outcome = sim.run(&mut solver, 60.0).unwrap();
    assert_eq!(outcome.reason, StopReason::ReportTimesExhausted);
    assert_eq!(outcome.steps.len(), 2);
}

#[test]
fn run_before_initialization_is_premature() {
    let mut sim = Simulation::new(bundle()).unwrap();
    sim.set_up_domains().unwrap();

    let mut solver = PassthroughSolver { clock: 0.0 };
    let err = sim.run(&mut solver, 1.0).unwrap_err();
    assert!(matches!(err, SimError::PrematureInitialization { .. }));
}
