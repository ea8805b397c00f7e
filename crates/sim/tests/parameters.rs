use physics::{Observation, PendulumEnv};
use sim::{Scheduler, SchedulerConfig};

const DT: f64 = 1.0 / 120.0;

fn linear_policy(obs: &Observation, p: &mut dyn FnMut(&str) -> f32) -> f32 {
    p("theta_weight") * obs.theta + p("theta_dot_weight") * obs.theta_dot
}

fn config(ticks_per_episode: u32, pool_size: usize) -> SchedulerConfig {
    SchedulerConfig {
        ticks_per_episode,
        pool_size,
        ..SchedulerConfig::default()
    }
}

/// Drives exactly `n` physics ticks after the anchoring first call.
fn drive(s: &mut Scheduler<PendulumEnv>, n: u32) {
    s.advance(0.0);
    for k in 1..=n {
        s.advance(f64::from(k) * DT + 0.5 * DT);
    }
}

#[test]
fn discovery_happens_at_construction() {
    let s = Scheduler::new_with(linear_policy, config(100, 1), PendulumEnv::new);
    let names: Vec<&str> = s
        .parameters()
        .as_slice()
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(names, ["theta_weight", "theta_dot_weight"]);
    assert_eq!(s.parameters().value("theta_weight"), 0.0);
}

#[test]
fn accepted_edit_resets_episodes_and_history() {
    let mut s = Scheduler::new_with(linear_policy, config(4, 3), PendulumEnv::new);
    s.set_paused(2, true);
    drive(&mut s, 10);

    assert!(!s.rewards().is_empty());
    assert!(s.runs()[0].episode.total_reward != 0.0);

    s.set_parameter("theta_weight", -2.5).expect("registered");

    assert!(s.rewards().is_empty());
    for run in s.runs() {
        assert_eq!(run.episode.total_reward, 0.0);
        assert_eq!(run.episode.tick, 0.0);
    }
    // Control state is the user's, not the episode's.
    assert!(s.runs()[2].control.is_paused);
    assert_eq!(s.parameters().value("theta_weight"), -2.5);
}

#[test]
fn rejected_edit_changes_nothing() {
    let mut s = Scheduler::new_with(linear_policy, config(100, 1), PendulumEnv::new);
    drive(&mut s, 2);
    let tick = s.runs()[0].episode.tick;
    let total = s.runs()[0].episode.total_reward;

    assert!(s.set_parameter("theta_weight", f32::NAN).is_err());
    assert!(s.set_parameter("theta_weight", f32::NEG_INFINITY).is_err());
    assert!(s.set_parameter("no_such_param", 1.0).is_err());

    assert_eq!(s.runs()[0].episode.tick, tick);
    assert_eq!(s.runs()[0].episode.total_reward, total);
    assert_eq!(s.parameters().value("theta_weight"), 0.0);
}

#[test]
fn storing_the_same_value_does_not_invalidate() {
    let mut s = Scheduler::new_with(linear_policy, config(4, 1), PendulumEnv::new);
    s.set_parameter("theta_weight", 1.0).expect("registered");
    drive(&mut s, 5);
    let completed = s.rewards().len();
    assert!(completed > 0);

    s.set_parameter("theta_weight", 1.0).expect("registered");
    assert_eq!(s.rewards().len(), completed);
}
