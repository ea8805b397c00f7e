//! Offline policy scoring, without a scheduler.

use physics::Environment;

use crate::params::ParameterSet;
use crate::Policy;

/// Mean episodic reward of `policy` over one fresh environment per seed,
/// each driven for `ticks` steps under the current parameter values.
///
/// Deterministic for a fixed seed list, which makes it the reference
/// check for hand-tuned parameters: no pool, no wall clock, no playback
/// controls involved.
pub fn average_total_reward<E: Environment>(
    policy: Policy,
    make_env: impl Fn(&str) -> E,
    seeds: &[&str],
    ticks: u32,
    params: &ParameterSet,
) -> f32 {
    let mut sum = 0.0;
    for seed in seeds {
        let mut env = make_env(seed);
        let mut total = 0.0;
        for _ in 0..ticks {
            let mut lookup = |name: &str| params.value(name);
            let action = policy(&env.observe(), &mut lookup);
            total += env.step(action);
        }
        sum += total;
    }
    sum / seeds.len() as f32
}
