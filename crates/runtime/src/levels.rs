//! Level definitions: the hand-written policies the player tunes.
//!
//! Each level is a policy plus its scheduler settings. The parameter names
//! a policy reads through `p` become the level's tunable table, in the
//! order of first use.

use physics::{clip, Observation, PendulumEnv};
use sim::{Policy, Scheduler, SchedulerConfig};

/// A playable scenario.
pub struct Level {
    pub name: &'static str,
    /// Guidance text the host shows next to the simulation.
    pub info: &'static str,
    pub policy: Policy,
    pub make_env: fn(&str) -> PendulumEnv,
    pub ticks_per_episode: u32,
    pub pool_size: usize,
}

impl Level {
    /// Builds a scheduler for this level.
    #[must_use]
    pub fn scheduler(&self, seed: &str) -> Scheduler<PendulumEnv> {
        let config = SchedulerConfig {
            ticks_per_episode: self.ticks_per_episode,
            pool_size: self.pool_size,
            seed: seed.to_owned(),
            ..SchedulerConfig::default()
        };
        Scheduler::new_with(self.policy, config, self.make_env)
    }
}

fn linear_policy(obs: &Observation, p: &mut dyn FnMut(&str) -> f32) -> f32 {
    let torque = p("theta_weight") * obs.theta + p("theta_dot_weight") * obs.theta_dot;
    clip(torque, -2.0, 2.0)
}

/// First-matching-rule policy over the Cartesian observation: three
/// (condition, torque) pairs, each a linear form over `x`, `y` and
/// `theta_dot` with a per-rule bias. All parameters are read up front so
/// every name registers during discovery regardless of which rule fires.
fn rule_list_policy(obs: &Observation, p: &mut dyn FnMut(&str) -> f32) -> f32 {
    let mut conditions = [false; 3];
    let mut torques = [0.0_f32; 3];
    for i in 0..3 {
        conditions[i] = obs.x * p(&format!("x cond ({i})"))
            + obs.y * p(&format!("y cond ({i})"))
            + obs.theta_dot * p(&format!("theta. cond ({i})"))
            < p(&format!("bias ({i})"));
        torques[i] = obs.x * p(&format!("x torque ({i})"))
            + obs.y * p(&format!("y torque ({i})"))
            + obs.theta_dot * p(&format!("theta. torque ({i})"));
    }
    for i in 0..3 {
        if conditions[i] {
            return clip(torques[i], -2.0, 2.0);
        }
    }
    0.0
}

#[must_use]
pub fn level1() -> Level {
    Level {
        name: "Level 1",
        info: "Adjust the parameters to keep the paddle upright using as \
               little torque as necessary. There is no strict win \
               condition; around -520 is good.",
        policy: linear_policy,
        make_env: PendulumEnv::new,
        ticks_per_episode: 100,
        pool_size: 6,
    }
}

#[must_use]
pub fn level2() -> Level {
    Level {
        name: "Level 2",
        info: "A bigger model: the first condition that matches picks the \
               torque. With x=.1 and y=.99 the paddle is near-vertical, \
               leaning slightly right. Try beating the developer score \
               of -280.",
        policy: rule_list_policy,
        make_env: PendulumEnv::new,
        ticks_per_episode: 100,
        pool_size: 6,
    }
}
