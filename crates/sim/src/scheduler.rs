//! Fixed-timestep driver for a pool of independent runs.
//!
//! The physics clock ticks in fixed `dt` increments no matter how fast or
//! slow the host's frame callback arrives. Each tick every active run
//! applies its cached pending action, banks the reward, and computes the
//! action for the next tick; a run whose episode reaches the horizon has
//! its total recorded and is recycled in place.

use physics::{Environment, SeededRng};
use tracing::warn;

use crate::params::{ParamError, ParameterSet};
use crate::rewards::RewardHistory;
use crate::run::{ControlState, EpisodeState, Run};
use crate::Policy;

/// Upper bound on physics ticks executed by one `advance` call. When a
/// frame arrives later than this many ticks, simulated time snaps forward
/// instead of stalling the host in an ever-growing catch-up loop.
pub const MAX_TICKS_PER_ADVANCE: u32 = 10;

/// Seed for the throwaway environment used while discovering parameters.
const DISCOVERY_SEED: &str = "YAAA";

/// Level-supplied scheduler settings.
#[derive(Clone, Debug)]
pub struct SchedulerConfig {
    /// Episode horizon in ticks.
    pub ticks_per_episode: u32,
    /// Initial number of parallel runs.
    pub pool_size: usize,
    /// Physics clock period in seconds.
    pub dt: f64,
    /// Seed phrase keying the stream of per-run seeds.
    pub seed: String,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            ticks_per_episode: 100,
            pool_size: 6,
            dt: 1.0 / 120.0,
            seed: "lots of apples".to_owned(),
        }
    }
}

/// What a single [`Scheduler::advance`] call did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AdvanceReport {
    /// Physics ticks executed during the call.
    pub ticks_run: u32,
    /// The host clock outran the tick bound and simulated time was
    /// snapped forward, silently dropping the difference.
    pub fell_behind: bool,
}

/// Owns the run pool and everything episode-scoped that surrounds it: the
/// parameter table, the reward history, and the seed stream runs draw
/// replacements from.
pub struct Scheduler<E: Environment> {
    policy: Policy,
    make_env: Box<dyn Fn(&str) -> E>,
    ticks_per_episode: u32,
    dt: f64,
    runs: Vec<Run<E>>,
    params: ParameterSet,
    rewards: RewardHistory,
    seed_stream: SeededRng,
    last_physics_time: Option<f64>,
    fell_behind_count: u64,
}

fn next_seed(stream: &mut SeededRng) -> String {
    format!("{:08x}", stream.next_u32())
}

impl<E: Environment> Scheduler<E> {
    /// Builds a scheduler for `policy` over environments from `make_env`,
    /// then performs the one-time parameter discovery pass against an
    /// environment built from a fixed seed.
    pub fn new_with(
        policy: Policy,
        config: SchedulerConfig,
        make_env: impl Fn(&str) -> E + 'static,
    ) -> Self {
        let mut params = ParameterSet::default();
        params.discover(policy, &make_env(DISCOVERY_SEED).observe());

        let mut scheduler = Self {
            policy,
            make_env: Box::new(make_env),
            ticks_per_episode: config.ticks_per_episode,
            dt: config.dt,
            runs: Vec::new(),
            params,
            rewards: RewardHistory::default(),
            seed_stream: SeededRng::new(&config.seed),
            last_physics_time: None,
            fell_behind_count: 0,
        };
        scheduler.reconcile_pool(config.pool_size);
        scheduler
    }

    /// Catches simulated time up to the host clock `now` (seconds).
    ///
    /// Runs at most [`MAX_TICKS_PER_ADVANCE`] fixed-size ticks. If the gap
    /// is still larger than one tick afterwards, simulated time snaps to
    /// `now` and the report flags the slip; the simulation keeps running
    /// either way.
    pub fn advance(&mut self, now: f64) -> AdvanceReport {
        let Some(mut last) = self.last_physics_time else {
            self.physics_tick();
            self.last_physics_time = Some(now);
            return AdvanceReport {
                ticks_run: 1,
                fell_behind: false,
            };
        };

        let mut ticks_run = 0;
        while ticks_run < MAX_TICKS_PER_ADVANCE && last + self.dt <= now {
            self.physics_tick();
            last += self.dt;
            ticks_run += 1;
        }

        let fell_behind = last + self.dt <= now;
        if fell_behind {
            self.fell_behind_count += 1;
            warn!(
                behind_seconds = now - last,
                "physics cannot keep up with the host clock; snapping forward"
            );
            last = now;
        }

        self.last_physics_time = Some(last);
        AdvanceReport {
            ticks_run,
            fell_behind,
        }
    }

    /// Resizes the pool to `max(0, floor(n))` runs. Shrinking discards
    /// from the end; growing appends freshly seeded runs with default
    /// controls. Retained runs keep their episode and control state.
    pub fn set_pool_size(&mut self, n: f32) {
        self.reconcile_pool(n.floor().max(0.0) as usize);
    }

    /// Validates and stores a parameter edit. An accepted change restarts
    /// every episode and clears the reward history; rejected input leaves
    /// the simulation untouched.
    pub fn set_parameter(&mut self, name: &str, value: f32) -> Result<(), ParamError> {
        if self.params.set(name, value)? {
            self.on_parameter_changed();
        }
        Ok(())
    }

    /// Restarts every run on a fresh episode and clears the reward
    /// history. Totals accumulated under the old parameters are not
    /// comparable to totals under the new ones, and half-finished episodes
    /// would mix the two regimes.
    pub fn on_parameter_changed(&mut self) {
        let Self {
            runs,
            rewards,
            params,
            seed_stream,
            make_env,
            policy,
            ..
        } = self;
        let policy = *policy;

        for run in runs.iter_mut() {
            let seed = if run.control.reseed_on_reset {
                next_seed(seed_stream)
            } else {
                run.episode.seed.clone()
            };
            run.episode = EpisodeState::spawn(seed, &**make_env, policy, params);
        }
        rewards.clear();
    }

    /// Queues one extra episode tick for the run, typically used while it
    /// is paused. Stale indices are ignored.
    pub fn request_manual_step(&mut self, run: usize) {
        if let Some(r) = self.runs.get_mut(run) {
            r.control.manual_steps += 1;
        }
    }

    pub fn set_paused(&mut self, run: usize, paused: bool) {
        if let Some(r) = self.runs.get_mut(run) {
            r.control.is_paused = paused;
        }
    }

    /// Sets how many episode ticks the run advances per physics tick.
    /// Fractions give slow motion; negative input clamps to zero.
    pub fn set_speed(&mut self, run: usize, ticks_per_step: f32) {
        if let Some(r) = self.runs.get_mut(run) {
            r.control.ticks_per_step = ticks_per_step.max(0.0);
        }
    }

    /// Replaces the seed the run will replay on its next reset.
    pub fn set_seed(&mut self, run: usize, seed: String) {
        if let Some(r) = self.runs.get_mut(run) {
            r.episode.seed = seed;
        }
    }

    pub fn set_reseed_on_reset(&mut self, run: usize, reseed: bool) {
        if let Some(r) = self.runs.get_mut(run) {
            r.control.reseed_on_reset = reseed;
        }
    }

    /// Ordered snapshots of the pool for display.
    #[must_use]
    pub fn runs(&self) -> &[Run<E>] {
        &self.runs
    }

    #[must_use]
    pub fn rewards(&self) -> &RewardHistory {
        &self.rewards
    }

    #[must_use]
    pub fn parameters(&self) -> &ParameterSet {
        &self.params
    }

    /// Running mean of completed-episode totals.
    #[must_use]
    pub fn average_reward(&self) -> Option<f32> {
        self.rewards.mean()
    }

    /// How many times `advance` had to snap the clock forward.
    #[must_use]
    pub fn fell_behind_count(&self) -> u64 {
        self.fell_behind_count
    }

    /// Pool resizing never happens mid-tick: mutators run between frames
    /// on the host thread, so the run list is stable during the per-run
    /// loop of `physics_tick`.
    fn reconcile_pool(&mut self, target: usize) {
        let Self {
            runs,
            params,
            seed_stream,
            make_env,
            policy,
            ..
        } = self;
        let policy = *policy;

        runs.truncate(target);
        while runs.len() < target {
            let seed = next_seed(seed_stream);
            runs.push(Run {
                episode: EpisodeState::spawn(seed, &**make_env, policy, params),
                control: ControlState::default(),
            });
        }
    }

    fn physics_tick(&mut self) {
        let Self {
            runs,
            rewards,
            params,
            seed_stream,
            make_env,
            policy,
            ticks_per_episode,
            ..
        } = self;
        let policy = *policy;
        let horizon = *ticks_per_episode as f32;

        for run in runs.iter_mut() {
            let control = &mut run.control;
            let ep = &mut run.episode;

            let next_tick = ep.tick
                + control.manual_steps as f32
                + if control.is_paused {
                    0.0
                } else {
                    control.ticks_per_step
                };
            control.manual_steps = 0;

            let mut t = ep.tick.floor();
            let mut completed = false;
            while t + 1.0 <= next_tick && !completed {
                ep.total_reward += ep.env.step(ep.pending_action);
                ep.observation = ep.env.observe();
                let mut lookup = |name: &str| params.value(name);
                ep.pending_action = policy(&ep.observation, &mut lookup);
                t += 1.0;
                completed = t >= horizon;
            }

            if completed {
                rewards.push(ep.total_reward);
                let seed = if control.reseed_on_reset {
                    next_seed(seed_stream)
                } else {
                    ep.seed.clone()
                };
                *ep = EpisodeState::spawn(seed, &**make_env, policy, params);
            } else {
                ep.tick = next_tick;
            }
        }
    }
}
