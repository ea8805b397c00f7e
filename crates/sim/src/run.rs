//! Pool slots: episode-scoped state plus the longer-lived per-run controls.

use physics::{Environment, Observation};

use crate::params::ParameterSet;
use crate::Policy;

/// State that lives for exactly one episode and is replaced wholesale when
/// the episode ends or parameters change.
pub struct EpisodeState<E> {
    /// Seed that produced `env`; replayed on reset unless the run reseeds.
    pub seed: String,
    pub env: E,
    /// Sum of per-step rewards earned so far this episode.
    pub total_reward: f32,
    /// Fractional progress through the episode. Sub-integer values carry
    /// slow-motion progress across physics ticks.
    pub tick: f32,
    /// Latest observation, cached for display.
    pub observation: Observation,
    /// Action computed from `observation`, applied on the next tick. Kept
    /// separate so the host can show the action about to be taken.
    pub pending_action: f32,
}

impl<E: Environment> EpisodeState<E> {
    /// Fresh episode state for `seed`: a new environment, zeroed
    /// accounting, and the first observation/action pair already cached.
    pub(crate) fn spawn(
        seed: String,
        make_env: &dyn Fn(&str) -> E,
        policy: Policy,
        params: &ParameterSet,
    ) -> Self {
        let env = make_env(&seed);
        let observation = env.observe();
        let mut lookup = |name: &str| params.value(name);
        let pending_action = policy(&observation, &mut lookup);
        Self {
            seed,
            env,
            total_reward: 0.0,
            tick: 0.0,
            observation,
            pending_action,
        }
    }
}

/// Per-slot playback controls. These survive episode resets and parameter
/// changes; only the user changes them.
#[derive(Clone, Debug)]
pub struct ControlState {
    pub is_paused: bool,
    /// Episode ticks advanced per physics tick. Below one is slow motion,
    /// above one fast-forward.
    pub ticks_per_step: f32,
    /// `step` requests since the last physics tick.
    pub manual_steps: u32,
    /// Draw a fresh seed on episode reset instead of replaying the old one.
    pub reseed_on_reset: bool,
}

impl Default for ControlState {
    fn default() -> Self {
        Self {
            is_paused: false,
            ticks_per_step: 1.0,
            manual_steps: 0,
            reseed_on_reset: true,
        }
    }
}

/// One pool slot: the live episode plus its playback controls.
pub struct Run<E> {
    pub episode: EpisodeState<E>,
    pub control: ControlState,
}
