//! # Simulation scheduling
//!
//! Drives a pool of independent [`physics::Environment`] instances forward
//! on a fixed physics clock that is decoupled from the host's frame
//! callback. The host calls [`Scheduler::advance`] once per frame with its
//! current clock reading; the scheduler catches simulated time up in fixed
//! `dt` increments (bounded, see [`scheduler::MAX_TICKS_PER_ADVANCE`]),
//! applying the level's policy function to every run each tick and
//! accumulating episodic reward. After the call the host reads back
//! [`Scheduler::runs`] and [`Scheduler::rewards`] to redraw.

pub mod evaluate;
pub mod params;
pub mod rewards;
pub mod run;
pub mod scheduler;

pub use evaluate::average_total_reward;
pub use params::{ParamError, Parameter, ParameterSet};
pub use rewards::RewardHistory;
pub use run::{ControlState, EpisodeState, Run};
pub use scheduler::{AdvanceReport, Scheduler, SchedulerConfig, MAX_TICKS_PER_ADVANCE};

use physics::Observation;

/// A hand-written control policy: computes a torque from an observation,
/// reading its named tunables through the lookup argument.
///
/// Policies must be pure functions of their arguments. The lookup is also
/// how tunables come into existence: during the one-time discovery pass
/// (see [`ParameterSet::discover`]) every distinct name the policy asks for
/// is registered, in first-seen order.
pub type Policy = fn(&Observation, &mut dyn FnMut(&str) -> f32) -> f32;
