//! Inverted pendulum ("paddle") dynamics.

use std::f32::consts::PI;

use crate::env::{Environment, Observation};
use crate::math::{clip, normalize_angle};
use crate::rng::SeededRng;

/// Physical constants for a pendulum instance.
#[derive(Clone, Copy, Debug)]
pub struct PendulumConfig {
    /// Integration timestep in seconds of simulated time.
    pub dt: f32,
    /// Gravitational acceleration.
    pub gravity: f32,
    /// Rod mass in kg.
    pub mass: f32,
    /// Rod length in meters.
    pub length: f32,
    /// Angular velocity saturation.
    pub max_speed: f32,
    /// Control input saturation.
    pub max_torque: f32,
}

impl Default for PendulumConfig {
    fn default() -> Self {
        Self {
            dt: 0.04,
            gravity: 10.0,
            mass: 1.0,
            length: 1.0,
            max_speed: 8.0,
            max_torque: 2.0,
        }
    }
}

/// One inverted pendulum, advanced with semi-implicit Euler integration.
///
/// `theta` is zero when the paddle points straight up and is kept
/// normalized to `(-PI, PI]`; `theta_dot` is clamped to the configured
/// speed limit after every step.
pub struct PendulumEnv {
    pub theta: f32,
    pub theta_dot: f32,
    /// Last applied, clamped control input. Diagnostic only.
    pub last_torque: f32,
    pub config: PendulumConfig,
}

impl PendulumEnv {
    /// Creates a pendulum whose initial angle and velocity are derived
    /// deterministically from `seed`.
    #[must_use]
    pub fn new(seed: &str) -> Self {
        Self::with_config(seed, PendulumConfig::default())
    }

    #[must_use]
    pub fn with_config(seed: &str, config: PendulumConfig) -> Self {
        let mut rng = SeededRng::new(seed);
        Self {
            theta: PI * rng.uniform11(),
            theta_dot: 0.5 * config.max_speed * rng.uniform11(),
            last_torque: 0.0,
            config,
        }
    }
}

impl Environment for PendulumEnv {
    fn step(&mut self, torque: f32) -> f32 {
        let PendulumConfig {
            dt,
            gravity: g,
            mass: m,
            length: l,
            max_speed,
            max_torque,
        } = self.config;

        let torque = clip(torque, -max_torque, max_torque);
        self.last_torque = torque;

        let cost = normalize_angle(self.theta).powi(2)
            + 0.1 * self.theta_dot.powi(2)
            + 0.001 * torque.powi(2);

        // Semi-implicit: the updated velocity feeds the position update,
        // and the position update sees the velocity before clamping.
        let theta_dot = self.theta_dot
            + (-3.0 * g / (2.0 * l) * (self.theta + PI).sin() + 3.0 / (m * l * l) * torque) * dt;
        let theta = self.theta + theta_dot * dt;

        self.theta_dot = clip(theta_dot, -max_speed, max_speed);
        self.theta = normalize_angle(theta);

        -cost
    }

    fn observe(&self) -> Observation {
        Observation {
            theta: self.theta,
            theta_dot: self.theta_dot,
            x: self.theta.sin(),
            y: self.theta.cos(),
        }
    }
}
