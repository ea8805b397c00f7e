#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # Paddle Physics
//!
//! Deterministic inverted-pendulum dynamics for the paddle balancing game.
//!
//! This crate is the leaf of the simulation stack: it knows nothing about
//! pools, policies or scheduling. It provides exactly what one simulated
//! paddle needs:
//!
//! -   **Dynamics:** [`PendulumEnv`] advances a single pendulum one fixed
//!     timestep at a time with semi-implicit Euler integration, returning a
//!     scalar reward per step.
//! -   **Reproducibility:** [`SeededRng`] turns an arbitrary string seed
//!     into a deterministic number stream, so the same seed always yields
//!     the same initial conditions on every platform.
//! -   **The seam:** the [`Environment`] trait is what the scheduling layer
//!     drives, keeping it independent of this particular environment.
//!
//! ## Usage
//!
//! ```rust
//! use physics::{Environment, PendulumEnv};
//!
//! let mut env = PendulumEnv::new("0000002a");
//! let reward = env.step(1.5);
//! let obs = env.observe();
//! assert!(reward <= 0.0);
//! assert!(obs.theta > -std::f32::consts::PI && obs.theta <= std::f32::consts::PI);
//! ```

pub mod env;
pub mod math;
pub mod pendulum;
pub mod rng;

pub use env::{Environment, Observation};
pub use math::{clip, normalize_angle};
pub use pendulum::{PendulumConfig, PendulumEnv};
pub use rng::SeededRng;
