//! # hydrovent
//!
//! Discrete-time simulation of a small off-grid habitat: a solar array
//! charges a battery, the battery drives an electrolyzer that produces
//! hydrogen, a compressor transfers the hydrogen into storage, and the
//! stored hydrogen powers the ventilation system. One state instance, one
//! execution context, one tick per simulated second.

pub mod config;
pub mod simulation;
pub mod telemetry;
pub mod weather;
