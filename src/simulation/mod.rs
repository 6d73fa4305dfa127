//! # Habitat Simulation Module
//!
//! Discrete-time simulation of the off-grid habitat's resource chain.
//!
//! ## Components
//!
//! - **State**: the single `SystemState` entity plus the fixed `HabitatConfig`
//! - **Power**: solar generation model and surplus battery charging
//! - **Hydrogen**: electrolysis and compression of the hydrogen stock
//! - **Ventilation**: hydrogen-limited ventilation rate control
//! - **Clock**: injectable time source (`WallClock` for real runs,
//!   `ManualClock` for tests)
//! - **Habitat**: master orchestrator that ticks the stages in fixed order
//!   and paces the run against real time
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use hydrovent::simulation::{HabitatConfig, HabitatSimulation, WallClock};
//! use hydrovent::weather::MockConditions;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn demo() {
//! let probe = Arc::new(MockConditions::new(Default::default()));
//! let mut sim = HabitatSimulation::new(HabitatConfig::default(), Arc::new(WallClock), probe);
//! sim.run(Duration::from_secs(1), 86_400, CancellationToken::new()).await;
//! # }
//! ```

pub mod clock;
pub mod habitat;
pub mod hydrogen;
pub mod power;
pub mod state;
pub mod ventilation;

pub use clock::{ManualClock, TimeSource, WallClock};
pub use habitat::HabitatSimulation;
pub use state::{AirQuality, HabitatConfig, SystemState};
