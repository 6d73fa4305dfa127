//! # Ventilation stage
//!
//! The single control rule of the habitat: ventilation throughput follows
//! the hydrogen stock. No hysteresis and no occupant-driven demand response;
//! the fans run exactly as hard as the fuel on hand allows.

use tracing::info;

use super::state::SystemState;

/// Hard ceiling on ventilation throughput in cubic meters per hour.
const MAX_VENTILATION_RATE_M3PH: f64 = 500.0;

/// Sets the ventilation rate from the available hydrogen and reports any
/// resulting activity.
///
/// With stock on hand the rate is the stored volume, floored to a whole
/// figure and capped at 500 m³/h; with none the fans stop. The status line
/// is emitted only while the fans run.
pub fn update_ventilation_rate(state: &mut SystemState) {
    state.ventilation_rate_m3ph = if state.hydrogen_storage_m3 > 0.0 {
        MAX_VENTILATION_RATE_M3PH.min(state.hydrogen_storage_m3.floor())
    } else {
        0.0
    };

    if state.ventilation_rate_m3ph > 0.0 {
        info!(
            ventilation_rate_m3ph = state.ventilation_rate_m3ph,
            "ventilating"
        );
    }
}
