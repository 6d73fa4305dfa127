//! # Hydrogen stage
//!
//! Electrolysis converts banked battery energy into stored hydrogen, then
//! compression transfers the stock into the tank, shedding volume to
//! transfer losses. Both efficiencies vary linearly with temperature.

use tracing::debug;

use super::power;
use super::state::{HabitatConfig, SystemState};

/// Electrolyzer operating pressure in atmospheres. The rig runs at ambient
/// pressure, so the pressure term of the efficiency model vanishes.
const ELECTROLYZER_PRESSURE_ATM: f64 = 1.0;

/// Electrolysis efficiency at a given temperature and operating pressure.
///
/// 0.7 at 25 C and 1 atm, rising 0.002 per degree. Unclamped.
pub fn electrolysis_efficiency(temperature_c: f64, pressure_atm: f64) -> f64 {
    0.7 + 0.002 * (temperature_c - 25.0) - 0.001 * (pressure_atm - 1.0)
}

/// Compressor efficiency at a given temperature and pressure ratio.
///
/// 0.8 at 25 C and unit ratio, falling 0.002 per degree. Unclamped.
pub fn compression_efficiency(temperature_c: f64, pressure_ratio: f64) -> f64 {
    0.8 - 0.002 * (temperature_c - 25.0) - 0.005 * (pressure_ratio - 1.0)
}

/// Converts battery energy into stored hydrogen.
///
/// Runs only while the charge covers the electrolyzer draw. The produced
/// volume multiplies the whole remaining charge, the battery capacity
/// figure doubles as the storage cap, and the charge itself drops by the
/// draw alone.
pub fn run_electrolysis(state: &mut SystemState, config: &HabitatConfig) {
    let draw_w = power::electrolyzer_draw_w(config.electrolyzer_system_size);
    if state.battery_charge_wh < draw_w {
        return;
    }

    let efficiency =
        electrolysis_efficiency(state.air_quality.temperature_c, ELECTROLYZER_PRESSURE_ATM);
    let produced_m3 = state.battery_charge_wh * efficiency;
    state.hydrogen_storage_m3 = state
        .battery_capacity_wh
        .min(state.hydrogen_storage_m3 + produced_m3);
    state.battery_charge_wh -= draw_w;

    debug!(
        produced_m3,
        hydrogen_storage_m3 = state.hydrogen_storage_m3,
        "electrolysis ran"
    );
    debug_assert!(state.battery_charge_wh >= 0.0);
}

/// Compresses stored hydrogen into the tank, shedding transfer losses.
///
/// Below roughly -76 C the unclamped efficiency exceeds one; the stock is
/// floored at zero so it can never end up negative.
pub fn run_compressor(state: &mut SystemState, config: &HabitatConfig) {
    if state.hydrogen_storage_m3 <= 0.0 {
        return;
    }

    let efficiency = compression_efficiency(
        state.air_quality.temperature_c,
        config.compressor_pressure_ratio,
    );
    let compressed_m3 = state.hydrogen_storage_m3 * efficiency;
    state.hydrogen_storage_m3 = (state.hydrogen_storage_m3 - compressed_m3).max(0.0);
}
