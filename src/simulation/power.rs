//! # Power stage
//!
//! Solar generation model and surplus battery charging. Generation depends
//! on the hour of day and the last known outdoor conditions; the battery
//! absorbs whatever is left once the two fixed loads are covered.

use tracing::info;

use super::state::{HabitatConfig, SystemState};

/// Panel output under reference conditions (25 C, 0 % humidity) in watts.
const PEAK_SOLAR_OUTPUT_W: f64 = 1000.0;
/// Local hours with usable daylight, `[start, end)`.
const DAYLIGHT_HOURS: std::ops::Range<u32> = 6..18;

/// Instantaneous solar output in watts for a local hour and outdoor
/// conditions.
///
/// Zero outside daylight hours. The derating terms are unclamped, so inputs
/// far outside the model's envelope (temperature above 75 C, humidity past
/// 100 %) yield a negative figure; charging treats that as no surplus.
pub fn solar_output_w(hour: u32, temperature_c: f64, humidity_pct: f64) -> f64 {
    if !DAYLIGHT_HOURS.contains(&hour) {
        return 0.0;
    }
    PEAK_SOLAR_OUTPUT_W * (1.0 - (temperature_c - 25.0) / 50.0) * (1.0 - humidity_pct / 100.0)
}

/// Fixed electrolyzer power draw in watts.
pub fn electrolyzer_draw_w(system_size: u32) -> f64 {
    100.0 + 10.0 * f64::from(system_size)
}

/// Fixed ventilation power draw in watts at the given rate.
pub fn ventilation_draw_w(rate_m3ph: f64) -> f64 {
    200.0 + 5.0 * rate_m3ph
}

/// Recomputes `solar_power_w` from the current conditions and emits the
/// per-tick solar status line.
pub fn update_solar_power(state: &mut SystemState, hour: u32) {
    state.solar_power_w = solar_output_w(
        hour,
        state.air_quality.temperature_c,
        state.air_quality.humidity_pct,
    );
    info!(solar_power_w = state.solar_power_w, "solar power generated");
}

/// Charges the battery with any surplus left after the fixed loads.
///
/// The new charge is truncated to whole watt-hours and clamped to capacity.
/// Without a surplus the charge is untouched; this stage never fails.
pub fn charge_from_surplus(state: &mut SystemState, config: &HabitatConfig) {
    let committed_draw_w = electrolyzer_draw_w(config.electrolyzer_system_size)
        + ventilation_draw_w(state.ventilation_rate_m3ph);
    if state.solar_power_w > committed_draw_w {
        let surplus_w = state.solar_power_w - committed_draw_w;
        state.battery_charge_wh = state
            .battery_capacity_wh
            .min((state.battery_charge_wh + surplus_w).trunc());
    }
    debug_assert!(state.battery_charge_wh >= 0.0);
    debug_assert!(state.battery_charge_wh <= state.battery_capacity_wh);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn state_with(charge_wh: f64, rate_m3ph: f64, solar_w: f64) -> SystemState {
        let mut state = SystemState::new(&HabitatConfig::default());
        state.battery_charge_wh = charge_wh;
        state.ventilation_rate_m3ph = rate_m3ph;
        state.solar_power_w = solar_w;
        state
    }

    #[rstest]
    #[case(0)]
    #[case(3)]
    #[case(5)]
    #[case(18)]
    #[case(21)]
    #[case(23)]
    fn test_no_output_outside_daylight(#[case] hour: u32) {
        assert_eq!(solar_output_w(hour, 25.0, 0.0), 0.0);
    }

    #[rstest]
    #[case(6)]
    #[case(12)]
    #[case(17)]
    fn test_daylight_hours_produce(#[case] hour: u32) {
        assert!(solar_output_w(hour, 25.0, 0.0) > 0.0);
    }

    #[test]
    fn test_reference_conditions_give_peak_output() {
        assert_eq!(solar_output_w(12, 25.0, 0.0), 1000.0);
    }

    #[test]
    fn test_heat_and_humidity_derate_output() {
        let mild = solar_output_w(12, 25.0, 40.0);
        let hot = solar_output_w(12, 40.0, 40.0);
        let humid = solar_output_w(12, 25.0, 80.0);

        assert!(hot < mild);
        assert!(humid < mild);
    }

    #[test]
    fn test_extreme_inputs_go_negative() {
        // The model is deliberately unclamped.
        assert!(solar_output_w(12, 80.0, 0.0) < 0.0);
        assert!(solar_output_w(12, 25.0, 150.0) < 0.0);
    }

    #[test]
    fn test_fixed_draw_formulas() {
        assert_eq!(electrolyzer_draw_w(1), 110.0);
        assert_eq!(electrolyzer_draw_w(3), 130.0);
        assert_eq!(ventilation_draw_w(0.0), 200.0);
        assert_eq!(ventilation_draw_w(100.0), 700.0);
    }

    #[test]
    fn test_surplus_charges_battery() {
        // Draws: 110 (electrolyzer) + 700 (ventilation at 100) = 810 W.
        let config = HabitatConfig::default();
        let mut state = state_with(4000.0, 100.0, 1500.0);

        charge_from_surplus(&mut state, &config);
        assert_eq!(state.battery_charge_wh, 4690.0);
    }

    #[test]
    fn test_fractional_surplus_truncates_to_whole_watt_hours() {
        let config = HabitatConfig::default();
        let mut state = state_with(4000.0, 100.0, 1000.5);

        charge_from_surplus(&mut state, &config);
        assert_eq!(state.battery_charge_wh, 4190.0);
    }

    #[test]
    fn test_charge_clamps_at_capacity() {
        let config = HabitatConfig::default();
        let mut state = state_with(4900.0, 100.0, 2000.0);

        charge_from_surplus(&mut state, &config);
        assert_eq!(state.battery_charge_wh, 5000.0);
    }

    #[test]
    fn test_deficit_leaves_charge_untouched() {
        let config = HabitatConfig::default();
        let mut state = state_with(4500.0, 100.0, 300.0);

        charge_from_surplus(&mut state, &config);
        assert_eq!(state.battery_charge_wh, 4500.0);
    }

    #[test]
    fn test_negative_generation_never_charges() {
        let config = HabitatConfig::default();
        let mut state = state_with(4500.0, 100.0, -250.0);

        charge_from_surplus(&mut state, &config);
        assert_eq!(state.battery_charge_wh, 4500.0);
    }

    #[test]
    fn test_power_stage_is_deterministic() {
        let config = HabitatConfig::default();
        let mut state = SystemState::new(&config);
        state.air_quality.temperature_c = 31.0;
        state.air_quality.humidity_pct = 64.0;

        let mut first = state.clone();
        let mut second = state.clone();
        update_solar_power(&mut first, 14);
        charge_from_surplus(&mut first, &config);
        update_solar_power(&mut second, 14);
        charge_from_surplus(&mut second, &config);

        assert_eq!(first.solar_power_w, second.solar_power_w);
        assert_eq!(first.battery_charge_wh, second.battery_charge_wh);
    }
}
