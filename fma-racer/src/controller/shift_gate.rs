use super::CarControlState;

pub fn register_shift(state: &mut CarControlState, now: f32) {
    state.last_shift_time = now;
}

// Share of the requested throttle that reaches the drivetrain: 0 right after a
// shift, back to 1 once `shift_speed` seconds have passed
pub fn throttle_factor(state: &CarControlState, now: f32, shift_speed: f32) -> f32 {
    if shift_speed <= 0.0 {
        return 1.0;
    }
    ((now - state.last_shift_time) / shift_speed).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn torque_is_cut_then_restored() {
        let mut state = CarControlState::new();
        assert_eq!(throttle_factor(&state, 5.0, 0.8), 1.0);

        register_shift(&mut state, 5.0);
        assert_eq!(throttle_factor(&state, 5.0, 0.8), 0.0);
        assert!((throttle_factor(&state, 5.4, 0.8) - 0.5).abs() < 1e-5);
        assert_eq!(throttle_factor(&state, 5.8, 0.8), 1.0);
        assert_eq!(throttle_factor(&state, 60.0, 0.8), 1.0);
    }
}
