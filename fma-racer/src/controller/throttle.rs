use fma_core::player::player_inputs::PlayerInputs;
use fma_core::ControllerSettings;

use super::CarControlState;

/// Ramps throttle, throttle input and brake for one frame. Keyboard pedals are
/// all-or-nothing, so the ramp times stand in for pedal travel; while the
/// wheels spin they switch to the traction constants.
pub fn apply_pedals(
    state: &mut CarControlState,
    inputs: &PlayerInputs,
    slip_ratio: f32,
    settings: &ControllerSettings,
    delta_time: f32,
) {
    let engage = delta_time / settings.throttle_time;
    let engage_traction = delta_time / settings.throttle_time_traction;
    let release = delta_time / settings.throttle_release_time;
    let release_traction = delta_time / settings.throttle_release_time_traction;
    let has_grip = slip_ratio < settings.release_slip_threshold;

    if inputs.boost {
        // boost bypasses traction control entirely
        state.throttle += engage;
        state.throttle_input += engage;
    } else if inputs.accelerate {
        if slip_ratio < settings.traction_slip_threshold {
            state.throttle += engage;
        } else if !settings.traction_control {
            state.throttle += engage_traction;
        } else {
            state.throttle -= release;
        }

        state.throttle_input = state.throttle_input.max(0.0) + engage;
        state.brake = 0.0;
    } else if has_grip {
        state.throttle -= release;
    } else {
        state.throttle -= release_traction;
    }
    state.throttle = state.throttle.clamp(0.0, 1.0);

    if inputs.brake {
        state.brake += if has_grip { engage } else { engage_traction };
        state.throttle = 0.0;
        state.throttle_input -= engage;
    } else if has_grip {
        state.brake -= release;
    } else {
        state.brake -= release_traction;
    }
    state.brake = state.brake.clamp(0.0, 1.0);
    state.throttle_input = state.throttle_input.clamp(-1.0, 1.0);
}

pub fn apply_handbrake(
    state: &mut CarControlState,
    held: bool,
    settings: &ControllerSettings,
    delta_time: f32,
) {
    let step = delta_time / settings.handbrake_time;
    let handbrake = if held {
        state.handbrake + step
    } else {
        state.handbrake - step
    };
    state.handbrake = handbrake.clamp(0.0, 1.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use fma_core::GLOBAL_CONFIG;

    fn accelerating() -> PlayerInputs {
        PlayerInputs {
            accelerate: true,
            ..PlayerInputs::default()
        }
    }

    #[test]
    fn full_grip_engages_at_throttle_time() {
        let settings = GLOBAL_CONFIG.controller.clone();
        let mut state = CarControlState::new();
        apply_pedals(&mut state, &accelerating(), 0.0, &settings, 0.25);
        assert!((state.throttle - 0.25 / settings.throttle_time).abs() < 1e-6);
        assert!((state.throttle_input - 0.25 / settings.throttle_time).abs() < 1e-6);
    }

    #[test]
    fn traction_control_backs_off_while_spinning() {
        let settings = GLOBAL_CONFIG.controller.clone();
        let mut state = CarControlState::new();
        state.throttle = 0.5;
        apply_pedals(&mut state, &accelerating(), 0.5, &settings, 0.1);
        assert!(state.throttle < 0.5);
    }

    #[test]
    fn without_traction_control_spinning_engages_slowly() {
        let mut settings = GLOBAL_CONFIG.controller.clone();
        settings.traction_control = false;

        let mut gripping = CarControlState::new();
        let mut spinning = CarControlState::new();
        apply_pedals(&mut gripping, &accelerating(), 0.0, &settings, 0.1);
        apply_pedals(&mut spinning, &accelerating(), 0.5, &settings, 0.1);
        assert!(spinning.throttle > 0.0);
        assert!(spinning.throttle < gripping.throttle);
    }

    #[test]
    fn boost_ignores_slip() {
        let settings = GLOBAL_CONFIG.controller.clone();
        let mut state = CarControlState::new();
        let inputs = PlayerInputs {
            boost: true,
            ..PlayerInputs::default()
        };
        apply_pedals(&mut state, &inputs, 0.9, &settings, 0.1);
        assert!((state.throttle - 0.1 / settings.throttle_time).abs() < 1e-6);
    }

    #[test]
    fn braking_kills_throttle_and_reverses_input() {
        let settings = GLOBAL_CONFIG.controller.clone();
        let mut state = CarControlState::new();
        state.throttle = 0.8;
        let inputs = PlayerInputs {
            brake: true,
            ..PlayerInputs::default()
        };
        apply_pedals(&mut state, &inputs, 0.0, &settings, 0.1);
        assert_eq!(state.throttle, 0.0);
        assert!(state.brake > 0.0);
        assert!(state.throttle_input < 0.0);
    }

    #[test]
    fn accelerating_releases_the_brake() {
        let settings = GLOBAL_CONFIG.controller.clone();
        let mut state = CarControlState::new();
        state.brake = 1.0;
        state.throttle_input = -0.5;
        apply_pedals(&mut state, &accelerating(), 0.0, &settings, 0.1);
        assert_eq!(state.brake, 0.0);
        assert!(state.throttle_input > 0.0);
    }

    #[test]
    fn handbrake_ramps_both_ways() {
        let settings = GLOBAL_CONFIG.controller.clone();
        let mut state = CarControlState::new();
        apply_handbrake(&mut state, true, &settings, 0.4);
        apply_handbrake(&mut state, true, &settings, 0.4);
        apply_handbrake(&mut state, true, &settings, 0.4);
        assert_eq!(state.handbrake, 1.0);
        apply_handbrake(&mut state, false, &settings, 0.5);
        assert!((state.handbrake - (1.0 - 0.5 / settings.handbrake_time)).abs() < 1e-6);
    }
}
