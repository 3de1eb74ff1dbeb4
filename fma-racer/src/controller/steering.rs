use fma_core::player::player_inputs::SteerStatus;
use fma_core::ControllerSettings;
use glam::Vec3;

/// Steering value that would point the wheels along the direction of travel,
/// normalised by the maximum steering angle. Zero below `min_speed` or when
/// the wheels cannot steer, so a car at rest never divides by its speed.
pub fn optimal_steering(
    velocity: Vec3,
    forward: Vec3,
    max_steering_angle: f32,
    min_speed: f32,
) -> f32 {
    let speed = velocity.length();
    if speed < min_speed || speed == 0.0 || max_steering_angle <= 0.0 {
        return 0.0;
    }

    let velocity_direction = velocity / speed;
    let angle = -velocity_direction.cross(forward).y.clamp(-1.0, 1.0).asin();
    angle / max_steering_angle.to_radians()
}

/// Moves `steering` one frame towards the player's input. Releasing back to
/// centre and turning away from centre use separate time constants, both
/// stretched by speed. Counter-steering towards `optimal` is sped up in
/// proportion to how far off the current steering is.
pub fn steer_towards(
    steering: f32,
    input: SteerStatus,
    optimal: f32,
    speed: f32,
    settings: &ControllerSettings,
    delta_time: f32,
) -> f32 {
    let target = input.target();
    let release_rate =
        1.0 / (settings.steer_release_time + settings.velo_steer_release_time * speed);
    let turn_rate = 1.0 / (settings.steer_time + settings.velo_steer_time * speed);

    let steering = if target < steering {
        let mut rate = if steering > 0.0 { release_rate } else { turn_rate };
        if steering > optimal {
            rate *= 1.0 + (steering - optimal) * settings.steer_correction_factor;
        }
        (steering - rate * delta_time).max(target)
    } else if target > steering {
        let mut rate = if steering < 0.0 { release_rate } else { turn_rate };
        if steering < optimal {
            rate *= 1.0 + (optimal - steering) * settings.steer_correction_factor;
        }
        (steering + rate * delta_time).min(target)
    } else {
        steering
    };

    steering.clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fma_core::GLOBAL_CONFIG;

    #[test]
    fn zero_velocity_has_no_optimal_steering() {
        let optimal = optimal_steering(Vec3::ZERO, Vec3::Z, 30.0, 0.0);
        assert_eq!(optimal, 0.0);
        assert!(optimal.is_finite());
    }

    #[test]
    fn slow_cars_have_no_optimal_steering() {
        let velocity = Vec3::new(0.5, 0.0, 0.5);
        assert_eq!(optimal_steering(velocity, Vec3::Z, 30.0, 1.0), 0.0);
    }

    #[test]
    fn sliding_sideways_asks_for_counter_steer() {
        // nose along +z, travelling 30 degrees off towards +x
        let angle = 30f32.to_radians();
        let velocity = Vec3::new(angle.sin(), 0.0, angle.cos()) * 20.0;
        let optimal = optimal_steering(velocity, Vec3::Z, 30.0, 1.0);
        assert!((optimal - 1.0).abs() < 1e-4);

        let mirrored = Vec3::new(-velocity.x, 0.0, velocity.z);
        let optimal = optimal_steering(mirrored, Vec3::Z, 30.0, 1.0);
        assert!((optimal + 1.0).abs() < 1e-4);
    }

    #[test]
    fn turning_in_takes_steer_time() {
        let settings = &GLOBAL_CONFIG.controller;
        let steering = steer_towards(0.0, SteerStatus::Right, 0.0, 0.0, settings, 0.1);
        assert!((steering - 0.1 / settings.steer_time).abs() < 1e-6);
    }

    #[test]
    fn never_overshoots_the_input() {
        let settings = &GLOBAL_CONFIG.controller;
        let steering = steer_towards(0.95, SteerStatus::Right, 0.0, 0.0, settings, 1.0);
        assert_eq!(steering, 1.0);

        let steering = steer_towards(0.05, SteerStatus::Centered, 0.0, 0.0, settings, 1.0);
        assert_eq!(steering, 0.0);
    }

    #[test]
    fn counter_steering_is_faster() {
        let settings = &GLOBAL_CONFIG.controller;
        // steering right while the car wants full left lock
        let plain = steer_towards(0.5, SteerStatus::Left, 0.5, 0.0, settings, 0.01);
        let corrected = steer_towards(0.5, SteerStatus::Left, -1.0, 0.0, settings, 0.01);
        assert!(0.5 - corrected > 0.5 - plain);
    }
}
