//! Stand-in engine collaborators for running the car without a game engine.
//! The body is a point that slides along its forward axis; there is no
//! physics here beyond speed integration.

use glam::Vec3;

use crate::engine::{Clock, Drivetrain, RigidBody, Wheel};

#[derive(Debug, Clone)]
pub struct FixedStepClock {
    step: f32,
    time: f32,
    time_scale: f32,
}

impl FixedStepClock {
    pub fn new(step: f32) -> Self {
        FixedStepClock {
            step,
            time: 0.0,
            time_scale: 1.0,
        }
    }

    pub fn advance(&mut self) {
        self.time += self.delta_time();
    }
}

impl Clock for FixedStepClock {
    fn delta_time(&self) -> f32 {
        self.step * self.time_scale
    }

    fn time(&self) -> f32 {
        self.time
    }

    fn time_scale(&self) -> f32 {
        self.time_scale
    }

    fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale;
    }
}

#[derive(Debug, Clone)]
pub struct TrackBody {
    pub position: Vec3,
    pub velocity: Vec3,
    pub forward: Vec3,
    pub max_angular_velocity: f32,
    pub inertia_scale: f32,
}

impl TrackBody {
    pub fn new(position: Vec3, forward: Vec3) -> Self {
        TrackBody {
            position,
            velocity: Vec3::ZERO,
            forward: forward.normalize(),
            max_angular_velocity: 7.0,
            inertia_scale: 1.0,
        }
    }

    /// Integrates speed along `forward`: throttle pushes with `acceleration`
    /// (m/s^2), brake pulls with `brake_deceleration`, capped at `top_speed`.
    pub fn drive(
        &mut self,
        throttle: f32,
        brake: f32,
        acceleration: f32,
        brake_deceleration: f32,
        top_speed: f32,
        delta_time: f32,
    ) {
        let speed = self.velocity.dot(self.forward);
        let speed = (speed + (throttle * acceleration - brake * brake_deceleration) * delta_time)
            .clamp(0.0, top_speed);
        self.velocity = self.forward * speed;
        self.position += self.velocity * delta_time;
    }
}

impl RigidBody for TrackBody {
    fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn forward(&self) -> Vec3 {
        self.forward
    }

    fn center_of_mass_position(&self) -> Vec3 {
        self.position
    }

    fn set_max_angular_velocity(&mut self, max: f32) {
        self.max_angular_velocity = max;
    }

    fn scale_inertia_tensor(&mut self, factor: f32) {
        self.inertia_scale *= factor;
    }
}

#[derive(Debug, Clone)]
pub struct SimDrivetrain {
    pub automatic: bool,
    pub gear: i32,
    pub slip_ratio: f32,
    pub throttle: f32,
    pub throttle_input: f32,
    pub top_gear: i32,
}

impl Default for SimDrivetrain {
    fn default() -> Self {
        // gear 0 is reverse, 1 neutral
        SimDrivetrain {
            automatic: false,
            gear: 2,
            slip_ratio: 0.0,
            throttle: 0.0,
            throttle_input: 0.0,
            top_gear: 6,
        }
    }
}

impl Drivetrain for SimDrivetrain {
    fn automatic(&self) -> bool {
        self.automatic
    }

    fn gear(&self) -> i32 {
        self.gear
    }

    fn slip_ratio(&self) -> f32 {
        self.slip_ratio
    }

    fn set_throttle(&mut self, throttle: f32) {
        self.throttle = throttle;
    }

    fn set_throttle_input(&mut self, throttle_input: f32) {
        self.throttle_input = throttle_input;
    }

    fn shift_up(&mut self) {
        self.gear = (self.gear + 1).min(self.top_gear);
    }

    fn shift_down(&mut self) {
        self.gear = (self.gear - 1).max(0);
    }
}

#[derive(Debug, Clone)]
pub struct SimWheel {
    pub slip_velo: f32,
    pub max_steering_angle: f32,
    pub brake: f32,
    pub handbrake: f32,
    pub steering: f32,
}

impl SimWheel {
    pub fn new(max_steering_angle: f32) -> Self {
        SimWheel {
            slip_velo: 0.0,
            max_steering_angle,
            brake: 0.0,
            handbrake: 0.0,
            steering: 0.0,
        }
    }
}

impl Wheel for SimWheel {
    fn slip_velo(&self) -> f32 {
        self.slip_velo
    }

    fn max_steering_angle(&self) -> f32 {
        self.max_steering_angle
    }

    fn set_brake(&mut self, brake: f32) {
        self.brake = brake;
    }

    fn set_handbrake(&mut self, handbrake: f32) {
        self.handbrake = handbrake;
    }

    fn set_steering(&mut self, steering: f32) {
        self.steering = steering;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paused_clock_stands_still() {
        let mut clock = FixedStepClock::new(0.5);
        clock.advance();
        clock.set_time_scale(0.0);
        clock.advance();
        assert_eq!(clock.delta_time(), 0.0);
        assert_eq!(clock.time(), 0.5);
    }

    #[test]
    fn body_speed_is_capped() {
        let mut body = TrackBody::new(Vec3::ZERO, Vec3::X);
        for _ in 0..100 {
            body.drive(1.0, 0.0, 10.0, 20.0, 30.0, 0.1);
        }
        assert!(body.velocity.abs_diff_eq(Vec3::X * 30.0, 1e-4));

        body.drive(0.0, 1.0, 10.0, 20.0, 30.0, 0.1);
        assert!(body.velocity.abs_diff_eq(Vec3::X * 28.0, 1e-4));
    }
}
