use std::collections::HashSet;

use fma_core::player::player_inputs::{ControlKey, PlayerInputs};
use glam::Vec3;

// Gear index the drivetrain uses for reverse
pub const REVERSE_GEAR: i32 = 0;

pub trait RigidBody {
    fn velocity(&self) -> Vec3;
    // unit vector the car's nose points along
    fn forward(&self) -> Vec3;
    fn center_of_mass_position(&self) -> Vec3;
    fn set_max_angular_velocity(&mut self, max: f32);
    fn scale_inertia_tensor(&mut self, factor: f32);
}

/// Frame timing as seen by gameplay code. `delta_time` and `time` are both
/// already scaled by the current time-scale.
pub trait Clock {
    fn delta_time(&self) -> f32;
    fn time(&self) -> f32;
    fn time_scale(&self) -> f32;
    fn set_time_scale(&mut self, scale: f32);
}

pub trait Keyboard {
    fn is_held(&self, key: ControlKey) -> bool;
    // true only on the frame the key went down
    fn was_pressed(&self, key: ControlKey) -> bool;

    fn player_inputs(&self) -> PlayerInputs {
        PlayerInputs::from_keys(|key| self.is_held(key), |key| self.was_pressed(key))
    }
}

pub trait Drivetrain {
    fn automatic(&self) -> bool;
    fn gear(&self) -> i32;
    fn slip_ratio(&self) -> f32;
    fn set_throttle(&mut self, throttle: f32);
    fn set_throttle_input(&mut self, throttle_input: f32);
    fn shift_up(&mut self);
    fn shift_down(&mut self);
}

pub trait Wheel {
    fn slip_velo(&self) -> f32;
    // degrees
    fn max_steering_angle(&self) -> f32;
    fn set_brake(&mut self, brake: f32);
    fn set_handbrake(&mut self, handbrake: f32);
    fn set_steering(&mut self, steering: f32);
}

/// Key state captured for a single frame.
#[derive(Default, Clone, Debug)]
pub struct KeySnapshot {
    held: HashSet<ControlKey>,
    pressed: HashSet<ControlKey>,
}

impl KeySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hold(mut self, key: ControlKey) -> Self {
        self.held.insert(key);
        self
    }

    // a press also counts as held for that frame
    pub fn press(mut self, key: ControlKey) -> Self {
        self.held.insert(key);
        self.pressed.insert(key);
        self
    }
}

impl Keyboard for KeySnapshot {
    fn is_held(&self, key: ControlKey) -> bool {
        self.held.contains(&key)
    }

    fn was_pressed(&self, key: ControlKey) -> bool {
        self.pressed.contains(&key)
    }
}
