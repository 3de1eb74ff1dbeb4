use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
pub enum ControlKey {
    SteerLeft,
    SteerRight,
    Accelerate,
    Brake,
    Boost,
    Handbrake,
    ShiftUp,
    ShiftDown,
}

#[derive(Copy, Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum SteerStatus {
    Left,
    Right,
    Centered,
}

impl SteerStatus {
    // where the steering wheel wants to end up, in [-1, 1]
    pub fn target(&self) -> f32 {
        match self {
            SteerStatus::Left => -1.0,
            SteerStatus::Right => 1.0,
            SteerStatus::Centered => 0.0,
        }
    }
}

// PlayerInputs is the discrete key state for one frame, before any smoothing
#[derive(Copy, Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct PlayerInputs {
    pub steer: SteerStatus,
    pub accelerate: bool,
    pub brake: bool,
    pub boost: bool,
    pub handbrake: bool,
    // pressed this frame; both may be set at once
    pub shift_up: bool,
    pub shift_down: bool,
}

impl PlayerInputs {
    /// Builds a frame's inputs from "is the key held" and "was the key pressed
    /// this frame" queries. Right wins when both steering keys are held.
    pub fn from_keys(
        held: impl Fn(ControlKey) -> bool,
        pressed: impl Fn(ControlKey) -> bool,
    ) -> Self {
        let steer = if held(ControlKey::SteerRight) {
            SteerStatus::Right
        } else if held(ControlKey::SteerLeft) {
            SteerStatus::Left
        } else {
            SteerStatus::Centered
        };

        PlayerInputs {
            steer,
            accelerate: held(ControlKey::Accelerate),
            brake: held(ControlKey::Brake),
            boost: held(ControlKey::Boost),
            handbrake: held(ControlKey::Handbrake),
            shift_up: pressed(ControlKey::ShiftUp),
            shift_down: pressed(ControlKey::ShiftDown),
        }
    }

    pub fn shifts(&self) -> bool {
        self.shift_up || self.shift_down
    }

    // In reverse on an automatic gearbox the pedals trade places
    pub fn with_pedals_swapped(self) -> Self {
        PlayerInputs {
            accelerate: self.brake,
            brake: self.accelerate,
            ..self
        }
    }
}

impl Default for PlayerInputs {
    fn default() -> Self {
        PlayerInputs {
            steer: SteerStatus::Centered,
            accelerate: false,
            brake: false,
            boost: false,
            handbrake: false,
            shift_up: false,
            shift_down: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn right_wins_over_left() {
        let inputs = PlayerInputs::from_keys(
            |key| matches!(key, ControlKey::SteerLeft | ControlKey::SteerRight),
            |_| false,
        );
        assert_eq!(inputs.steer, SteerStatus::Right);
        assert_eq!(inputs.steer.target(), 1.0);
    }

    #[test]
    fn both_shift_keys_in_one_frame_are_kept() {
        let shifts = |key: ControlKey| matches!(key, ControlKey::ShiftUp | ControlKey::ShiftDown);
        let inputs = PlayerInputs::from_keys(shifts, shifts);
        assert!(inputs.shift_up && inputs.shift_down);
        assert!(inputs.shifts());

        let none = PlayerInputs::from_keys(shifts, |_| false);
        assert!(!none.shifts());
    }

    #[test]
    fn swapping_pedals_keeps_everything_else() {
        let inputs = PlayerInputs {
            accelerate: true,
            handbrake: true,
            ..PlayerInputs::default()
        }
        .with_pedals_swapped();
        assert!(!inputs.accelerate);
        assert!(inputs.brake);
        assert!(inputs.handbrake);
    }
}
