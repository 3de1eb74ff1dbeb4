use serde::{Deserialize, Serialize};

/// Outcome of a checkpoint choice: replaces one term of F = M * A.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub enum ComponentChange {
    Mass(f32),
    DriveForce(f32),
    ResistanceForce(f32),
}

/// The car's components as far as the F = M * A lessons are concerned.
/// Resistance forces are negative (they oppose the drive force).
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub struct CarSetup {
    pub mass_kg: f32,
    pub drive_force_n: f32,
    pub resistance_force_n: f32,
}

impl CarSetup {
    pub fn net_force(&self) -> f32 {
        self.drive_force_n + self.resistance_force_n
    }

    // a = F / m
    pub fn acceleration(&self) -> f32 {
        self.net_force() / self.mass_kg
    }

    pub fn apply(&mut self, change: ComponentChange) {
        match change {
            ComponentChange::Mass(kg) => self.mass_kg = kg,
            ComponentChange::DriveForce(newtons) => self.drive_force_n = newtons,
            ComponentChange::ResistanceForce(newtons) => self.resistance_force_n = newtons,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acceleration_follows_newtons_second_law() {
        let mut setup = CarSetup {
            mass_kg: 1000.0,
            drive_force_n: 4000.0,
            resistance_force_n: 0.0,
        };
        assert_eq!(setup.acceleration(), 4.0);

        setup.apply(ComponentChange::ResistanceForce(-50.0));
        assert_eq!(setup.net_force(), 3950.0);

        setup.apply(ComponentChange::Mass(500.0));
        assert_eq!(setup.acceleration(), 7.9);
    }
}
