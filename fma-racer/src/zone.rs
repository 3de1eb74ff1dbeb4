use fma_core::ZoneSettings;
use glam::Vec3;

/// Axis-aligned rectangle on the ground plane (x/z). Height is ignored.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Zone {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl Zone {
    pub fn new(min_x: f32, max_x: f32, min_z: f32, max_z: f32) -> Zone {
        Zone {
            min_x,
            max_x,
            min_z,
            max_z,
        }
    }

    pub fn center(&self) -> Vec3 {
        Vec3::new(
            (self.min_x + self.max_x) / 2.0,
            0.0,
            (self.min_z + self.max_z) / 2.0,
        )
    }

    // edges are outside the zone
    pub fn contains(&self, point: Vec3) -> bool {
        point.x > self.min_x && point.x < self.max_x && point.z > self.min_z && point.z < self.max_z
    }
}

impl From<ZoneSettings> for Zone {
    fn from(settings: ZoneSettings) -> Self {
        Zone::new(settings.min_x, settings.max_x, settings.min_z, settings.max_z)
    }
}
