use fma_core::SpeedometerSettings;
use glam::Vec2;

use crate::engine::RigidBody;
use crate::ui::{ImmediateUi, Rect, Texture};

pub const MS_TO_KMH: f32 = 3.6;

pub struct Speedometer {
    settings: SpeedometerSettings,
    dial_pos: Vec2,
    // km/h
    speed: f32,
}

impl Speedometer {
    pub fn new(settings: SpeedometerSettings, screen_size: Vec2) -> Self {
        let dial_pos = Vec2::new(
            screen_size.x - settings.dial_offset_x,
            screen_size.y - settings.dial_offset_y,
        );
        Speedometer {
            settings,
            dial_pos,
            speed: 0.0,
        }
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn update<B: RigidBody>(&mut self, body: &B) {
        self.speed = body.velocity().length() * MS_TO_KMH;
    }

    // degrees; pinned to the end stops outside [0, top_speed]
    pub fn needle_angle(&self) -> f32 {
        let fraction = (self.speed / self.settings.top_speed).clamp(0.0, 1.0);
        let s = &self.settings;
        s.stop_angle + (s.top_speed_angle - s.stop_angle) * fraction
    }

    pub fn on_gui(&self, ui: &mut dyn ImmediateUi) {
        let s = &self.settings;
        ui.draw_texture(
            Rect::new(self.dial_pos.x, self.dial_pos.y, s.dial_width, s.dial_height),
            Texture::SpeedoDial,
        );

        let centre = self.dial_pos + Vec2::new(s.dial_width / 2.0, s.dial_height / 2.0);
        ui.draw_texture_rotated(
            Rect::new(
                centre.x,
                centre.y - s.needle_height / 2.0,
                s.needle_width,
                s.needle_height,
            ),
            Texture::SpeedoNeedle,
            self.needle_angle(),
            centre,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::TrackBody;
    use crate::ui::{RecordingUi, UiCall};
    use fma_core::GLOBAL_CONFIG;
    use glam::Vec3;

    fn speedometer() -> Speedometer {
        let mut settings = GLOBAL_CONFIG.speedometer.clone();
        settings.top_speed = 200.0;
        settings.stop_angle = -100.0;
        settings.top_speed_angle = 100.0;
        Speedometer::new(settings, Vec2::new(1280.0, 720.0))
    }

    #[test]
    fn needle_maps_speed_linearly() {
        let mut speedo = speedometer();
        let mut body = TrackBody::new(Vec3::ZERO, Vec3::X);
        assert_eq!(speedo.needle_angle(), -100.0);

        // 100 km/h
        body.velocity = Vec3::X * (100.0 / MS_TO_KMH);
        speedo.update(&body);
        assert!((speedo.speed() - 100.0).abs() < 1e-3);
        assert!(speedo.needle_angle().abs() < 1e-3);

        body.velocity = Vec3::X * 500.0;
        speedo.update(&body);
        assert_eq!(speedo.needle_angle(), 100.0);
    }

    #[test]
    fn needle_rotates_around_dial_centre() {
        let speedo = speedometer();
        let mut ui = RecordingUi::new(Vec2::new(1280.0, 720.0));
        speedo.on_gui(&mut ui);

        let s = &GLOBAL_CONFIG.speedometer;
        let dial = Vec2::new(1280.0 - s.dial_offset_x, 720.0 - s.dial_offset_y);
        let centre = dial + Vec2::new(s.dial_width, s.dial_height) / 2.0;
        match &ui.calls[1] {
            UiCall::RotatedTexture(_, Texture::SpeedoNeedle, angle, pivot) => {
                assert_eq!(*angle, -100.0);
                assert!(pivot.abs_diff_eq(centre, 1e-4));
            }
            other => panic!("expected needle, got {:?}", other),
        }
    }
}
