use fma_core::checkpoints::CheckpointId;
use fma_core::player::lap_info::{LapNumber, LapTimes};
use glam::Vec3;

use crate::speedometer::MS_TO_KMH;
use crate::ui::{ImmediateUi, Rect};

const LAP_ROW_HEIGHT: f32 = 36.0;
// top-left corner of the lap time panel
const LAP_PANEL_X: f32 = 10.0;
const LAP_PANEL_Y: f32 = 60.0;

pub fn draw_debug_label(ui: &mut dyn ImmediateUi, center_of_mass: Vec3, state: CheckpointId) {
    let screen = ui.screen_size();
    ui.label(
        Rect::new(screen.x - 250.0, 60.0, 200.0, 50.0),
        &format!(
            "Center:({:.1}, {:.1}, {:.1})\nState: {}",
            center_of_mass.x, center_of_mass.y, center_of_mass.z, state
        ),
    );
}

pub fn draw_speed_label(ui: &mut dyn ImmediateUi, speed: f32) {
    let screen = ui.screen_size();
    ui.label(
        Rect::new(screen.x - 150.0, screen.y - 80.0, 80.0, 20.0),
        &format!("{} km/h", (speed * MS_TO_KMH).round()),
    );
}

/// Lists every lap that has time on it. The backing box grows with the
/// current lap so the running lap always has a row.
pub fn draw_lap_times(ui: &mut dyn ImmediateUi, lap_times: &LapTimes, current_lap: LapNumber) {
    ui.draw_box(
        Rect::new(
            LAP_PANEL_X,
            LAP_PANEL_Y,
            200.0,
            LAP_ROW_HEIGHT * (current_lap as f32 + 1.0),
        ),
        "",
    );
    for (lap, time) in lap_times.iter() {
        ui.label(
            Rect::new(
                LAP_PANEL_X + 10.0,
                LAP_PANEL_Y + 6.0 + lap as f32 * LAP_ROW_HEIGHT,
                190.0,
                LAP_ROW_HEIGHT,
            ),
            &format_lap_time(lap, time),
        );
    }
}

pub fn format_lap_time(lap: LapNumber, time: f32) -> String {
    format!("Lap {}:\t\t{:.2}", lap as u32 + 1, time)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::RecordingUi;
    use glam::Vec2;

    #[test]
    fn only_laps_with_time_are_listed() {
        let mut times = LapTimes::new(10);
        times.record(0, 61.234);
        times.record(1, 12.5);

        let mut ui = RecordingUi::new(Vec2::new(800.0, 600.0));
        draw_lap_times(&mut ui, &times, 1);
        let labels: Vec<_> = ui.labels().collect();
        assert_eq!(labels, vec!["Lap 1:\t\t61.23", "Lap 2:\t\t12.50"]);
    }

    #[test]
    fn speed_label_is_rounded_kmh() {
        let mut ui = RecordingUi::new(Vec2::new(800.0, 600.0));
        draw_speed_label(&mut ui, 10.0);
        assert_eq!(ui.labels().next(), Some("36 km/h"));
    }
}
