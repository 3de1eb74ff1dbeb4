use std::thread;
use std::time::{Duration, Instant};

use fma_core::checkpoints::{CheckpointKind, CheckpointTable};
use fma_core::player::choices::CarSetup;
use fma_core::player::player_inputs::ControlKey;
use fma_core::{DemoSettings, Settings};
use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;

use crate::checkpoints::Transition;
use crate::controller::CarController;
use crate::engine::{Clock, KeySnapshot, RigidBody};
use crate::finish_line::{FinishLine, LapOutcome, TriggerVolume};
use crate::headless::{FixedStepClock, SimDrivetrain, SimWheel, TrackBody};
use crate::pause::SimulationPause;
use crate::speedometer::Speedometer;
use crate::ui::RecordingUi;
use crate::zone::Zone;

const SCREEN_WIDTH: f32 = 1280.0;
const SCREEN_HEIGHT: f32 = 720.0;
const WHEEL_COUNT: usize = 4;
const MAX_STEERING_ANGLE: f32 = 30.0;
// m/s^2 at full brake
const BRAKE_DECELERATION: f32 = 8.0;
// the finish line trigger reaches this far past each threshold
const TRIGGER_MARGIN: f32 = 10.0;
const SHIFT_EVERY_FRAMES: u64 = 150;

fn screen_size() -> Vec2 {
    Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT)
}

pub type HeadlessCar = CarController<TrackBody, SimDrivetrain, SimWheel>;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct LapRecord {
    pub lap: u32,
    pub seconds: f32,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RaceSummary {
    pub finished: bool,
    pub frames: u64,
    pub simulated_seconds: f32,
    pub laps: Vec<LapRecord>,
    pub car_setup: CarSetup,
}

/// The car on a straight loop of track: past `track_end_x` it reappears at
/// `track_start_x`. The loop crosses the finish line and the checkpoint zone
/// once per lap.
pub struct HeadlessRace {
    settings: DemoSettings,
    car: HeadlessCar,
    finish_line: FinishLine,
    finish_trigger: TriggerVolume,
    speedometer: Speedometer,
    clock: FixedStepClock,
    pause: SimulationPause,
    ui: RecordingUi,
    rng: StdRng,
    frame: u64,
}

impl HeadlessRace {
    pub fn new(settings: &Settings, table: CheckpointTable) -> HeadlessRace {
        let demo = settings.demo.clone();
        let body = TrackBody::new(Vec3::new(demo.spawn_x, 0.0, demo.track_z), Vec3::X);
        let car = CarController::new(
            settings,
            table,
            body,
            SimDrivetrain::default(),
            vec![SimWheel::new(MAX_STEERING_ANGLE); WHEEL_COUNT],
        );

        let race = &settings.race;
        let finish_trigger = TriggerVolume::new(Zone::new(
            race.enter_threshold_x - TRIGGER_MARGIN,
            race.exit_threshold_x + TRIGGER_MARGIN,
            demo.track_z - TRIGGER_MARGIN,
            demo.track_z + TRIGGER_MARGIN,
        ));

        HeadlessRace {
            car,
            finish_line: FinishLine::new(race),
            finish_trigger,
            speedometer: Speedometer::new(settings.speedometer.clone(), screen_size()),
            clock: FixedStepClock::new(demo.frame_tick_ms as f32 / 1000.0),
            pause: SimulationPause::new(),
            ui: RecordingUi::new(screen_size()),
            rng: StdRng::seed_from_u64(demo.seed),
            frame: 0,
            settings: demo,
        }
    }

    pub fn car(&self) -> &HeadlessCar {
        &self.car
    }

    pub fn finish_line(&self) -> &FinishLine {
        &self.finish_line
    }

    /// Runs frames until the race is over or the frame limit is reached.
    pub fn run(&mut self) -> RaceSummary {
        let tick = Duration::from_millis(self.settings.frame_tick_ms);
        tracing::info!(
            max_frames = self.settings.max_frames,
            realtime = self.settings.realtime,
            "starting headless race"
        );

        let mut finished = false;
        while self.frame < self.settings.max_frames {
            let start_time = Instant::now();

            if self.step() {
                finished = true;
                break;
            }

            if self.settings.realtime {
                match tick.checked_sub(start_time.elapsed()) {
                    Some(remaining) => thread::sleep(remaining),
                    None => tracing::warn!(frame = self.frame, "frame took longer than the tick"),
                }
            }
        }

        if !finished {
            tracing::warn!(
                lap = self.finish_line.lap_info().lap,
                "frame limit reached before the race finished"
            );
        }
        self.summary(finished)
    }

    /// One frame. Returns true once the race is over.
    pub fn step(&mut self) -> bool {
        let keys = self.scripted_keys();
        let transition = self.car.update(&keys, &mut self.clock, &mut self.pause);
        if transition == Transition::RaceOver {
            return true;
        }

        self.move_car();

        let position = self.car.body().center_of_mass_position();
        if let Some(event) = self.finish_trigger.sample(position) {
            let outcome = self
                .finish_line
                .on_trigger(event, position, &mut self.car);
            if let Some(LapOutcome::Completed(lap)) = outcome {
                tracing::debug!(lap, time = self.clock.time(), "finish line crossed");
            }
        }

        self.speedometer.update(self.car.body());
        self.on_gui();

        self.clock.advance();
        self.frame += 1;
        false
    }

    // accelerate flat out, shifting up now and then
    fn scripted_keys(&self) -> KeySnapshot {
        let keys = KeySnapshot::new().hold(ControlKey::Accelerate);
        if self.frame > 0 && self.frame % SHIFT_EVERY_FRAMES == 0 {
            keys.press(ControlKey::ShiftUp)
        } else {
            keys
        }
    }

    fn move_car(&mut self) {
        let throttle = self.car.drivetrain().throttle;
        let brake = self.car.state().brake;
        let acceleration = self.car.checkpoints().car_setup().acceleration();
        let delta_time = self.clock.delta_time();
        let (start_x, end_x, top_speed) = (
            self.settings.track_start_x,
            self.settings.track_end_x,
            self.settings.top_speed,
        );

        let body = self.car.body_mut();
        body.drive(
            throttle,
            brake,
            acceleration,
            BRAKE_DECELERATION,
            top_speed,
            delta_time,
        );
        if body.position.x >= end_x {
            body.position.x -= end_x - start_x;
        }
    }

    fn on_gui(&mut self) {
        self.ui.clear();
        if let Some(label) = self.pick_button() {
            self.ui.click(label);
        }
        self.car.on_gui(&mut self.ui);
        self.speedometer.on_gui(&mut self.ui);
    }

    fn pick_button(&mut self) -> Option<String> {
        let checkpoint = self.car.checkpoints().active()?;
        let label = match &checkpoint.kind {
            CheckpointKind::Info => "Continue".to_string(),
            CheckpointKind::Choice(options) if self.settings.random_choices => {
                options.choose(&mut self.rng)?.label.clone()
            }
            CheckpointKind::Choice(options) => options.first()?.label.clone(),
        };
        Some(label)
    }

    fn summary(&self, finished: bool) -> RaceSummary {
        RaceSummary {
            finished,
            frames: self.frame,
            simulated_seconds: self.clock.time(),
            laps: self
                .car
                .lap_times()
                .iter()
                .map(|(lap, seconds)| LapRecord {
                    lap: lap as u32 + 1,
                    seconds,
                })
                .collect(),
            car_setup: self.car.checkpoints().car_setup(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fma_core::checkpoints::CHECKPOINTS;
    use fma_core::GLOBAL_CONFIG;

    fn race() -> HeadlessRace {
        HeadlessRace::new(&GLOBAL_CONFIG, CHECKPOINTS.clone())
    }

    #[test]
    fn race_runs_to_the_lap_limit() {
        let mut race = race();
        let summary = race.run();

        let max_laps = GLOBAL_CONFIG.race.max_laps;
        assert!(summary.finished);
        assert_eq!(race.finish_line().lap_info().lap, max_laps);
        assert_eq!(summary.laps.len(), max_laps as usize);
        assert!(summary.laps.iter().all(|lap| lap.seconds > 0.0));

        // every lap's dialogs were answered
        for lap in 0..max_laps {
            for checkpoint in CHECKPOINTS.for_lap(lap) {
                assert!(race.car().checkpoints().is_completed(checkpoint.id));
            }
        }
        // the last frame (lap 10) is frozen, not a closed dialog
        assert_eq!(race.clock.time_scale(), 0.0);
    }

    #[test]
    fn first_buttons_shape_the_car() {
        let mut race = race();
        let summary = race.run();
        // last pick of each kind wins: lead ballast, single clutch, rear wing
        assert_eq!(summary.car_setup.mass_kg, 1300.0);
        assert_eq!(summary.car_setup.drive_force_n, 4500.0);
        assert_eq!(summary.car_setup.resistance_force_n, -90.0);
    }

    #[test]
    fn shifting_holds_the_car_back_briefly() {
        let mut race = race();
        for _ in 0..SHIFT_EVERY_FRAMES {
            race.step();
        }
        assert_eq!(race.car().drivetrain().gear, 2);

        race.step();
        assert_eq!(race.car().drivetrain().gear, 3);
        assert_eq!(race.car().drivetrain().throttle, 0.0);
    }

    #[test]
    fn race_runs_on_a_table_loaded_from_yaml() {
        let mut settings = GLOBAL_CONFIG.clone();
        settings.race.max_laps = 2;
        settings.checkpoints.table_path = Some(
            concat!(env!("CARGO_MANIFEST_DIR"), "/../fma-core/tables/short_race.yaml").into(),
        );
        let table = CheckpointTable::configured(&settings.checkpoints).unwrap();

        let mut race = HeadlessRace::new(&settings, table);
        let summary = race.run();
        assert!(summary.finished);
        assert_eq!(summary.laps.len(), 2);
        assert!(race.car().checkpoints().is_completed(1));
        assert!(race.car().checkpoints().is_completed(11));
        // ids from the built-in table never show up
        assert!(!race.car().checkpoints().is_completed(2));
        assert_eq!(summary.car_setup.drive_force_n, 4000.0);
    }

    #[test]
    fn frame_limit_stops_an_unfinished_race() {
        let mut settings = GLOBAL_CONFIG.clone();
        settings.demo.max_frames = 10;
        let mut race = HeadlessRace::new(&settings, CHECKPOINTS.clone());
        let summary = race.run();
        assert!(!summary.finished);
        assert_eq!(summary.frames, 10);
    }

    #[test]
    fn summary_serialises_to_json() {
        let mut settings = GLOBAL_CONFIG.clone();
        settings.demo.max_frames = 5;
        let summary = HeadlessRace::new(&settings, CHECKPOINTS.clone()).run();
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["frames"], 5);
        assert_eq!(json["car_setup"]["mass_kg"], 1000.0);
    }
}
