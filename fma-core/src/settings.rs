use config::{Config, ConfigError, Environment, File};
use lazy_static::lazy_static;
use serde::Deserialize;

use crate::error::SettingsError;
use crate::player::choices::CarSetup;
use crate::player::lap_info::LapNumber;

// Time constants are in seconds, speeds in m/s unless noted otherwise
#[derive(Deserialize, Clone, Debug)]
pub struct ControllerSettings {
    pub shift_speed: f32,

    pub throttle_time: f32,
    pub throttle_time_traction: f32,
    pub throttle_release_time: f32,
    pub throttle_release_time_traction: f32,
    pub traction_control: bool,
    pub traction_slip_threshold: f32,
    pub release_slip_threshold: f32,

    pub steer_time: f32,
    pub velo_steer_time: f32,
    pub steer_release_time: f32,
    pub velo_steer_release_time: f32,
    pub steer_correction_factor: f32,
    pub optimal_steering_min_speed: f32,

    pub handbrake_time: f32,
    pub inertia_factor: f32,
}

#[derive(Deserialize, Clone, Copy, Debug)]
pub struct ZoneSettings {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
}

#[derive(Deserialize, Clone, Debug)]
pub struct CheckpointSettings {
    pub zone: ZoneSettings,
    pub resume_max_angular_velocity: f32,
    // YAML checkpoint table replacing the built-in one
    #[serde(default)]
    pub table_path: Option<String>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct RaceSettings {
    pub max_laps: LapNumber,
    pub enter_threshold_x: f32,
    pub exit_threshold_x: f32,
}

#[derive(Deserialize, Clone, Debug)]
pub struct SpeedometerSettings {
    // km/h
    pub top_speed: f32,
    // degrees
    pub stop_angle: f32,
    pub top_speed_angle: f32,
    // distance of the dial's top-left corner from the bottom-right screen corner
    pub dial_offset_x: f32,
    pub dial_offset_y: f32,
    pub dial_width: f32,
    pub dial_height: f32,
    pub needle_width: f32,
    pub needle_height: f32,
}

#[derive(Deserialize, Clone, Debug)]
pub struct DemoSettings {
    pub frame_tick_ms: u64,
    pub max_frames: u64,
    pub realtime: bool,
    pub track_start_x: f32,
    pub track_end_x: f32,
    pub track_z: f32,
    pub top_speed: f32,
    // start past the finish line so the first visit to the zone is lap 0
    pub spawn_x: f32,
    pub random_choices: bool,
    pub seed: u64,
}

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub controller: ControllerSettings,
    pub checkpoints: CheckpointSettings,
    pub race: RaceSettings,
    pub speedometer: SpeedometerSettings,
    pub car_setup: CarSetup,
    pub demo: DemoSettings,
}

impl Settings {
    pub fn new() -> Result<Settings, ConfigError> {
        let config = Config::builder()
            .set_default("controller.shift_speed", 0.8)?
            .set_default("controller.throttle_time", 1.0)?
            .set_default("controller.throttle_time_traction", 10.0)?
            .set_default("controller.throttle_release_time", 0.5)?
            .set_default("controller.throttle_release_time_traction", 0.1)?
            .set_default("controller.traction_control", true)?
            .set_default("controller.traction_slip_threshold", 0.1)?
            .set_default("controller.release_slip_threshold", 0.2)?
            .set_default("controller.steer_time", 1.2)?
            .set_default("controller.velo_steer_time", 0.1)?
            .set_default("controller.steer_release_time", 0.6)?
            .set_default("controller.velo_steer_release_time", 0.0)?
            .set_default("controller.steer_correction_factor", 4.0)?
            .set_default("controller.optimal_steering_min_speed", 1.0)?
            .set_default("controller.handbrake_time", 1.0)?
            .set_default("controller.inertia_factor", 1.5)?
            .set_default("checkpoints.zone.min_x", 1130.0)?
            .set_default("checkpoints.zone.max_x", 1170.0)?
            .set_default("checkpoints.zone.min_z", 525.0)?
            .set_default("checkpoints.zone.max_z", 570.0)?
            .set_default("checkpoints.resume_max_angular_velocity", 1.0)?
            .set_default("race.max_laps", 10)?
            .set_default("race.enter_threshold_x", 845.0)?
            .set_default("race.exit_threshold_x", 862.0)?
            .set_default("speedometer.top_speed", 240.0)?
            .set_default("speedometer.stop_angle", -135.0)?
            .set_default("speedometer.top_speed_angle", 135.0)?
            .set_default("speedometer.dial_offset_x", 260.0)?
            .set_default("speedometer.dial_offset_y", 230.0)?
            .set_default("speedometer.dial_width", 220.0)?
            .set_default("speedometer.dial_height", 220.0)?
            .set_default("speedometer.needle_width", 100.0)?
            .set_default("speedometer.needle_height", 12.0)?
            .set_default("car_setup.mass_kg", 1000.0)?
            .set_default("car_setup.drive_force_n", 4000.0)?
            .set_default("car_setup.resistance_force_n", 0.0)?
            .set_default("demo.frame_tick_ms", 20)?
            .set_default("demo.max_frames", 200_000)?
            .set_default("demo.realtime", false)?
            .set_default("demo.track_start_x", 700.0)?
            .set_default("demo.track_end_x", 1250.0)?
            .set_default("demo.track_z", 547.5)?
            .set_default("demo.top_speed", 45.0)?
            .set_default("demo.spawn_x", 900.0)?
            .set_default("demo.random_choices", false)?
            .set_default("demo.seed", 125)?
            .add_source(File::with_name("config.yaml").required(false))
            .add_source(
                Environment::with_prefix("FMA")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Loads and validates the layered configuration.
    pub fn load() -> Result<Settings, SettingsError> {
        let settings = Settings::new()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let c = &self.controller;
        for (field, value) in [
            ("controller.shift_speed", c.shift_speed),
            ("controller.throttle_time", c.throttle_time),
            ("controller.throttle_time_traction", c.throttle_time_traction),
            ("controller.throttle_release_time", c.throttle_release_time),
            (
                "controller.throttle_release_time_traction",
                c.throttle_release_time_traction,
            ),
            ("controller.steer_time", c.steer_time),
            ("controller.steer_release_time", c.steer_release_time),
            ("controller.handbrake_time", c.handbrake_time),
            ("controller.inertia_factor", c.inertia_factor),
            ("speedometer.top_speed", self.speedometer.top_speed),
            ("car_setup.mass_kg", self.car_setup.mass_kg),
            ("demo.top_speed", self.demo.top_speed),
        ] {
            if !(value > 0.0) {
                return Err(SettingsError::NonPositive { field, value });
            }
        }

        for (field, value) in [
            ("controller.velo_steer_time", c.velo_steer_time),
            ("controller.velo_steer_release_time", c.velo_steer_release_time),
            ("controller.steer_correction_factor", c.steer_correction_factor),
            (
                "controller.optimal_steering_min_speed",
                c.optimal_steering_min_speed,
            ),
        ] {
            if !(value >= 0.0) {
                return Err(SettingsError::Negative { field, value });
            }
        }

        let zone = &self.checkpoints.zone;
        if zone.min_x >= zone.max_x || zone.min_z >= zone.max_z {
            return Err(SettingsError::EmptyZone);
        }

        if self.race.enter_threshold_x > self.race.exit_threshold_x {
            return Err(SettingsError::InvertedFinishLine {
                enter_x: self.race.enter_threshold_x,
                exit_x: self.race.exit_threshold_x,
            });
        }

        let demo = &self.demo;
        if !(demo.track_start_x < demo.spawn_x && demo.spawn_x < demo.track_end_x) {
            return Err(SettingsError::SpawnOffTrack {
                spawn_x: demo.spawn_x,
                start_x: demo.track_start_x,
                end_x: demo.track_end_x,
            });
        }

        if self.race.max_laps == 0 {
            return Err(SettingsError::NoLaps);
        }

        Ok(())
    }
}

lazy_static! {
    pub static ref GLOBAL_CONFIG: Settings = Settings::load().expect("failed to read config file");
}
