pub mod checkpoints;
pub mod error;
pub mod player;
mod settings;

pub use settings::{
    CheckpointSettings, ControllerSettings, DemoSettings, RaceSettings, Settings,
    SpeedometerSettings, ZoneSettings, GLOBAL_CONFIG,
};
