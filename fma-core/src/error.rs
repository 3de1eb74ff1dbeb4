use std::fmt;

use config::ConfigError;

use crate::checkpoints::CheckpointId;

#[derive(Debug)]
pub enum SettingsError {
    Load(ConfigError),
    NonPositive { field: &'static str, value: f32 },
    Negative { field: &'static str, value: f32 },
    EmptyZone,
    InvertedFinishLine { enter_x: f32, exit_x: f32 },
    SpawnOffTrack { spawn_x: f32, start_x: f32, end_x: f32 },
    NoLaps,
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load(err) => write!(f, "could not load settings: {err}"),
            Self::NonPositive { field, value } => {
                write!(f, "{field} must be greater than zero (got {value})")
            }
            Self::Negative { field, value } => {
                write!(f, "{field} must not be negative (got {value})")
            }
            Self::EmptyZone => write!(f, "checkpoint zone has no area"),
            Self::InvertedFinishLine { enter_x, exit_x } => write!(
                f,
                "finish line enter threshold {enter_x} lies past exit threshold {exit_x}"
            ),
            Self::SpawnOffTrack {
                spawn_x,
                start_x,
                end_x,
            } => write!(f, "demo.spawn_x {spawn_x} is outside the track ({start_x}..{end_x})"),
            Self::NoLaps => write!(f, "race.max_laps must be at least 1"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Load(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigError> for SettingsError {
    fn from(err: ConfigError) -> Self {
        Self::Load(err)
    }
}

#[derive(Debug)]
pub enum CheckpointError {
    NoActiveCheckpoint,
    NotActive {
        requested: CheckpointId,
        active: CheckpointId,
    },
    UnknownCheckpoint(CheckpointId),
    UnknownOption {
        id: CheckpointId,
        option: usize,
        available: usize,
    },
    ChoiceRequired(CheckpointId),
    ReservedId,
    DuplicateId(CheckpointId),
    EmptyChoice(CheckpointId),
    Read { path: String, source: std::io::Error },
    Parse(serde_yaml::Error),
}

impl fmt::Display for CheckpointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoActiveCheckpoint => write!(f, "no checkpoint dialog is open"),
            Self::NotActive { requested, active } => write!(
                f,
                "checkpoint {requested} is not the open dialog (open: {active})"
            ),
            Self::UnknownCheckpoint(id) => write!(f, "unknown checkpoint {id}"),
            Self::UnknownOption {
                id,
                option,
                available,
            } => write!(
                f,
                "checkpoint {id} has {available} options, option {option} does not exist"
            ),
            Self::ChoiceRequired(id) => {
                write!(f, "checkpoint {id} needs one of its options to be picked")
            }
            Self::ReservedId => write!(f, "checkpoint id 0 is reserved for driving"),
            Self::DuplicateId(id) => write!(f, "checkpoint id {id} is used more than once"),
            Self::EmptyChoice(id) => write!(f, "choice checkpoint {id} has no options"),
            Self::Read { path, source } => {
                write!(f, "could not read checkpoint table {path}: {source}")
            }
            Self::Parse(err) => write!(f, "could not parse checkpoint table: {err}"),
        }
    }
}

impl std::error::Error for CheckpointError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_yaml::Error> for CheckpointError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err)
    }
}
