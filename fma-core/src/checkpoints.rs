use std::collections::HashSet;
use std::fs;
use std::path::Path;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::error::CheckpointError;
use crate::player::choices::ComponentChange;
use crate::player::lap_info::LapNumber;
use crate::CheckpointSettings;

pub type CheckpointId = u32;

// dialog id meaning "no dialog open, the player is driving"
pub const DRIVING: CheckpointId = 0;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChoiceOption {
    pub label: String,
    pub outcome: ComponentChange,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum CheckpointKind {
    // a single "Continue" button
    Info,
    Choice(Vec<ChoiceOption>),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CheckpointData {
    pub id: CheckpointId,
    pub name: String,
    pub text: String,
    pub kind: CheckpointKind,
}

impl CheckpointData {
    pub fn options(&self) -> &[ChoiceOption] {
        match &self.kind {
            CheckpointKind::Info => &[],
            CheckpointKind::Choice(options) => options,
        }
    }
}

/// Ordered checkpoint dialogs for every lap. Index `n` holds the dialogs shown
/// while the car is on lap `n`.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct CheckpointTable {
    laps: Vec<Vec<CheckpointData>>,
}

impl CheckpointTable {
    pub fn new(laps: Vec<Vec<CheckpointData>>) -> Result<Self, CheckpointError> {
        let table = CheckpointTable { laps };
        table.validate()?;
        Ok(table)
    }

    pub fn from_yaml_str(source: &str) -> Result<Self, CheckpointError> {
        let table: CheckpointTable = serde_yaml::from_str(source)?;
        table.validate()?;
        Ok(table)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CheckpointError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| CheckpointError::Read {
            path: path.display().to_string(),
            source,
        })?;
        CheckpointTable::from_yaml_str(&source)
    }

    /// The table named by `checkpoints.table_path`, or the built-in one.
    pub fn configured(settings: &CheckpointSettings) -> Result<Self, CheckpointError> {
        match &settings.table_path {
            Some(path) => CheckpointTable::from_path(path),
            None => Ok(CHECKPOINTS.clone()),
        }
    }

    fn validate(&self) -> Result<(), CheckpointError> {
        let mut seen = HashSet::new();
        for checkpoint in self.laps.iter().flatten() {
            if checkpoint.id == DRIVING {
                return Err(CheckpointError::ReservedId);
            }
            if !seen.insert(checkpoint.id) {
                return Err(CheckpointError::DuplicateId(checkpoint.id));
            }
            if let CheckpointKind::Choice(options) = &checkpoint.kind {
                if options.is_empty() {
                    return Err(CheckpointError::EmptyChoice(checkpoint.id));
                }
            }
        }
        Ok(())
    }

    pub fn lap_count(&self) -> usize {
        self.laps.len()
    }

    // laps without an entry simply have no dialogs
    pub fn for_lap(&self, lap: LapNumber) -> &[CheckpointData] {
        self.laps
            .get(lap as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn find(&self, id: CheckpointId) -> Option<(LapNumber, &CheckpointData)> {
        self.laps.iter().enumerate().find_map(|(lap, checkpoints)| {
            checkpoints
                .iter()
                .find(|checkpoint| checkpoint.id == id)
                .map(|checkpoint| (lap as LapNumber, checkpoint))
        })
    }
}

fn info(id: CheckpointId, name: &str, text: &str) -> CheckpointData {
    CheckpointData {
        id,
        name: name.to_string(),
        text: text.to_string(),
        kind: CheckpointKind::Info,
    }
}

fn choice(
    id: CheckpointId,
    name: &str,
    text: &str,
    options: [(&str, ComponentChange); 2],
) -> CheckpointData {
    CheckpointData {
        id,
        name: name.to_string(),
        text: text.to_string(),
        kind: CheckpointKind::Choice(
            options
                .into_iter()
                .map(|(label, outcome)| ChoiceOption {
                    label: label.to_string(),
                    outcome,
                })
                .collect(),
        ),
    }
}

fn lesson(
    lap: CheckpointId,
    topic: &str,
    text: &str,
    question: &str,
    options: [(&str, ComponentChange); 2],
) -> Vec<CheckpointData> {
    vec![
        info(lap * 10 + 1, &format!("lap{lap}.{topic}.lesson"), text),
        choice(
            lap * 10 + 2,
            &format!("lap{lap}.{topic}.choice"),
            question,
            options,
        ),
    ]
}

fn default_table() -> Vec<Vec<CheckpointData>> {
    use ComponentChange::*;

    vec![
        vec![
            info(1, "intro.welcome", "This is your first checkpoint"),
            info(
                2,
                "intro.purpose",
                "The point of these checkpoints\nis to allow you to change the\nvariables of the physics\nequation F=MA",
            ),
            info(
                3,
                "intro.learning",
                "Changing the equations lets\nyou learn how they work.\nSelecting the proper answer\nmakes your car go faster.",
            ),
            info(
                4,
                "intro.bumper_preview",
                "For the first checkpoint\nwe will give you a choice\nof a flat bumper\nor a slick one.",
            ),
            choice(
                5,
                "intro.bumper_choice",
                "F=M*A\nor Acceleration = force / mass\n\nyour mass will stay constant for now\nyour choice is between negative\nwind resistance forces",
                [
                    ("Flat bumper  (F = -50 Newtons)", ResistanceForce(-50.0)),
                    ("Slick bumper  (F = -20 Newtons)", ResistanceForce(-20.0)),
                ],
            ),
        ],
        lesson(
            1,
            "frame",
            "Force stays the same this lap.\nWith less mass to push,\nthe same force gives\nmore acceleration.",
            "Pick a frame.\nA = F / M",
            [
                ("Aluminium frame  (M = 900 kg)", Mass(900.0)),
                ("Steel frame  (M = 1200 kg)", Mass(1200.0)),
            ],
        ),
        lesson(
            2,
            "engine",
            "Now the mass is fixed.\nA bigger force on the same mass\nmeans more acceleration.",
            "Pick an engine.\nA = F / M",
            [
                ("Stock engine  (F = 4000 Newtons)", DriveForce(4000.0)),
                ("Turbo engine  (F = 5500 Newtons)", DriveForce(5500.0)),
            ],
        ),
        lesson(
            3,
            "roof",
            "Wind resistance is a force\npointing backwards.\nIt subtracts from the engine force.",
            "Pick a roof.\nNet F = engine F + resistance F",
            [
                ("Roof box  (F = -150 Newtons)", ResistanceForce(-150.0)),
                ("Bare roof  (F = -40 Newtons)", ResistanceForce(-40.0)),
            ],
        ),
        lesson(
            4,
            "fuel",
            "Fuel has mass too.\nCarrying less of it\nmakes the car lighter.",
            "Pick a fuel load.\nA = F / M",
            [
                ("Full tank  (M = 1100 kg)", Mass(1100.0)),
                ("Half tank  (M = 1050 kg)", Mass(1050.0)),
            ],
        ),
        lesson(
            5,
            "tyres",
            "Tyres decide how much of the\nengine force reaches the road.",
            "Pick tyres.\nA = F / M",
            [
                ("Street tyres  (F = 4200 Newtons)", DriveForce(4200.0)),
                ("Racing slicks  (F = 4800 Newtons)", DriveForce(4800.0)),
            ],
        ),
        lesson(
            6,
            "seats",
            "Every part you remove\nlowers the mass.",
            "Pick an interior.\nA = F / M",
            [
                ("Passenger seat fitted  (M = 1080 kg)", Mass(1080.0)),
                ("Passenger seat removed  (M = 1020 kg)", Mass(1020.0)),
            ],
        ),
        lesson(
            7,
            "wing",
            "A big wing pushes the car down\nbut also drags it back.",
            "Pick a rear wing.\nNet F = engine F + resistance F",
            [
                ("Rear wing  (F = -90 Newtons)", ResistanceForce(-90.0)),
                ("No wing  (F = -30 Newtons)", ResistanceForce(-30.0)),
            ],
        ),
        lesson(
            8,
            "gearbox",
            "Faster shifts waste less\nof the engine force.",
            "Pick a gearbox.\nA = F / M",
            [
                ("Single clutch  (F = 4500 Newtons)", DriveForce(4500.0)),
                ("Twin clutch  (F = 5000 Newtons)", DriveForce(5000.0)),
            ],
        ),
        lesson(
            9,
            "panels",
            "Last lap.\nDoubling the mass halves\nthe acceleration.",
            "Pick body panels.\nA = F / M",
            [
                ("Lead ballast  (M = 1300 kg)", Mass(1300.0)),
                ("Carbon panels  (M = 950 kg)", Mass(950.0)),
            ],
        ),
    ]
}

lazy_static! {
    pub static ref CHECKPOINTS: CheckpointTable =
        CheckpointTable::new(default_table()).expect("built-in checkpoint table is invalid");
}
