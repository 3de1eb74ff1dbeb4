use std::collections::HashSet;

use fma_core::checkpoints::{CheckpointData, CheckpointId, CheckpointKind, CheckpointTable, DRIVING};
use fma_core::error::CheckpointError;
use fma_core::player::choices::{CarSetup, ComponentChange};
use fma_core::player::lap_info::LapNumber;
use fma_core::CheckpointSettings;

use crate::engine::{Clock, RigidBody};
use crate::pause::{PauseSource, SimulationPause};
use crate::ui::{ImmediateUi, Rect, Texture};
use crate::zone::Zone;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    Unchanged,
    // first dialog of a visit, the world has just been paused
    Opened(CheckpointId),
    Advanced(CheckpointId),
    Closed,
    RaceOver,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DialogResponse {
    Continue,
    Option(usize),
}

/// Walks the checkpoint table while the car sits in the checkpoint zone.
pub struct CheckpointSequencer {
    table: CheckpointTable,
    zone: Zone,
    resume_max_angular_velocity: f32,
    max_laps: LapNumber,

    state: CheckpointId,
    completed: HashSet<CheckpointId>,
    current_lap: LapNumber,
    car_setup: CarSetup,
}

impl CheckpointSequencer {
    pub fn new(
        table: CheckpointTable,
        settings: &CheckpointSettings,
        max_laps: LapNumber,
        car_setup: CarSetup,
    ) -> Self {
        CheckpointSequencer {
            table,
            zone: settings.zone.into(),
            resume_max_angular_velocity: settings.resume_max_angular_velocity,
            max_laps,
            state: DRIVING,
            completed: HashSet::new(),
            current_lap: 0,
            car_setup,
        }
    }

    pub fn state(&self) -> CheckpointId {
        self.state
    }

    pub fn current_lap(&self) -> LapNumber {
        self.current_lap
    }

    pub fn set_current_lap(&mut self, lap: LapNumber) {
        self.current_lap = lap;
    }

    pub fn car_setup(&self) -> CarSetup {
        self.car_setup
    }

    pub fn zone(&self) -> Zone {
        self.zone
    }

    pub fn is_completed(&self, id: CheckpointId) -> bool {
        self.completed.contains(&id)
    }

    pub fn is_race_over(&self) -> bool {
        self.current_lap >= self.max_laps
    }

    pub fn active(&self) -> Option<&CheckpointData> {
        if self.state == DRIVING {
            return None;
        }
        self.table.find(self.state).map(|(_, checkpoint)| checkpoint)
    }

    fn next_pending(&self) -> Option<CheckpointId> {
        self.table
            .for_lap(self.current_lap)
            .iter()
            .map(|checkpoint| checkpoint.id)
            .find(|id| !self.completed.contains(id))
    }

    /// Runs once per frame after the car has been driven.
    pub fn update<B: RigidBody>(
        &mut self,
        body: &mut B,
        clock: &mut dyn Clock,
        pause: &mut SimulationPause,
    ) -> Transition {
        if self.is_race_over() {
            return if pause.pause(PauseSource::RaceFinished, clock) {
                tracing::info!(lap = self.current_lap, "race over, freezing simulation");
                Transition::RaceOver
            } else {
                Transition::Unchanged
            };
        }

        if !self.zone.contains(body.center_of_mass_position()) {
            return self.close(body, clock, pause);
        }

        match self.next_pending() {
            Some(id) if self.state == DRIVING => {
                pause.pause(PauseSource::Checkpoint, clock);
                body.set_max_angular_velocity(0.0);
                self.state = id;
                tracing::info!(checkpoint = id, lap = self.current_lap, "checkpoint opened");
                Transition::Opened(id)
            }
            Some(id) if self.state != id => {
                self.state = id;
                tracing::debug!(checkpoint = id, "checkpoint advanced");
                Transition::Advanced(id)
            }
            Some(_) => Transition::Unchanged,
            None => self.close(body, clock, pause),
        }
    }

    fn close<B: RigidBody>(
        &mut self,
        body: &mut B,
        clock: &mut dyn Clock,
        pause: &mut SimulationPause,
    ) -> Transition {
        if self.state == DRIVING {
            return Transition::Unchanged;
        }
        self.state = DRIVING;
        pause.resume(PauseSource::Checkpoint, clock);
        body.set_max_angular_velocity(self.resume_max_angular_velocity);
        tracing::info!(lap = self.current_lap, "checkpoints done, back to driving");
        Transition::Closed
    }

    fn check_active(&self, id: CheckpointId) -> Result<&CheckpointData, CheckpointError> {
        if self.state == DRIVING {
            return Err(CheckpointError::NoActiveCheckpoint);
        }
        if id != self.state {
            return Err(CheckpointError::NotActive {
                requested: id,
                active: self.state,
            });
        }
        self.table
            .find(id)
            .map(|(_, checkpoint)| checkpoint)
            .ok_or(CheckpointError::UnknownCheckpoint(id))
    }

    /// Marks an informational checkpoint as read.
    pub fn acknowledge(&mut self, id: CheckpointId) -> Result<(), CheckpointError> {
        let checkpoint = self.check_active(id)?;
        if let CheckpointKind::Choice(_) = checkpoint.kind {
            return Err(CheckpointError::ChoiceRequired(id));
        }
        self.completed.insert(id);
        tracing::debug!(checkpoint = id, "checkpoint acknowledged");
        Ok(())
    }

    /// Picks one option of a choice checkpoint and applies it to the car setup.
    pub fn choose(
        &mut self,
        id: CheckpointId,
        option: usize,
    ) -> Result<ComponentChange, CheckpointError> {
        let checkpoint = self.check_active(id)?;
        let options = checkpoint.options();
        let picked = options.get(option).ok_or(CheckpointError::UnknownOption {
            id,
            option,
            available: options.len(),
        })?;

        let outcome = picked.outcome;
        tracing::info!(checkpoint = id, choice = %picked.label, "component picked");
        self.car_setup.apply(outcome);
        self.completed.insert(id);
        tracing::info!(
            mass_kg = self.car_setup.mass_kg,
            net_force_n = self.car_setup.net_force(),
            acceleration = self.car_setup.acceleration(),
            "car setup changed"
        );
        Ok(outcome)
    }

    pub fn respond(
        &mut self,
        id: CheckpointId,
        response: DialogResponse,
    ) -> Result<(), CheckpointError> {
        match response {
            DialogResponse::Continue => self.acknowledge(id),
            DialogResponse::Option(option) => self.choose(id, option).map(|_| ()),
        }
    }

    /// Draws the open dialog, if any, and returns the button pressed this pass.
    pub fn draw_dialog(&self, ui: &mut dyn ImmediateUi) -> Option<(CheckpointId, DialogResponse)> {
        let checkpoint = self.active()?;
        let screen = ui.screen_size();
        let (cx, cy) = (screen.x / 2.0, screen.y / 2.0);

        ui.draw_texture(Rect::new(cx - 200.0, cy - 300.0, 400.0, 400.0), Texture::CheckpointFlag);
        ui.draw_box(
            Rect::new(cx - 150.0, cy - 150.0, 300.0, 300.0),
            &format!(
                "\n\nCheckpoint {}\n\n{}",
                self.current_lap as u32 + 1,
                checkpoint.text
            ),
        );

        match &checkpoint.kind {
            CheckpointKind::Info => ui
                .button(Rect::new(cx - 50.0, cy + 50.0, 100.0, 20.0), "Continue")
                .then(|| (checkpoint.id, DialogResponse::Continue)),
            CheckpointKind::Choice(options) => {
                let mut pressed = None;
                // every button is drawn even after one reports a click
                for (index, option) in options.iter().enumerate() {
                    let rect = Rect::new(cx - 125.0, cy + 40.0 + 30.0 * index as f32, 250.0, 20.0);
                    if ui.button(rect, &option.label) && pressed.is_none() {
                        pressed = Some((checkpoint.id, DialogResponse::Option(index)));
                    }
                }
                pressed
            }
        }
    }
}
