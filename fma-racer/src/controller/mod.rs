use fma_core::checkpoints::{CheckpointTable, DRIVING};
use fma_core::player::lap_info::{LapNumber, LapTimes};
use fma_core::player::player_inputs::PlayerInputs;
use fma_core::{ControllerSettings, Settings};

use crate::checkpoints::{CheckpointSequencer, Transition};
use crate::engine::{Clock, Drivetrain, Keyboard, RigidBody, Wheel, REVERSE_GEAR};
use crate::finish_line::LapListener;
use crate::hud;
use crate::pause::SimulationPause;
use crate::ui::ImmediateUi;

pub mod shift_gate;
pub mod steering;
pub mod throttle;


/// Smoothed control values, updated every frame while the car is driving.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CarControlState {
    pub steering: f32,
    pub throttle: f32,
    pub throttle_input: f32,
    pub brake: f32,
    pub handbrake: f32,
    pub last_shift_time: f32,
}

impl CarControlState {
    pub fn new() -> Self {
        CarControlState {
            steering: 0.0,
            throttle: 0.0,
            throttle_input: 0.0,
            brake: 0.0,
            handbrake: 0.0,
            last_shift_time: -1.0,
        }
    }
}

impl Default for CarControlState {
    fn default() -> Self {
        Self::new()
    }
}

pub struct CarController<B, D, W> {
    settings: ControllerSettings,
    body: B,
    drivetrain: D,
    wheels: Vec<W>,

    state: CarControlState,
    lap_times: LapTimes,
    checkpoints: CheckpointSequencer,
}

impl<B: RigidBody, D: Drivetrain, W: Wheel> CarController<B, D, W> {
    pub fn new(
        settings: &Settings,
        table: CheckpointTable,
        mut body: B,
        drivetrain: D,
        wheels: Vec<W>,
    ) -> Self {
        body.scale_inertia_tensor(settings.controller.inertia_factor);
        let max_laps = settings.race.max_laps;
        CarController {
            settings: settings.controller.clone(),
            body,
            drivetrain,
            wheels,
            state: CarControlState::new(),
            lap_times: LapTimes::new(max_laps),
            checkpoints: CheckpointSequencer::new(
                table,
                &settings.checkpoints,
                max_laps,
                settings.car_setup,
            ),
        }
    }

    pub fn state(&self) -> &CarControlState {
        &self.state
    }

    pub fn body(&self) -> &B {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut B {
        &mut self.body
    }

    pub fn drivetrain(&self) -> &D {
        &self.drivetrain
    }

    pub fn drivetrain_mut(&mut self) -> &mut D {
        &mut self.drivetrain
    }

    pub fn wheels(&self) -> &[W] {
        &self.wheels
    }

    pub fn lap_times(&self) -> &LapTimes {
        &self.lap_times
    }

    pub fn checkpoints(&self) -> &CheckpointSequencer {
        &self.checkpoints
    }

    pub fn checkpoints_mut(&mut self) -> &mut CheckpointSequencer {
        &mut self.checkpoints
    }

    // mean over all wheels, for skid sounds
    pub fn average_slip_velo(&self) -> f32 {
        if self.wheels.is_empty() {
            return 0.0;
        }
        self.wheels.iter().map(|wheel| wheel.slip_velo()).sum::<f32>() / self.wheels.len() as f32
    }

    /// Per-frame update: drives the car while no checkpoint dialog is open,
    /// then lets the checkpoint sequencer react to the car's position.
    pub fn update(
        &mut self,
        keyboard: &dyn Keyboard,
        clock: &mut dyn Clock,
        pause: &mut SimulationPause,
    ) -> Transition {
        if self.checkpoints.state() == DRIVING {
            let delta_time = clock.delta_time();
            self.drive(keyboard.player_inputs(), delta_time, clock.time());

            let lap = self.checkpoints.current_lap();
            if !self.lap_times.record(lap, delta_time) {
                tracing::trace!(lap, "lap beyond lap time table, not recorded");
            }
        }

        self.checkpoints.update(&mut self.body, clock, pause)
    }

    fn drive(&mut self, inputs: PlayerInputs, delta_time: f32, now: f32) {
        let speed = self.body.velocity().length();
        let max_steering_angle = self
            .wheels
            .first()
            .map(|wheel| wheel.max_steering_angle())
            .unwrap_or(0.0);
        let optimal = steering::optimal_steering(
            self.body.velocity(),
            self.body.forward(),
            max_steering_angle,
            self.settings.optimal_steering_min_speed,
        );
        self.state.steering = steering::steer_towards(
            self.state.steering,
            inputs.steer,
            optimal,
            speed,
            &self.settings,
            delta_time,
        );

        let inputs = if self.drivetrain.automatic() && self.drivetrain.gear() == REVERSE_GEAR {
            inputs.with_pedals_swapped()
        } else {
            inputs
        };
        throttle::apply_pedals(
            &mut self.state,
            &inputs,
            self.drivetrain.slip_ratio(),
            &self.settings,
            delta_time,
        );
        throttle::apply_handbrake(&mut self.state, inputs.handbrake, &self.settings, delta_time);

        if inputs.shifts() {
            shift_gate::register_shift(&mut self.state, now);
            if inputs.shift_up {
                self.drivetrain.shift_up();
            }
            if inputs.shift_down {
                self.drivetrain.shift_down();
            }
            tracing::debug!(
                up = inputs.shift_up,
                down = inputs.shift_down,
                gear = self.drivetrain.gear(),
                "gear shift"
            );
        }

        let factor = shift_gate::throttle_factor(&self.state, now, self.settings.shift_speed);
        self.drivetrain.set_throttle(self.state.throttle * factor);
        self.drivetrain.set_throttle_input(self.state.throttle_input);

        for wheel in self.wheels.iter_mut() {
            wheel.set_brake(self.state.brake);
            wheel.set_handbrake(self.state.handbrake);
            wheel.set_steering(self.state.steering);
        }
    }

    /// GUI pass: checkpoint dialog, debug label, speed and lap times.
    pub fn on_gui(&mut self, ui: &mut dyn ImmediateUi) {
        if let Some((id, response)) = self.checkpoints.draw_dialog(ui) {
            if let Err(err) = self.checkpoints.respond(id, response) {
                tracing::warn!("checkpoint response rejected: {err}");
            }
        }

        hud::draw_debug_label(ui, self.body.center_of_mass_position(), self.checkpoints.state());
        hud::draw_speed_label(ui, self.body.velocity().length());
        hud::draw_lap_times(ui, &self.lap_times, self.checkpoints.current_lap());
    }
}

impl<B: RigidBody, D: Drivetrain, W: Wheel> LapListener for CarController<B, D, W> {
    fn set_current_lap(&mut self, lap: LapNumber) {
        self.checkpoints.set_current_lap(lap);
    }
}
