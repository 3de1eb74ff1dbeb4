use fma_core::player::lap_info::{LapInformation, LapNumber};
use fma_core::RaceSettings;
use glam::Vec3;

use crate::zone::Zone;

pub trait LapListener {
    fn set_current_lap(&mut self, lap: LapNumber);
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TriggerEvent {
    Enter,
    Exit,
}

/// Turns "is the car inside this volume" samples into enter/exit events, for
/// hosts that do not report trigger events themselves.
#[derive(Copy, Clone, Debug)]
pub struct TriggerVolume {
    pub bounds: Zone,
    inside: bool,
}

impl TriggerVolume {
    pub fn new(bounds: Zone) -> Self {
        TriggerVolume {
            bounds,
            inside: false,
        }
    }

    pub fn sample(&mut self, position: Vec3) -> Option<TriggerEvent> {
        let inside = self.bounds.contains(position);
        let event = match (self.inside, inside) {
            (false, true) => Some(TriggerEvent::Enter),
            (true, false) => Some(TriggerEvent::Exit),
            _ => None,
        };
        self.inside = inside;
        event
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LapOutcome {
    Completed(LapNumber),
    // a clean pass that paid off an earlier wrong-way pass instead of counting
    WrongWayCredited,
    WrongWayRecorded,
    Incomplete,
    RaceOver,
}

/// Start/finish gate. A lap counts when the car enters on the approach side
/// and leaves on the far side, and no wrong-way passes are outstanding.
#[derive(Clone, Debug)]
pub struct FinishLine {
    enter_threshold_x: f32,
    exit_threshold_x: f32,
    max_laps: LapNumber,
    lap_info: LapInformation,
    entered: bool,
    exited: bool,
    wrong_way: bool,
}

impl FinishLine {
    pub fn new(settings: &RaceSettings) -> Self {
        FinishLine {
            enter_threshold_x: settings.enter_threshold_x,
            exit_threshold_x: settings.exit_threshold_x,
            max_laps: settings.max_laps,
            lap_info: LapInformation::new(),
            entered: false,
            exited: false,
            wrong_way: false,
        }
    }

    pub fn lap_info(&self) -> LapInformation {
        self.lap_info
    }

    pub fn is_wrong_way(&self) -> bool {
        self.wrong_way
    }

    pub fn on_trigger_enter(&mut self, center_of_mass: Vec3) {
        self.lap_info.lapping = true;
        if center_of_mass.x < self.enter_threshold_x {
            self.entered = true;
        } else {
            self.wrong_way = true;
        }
    }

    pub fn on_trigger_exit(
        &mut self,
        center_of_mass: Vec3,
        listener: &mut dyn LapListener,
    ) -> LapOutcome {
        self.lap_info.lapping = false;

        let mut recorded_wrong_way = false;
        if center_of_mass.x > self.exit_threshold_x {
            self.exited = true;
            self.wrong_way = false;
        } else {
            self.lap_info.pending_wrong_laps += 1;
            recorded_wrong_way = true;
        }

        let outcome = if self.lap_info.lap >= self.max_laps {
            LapOutcome::RaceOver
        } else if self.entered && self.exited {
            if self.lap_info.pending_wrong_laps == 0 {
                self.lap_info.lap += 1;
                listener.set_current_lap(self.lap_info.lap);
                LapOutcome::Completed(self.lap_info.lap)
            } else {
                self.lap_info.pending_wrong_laps -= 1;
                LapOutcome::WrongWayCredited
            }
        } else if recorded_wrong_way {
            LapOutcome::WrongWayRecorded
        } else {
            LapOutcome::Incomplete
        };

        self.entered = false;
        self.exited = false;

        match outcome {
            LapOutcome::Completed(lap) => tracing::info!(lap, "lap completed"),
            LapOutcome::WrongWayRecorded | LapOutcome::WrongWayCredited => tracing::warn!(
                pending = self.lap_info.pending_wrong_laps,
                ?outcome,
                "wrong-way pass through the finish line"
            ),
            _ => {}
        }
        outcome
    }

    pub fn on_trigger(
        &mut self,
        event: TriggerEvent,
        center_of_mass: Vec3,
        listener: &mut dyn LapListener,
    ) -> Option<LapOutcome> {
        match event {
            TriggerEvent::Enter => {
                self.on_trigger_enter(center_of_mass);
                None
            }
            TriggerEvent::Exit => Some(self.on_trigger_exit(center_of_mass, listener)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fma_core::GLOBAL_CONFIG;

    #[derive(Default)]
    struct LapLog {
        laps: Vec<LapNumber>,
    }

    impl LapListener for LapLog {
        fn set_current_lap(&mut self, lap: LapNumber) {
            self.laps.push(lap);
        }
    }

    fn at_x(x: f32) -> Vec3 {
        Vec3::new(x, 0.0, 547.0)
    }

    fn forward_pass(line: &mut FinishLine, log: &mut LapLog) -> LapOutcome {
        line.on_trigger_enter(at_x(835.0));
        line.on_trigger_exit(at_x(872.0), log)
    }

    fn reverse_pass(line: &mut FinishLine, log: &mut LapLog) -> LapOutcome {
        line.on_trigger_enter(at_x(872.0));
        line.on_trigger_exit(at_x(835.0), log)
    }

    #[test]
    fn forward_pass_counts_a_lap() {
        let mut line = FinishLine::new(&GLOBAL_CONFIG.race);
        let mut log = LapLog::default();

        assert_eq!(forward_pass(&mut line, &mut log), LapOutcome::Completed(1));
        assert_eq!(forward_pass(&mut line, &mut log), LapOutcome::Completed(2));
        assert_eq!(log.laps, vec![1, 2]);
        assert!(!line.lap_info().lapping);
    }

    #[test]
    fn reverse_pass_is_paid_off_by_the_next_clean_pass() {
        let mut line = FinishLine::new(&GLOBAL_CONFIG.race);
        let mut log = LapLog::default();

        assert_eq!(reverse_pass(&mut line, &mut log), LapOutcome::WrongWayRecorded);
        assert!(line.is_wrong_way());
        assert_eq!(line.lap_info().pending_wrong_laps, 1);

        assert_eq!(forward_pass(&mut line, &mut log), LapOutcome::WrongWayCredited);
        assert_eq!(line.lap_info().pending_wrong_laps, 0);
        assert_eq!(line.lap_info().lap, 0);
        assert!(log.laps.is_empty());

        assert_eq!(forward_pass(&mut line, &mut log), LapOutcome::Completed(1));
    }

    #[test]
    fn exit_without_enter_is_incomplete() {
        let mut line = FinishLine::new(&GLOBAL_CONFIG.race);
        let mut log = LapLog::default();

        // entered from the far side, backed out again the way it came
        line.on_trigger_enter(at_x(850.0));
        assert_eq!(line.on_trigger_exit(at_x(870.0), &mut log), LapOutcome::Incomplete);
        assert_eq!(line.lap_info().lap, 0);
    }

    #[test]
    fn laps_stop_at_the_limit() {
        let mut line = FinishLine::new(&GLOBAL_CONFIG.race);
        let mut log = LapLog::default();
        let max_laps = GLOBAL_CONFIG.race.max_laps;

        for _ in 0..max_laps {
            forward_pass(&mut line, &mut log);
        }
        assert_eq!(line.lap_info().lap, max_laps);
        assert_eq!(forward_pass(&mut line, &mut log), LapOutcome::RaceOver);
        assert_eq!(line.lap_info().lap, max_laps);
        assert_eq!(log.laps.len(), max_laps as usize);
    }

    #[test]
    fn volume_reports_enter_and_exit_once() {
        let mut volume = TriggerVolume::new(Zone::new(835.0, 872.0, 537.0, 557.0));
        assert_eq!(volume.sample(at_x(830.0)), None);
        assert_eq!(volume.sample(at_x(840.0)), Some(TriggerEvent::Enter));
        assert_eq!(volume.sample(at_x(860.0)), None);
        assert_eq!(volume.sample(at_x(880.0)), Some(TriggerEvent::Exit));
        assert_eq!(volume.sample(at_x(890.0)), None);
    }
}
