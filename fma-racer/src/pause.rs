use std::collections::BTreeSet;

use crate::engine::Clock;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PauseSource {
    Checkpoint,
    RaceFinished,
}

/// Owns the clock's time-scale. The world runs only while no source holds a
/// pause, so one source resuming cannot undo another source's pause.
#[derive(Default, Debug)]
pub struct SimulationPause {
    holders: BTreeSet<PauseSource>,
}

impl SimulationPause {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_paused(&self) -> bool {
        !self.holders.is_empty()
    }

    pub fn is_held_by(&self, source: PauseSource) -> bool {
        self.holders.contains(&source)
    }

    /// Returns true if `source` was not already holding a pause.
    pub fn pause(&mut self, source: PauseSource, clock: &mut dyn Clock) -> bool {
        let added = self.holders.insert(source);
        if added {
            tracing::info!(?source, "simulation paused");
        }
        self.apply(clock);
        added
    }

    /// Returns true if `source` was holding a pause.
    pub fn resume(&mut self, source: PauseSource, clock: &mut dyn Clock) -> bool {
        let removed = self.holders.remove(&source);
        if removed {
            tracing::info!(?source, still_paused = self.is_paused(), "pause released");
        }
        self.apply(clock);
        removed
    }

    fn apply(&self, clock: &mut dyn Clock) {
        let scale = if self.is_paused() { 0.0 } else { 1.0 };
        if clock.time_scale() != scale {
            clock.set_time_scale(scale);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::FixedStepClock;

    #[test]
    fn overlapping_sources_do_not_clobber_each_other() {
        let mut clock = FixedStepClock::new(0.02);
        let mut pause = SimulationPause::new();

        assert!(pause.pause(PauseSource::Checkpoint, &mut clock));
        assert!(pause.pause(PauseSource::RaceFinished, &mut clock));
        assert_eq!(clock.time_scale(), 0.0);

        assert!(pause.resume(PauseSource::Checkpoint, &mut clock));
        assert_eq!(clock.time_scale(), 0.0);
        assert!(pause.is_held_by(PauseSource::RaceFinished));

        assert!(pause.resume(PauseSource::RaceFinished, &mut clock));
        assert_eq!(clock.time_scale(), 1.0);
    }

    #[test]
    fn pausing_twice_is_idempotent() {
        let mut clock = FixedStepClock::new(0.02);
        let mut pause = SimulationPause::new();

        assert!(pause.pause(PauseSource::Checkpoint, &mut clock));
        assert!(!pause.pause(PauseSource::Checkpoint, &mut clock));
        assert!(pause.resume(PauseSource::Checkpoint, &mut clock));
        assert!(!pause.is_paused());
        assert!(!pause.resume(PauseSource::Checkpoint, &mut clock));
    }
}
