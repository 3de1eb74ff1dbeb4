use serde::{Deserialize, Serialize};

pub type LapNumber = u8;

// Finish line bookkeeping for a single car
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default)]
pub struct LapInformation {
    pub lap: LapNumber,
    pub pending_wrong_laps: u32,
    pub lapping: bool,
}

impl LapInformation {
    pub fn new() -> Self {
        LapInformation {
            lap: 0,
            pending_wrong_laps: 0,
            lapping: false,
        }
    }
}

/// Elapsed seconds per lap. Only the running lap ever grows, so finished laps
/// stay frozen.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct LapTimes {
    times: Vec<f32>,
}

impl LapTimes {
    pub fn new(capacity: LapNumber) -> Self {
        Self {
            times: vec![0.0; capacity as usize],
        }
    }

    pub fn capacity(&self) -> usize {
        self.times.len()
    }

    /// Adds `delta` to the given lap. Returns false when the lap is past the
    /// table's capacity, in which case nothing is recorded.
    pub fn record(&mut self, lap: LapNumber, delta: f32) -> bool {
        match self.times.get_mut(lap as usize) {
            Some(time) => {
                *time += delta.max(0.0);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, lap: LapNumber) -> Option<f32> {
        self.times.get(lap as usize).copied()
    }

    // laps that have any time on them, in lap order
    pub fn iter(&self) -> impl Iterator<Item = (LapNumber, f32)> + '_ {
        self.times
            .iter()
            .enumerate()
            .filter(|(_, time)| **time > 0.0)
            .map(|(lap, time)| (lap as LapNumber, *time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_are_dropped_past_capacity() {
        let mut times = LapTimes::new(2);
        assert!(times.record(0, 1.5));
        assert!(times.record(1, 0.25));
        assert!(!times.record(2, 3.0));
        assert_eq!(times.get(2), None);
        assert_eq!(times.iter().collect::<Vec<_>>(), vec![(0, 1.5), (1, 0.25)]);
    }

    #[test]
    fn lap_time_never_decreases() {
        let mut times = LapTimes::new(1);
        times.record(0, 2.0);
        times.record(0, -1.0);
        assert_eq!(times.get(0), Some(2.0));
    }
}
