use serde::{Deserialize, Serialize};

/// One row of a binary heartbeat recording.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Seconds since the start of the recording
    pub timestamp: f64,
    /// Detection flag, 1.0 marks a beat
    pub signal: f64,
}

impl Sample {
    pub fn is_beat(&self) -> bool {
        self.signal == 1.0
    }
}

/// Timestamps (seconds) of detected beats, in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BeatTimes {
    pub times: Vec<f64>,
}

impl BeatTimes {
    /// Keep only samples whose flag is exactly 1.0.
    pub fn from_samples(samples: &[Sample]) -> Self {
        let times = samples
            .iter()
            .filter(|s| s.is_beat())
            .map(|s| s.timestamp)
            .collect();
        Self { times }
    }

    pub fn from_times(times: Vec<f64>) -> Self {
        Self { times }
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// True when every beat is at or after the previous one.
    pub fn is_ascending(&self) -> bool {
        self.times.windows(2).all(|w| w[1] >= w[0])
    }
}

/// RR intervals (seconds)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RRSeries {
    pub rr: Vec<f64>,
}

impl RRSeries {
    pub fn from_beats(beats: &BeatTimes) -> Self {
        let rr = beats.times.windows(2).map(|w| w[1] - w[0]).collect();
        Self { rr }
    }

    pub fn len(&self) -> usize {
        self.rr.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rr.is_empty()
    }

    /// Intervals rounded to `decimals` places, for display.
    pub fn rounded(&self, decimals: i32) -> Vec<f64> {
        let scale = 10f64.powi(decimals);
        self.rr.iter().map(|x| (x * scale).round() / scale).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn beats_require_exact_flag() {
        let samples = [
            Sample { timestamp: 0.0, signal: 1.0 },
            Sample { timestamp: 0.1, signal: 0.0 },
            Sample { timestamp: 0.2, signal: 0.999 },
            Sample { timestamp: 0.3, signal: 2.0 },
            Sample { timestamp: 0.8, signal: 1.0 },
        ];
        let beats = BeatTimes::from_samples(&samples);
        assert_eq!(beats.times, vec![0.0, 0.8]);
    }

    #[test]
    fn rr_has_one_fewer_entry_than_beats() {
        let beats = BeatTimes::from_times(vec![0.0, 0.8, 1.6, 2.4]);
        let rr = RRSeries::from_beats(&beats);
        assert_eq!(rr.len(), 3);
        assert_eq!(rr.rounded(3), vec![0.8, 0.8, 0.8]);
    }

    #[test]
    fn single_beat_yields_no_intervals() {
        let rr = RRSeries::from_beats(&BeatTimes::from_times(vec![1.0]));
        assert!(rr.is_empty());
    }

    #[test]
    fn detects_non_ascending_beats() {
        assert!(BeatTimes::from_times(vec![0.0, 0.5, 0.5, 1.0]).is_ascending());
        assert!(!BeatTimes::from_times(vec![0.0, 1.0, 0.5]).is_ascending());
    }
}
