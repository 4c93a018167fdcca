use crate::{
    error::HrvError,
    metrics::hrv::{hrv_time, HRVTime},
    signal::{BeatTimes, RRSeries},
};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Fewest beats that still yield one RR interval.
pub const MIN_BEATS: usize = 2;

/// Combined result of the beat → RR → HRV pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HrvPipelineResult {
    pub beat_count: usize,
    pub beats: BeatTimes,
    pub rr: RRSeries,
    pub hrv: HRVTime,
}

/// Derive RR intervals and time-domain metrics from detected beat times.
///
/// Beat times are used in the order given. Non-ascending input is accepted
/// and logged; the resulting negative intervals still produce well-defined
/// SDNN/RMSSD magnitudes.
pub fn run_hrv_pipeline(beats: BeatTimes) -> Result<HrvPipelineResult, HrvError> {
    if beats.len() < MIN_BEATS {
        return Err(HrvError::InsufficientBeats { found: beats.len() });
    }
    if !beats.is_ascending() {
        warn!("beat timestamps are not ascending; intervals are computed in input order");
    }
    let rr = RRSeries::from_beats(&beats);
    let hrv = hrv_time(&rr);
    debug!(
        "{} beats -> {} intervals, sdnn={:.3} ms rmssd={:.3} ms",
        beats.len(),
        rr.len(),
        hrv.sdnn,
        hrv.rmssd
    );
    Ok(HrvPipelineResult {
        beat_count: beats.len(),
        beats,
        rr,
        hrv,
    })
}
