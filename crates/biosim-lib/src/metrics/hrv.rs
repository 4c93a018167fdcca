use crate::signal::RRSeries;
use serde::{Deserialize, Serialize};

/// Time-domain HRV summary. Durations are in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HRVTime {
    pub n: usize,
    pub avnn: f64,
    pub sdnn: f64,
    pub rmssd: f64,
}

pub fn hrv_time(rr: &RRSeries) -> HRVTime {
    HRVTime {
        n: rr.len(),
        avnn: mean(&rr.rr).unwrap_or(0.0) * 1000.0,
        sdnn: sdnn_ms(rr),
        rmssd: rmssd_ms(rr),
    }
}

/// Population standard deviation (divisor n) of the intervals, in ms.
pub fn sdnn_ms(rr: &RRSeries) -> f64 {
    let Some(avg) = mean(&rr.rr) else {
        return 0.0;
    };
    let var = rr.rr.iter().map(|x| (x - avg).powi(2)).sum::<f64>() / rr.len() as f64;
    var.sqrt() * 1000.0
}

/// Root mean square of successive interval differences, in ms.
///
/// A series with fewer than two intervals has no successive differences
/// and reports 0.0.
pub fn rmssd_ms(rr: &RRSeries) -> f64 {
    let squared: Vec<f64> = rr.rr.windows(2).map(|w| (w[1] - w[0]).powi(2)).collect();
    mean(&squared).map(f64::sqrt).unwrap_or(0.0) * 1000.0
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
