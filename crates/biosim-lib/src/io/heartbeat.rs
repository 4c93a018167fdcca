use csv::{ReaderBuilder, StringRecord, Trim};
use log::debug;
use std::fs::File;
use std::path::Path;

use crate::error::LoadError;
use crate::signal::{BeatTimes, Sample};

pub const DEFAULT_TIME_COLUMN: &str = "Time (s)";
pub const DEFAULT_SIGNAL_COLUMN: &str = "Signal";

/// Header names of the two columns a heartbeat recording must carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeartbeatColumns {
    pub time: String,
    pub signal: String,
}

impl Default for HeartbeatColumns {
    fn default() -> Self {
        Self {
            time: DEFAULT_TIME_COLUMN.into(),
            signal: DEFAULT_SIGNAL_COLUMN.into(),
        }
    }
}

/// Load every (time, signal) row of a heartbeat CSV.
///
/// A signal cell that is blank or not a number reads as NaN and never marks
/// a beat. The time cell only has to parse on rows flagged as beats; on other
/// rows an unreadable time also reads as NaN.
pub fn read_heartbeat_csv(path: &Path, columns: &HeartbeatColumns) -> Result<Vec<Sample>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let csv_err = |source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(file);
    let headers = reader.headers().map_err(csv_err)?.clone();

    let time_idx = locate_column(&headers, &columns.time, "time")?;
    let signal_idx = locate_column(&headers, &columns.signal, "signal")?;

    let mut samples = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result.map_err(csv_err)?;
        let signal = parse_cell(&record, signal_idx, row + 1, &columns.signal).unwrap_or(f64::NAN);
        let timestamp = match parse_cell(&record, time_idx, row + 1, &columns.time) {
            Ok(ts) => ts,
            Err(err) if signal == 1.0 => return Err(err),
            Err(_) => f64::NAN,
        };
        samples.push(Sample { timestamp, signal });
    }
    debug!("read {} samples from {}", samples.len(), path.display());
    Ok(samples)
}

/// Load a heartbeat CSV and keep the timestamps flagged as beats.
pub fn load_beat_times(path: &Path, columns: &HeartbeatColumns) -> Result<BeatTimes, LoadError> {
    let samples = read_heartbeat_csv(path, columns)?;
    let beats = BeatTimes::from_samples(&samples);
    debug!("{} of {} samples flagged as beats", beats.len(), samples.len());
    Ok(beats)
}

fn parse_cell(record: &StringRecord, idx: usize, row: usize, column: &str) -> Result<f64, LoadError> {
    let raw = record.get(idx).unwrap_or("");
    raw.parse::<f64>().map_err(|_| LoadError::InvalidValue {
        row,
        column: column.to_string(),
        value: raw.to_string(),
    })
}

fn locate_column(headers: &StringRecord, requested: &str, hint: &'static str) -> Result<usize, LoadError> {
    headers
        .iter()
        .position(|name| name == requested)
        .ok_or_else(|| LoadError::MissingColumn {
            column: requested.to_string(),
            hint,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn sample_path(relative: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .parent()
            .and_then(|p| p.parent())
            .expect("workspace root")
            .join(relative)
    }

    #[test]
    fn reads_simulated_signal() {
        let path = sample_path("test_data/simulated_heart_signal.csv");
        let beats = load_beat_times(&path, &HeartbeatColumns::default()).expect("read sample");
        assert_eq!(beats.times, vec![0.0, 0.8, 1.5, 2.4]);
    }

    #[test]
    fn keeps_only_exact_ones() {
        let file = write_csv("Time (s),Signal\n0.0,1\n0.1,0.5\n0.2,1.0\n0.3,2\n0.4,1e0\n0.5,-1\n");
        let beats = load_beat_times(file.path(), &HeartbeatColumns::default()).unwrap();
        assert_eq!(beats.times, vec![0.0, 0.2, 0.4]);
    }

    #[test]
    fn ignores_extra_columns_and_order() {
        let file = write_csv("Signal,Raw,Time (s)\n1,0.91,0.25\n0,0.10,0.50\n1,0.88,1.05\n");
        let beats = load_beat_times(file.path(), &HeartbeatColumns::default()).unwrap();
        assert_eq!(beats.times, vec![0.25, 1.05]);
    }

    #[test]
    fn custom_column_names() {
        let file = write_csv("t,beat\n0.0,1\n1.0,1\n");
        let columns = HeartbeatColumns {
            time: "t".into(),
            signal: "beat".into(),
        };
        let beats = load_beat_times(file.path(), &columns).unwrap();
        assert_eq!(beats.len(), 2);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_heartbeat_csv(Path::new("does/not/exist.csv"), &HeartbeatColumns::default())
            .unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn missing_column_is_schema_error() {
        let file = write_csv("Time (s),Value\n0.0,1\n");
        let err = read_heartbeat_csv(file.path(), &HeartbeatColumns::default()).unwrap_err();
        match err {
            LoadError::MissingColumn { column, hint } => {
                assert_eq!(column, "Signal");
                assert_eq!(hint, "signal");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn blank_signal_is_not_a_beat() {
        let file = write_csv("Time (s),Signal\n0.0,1.0\n0.4,\n0.8,1.0\n");
        let beats = load_beat_times(file.path(), &HeartbeatColumns::default()).unwrap();
        assert_eq!(beats.times, vec![0.0, 0.8]);
    }

    #[test]
    fn non_numeric_signal_is_not_a_beat() {
        let file = write_csv("Time (s),Signal\n0.0,1\n0.4,noise\n0.8,1\n");
        let beats = load_beat_times(file.path(), &HeartbeatColumns::default()).unwrap();
        assert_eq!(beats.times, vec![0.0, 0.8]);
    }

    #[test]
    fn bad_time_on_non_beat_row_is_ignored() {
        let file = write_csv("Time (s),Signal\n0.0,1\n,0\nabc,0\n0.8,1\n");
        let beats = load_beat_times(file.path(), &HeartbeatColumns::default()).unwrap();
        assert_eq!(beats.times, vec![0.0, 0.8]);
    }

    #[test]
    fn bad_time_on_beat_row_reports_row() {
        let file = write_csv("Time (s),Signal\n0.0,1\nabc,1\n");
        let err = read_heartbeat_csv(file.path(), &HeartbeatColumns::default()).unwrap_err();
        match err {
            LoadError::InvalidValue { row, column, value } => {
                assert_eq!(row, 2);
                assert_eq!(column, "Time (s)");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn header_only_file_has_no_beats() {
        let file = write_csv("Time (s),Signal\n");
        let beats = load_beat_times(file.path(), &HeartbeatColumns::default()).unwrap();
        assert!(beats.is_empty());
    }
}
