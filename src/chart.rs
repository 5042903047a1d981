//! Projection samples for the live chart
//!
//! One record per tick, holding the point's coordinates relative to the
//! orbit center for each enabled projection. Disabled projections have no
//! field at all, neither in JSON nor in the CSV header.

use serde::{Deserialize, Serialize};

use crate::sim::SimState;

/// Chart label of the x projection series
pub const X_LABEL: &str = "x coordinate";
/// Chart label of the y projection series
pub const Y_LABEL: &str = "y coordinate";

/// A line on the chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    #[serde(rename = "Label")]
    pub label: &'static str,
    #[serde(rename = "Color")]
    pub color: &'static str,
}

/// Both chart lines; the chart only receives data for enabled ones
pub static SERIES: [ChartSeries; 2] = [
    ChartSeries {
        label: X_LABEL,
        color: crate::renderer::colors::PROJECTION_X,
    },
    ChartSeries {
        label: Y_LABEL,
        color: crate::renderer::colors::PROJECTION_Y,
    },
];

/// Sample taken after one tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleRecord {
    pub tick: u64,
    #[serde(rename = "x coordinate", default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(rename = "y coordinate", default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

/// Read the sample for the state's current tick
pub fn sample(state: &SimState) -> SampleRecord {
    let offset = state
        .space
        .position(state.point_id())
        .map(|pos| pos - state.center);

    SampleRecord {
        tick: state.time_ticks,
        x: offset.filter(|_| state.recorder.records_x()).map(|o| o.x),
        y: offset.filter(|_| state.recorder.records_y()).map(|o| o.y),
    }
}

/// Append-only sample history.
///
/// Grows by one record per tick for the whole run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SampleRecorder {
    record_x: bool,
    record_y: bool,
    records: Vec<SampleRecord>,
}

impl SampleRecorder {
    pub fn new(record_x: bool, record_y: bool) -> Self {
        Self {
            record_x,
            record_y,
            records: Vec::new(),
        }
    }

    pub fn records_x(&self) -> bool {
        self.record_x
    }

    pub fn records_y(&self) -> bool {
        self.record_y
    }

    pub fn push(&mut self, record: SampleRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[SampleRecord] {
        &self.records
    }

    pub fn latest(&self) -> Option<&SampleRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Labels of the recorded fields, in chart order
    pub fn labels(&self) -> Vec<&'static str> {
        self.series().map(|s| s.label).collect()
    }

    /// Chart lines that receive data
    pub fn series(&self) -> impl Iterator<Item = &'static ChartSeries> + '_ {
        SERIES
            .iter()
            .zip([self.record_x, self.record_y])
            .filter(|(_, enabled)| *enabled)
            .map(|(series, _)| series)
    }

    /// Records as a JSON array
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.records)
    }

    /// Write the history as CSV; only enabled fields get a column
    pub fn write_csv<W: std::io::Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut wtr = csv::Writer::from_writer(writer);

        let mut header = vec!["tick"];
        header.extend(self.labels());
        wtr.write_record(&header)?;

        for record in &self.records {
            let mut row = vec![record.tick.to_string()];
            if self.record_x {
                row.push(record.x.map(|v| v.to_string()).unwrap_or_default());
            }
            if self.record_y {
                row.push(record.y.map(|v| v.to_string()).unwrap_or_default());
            }
            wtr.write_record(&row)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    fn state_with(projection_x: bool, projection_y: bool) -> SimState {
        SimState::new(Settings {
            projection_x,
            projection_y,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_sample_relative_to_center() {
        let state = state_with(true, true);
        let record = sample(&state);
        assert_eq!(record.tick, 0);
        // Point starts one radius right of the center
        assert!((record.x.unwrap() - 1.0).abs() < 1e-12);
        assert!(record.y.unwrap().abs() < 1e-12);
    }

    #[test]
    fn test_disabled_fields_absent() {
        let state = state_with(true, false);
        let record = sample(&state);
        assert!(record.x.is_some());
        assert!(record.y.is_none());

        let json = serde_json::to_value(record).unwrap();
        assert!(json.get(X_LABEL).is_some());
        assert!(json.get(Y_LABEL).is_none());
    }

    #[test]
    fn test_no_projections_records_only_ticks() {
        let state = state_with(false, false);
        assert!(state.recorder.labels().is_empty());
        assert_eq!(
            state.recorder.to_json().unwrap(),
            r#"[{"tick":0}]"#
        );
    }

    #[test]
    fn test_series_follow_flags() {
        let recorder = SampleRecorder::new(false, true);
        let series: Vec<_> = recorder.series().collect();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].label, Y_LABEL);
        assert_eq!(series[0].color, "#377eb8");
    }

    #[test]
    fn test_write_csv_header_and_rows() {
        let mut recorder = SampleRecorder::new(false, true);
        recorder.push(SampleRecord {
            tick: 0,
            x: None,
            y: Some(0.0),
        });
        recorder.push(SampleRecord {
            tick: 1,
            x: None,
            y: Some(0.5),
        });

        let mut out = Vec::new();
        recorder.write_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "tick,y coordinate\n0,0\n1,0.5\n");
    }
}
