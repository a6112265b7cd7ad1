//! Serializable run reports written by the command-line tools.
use crate::crop::BoundingBox;
use serde::{Deserialize, Serialize};

/// Timing entry describing a single stage of a tool run.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

impl StageTiming {
    pub fn new(label: impl Into<String>, elapsed_ms: f64) -> Self {
        Self {
            label: label.into(),
            elapsed_ms,
        }
    }
}

/// Aggregated timing trace for a run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn push(&mut self, label: impl Into<String>, elapsed_ms: f64) {
        self.total_ms += elapsed_ms;
        self.stages.push(StageTiming::new(label, elapsed_ms));
    }
}

/// Outcome of an autocrop run.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropReport {
    pub input_shape: Vec<usize>,
    pub threshold: f64,
    pub bounding_box: BoundingBox,
    pub cropped_shape: Vec<usize>,
    /// Elements strictly above the threshold.
    pub active_elements: usize,
    /// Where the cropped data was written; `None` when the crop is empty.
    pub output: Option<String>,
    pub timing: TimingBreakdown,
}

impl CropReport {
    /// Fraction of the input kept by the crop.
    pub fn retained_fraction(&self) -> f64 {
        let total: usize = self.input_shape.iter().product();
        if total == 0 {
            return 0.0;
        }
        self.bounding_box.len() as f64 / total as f64
    }
}

/// Per-label statistics of a labeled volume.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelSummary {
    pub label: usize,
    pub voxels: usize,
    pub color_fraction: f32,
    /// Bounding box of the label in display orientation.
    pub bounding_box: BoundingBox,
}

/// Outcome of a label-report run.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelReport {
    pub input_shape: Vec<usize>,
    pub display_shape: [usize; 3],
    pub labels: Vec<LabelSummary>,
    pub stack_frames: Vec<usize>,
    pub rotation_elevation_deg: f32,
    pub rotation_azimuths_deg: Vec<f32>,
    pub timing: TimingBreakdown,
}
