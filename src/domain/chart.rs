// Chart configuration domain models
use super::palette::Color;
use super::telemetry::{ChannelId, ChartPoint, TimeBounds};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisId {
    Time,
    Primary,
    Secondary,
}

impl AxisId {
    pub fn as_str(&self) -> &'static str {
        match self {
            AxisId::Time => "time",
            AxisId::Primary => "primary",
            AxisId::Secondary => "log-events",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisPosition {
    Left,
    Right,
    Bottom,
}

impl AxisPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            AxisPosition::Left => "left",
            AxisPosition::Right => "right",
            AxisPosition::Bottom => "bottom",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisKind {
    Time,
    Linear,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisSpec {
    pub id: AxisId,
    pub kind: AxisKind,
    pub position: AxisPosition,
    pub label: String,
    /// Tick and tooltip format, time axes only.
    pub time_format: Option<String>,
    pub min: Option<Value>,
    pub max: Option<Value>,
}

impl AxisSpec {
    pub fn time(label: &str, time_format: &str, bounds: Option<&TimeBounds>) -> Self {
        Self {
            id: AxisId::Time,
            kind: AxisKind::Time,
            position: AxisPosition::Bottom,
            label: label.to_string(),
            time_format: Some(time_format.to_string()),
            min: bounds.map(|b| b.min.clone()),
            max: bounds.map(|b| b.max.clone()),
        }
    }

    pub fn primary(label: &str) -> Self {
        Self::value(AxisId::Primary, AxisPosition::Left, label)
    }

    pub fn secondary(label: &str) -> Self {
        Self::value(AxisId::Secondary, AxisPosition::Right, label)
    }

    fn value(id: AxisId, position: AxisPosition, label: &str) -> Self {
        Self {
            id,
            kind: AxisKind::Linear,
            position,
            label: label.to_string(),
            time_format: None,
            min: None,
            max: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    Line,
    Bar,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChannelSeries {
    /// `None` for the log-event overlay.
    pub channel: Option<ChannelId>,
    pub label: String,
    pub color: Color,
    pub kind: SeriesKind,
    pub axis: AxisId,
    pub points: Vec<ChartPoint>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub family: String,
    pub title: String,
    pub series: Vec<ChannelSeries>,
    pub axes: Vec<AxisSpec>,
}

impl ChartConfig {
    /// Drawable surface this chart is bound to.
    pub fn canvas_id(&self) -> String {
        format!("{}_chart", self.family)
    }

    pub fn series_on(&self, axis: AxisId) -> impl Iterator<Item = &ChannelSeries> {
        self.series.iter().filter(move |s| s.axis == axis)
    }

    pub fn value_axes(&self) -> impl Iterator<Item = &AxisSpec> {
        self.axes.iter().filter(|a| a.kind != AxisKind::Time)
    }
}
