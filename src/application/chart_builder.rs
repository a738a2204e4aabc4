// Chart builder - Turns one metric family of a payload into a chart configuration
use crate::application::color_resolver::ChannelColorResolver;
use crate::domain::chart::{AxisId, AxisSpec, ChannelSeries, ChartConfig, SeriesKind};
use crate::domain::palette::{Color, DEFAULT_LOG_EVENTS_COLOR};
use crate::domain::telemetry::TelemetryPayload;
use thiserror::Error;

pub const TIME_FORMAT: &str = "HH:mm:ss";
pub const LOG_EVENTS_AXIS_LABEL: &str = "Log events (minute)";
pub const LOG_EVENTS_SERIES_LABEL: &str = "Network log events";

#[derive(Debug, Error, PartialEq)]
pub enum ChartError {
    #[error("metric family '{0}' is not present in the payload")]
    MissingMetricFamily(String),
}

#[derive(Debug, Clone)]
pub struct BuilderOptions {
    /// "Time" or "Date".
    pub time_axis_label: String,
    /// Overlay `network_log_events` on a secondary axis when the payload has them.
    pub overlay_log_events: bool,
    pub log_events_color: Color,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self {
            time_axis_label: "Time".to_string(),
            overlay_log_events: true,
            log_events_color: Color::new(DEFAULT_LOG_EVENTS_COLOR),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChartBuilder {
    resolver: ChannelColorResolver,
    options: BuilderOptions,
}

impl ChartBuilder {
    pub fn new(resolver: ChannelColorResolver, options: BuilderOptions) -> Self {
        Self { resolver, options }
    }

    pub fn build(
        &self,
        family: &str,
        payload: &TelemetryPayload,
        label: &str,
    ) -> Result<ChartConfig, ChartError> {
        self.build_with_title(family, &format_title(family), payload, label)
    }

    pub fn build_with_title(
        &self,
        family: &str,
        title: &str,
        payload: &TelemetryPayload,
        label: &str,
    ) -> Result<ChartConfig, ChartError> {
        let metrics = payload
            .family(family)
            .ok_or_else(|| ChartError::MissingMetricFamily(family.to_string()))?;

        if metrics.is_empty() {
            tracing::debug!(family, "metric family has no channels");
        }

        let mut series: Vec<ChannelSeries> = metrics
            .channels()
            .map(|(id, points)| {
                let color = self.resolver.resolve(id).clone();
                if self.resolver.is_overflow(id) {
                    tracing::warn!(
                        family,
                        channel = %id,
                        color = %color,
                        "channel has no palette entry of its own; color may repeat"
                    );
                }

                ChannelSeries {
                    channel: Some(id.clone()),
                    label: format!("Channel {}", id),
                    color,
                    kind: SeriesKind::Line,
                    axis: AxisId::Primary,
                    points: points.to_vec(),
                }
            })
            .collect();

        let mut axes = vec![
            AxisSpec::time(
                &self.options.time_axis_label,
                TIME_FORMAT,
                payload.time_bounds(),
            ),
            AxisSpec::primary(label),
        ];

        if self.options.overlay_log_events {
            if let Some(events) = payload.log_events() {
                series.push(ChannelSeries {
                    channel: None,
                    label: LOG_EVENTS_SERIES_LABEL.to_string(),
                    color: self.options.log_events_color.clone(),
                    kind: SeriesKind::Bar,
                    axis: AxisId::Secondary,
                    points: events.to_vec(),
                });
                axes.push(AxisSpec::secondary(LOG_EVENTS_AXIS_LABEL));
            }
        }

        let config = ChartConfig {
            family: family.to_string(),
            title: title.to_string(),
            series,
            axes,
        };

        tracing::debug!(
            family,
            channels = metrics.len(),
            primary = config.series_on(AxisId::Primary).count(),
            value_axes = config.value_axes().count(),
            "built chart configuration"
        );

        Ok(config)
    }
}

/// "downstream_rxmer" -> "Downstream rxmer"
pub fn format_title(family: &str) -> String {
    let words = family.trim_matches('_').replace('_', " ");
    let mut chars = words.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
