// Mapper to convert domain chart configurations to the Chart.js wire shape
use crate::application::chart_service::{ChartBinding, DashboardCharts};
use crate::domain::chart::{AxisId, AxisKind, AxisSpec, ChannelSeries, ChartConfig, SeriesKind};
use crate::domain::palette::Color;
use crate::domain::telemetry::ChartPoint;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub charts: Vec<ChartResponse>,
    pub missing: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ChartResponse {
    pub canvas: String,
    pub family: String,
    pub config: ChartJsConfig,
}

#[derive(Debug, Serialize)]
pub struct ChartJsConfig {
    #[serde(rename = "type")]
    kind: &'static str,
    data: ChartJsData,
    options: ChartJsOptions,
}

#[derive(Debug, Serialize)]
struct ChartJsData {
    datasets: Vec<ChartJsDataset>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChartJsDataset {
    #[serde(rename = "type")]
    kind: &'static str,
    label: String,
    border_color: Color,
    background_color: Color,
    border_width: u32,
    fill: bool,
    #[serde(rename = "yAxisID")]
    y_axis_id: &'static str,
    data: Vec<ChartPoint>,
}

#[derive(Debug, Serialize)]
struct ChartJsOptions {
    title: ChartJsTitle,
    animation: ChartJsAnimation,
    scales: ChartJsScales,
    elements: ChartJsElements,
}

#[derive(Debug, Serialize)]
struct ChartJsTitle {
    display: bool,
    text: String,
}

#[derive(Debug, Serialize)]
struct ChartJsAnimation {
    duration: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChartJsScales {
    x_axes: Vec<ChartJsAxis>,
    y_axes: Vec<ChartJsAxis>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChartJsAxis {
    id: &'static str,
    #[serde(rename = "type")]
    kind: &'static str,
    position: &'static str,
    scale_label: ChartJsScaleLabel,
    #[serde(skip_serializing_if = "Option::is_none")]
    time: Option<ChartJsTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ticks: Option<ChartJsTicks>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChartJsScaleLabel {
    display: bool,
    label_string: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChartJsTime {
    tooltip_format: String,
    display_formats: ChartJsDisplayFormats,
    #[serde(skip_serializing_if = "Option::is_none")]
    min: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max: Option<Value>,
}

#[derive(Debug, Serialize)]
struct ChartJsDisplayFormats {
    second: String,
    minute: String,
    hour: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChartJsTicks {
    begin_at_zero: bool,
}

#[derive(Debug, Serialize)]
struct ChartJsElements {
    point: ChartJsPoint,
}

#[derive(Debug, Serialize)]
struct ChartJsPoint {
    radius: u32,
}

pub fn dashboard_to_response(dashboard: DashboardCharts) -> DashboardResponse {
    DashboardResponse {
        charts: dashboard.charts.into_iter().map(binding_to_response).collect(),
        missing: dashboard.missing,
    }
}

pub fn binding_to_response(binding: ChartBinding) -> ChartResponse {
    ChartResponse {
        canvas: binding.canvas,
        family: binding.config.family.clone(),
        config: chart_to_chartjs(binding.config),
    }
}

pub fn chart_to_chartjs(chart: ChartConfig) -> ChartJsConfig {
    let (x_axes, y_axes): (Vec<_>, Vec<_>) = chart
        .axes
        .into_iter()
        .partition(|axis| axis.kind == AxisKind::Time);

    ChartJsConfig {
        kind: "line",
        data: ChartJsData {
            datasets: chart.series.into_iter().map(series_to_chartjs).collect(),
        },
        options: ChartJsOptions {
            title: ChartJsTitle {
                display: true,
                text: chart.title,
            },
            // data never changes after the fetch, so entry animation stays off
            animation: ChartJsAnimation { duration: 0 },
            scales: ChartJsScales {
                x_axes: x_axes.into_iter().map(axis_to_chartjs).collect(),
                y_axes: y_axes.into_iter().map(axis_to_chartjs).collect(),
            },
            elements: ChartJsElements {
                point: ChartJsPoint { radius: 0 },
            },
        },
    }
}

fn series_to_chartjs(series: ChannelSeries) -> ChartJsDataset {
    let (kind, fill) = match series.kind {
        SeriesKind::Line => ("line", false),
        SeriesKind::Bar => ("bar", true),
    };

    ChartJsDataset {
        kind,
        label: series.label,
        border_color: series.color.clone(),
        background_color: series.color,
        border_width: 1,
        fill,
        y_axis_id: series.axis.as_str(),
        data: series.points,
    }
}

fn axis_to_chartjs(axis: AxisSpec) -> ChartJsAxis {
    let time = axis.time_format.map(|format| ChartJsTime {
        tooltip_format: format.clone(),
        display_formats: ChartJsDisplayFormats {
            second: format.clone(),
            minute: format.clone(),
            hour: format,
        },
        min: axis.min,
        max: axis.max,
    });

    let (kind, ticks) = match axis.kind {
        AxisKind::Time => ("time", None),
        AxisKind::Linear => (
            "linear",
            Some(ChartJsTicks {
                begin_at_zero: axis.id == AxisId::Secondary,
            }),
        ),
    };

    ChartJsAxis {
        id: axis.id.as_str(),
        kind,
        position: axis.position.as_str(),
        scale_label: ChartJsScaleLabel {
            display: true,
            label_string: axis.label,
        },
        time,
        ticks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::chart_builder::{BuilderOptions, ChartBuilder};
    use crate::application::color_resolver::ChannelColorResolver;
    use crate::domain::palette::Palette;
    use crate::domain::telemetry::TelemetryPayload;
    use serde_json::json;
    use std::sync::Arc;

    fn chart(payload: Value) -> ChartConfig {
        let payload: TelemetryPayload = serde_json::from_value(payload).unwrap();
        let builder = ChartBuilder::new(
            ChannelColorResolver::new(Arc::new(Palette::default())),
            BuilderOptions::default(),
        );
        builder.build("downstream_power", &payload, "dBmV").unwrap()
    }

    #[test]
    fn test_line_chart_shape() {
        let config = chart(json!({
            "labels": ["2020-05-01T10:00:00", "2020-05-01T10:00:10"],
            "downstream_power": {"1": [3.1, 3.3]}
        }));

        let value = serde_json::to_value(chart_to_chartjs(config)).unwrap();

        assert_eq!(value["type"], "line");
        assert_eq!(value["options"]["animation"]["duration"], 0);
        assert_eq!(value["options"]["elements"]["point"]["radius"], 0);
        assert_eq!(value["options"]["title"]["text"], "Downstream power");

        let dataset = &value["data"]["datasets"][0];
        assert_eq!(dataset["label"], "Channel 1");
        assert_eq!(dataset["borderColor"], "rgb(238, 32, 77)");
        assert_eq!(dataset["borderWidth"], 1);
        assert_eq!(dataset["fill"], false);
        assert_eq!(dataset["yAxisID"], "primary");
        assert_eq!(
            dataset["data"],
            json!([
                {"x": "2020-05-01T10:00:00", "y": 3.1},
                {"x": "2020-05-01T10:00:10", "y": 3.3}
            ])
        );

        let x_axes = value["options"]["scales"]["xAxes"].as_array().unwrap();
        assert_eq!(x_axes.len(), 1);
        assert_eq!(x_axes[0]["type"], "time");
        assert_eq!(x_axes[0]["position"], "bottom");
        assert_eq!(x_axes[0]["scaleLabel"]["labelString"], "Time");
        assert_eq!(x_axes[0]["time"]["tooltipFormat"], "HH:mm:ss");
        assert_eq!(x_axes[0]["time"]["min"], "2020-05-01T10:00:00");
        assert_eq!(x_axes[0]["time"]["max"], "2020-05-01T10:00:10");

        let y_axes = value["options"]["scales"]["yAxes"].as_array().unwrap();
        assert_eq!(y_axes.len(), 1);
        assert_eq!(y_axes[0]["id"], "primary");
        assert_eq!(y_axes[0]["position"], "left");
        assert_eq!(y_axes[0]["scaleLabel"]["labelString"], "dBmV");
        assert!(y_axes[0].get("time").is_none());
    }

    #[test]
    fn test_log_events_overlay_shape() {
        let config = chart(json!({
            "downstream_power": {"1": []},
            "network_log_events": [{"x": "2020-05-01T10:01:00", "y": 2}]
        }));

        let value = serde_json::to_value(chart_to_chartjs(config)).unwrap();

        let events = &value["data"]["datasets"][1];
        assert_eq!(events["type"], "bar");
        assert_eq!(events["yAxisID"], "log-events");
        assert_eq!(events["data"], json!([{"x": "2020-05-01T10:01:00", "y": 2}]));

        let y_axes = value["options"]["scales"]["yAxes"].as_array().unwrap();
        assert_eq!(y_axes.len(), 2);
        assert_eq!(y_axes[1]["id"], "log-events");
        assert_eq!(y_axes[1]["position"], "right");
        assert_eq!(y_axes[1]["scaleLabel"]["labelString"], "Log events (minute)");
        assert_eq!(y_axes[1]["ticks"]["beginAtZero"], true);
        assert_eq!(y_axes[0]["ticks"]["beginAtZero"], false);
    }

    #[test]
    fn test_binding_response() {
        let config = chart(json!({"downstream_power": {}}));

        let response = binding_to_response(ChartBinding::from(config));

        assert_eq!(response.canvas, "downstream_power_chart");
        assert_eq!(response.family, "downstream_power");
    }
}
