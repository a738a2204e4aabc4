// Telemetry payload domain models
use chrono::{DateTime, NaiveDateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Identifier of one measurement stream within a metric family.
///
/// Modems number their channels with small positive integers; anything else
/// found as a key in the payload, including integers past `u64::MAX`, is kept
/// verbatim as a name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChannelId {
    Number(u64),
    Name(String),
}

impl ChannelId {
    pub fn parse(key: &str) -> Self {
        // "01" stays a name so it can never collide with channel 1
        match key.parse::<u64>() {
            Ok(n) if n.to_string() == key => ChannelId::Number(n),
            _ => ChannelId::Name(key.to_string()),
        }
    }
}

impl From<u64> for ChannelId {
    fn from(n: u64) -> Self {
        ChannelId::Number(n)
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelId::Number(n) => write!(f, "{}", n),
            ChannelId::Name(name) => f.write_str(name),
        }
    }
}

/// Canonical sample: a timestamp and a value, both carried verbatim.
///
/// Neither side is validated here; the rendering engine decides what to do
/// with a timestamp or value it cannot read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub x: Value,
    pub y: Value,
}

impl ChartPoint {
    pub fn new(x: Value, y: Value) -> Self {
        Self { x, y }
    }
}

/// A sample as it appears on the wire.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Sample {
    Point { x: Value, y: Value },
    Bare(Value),
}

#[derive(Debug, Deserialize)]
struct RawPayload {
    #[serde(default)]
    labels: Option<Vec<String>>,
    #[serde(default)]
    network_log_events: Option<Vec<Sample>>,
    #[serde(flatten)]
    families: IndexMap<String, IndexMap<String, Vec<Sample>>>,
}

/// All channels of one metric family, in payload order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricFamily {
    channels: IndexMap<ChannelId, Vec<ChartPoint>>,
}

impl MetricFamily {
    pub fn channels(&self) -> impl Iterator<Item = (&ChannelId, &[ChartPoint])> {
        self.channels.iter().map(|(id, points)| (id, points.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

/// Earliest and latest readable timestamps across a whole payload.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeBounds {
    pub min: Value,
    pub max: Value,
}

/// The `/data` response with every sample resolved to a [`ChartPoint`].
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "RawPayload")]
pub struct TelemetryPayload {
    families: IndexMap<String, MetricFamily>,
    log_events: Option<Vec<ChartPoint>>,
    time_bounds: Option<TimeBounds>,
}

impl TelemetryPayload {
    pub fn family(&self, name: &str) -> Option<&MetricFamily> {
        self.families.get(name)
    }

    pub fn family_names(&self) -> impl Iterator<Item = &str> {
        self.families.keys().map(String::as_str)
    }

    pub fn log_events(&self) -> Option<&[ChartPoint]> {
        self.log_events.as_deref()
    }

    /// Shared window for every chart built from this payload.
    pub fn time_bounds(&self) -> Option<&TimeBounds> {
        self.time_bounds.as_ref()
    }
}

impl From<RawPayload> for TelemetryPayload {
    fn from(raw: RawPayload) -> Self {
        let labels = raw.labels;

        let families: IndexMap<String, MetricFamily> = raw
            .families
            .into_iter()
            .map(|(name, channels)| {
                let channels = channels
                    .into_iter()
                    .map(|(key, samples)| {
                        let points = resolve_samples(&name, &key, samples, labels.as_deref());
                        (ChannelId::parse(&key), points)
                    })
                    .collect();
                (name, MetricFamily { channels })
            })
            .collect();

        let log_events = raw.network_log_events.map(|samples| {
            resolve_samples("network_log_events", "events", samples, labels.as_deref())
        });

        let time_bounds = compute_time_bounds(labels.as_deref(), &families, log_events.as_deref());

        Self {
            families,
            log_events,
            time_bounds,
        }
    }
}

/// Pair bare values with `labels` by position; `{x, y}` samples keep their own timestamp.
fn resolve_samples(
    family: &str,
    channel: &str,
    samples: Vec<Sample>,
    labels: Option<&[String]>,
) -> Vec<ChartPoint> {
    let positional = samples.iter().filter(|s| matches!(s, Sample::Bare(_))).count();
    if positional > 0 {
        let expected = labels.map(|l| l.len()).unwrap_or(0);
        if samples.len() != expected {
            tracing::warn!(
                family,
                channel,
                samples = samples.len(),
                labels = expected,
                "positional samples do not line up with labels"
            );
        }
    }

    samples
        .into_iter()
        .enumerate()
        .map(|(idx, sample)| match sample {
            Sample::Point { x, y } => ChartPoint::new(x, y),
            Sample::Bare(y) => {
                let x = labels
                    .and_then(|l| l.get(idx))
                    .map(|label| Value::String(label.clone()))
                    .unwrap_or(Value::Null);
                ChartPoint::new(x, y)
            }
        })
        .collect()
}

fn compute_time_bounds(
    labels: Option<&[String]>,
    families: &IndexMap<String, MetricFamily>,
    log_events: Option<&[ChartPoint]>,
) -> Option<TimeBounds> {
    let label_values: Vec<Value> = labels
        .unwrap_or_default()
        .iter()
        .map(|l| Value::String(l.clone()))
        .collect();

    let timestamps = label_values
        .iter()
        .chain(
            families
                .values()
                .flat_map(|f| f.channels.values())
                .flatten()
                .map(|p| &p.x),
        )
        .chain(log_events.unwrap_or_default().iter().map(|p| &p.x));

    let mut bounds: Option<((NaiveDateTime, &Value), (NaiveDateTime, &Value))> = None;
    for value in timestamps {
        let Some(time) = parse_timestamp(value) else {
            continue;
        };
        bounds = Some(match bounds {
            None => ((time, value), (time, value)),
            Some((min, max)) => (
                if time < min.0 { (time, value) } else { min },
                if time > max.0 { (time, value) } else { max },
            ),
        });
    }

    bounds.map(|(min, max)| TimeBounds {
        min: min.1.clone(),
        max: max.1.clone(),
    })
}

/// Read ISO-8601 strings (with or without offset) and epoch milliseconds.
pub fn parse_timestamp(value: &Value) -> Option<NaiveDateTime> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.naive_utc())
            .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f"))
            .ok(),
        Value::Number(n) => n
            .as_i64()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .map(|dt| dt.naive_utc()),
        _ => None,
    }
}
