// Chart service - Use case for building every chart of one page load
use crate::application::chart_builder::{format_title, ChartBuilder, ChartError};
use crate::application::payload_source::{FetchError, PayloadSource};
use crate::domain::chart::ChartConfig;
use crate::domain::telemetry::TelemetryPayload;
use crate::infrastructure::config::FamilyConfig;
use std::sync::Arc;
use thiserror::Error;

/// Value axis label for families that have no configured entry.
pub const DEFAULT_VALUE_LABEL: &str = "Value";

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Chart(#[from] ChartError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartBinding {
    pub canvas: String,
    pub config: ChartConfig,
}

impl From<ChartConfig> for ChartBinding {
    fn from(config: ChartConfig) -> Self {
        Self {
            canvas: config.canvas_id(),
            config,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardCharts {
    pub charts: Vec<ChartBinding>,
    /// Configured families absent from the payload.
    pub missing: Vec<String>,
}

#[derive(Clone)]
pub struct ChartService {
    source: Arc<dyn PayloadSource>,
    builder: ChartBuilder,
    families: Vec<FamilyConfig>,
}

impl ChartService {
    pub fn new(
        source: Arc<dyn PayloadSource>,
        builder: ChartBuilder,
        families: Vec<FamilyConfig>,
    ) -> Self {
        Self {
            source,
            builder,
            families,
        }
    }

    /// Fetch once, then build every configured family.
    pub async fn dashboard(&self) -> Result<DashboardCharts, FetchError> {
        let payload = self.source.fetch().await?;
        Ok(self.build_all(&payload))
    }

    /// Fetch once, then build a single family.
    pub async fn chart(&self, family: &str) -> Result<ChartBinding, ServiceError> {
        let payload = self.source.fetch().await?;
        let config = match self.families.iter().find(|f| f.family == family) {
            Some(family_config) => self.build_family(family_config, &payload)?,
            None => self.builder.build(family, &payload, DEFAULT_VALUE_LABEL)?,
        };
        Ok(config.into())
    }

    pub fn build_all(&self, payload: &TelemetryPayload) -> DashboardCharts {
        let mut charts = Vec::with_capacity(self.families.len());
        let mut missing = Vec::new();

        for family_config in &self.families {
            match self.build_family(family_config, payload) {
                Ok(config) => charts.push(config.into()),
                Err(ChartError::MissingMetricFamily(family)) => {
                    tracing::warn!(family = %family, "metric family missing from payload; chart not built");
                    missing.push(family);
                }
            }
        }

        tracing::info!(
            charts = charts.len(),
            missing = missing.len(),
            "built dashboard charts"
        );

        DashboardCharts { charts, missing }
    }

    fn build_family(
        &self,
        family_config: &FamilyConfig,
        payload: &TelemetryPayload,
    ) -> Result<ChartConfig, ChartError> {
        let title = family_config
            .title
            .clone()
            .unwrap_or_else(|| format_title(&family_config.family));
        self.builder
            .build_with_title(&family_config.family, &title, payload, &family_config.label)
    }
}
