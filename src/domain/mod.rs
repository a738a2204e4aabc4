// Domain layer - Payload, palette and chart models
pub mod chart;
pub mod palette;
pub mod telemetry;
