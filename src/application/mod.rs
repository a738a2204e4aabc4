// Application layer - Use cases and ports
pub mod chart_builder;
pub mod chart_service;
pub mod color_resolver;
pub mod payload_source;
