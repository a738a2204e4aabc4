// Infrastructure layer - External dependencies and adapters
pub mod chartjs_mapper;
pub mod config;
pub mod http_source;
pub mod logging;
