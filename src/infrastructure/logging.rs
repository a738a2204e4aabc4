// Tracing subscriber setup
use crate::infrastructure::config::LoggingSettings;
use tracing_subscriber::EnvFilter;

pub fn init_tracing(settings: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);

    if settings.json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
