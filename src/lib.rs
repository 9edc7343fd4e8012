mod config;
mod dashboard;
mod dates;
mod errors;
mod models;
mod options;
mod platform;
mod widgets;

pub use crate::config::{load_dashboard, parse_dashboard};
pub use crate::dashboard::{DashboardReport, FailurePolicy, WidgetEngine};
pub use crate::dates::{convert_dates, extract_count_period, require_unit, DateRange, DateUnit, RelativeDate};
pub use crate::errors::{WidgetError, WidgetResult};
pub use crate::models::{DashboardConfig, Rendered, Row, Series, WidgetDescriptor};
pub use crate::options::{
    OptionBag, LIST_SEPARATOR, OPTION_END_DATE, OPTION_METRICS, OPTION_ORDER, OPTION_REPOSITORY,
    OPTION_ROW_LIMIT, OPTION_SCOPE, OPTION_START_DATE, OPTION_TITLE,
};
pub use crate::platform::{DisplaySurface, MetricsProvider};
pub use crate::widgets::{
    dispatch, WidgetContext, WidgetDefaults, WidgetKind, WidgetSpec, DEFAULT_METRICS, DEFAULT_ORDER,
    DEFAULT_ROW_LIMIT, OWNER_SCOPE, SERVICE,
};

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;

static LOG_GUARD: std::sync::OnceLock<WorkerGuard> = std::sync::OnceLock::new();

/// Installs the global subscriber. With a directory, logs go to a daily
/// rolling `widgets.log` there; otherwise to stderr.
pub fn init_tracing(log_dir: Option<&Path>) -> Result<(), String> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    match log_dir {
        Some(log_dir) => {
            std::fs::create_dir_all(log_dir).map_err(|error| error.to_string())?;
            let file_appender = tracing_appender::rolling::daily(log_dir, "widgets.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let _ = LOG_GUARD.set(guard);

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .json()
                .with_writer(non_blocking)
                .try_init()
                .map_err(|error| error.to_string())
        }
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|error| error.to_string()),
    }
}
