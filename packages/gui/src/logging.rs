//! Global logging system.

use std::{
    fs::File,
    path::Path,
    sync::Arc,
    env,
    panic,
};
use backtrace::Backtrace;
use tracing_subscriber::{
    fmt::{
        self,
        time::uptime,
    },
    prelude::*,
    Registry,
    EnvFilter,
};
use anyhow::*;


/// Default logging environment filter. Our crates are debug, everything else is warn.
pub const DEFAULT_FILTER: &'static str = "warn,graphics=debug,gui=debug,gui_demo=debug";

/// Build the filter string from the default plus whatever `RUST_LOG` adds.
pub fn filter_string(env_filter: Option<&str>) -> String {
    let mut filter = DEFAULT_FILTER.to_owned();
    if let Some(env_filter) = env_filter.filter(|s| !s.is_empty()) {
        filter.push(',');
        filter.push_str(env_filter);
    }
    filter
}

/// Initializes a `tracing` logging backend which outputs to stdout and, if a
/// path is given, also to a log file. Accepts ecosystem-standard `RUST_LOG`
/// env filters. Makes panics go through the log too.
///
/// Errors if the log file can't be created or a global subscriber is already
/// installed.
pub fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let format = fmt::format()
        .compact()
        .with_timer(uptime())
        .with_line_number(true);
    let stdout_log = fmt::layer()
        .event_format(format);

    let log_file_log = match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("unable to create log file {}", path.display()))?;
            Some(fmt::layer()
                .with_ansi(false)
                .with_writer(Arc::new(file)))
        }
        None => None,
    };

    let filter = filter_string(env::var(EnvFilter::DEFAULT_ENV).ok().as_deref());

    let subscriber = Registry::default()
        .with(EnvFilter::new(filter))
        .with(stdout_log)
        .with(log_file_log);
    tracing::subscriber::set_global_default(subscriber)
        .context("unable to install log subscriber")?;
    info!("starting program");

    // make panic messages and backtrace go through logging system
    panic::set_hook(Box::new(|info| {
        error!("{}", info);
        if env::var("RUST_BACKTRACE").map(|val| val == "1").unwrap_or(true) {
            error!("{:?}", Backtrace::new());
        }
    }));
    trace!("installed custom panic hook");
    Ok(())
}


#[test]
fn test_filter_string_appends_env() {
    assert_eq!(filter_string(None), DEFAULT_FILTER);
    assert_eq!(filter_string(Some("")), DEFAULT_FILTER);
    assert_eq!(filter_string(Some("gui=trace")), format!("{},gui=trace", DEFAULT_FILTER));
}
