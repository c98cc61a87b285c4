//! Logging Infrastructure
//!
//! `RUST_LOG` wins over the configured default filter. With a log directory
//! set, output goes to a daily rolling file instead of stdout.

use std::path::Path;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

/// Initialize the logger with stdout output
pub fn init_logger(default_filter: &str) {
    init_logger_with_file(default_filter, false, None);
}

/// Initialize the logger with optional JSON format and file output
pub fn init_logger_with_file(default_filter: &str, json: bool, log_dir: Option<&str>) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let file_writer = log_dir.and_then(|dir| {
        let path = Path::new(dir);
        if let Err(e) = std::fs::create_dir_all(path) {
            eprintln!("Cannot create log dir {dir}: {e}, logging to stdout");
            return None;
        }
        Some(tracing_appender::rolling::daily(path, "card-server.log"))
    });

    let to_file = file_writer.is_some();
    let writer = match file_writer {
        Some(appender) => BoxMakeWriter::new(appender),
        None => BoxMakeWriter::new(std::io::stdout),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(!to_file)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(true);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
