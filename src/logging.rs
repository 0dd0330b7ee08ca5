use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use crate::settings::BouncerSettings;

/// Initialise logging from the `debug_logging` and `log_file` settings.
pub fn init_from(settings: &BouncerSettings) {
    init(settings.debug_logging, settings.log_file.clone());
}

/// Initialise logging. In debug mode the default level is `debug`, otherwise
/// it falls back to `info`. The level can be overridden via the `RUST_LOG`
/// environment variable only when debug logging is enabled.
///
/// When `log_file` is provided, output is written to that file instead of
/// stderr.
pub fn init(debug: bool, log_file: Option<PathBuf>) {
    let filter = filter_for(debug);

    match log_file.and_then(split_log_path) {
        Some((dir, name)) => {
            let appender = tracing_appender::rolling::never(dir, name);
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(appender)
                .try_init();
        }
        None => {
            let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
        }
    }
}

fn filter_for(debug: bool) -> EnvFilter {
    // Without debug logging we force `info` so a stray `RUST_LOG` in the
    // environment cannot turn on verbose output.
    if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::new("info")
    }
}

fn split_log_path(path: PathBuf) -> Option<(PathBuf, std::ffi::OsString)> {
    let name = path.file_name()?.to_os_string();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Some((dir, name))
}

#[cfg(test)]
mod tests {
    use super::split_log_path;
    use std::path::PathBuf;

    #[test]
    fn bare_file_name_logs_to_current_dir() {
        let (dir, name) = split_log_path(PathBuf::from("bouncer.log")).unwrap();
        assert_eq!(dir, PathBuf::from("."));
        assert_eq!(name, "bouncer.log");
    }

    #[test]
    fn directory_without_file_name_is_rejected() {
        assert!(split_log_path(PathBuf::from("/")).is_none());
    }
}
