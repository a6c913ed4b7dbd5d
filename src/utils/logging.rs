use log::{LevelFilter, SetLoggerError};
use simple_logger::SimpleLogger;

const RUST_LOG: &str = "RUST_LOG";

/// Installs the global logger at `level`. `RUST_LOG` takes precedence.
///
/// The logger itself passes everything through; the global max level does
/// the filtering, so [`set_log_level`] can change it once config is read.
pub fn init_logging(level: LevelFilter) -> Result<(), SetLoggerError> {
    SimpleLogger::new()
        .with_level(LevelFilter::Trace)
        .with_module_level("winit", LevelFilter::Warn)
        .with_module_level("glutin", LevelFilter::Warn)
        .env()
        .init()?;
    set_log_level(level);
    Ok(())
}

/// Changes the global level, unless `RUST_LOG` pinned it.
pub fn set_log_level(level: LevelFilter) {
    if std::env::var_os(RUST_LOG).is_none() {
        log::set_max_level(level);
    }
}
