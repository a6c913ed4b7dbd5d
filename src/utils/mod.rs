pub mod error;
pub mod logging;

pub use error::{ConfigError, SurfaceError};
pub use logging::{init_logging, set_log_level};
