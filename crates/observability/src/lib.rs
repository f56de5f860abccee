//! Process-wide logging setup shared by the dashboard binaries.

/// Initialize logging with the format chosen by `MALLHUB_LOG_FORMAT`.
///
/// Safe to call multiple times; later calls are no-ops.
pub fn init() {
    logging::init_with(logging::LogFormat::from_env());
}

/// Subscriber configuration (filter, format, writer).
pub mod logging;

pub use logging::{LogFormat, init_with};
