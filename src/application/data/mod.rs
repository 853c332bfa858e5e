mod backing;
mod log_level;

pub use backing::Backing;
pub use log_level::LogLevel;
