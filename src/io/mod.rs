pub mod config_io;
pub mod diagnostics;
pub mod log_io;
