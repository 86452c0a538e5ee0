pub mod log_parser;
pub mod timestamp;

pub use log_parser::{LogParser, parse_log, parse_log_with};
pub use timestamp::{TimestampLine, parse_timestamp_line};
