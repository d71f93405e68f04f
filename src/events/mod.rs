pub mod classifier;
pub mod formatter;
pub mod sink;

pub use classifier::DeviceClass;
pub use formatter::format_events;
pub use sink::{EventSink, LogSink, StdoutSink};
