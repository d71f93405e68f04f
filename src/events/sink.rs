/// Destinations for formatted event strings
use log::info;
use time::OffsetDateTime;

use crate::utils::format_datetime;

/// Fire-and-forget receiver of event strings
pub trait EventSink {
    fn publish(&mut self, event: &str);
}

/// Print each event on stdout with a timestamp
#[derive(Debug, Default)]
pub struct StdoutSink;

impl EventSink for StdoutSink {
    fn publish(&mut self, event: &str) {
        println!("[{}] {}", format_datetime(&OffsetDateTime::now_utc()), event);
    }
}

/// Route events through the logger at info level
#[derive(Debug, Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn publish(&mut self, event: &str) {
        info!("event {}", event);
    }
}

/// Collects events in memory
impl EventSink for Vec<String> {
    fn publish(&mut self, event: &str) {
        self.push(event.to_string());
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn publish(&mut self, event: &str) {
        (**self).publish(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_sink_collects_in_order() {
        let mut sink: Vec<String> = Vec::new();
        sink.publish("a/window:1");
        sink.publish("a/rotation:0");
        assert_eq!(sink, vec!["a/window:1", "a/rotation:0"]);
    }

    #[test]
    fn boxed_sink_forwards() {
        let mut sink: Box<Vec<String>> = Box::default();
        sink.publish("ht/temperature:21");
        assert_eq!(sink.len(), 1);
    }
}
