//! In-memory event log.

use std::io::Write;

use super::bus::{Event, Topic};

/// Every event the runtime published, in publication order.
///
/// Offsets are simply indices into the log.
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `event` and returns its offset.
    pub fn append(&mut self, event: Event) -> u64 {
        self.events.push(event);
        (self.events.len() - 1) as u64
    }

    pub fn read_at_offset(&self, offset: u64) -> Option<&Event> {
        usize::try_from(offset).ok().and_then(|i| self.events.get(i))
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    pub fn by_topic(&self, topic: Topic) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |e| e.topic() == topic)
    }

    /// Writes one JSON object per line.
    pub fn write_json_lines(&self, mut writer: impl Write) -> serde_json::Result<()> {
        for event in &self.events {
            serde_json::to_writer(&mut writer, event)?;
            writer.write_all(b"\n").map_err(serde_json::Error::io)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::TurnEvent;

    #[test]
    fn json_lines_has_one_event_per_line() {
        let mut log = EventLog::new();
        log.append(Event::Turn(TurnEvent::RoundEnded { round: 1, clock: 10 }));
        let offset = log.append(Event::Turn(TurnEvent::RoundEnded { round: 2, clock: 20 }));
        assert_eq!(offset, 1);
        assert!(log.read_at_offset(2).is_none());

        let mut out = Vec::new();
        log.write_json_lines(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.lines().next().unwrap().contains("RoundEnded"));
    }
}
