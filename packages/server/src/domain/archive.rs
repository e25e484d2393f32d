//! Bounded, timestamp-annotated history of a room's chat lines.

use std::collections::VecDeque;

use roomchat_shared::time::timestamp_to_time_of_day;

use super::value_object::{MemberName, Timestamp};

/// Separator placed between entries when the archive is replayed to a joiner.
pub const ARCHIVE_SEPARATOR: &str = "<br>";

/// One archived chat line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub sent_at: Timestamp,
    pub sender: MemberName,
    pub text: String,
}

impl ArchiveEntry {
    pub fn new(sent_at: Timestamp, sender: MemberName, text: String) -> Self {
        Self {
            sent_at,
            sender,
            text,
        }
    }

    /// Render as `(HH:MM:SS UTC) sender: text`.
    pub fn render(&self) -> String {
        format!(
            "({} UTC) {}: {}",
            timestamp_to_time_of_day(self.sent_at.value()),
            self.sender,
            self.text
        )
    }
}

/// FIFO archive that never holds more than `capacity` entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageArchive {
    entries: VecDeque<ArchiveEntry>,
    capacity: usize,
}

impl MessageArchive {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    /// Append an entry, evicting the oldest ones while over capacity.
    pub fn append(&mut self, entry: ArchiveEntry) {
        self.entries.push_back(entry);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// Join all rendered entries, oldest first, with [`ARCHIVE_SEPARATOR`].
    pub fn render(&self) -> String {
        self.rendered_entries().join(ARCHIVE_SEPARATOR)
    }

    pub fn rendered_entries(&self) -> Vec<String> {
        self.entries.iter().map(ArchiveEntry::render).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
