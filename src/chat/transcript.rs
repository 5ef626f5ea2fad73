//! The append-only message history.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::Serialize;
use serde_json::to_writer_pretty;

use crate::chat::config::non_blank;
use crate::error::{Error, Result};
use crate::types::{MessageRecord, Role, SessionToken};

/// Greeting the bot opens every conversation with.
pub const DEFAULT_GREETING: &str = "¡Hola! 👋 Soy tu coach motivacional. Estoy aquí para ayudarte a superar cualquier desafío y alcanzar tus metas. ¿Cómo te sientes hoy?";

/// Ordered list of messages; insertion order is display order.
///
/// There is no way to edit or remove a record once appended, and records
/// with empty text are never committed.
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    records: Vec<MessageRecord>,
}

impl Transcript {
    /// A transcript holding only the default greeting.
    pub fn new() -> Self {
        Self::initialize(DEFAULT_GREETING)
    }

    /// A transcript holding one bot greeting stamped now.
    ///
    /// A blank greeting is replaced by [`DEFAULT_GREETING`].
    pub fn initialize(greeting: impl Into<String>) -> Self {
        let greeting = non_blank(greeting.into(), DEFAULT_GREETING);
        Self {
            records: vec![MessageRecord::bot(greeting)],
        }
    }

    /// Append `record` and return the stored copy.
    ///
    /// Returns `None` without appending when the record's text is empty.
    pub fn append(&mut self, record: MessageRecord) -> Option<&MessageRecord> {
        if record.text().is_empty() {
            return None;
        }
        self.records.push(record);
        self.records.last()
    }

    /// All records in display order.
    pub fn records(&self) -> &[MessageRecord] {
        &self.records
    }

    /// Iterate the records in display order.
    pub fn iter(&self) -> impl Iterator<Item = &MessageRecord> {
        self.records.iter()
    }

    /// The most recent record.
    pub fn last(&self) -> Option<&MessageRecord> {
        self.records.last()
    }

    /// Number of records, greeting included.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false for a transcript built through this API.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records produced by `role`.
    pub fn count(&self, role: Role) -> usize {
        self.records.iter().filter(|r| r.role() == role).count()
    }

    /// Writes the transcript as pretty-printed JSON.
    pub fn save_to<P: AsRef<Path>>(&self, path: P, session: &SessionToken) -> Result<()> {
        let export = TranscriptFile {
            version: 1,
            session_id: session.as_str(),
            messages: &self.records,
        };
        let file = File::create(path.as_ref())
            .map_err(|err| Error::io("failed to create transcript file", err))?;
        let writer = BufWriter::new(file);
        to_writer_pretty(writer, &export).map_err(|err| {
            Error::serialization("failed to serialize transcript", Some(Box::new(err)))
        })
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct TranscriptFile<'a> {
    version: u8,
    session_id: &'a str,
    messages: &'a [MessageRecord],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_transcript_has_one_greeting() {
        let transcript = Transcript::new();
        assert_eq!(transcript.len(), 1);
        let greeting = transcript.last().unwrap();
        assert_eq!(greeting.role(), Role::Bot);
        assert!(!greeting.text().is_empty());
        assert_eq!(greeting.text(), DEFAULT_GREETING);
    }

    #[test]
    fn append_preserves_order() {
        let mut transcript = Transcript::initialize("hola");
        transcript.append(MessageRecord::user("uno"));
        let stored = transcript.append(MessageRecord::bot("dos")).cloned().unwrap();
        assert_eq!(stored.text(), "dos");

        let texts: Vec<&str> = transcript.iter().map(|r| r.text()).collect();
        assert_eq!(texts, vec!["hola", "uno", "dos"]);
        assert_eq!(transcript.count(Role::User), 1);
        assert_eq!(transcript.count(Role::Bot), 2);
    }

    #[test]
    fn blank_greeting_uses_default() {
        for greeting in ["", "   ", "\t\n"] {
            let transcript = Transcript::initialize(greeting);
            assert_eq!(transcript.len(), 1);
            assert_eq!(transcript.records()[0].text(), DEFAULT_GREETING);
        }
    }

    #[test]
    fn empty_records_are_not_appended() {
        let mut transcript = Transcript::new();
        assert!(transcript.append(MessageRecord::bot("")).is_none());
        assert!(transcript.append(MessageRecord::user("")).is_none());
        assert_eq!(transcript.len(), 1);
        assert!(transcript.iter().all(|r| !r.text().is_empty()));
    }

    #[test]
    fn save_writes_versioned_json() {
        let mut transcript = Transcript::initialize("hola");
        transcript.append(MessageRecord::user("gracias"));
        let session = SessionToken::generate();

        let path = std::env::temp_dir().join(format!("animo-transcript-{}.json", session));
        transcript.save_to(&path, &session).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(json["version"], 1);
        assert_eq!(json["session_id"], session.as_str());
        assert_eq!(json["messages"][0]["role"], "bot");
        assert_eq!(json["messages"][1]["text"], "gracias");
    }

    #[test]
    fn save_to_missing_directory_fails() {
        let transcript = Transcript::new();
        let session = SessionToken::generate();
        let err = transcript
            .save_to("/nonexistent/animo/transcript.json", &session)
            .unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
