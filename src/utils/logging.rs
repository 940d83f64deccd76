use crate::core::message::ChatMessage;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Append-only plain-text transcript of the chat log.
///
/// Markers (new conversation, cleared history, ...) are written with a `## `
/// prefix so they stand out from the exchanged lines.
#[derive(Debug, Clone, Default)]
pub struct TranscriptLog {
    file_path: Option<String>,
}

impl TranscriptLog {
    pub fn new(file_path: Option<String>) -> Result<Self, Box<dyn std::error::Error>> {
        if let Some(path) = file_path.as_deref() {
            Self::test_file_access(path)?;
        }
        Ok(Self { file_path })
    }

    pub fn disabled() -> Self {
        Self { file_path: None }
    }

    pub fn log_message(&self, message: &ChatMessage) -> Result<(), Box<dyn std::error::Error>> {
        let label = if message.is_user() { "You" } else { "Tutor" };
        self.write_block(&format!(
            "[{}] {}: {}",
            message.time_label(),
            label,
            message.content
        ))
    }

    pub fn log_marker(&self, marker: &str) -> Result<(), Box<dyn std::error::Error>> {
        self.write_block(&format!("## {marker}"))
    }

    pub fn status_string(&self) -> String {
        match &self.file_path {
            None => "off".to_string(),
            Some(path) => Path::new(path)
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .into_owned(),
        }
    }

    fn write_block(&self, content: &str) -> Result<(), Box<dyn std::error::Error>> {
        let Some(file_path) = self.file_path.as_deref() else {
            return Ok(());
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(file_path)?;
        let mut writer = BufWriter::new(file);

        for line in content.lines() {
            writeln!(writer, "{line}")?;
        }
        writeln!(writer)?;

        writer.flush()?;
        Ok(())
    }

    fn test_file_access(path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn disabled_log_writes_nothing() {
        let log = TranscriptLog::disabled();
        log.log_message(&ChatMessage::user("hola"))
            .expect("disabled log is a no-op");
        assert_eq!(log.status_string(), "off");
    }

    #[test]
    fn messages_and_markers_are_appended() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("transcript.txt");
        let log = TranscriptLog::new(Some(path.to_string_lossy().into_owned()))
            .expect("log should open");

        log.log_message(&ChatMessage::user("Bonjour"))
            .expect("write user");
        log.log_message(&ChatMessage::assistant("Bonjour ! Ça va ?\nTrès bien."))
            .expect("write assistant");
        log.log_marker("New conversation").expect("write marker");

        let contents = fs::read_to_string(&path).expect("read transcript");
        assert!(contents.contains("] You: Bonjour\n\n"));
        assert!(contents.contains("] Tutor: Bonjour ! Ça va ?\nTrès bien.\n\n"));
        assert!(contents.ends_with("## New conversation\n\n"));
        assert_eq!(log.status_string(), "transcript.txt");
    }

    #[test]
    fn unwritable_path_is_rejected_up_front() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("missing").join("transcript.txt");
        assert!(TranscriptLog::new(Some(path.to_string_lossy().into_owned())).is_err());
    }
}
