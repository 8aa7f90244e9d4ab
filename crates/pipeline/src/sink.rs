//! Destinations for a user-selected symbol.

use std::io::Write;

use facemoji_common::error::FacemojiResult;

/// Receives the symbol the user picked from a suggestion list.
///
/// Implementations relay it onward (a chat input, a clipboard, a log).
pub trait SelectionSink {
    fn send(&mut self, symbol: &str) -> FacemojiResult<()>;
}

/// Keeps every selected symbol in memory.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    sent: Vec<String>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> &[String] {
        &self.sent
    }

    pub fn last(&self) -> Option<&str> {
        self.sent.last().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.sent.clear();
    }
}

impl SelectionSink for RecordingSink {
    fn send(&mut self, symbol: &str) -> FacemojiResult<()> {
        self.sent.push(symbol.to_string());
        Ok(())
    }
}

/// Writes each selected symbol as one line.
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> SelectionSink for WriterSink<W> {
    fn send(&mut self, symbol: &str) -> FacemojiResult<()> {
        writeln!(self.writer, "{symbol}")?;
        self.writer.flush()?;
        Ok(())
    }
}
