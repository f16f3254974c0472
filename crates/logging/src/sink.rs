use std::fmt::Write as _;
use std::io::{self, Write};

use crate::message::Message;

/// Controls whether a [`MessageSink`] appends a trailing newline when writing
/// messages.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LineMode {
    /// Append a newline terminator after each rendered message.
    #[default]
    WithNewline,
    /// Emit the rendered message without a trailing newline.
    WithoutNewline,
}

impl LineMode {
    const fn append_newline(self) -> bool {
        matches!(self, Self::WithNewline)
    }
}

/// Streaming sink that renders [`Message`] values into an
/// [`io::Write`](std::io::Write) target.
///
/// The sink owns the underlying writer together with a reusable render
/// buffer, so emitting one diagnostic per trash entry does not allocate per
/// message. The configured [`LineMode`] decides whether each message is
/// newline-terminated.
///
/// # Examples
///
/// ```
/// use logging::{Message, MessageSink};
///
/// let mut sink = MessageSink::new(Vec::new());
/// sink.write(&Message::warning("entry has no deletion date"))?;
///
/// let output = String::from_utf8(sink.into_inner()).unwrap();
/// assert!(output.ends_with('\n'));
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct MessageSink<W> {
    writer: W,
    line_mode: LineMode,
    scratch: String,
}

impl<W: Write> MessageSink<W> {
    /// Creates a sink that appends a newline after every message.
    pub fn new(writer: W) -> Self {
        Self::with_line_mode(writer, LineMode::WithNewline)
    }

    /// Creates a sink with an explicit [`LineMode`].
    pub fn with_line_mode(writer: W, line_mode: LineMode) -> Self {
        Self {
            writer,
            line_mode,
            scratch: String::new(),
        }
    }

    /// Returns the configured line mode.
    #[must_use]
    pub const fn line_mode(&self) -> LineMode {
        self.line_mode
    }

    /// Renders `message` into the underlying writer.
    ///
    /// # Errors
    ///
    /// Propagates any [`io::Error`] produced by the writer.
    pub fn write(&mut self, message: &Message) -> io::Result<()> {
        self.scratch.clear();
        // Formatting into a String cannot fail; only the writer can.
        let _ = write!(self.scratch, "{message}");
        self.writer.write_all(self.scratch.as_bytes())?;
        if self.line_mode.append_newline() {
            self.writer.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Writes a pre-rendered report line, bypassing message formatting.
    ///
    /// Plain output such as dry-run predictions and the statistics report is
    /// line-oriented but carries no severity prefix; it still honours the
    /// sink's line mode.
    ///
    /// # Errors
    ///
    /// Propagates any [`io::Error`] produced by the writer.
    pub fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.writer.write_all(line.as_bytes())?;
        if self.line_mode.append_newline() {
            self.writer.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Flushes the underlying writer.
    ///
    /// # Errors
    ///
    /// Propagates any [`io::Error`] produced by the writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Returns a shared reference to the underlying writer.
    pub const fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Returns a mutable reference to the underlying writer.
    pub const fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Consumes the sink and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
