use std::io::Write;

use logging::{Message, MessageSink, Verbosity};

/// Output channels for one pruning run.
///
/// Report lines (dry-run predictions, per-candidate decisions, statistics)
/// go to the primary stream without a severity prefix. Informational
/// diagnostics share that stream but are rendered as prefixed [`Message`]s;
/// warnings and errors land on the secondary stream and are never gated by
/// verbosity. Write failures on either stream are ignored so a closed pipe
/// cannot turn reporting into a crash mid-purge.
pub struct Reporter<'a, Out: Write, Err: Write> {
    out: &'a mut MessageSink<Out>,
    err: &'a mut MessageSink<Err>,
    verbosity: Verbosity,
}

impl<'a, Out: Write, Err: Write> Reporter<'a, Out, Err> {
    /// Binds the run's output streams at the given threshold.
    pub fn new(
        out: &'a mut MessageSink<Out>,
        err: &'a mut MessageSink<Err>,
        verbosity: Verbosity,
    ) -> Self {
        Self {
            out,
            err,
            verbosity,
        }
    }

    /// Returns the configured threshold.
    #[must_use]
    pub const fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    /// Emits a plain report line when `level` is enabled.
    pub fn line(&mut self, level: Verbosity, text: &str) {
        if self.verbosity.allows(level) {
            let _ = self.out.write_line(text);
        }
    }

    /// Emits an informational diagnostic when `level` is enabled.
    pub fn info(&mut self, level: Verbosity, text: String) {
        if self.verbosity.allows(level) {
            let _ = self.out.write(&Message::info(text));
        }
    }

    /// Emits a warning diagnostic. Warnings bypass the verbosity gate.
    pub fn warning(&mut self, text: String) {
        let _ = self.err.write(&Message::warning(text));
    }

    /// Emits an error diagnostic. Errors bypass the verbosity gate.
    pub fn error(&mut self, code: i32, text: String) {
        let _ = self.err.write(&Message::error(code, text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(buffer: Vec<u8>) -> String {
        String::from_utf8(buffer).expect("utf8")
    }

    #[test]
    fn lines_respect_the_threshold() {
        let mut out = MessageSink::new(Vec::new());
        let mut err = MessageSink::new(Vec::new());
        let mut reporter = Reporter::new(&mut out, &mut err, Verbosity::Normal);

        reporter.line(Verbosity::Normal, "kept");
        reporter.line(Verbosity::Verbose, "dropped");

        assert_eq!(rendered(out.into_inner()), "kept\n");
    }

    #[test]
    fn warnings_ignore_quiet() {
        let mut out = MessageSink::new(Vec::new());
        let mut err = MessageSink::new(Vec::new());
        let mut reporter = Reporter::new(&mut out, &mut err, Verbosity::Quiet);

        reporter.info(Verbosity::Normal, "suppressed".to_string());
        reporter.warning("always shown".to_string());

        assert!(rendered(out.into_inner()).is_empty());
        assert_eq!(
            rendered(err.into_inner()),
            "trash-sweep warning: always shown\n",
        );
    }

    #[test]
    fn errors_carry_their_code() {
        let mut out = MessageSink::new(Vec::new());
        let mut err = MessageSink::new(Vec::new());
        let mut reporter = Reporter::new(&mut out, &mut err, Verbosity::Normal);

        reporter.error(3, "missing info directory".to_string());

        assert_eq!(
            rendered(err.into_inner()),
            "trash-sweep error: missing info directory (code 3)\n",
        );
    }
}
