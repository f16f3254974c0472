use std::borrow::Cow;
use std::fmt;

/// Severity of a user-visible message.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Severity {
    /// Informational message.
    Info,
    /// Warning message.
    Warning,
    /// Error message.
    Error,
}

impl Severity {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// Structured representation of a trash-sweep diagnostic.
///
/// Messages carry a severity, the payload text, and (for errors) the exit
/// code the condition maps to. Rendering goes through [`fmt::Display`]:
///
/// ```
/// use logging::Message;
///
/// let message = Message::error(3, "no info directory under '/tmp/Trash'");
/// assert_eq!(
///     message.to_string(),
///     "trash-sweep error: no info directory under '/tmp/Trash' (code 3)",
/// );
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Message {
    severity: Severity,
    code: Option<i32>,
    text: Cow<'static, str>,
}

impl Message {
    /// Creates an informational message.
    #[must_use]
    pub fn info<T: Into<Cow<'static, str>>>(text: T) -> Self {
        Self {
            severity: Severity::Info,
            code: None,
            text: text.into(),
        }
    }

    /// Creates a warning message.
    #[must_use]
    pub fn warning<T: Into<Cow<'static, str>>>(text: T) -> Self {
        Self {
            severity: Severity::Warning,
            code: None,
            text: text.into(),
        }
    }

    /// Creates an error message carrying the exit code it maps to.
    #[must_use]
    pub fn error<T: Into<Cow<'static, str>>>(code: i32, text: T) -> Self {
        Self {
            severity: Severity::Error,
            code: Some(code),
            text: text.into(),
        }
    }

    /// Returns the message severity.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the exit code associated with the message if present.
    #[must_use]
    pub const fn code(&self) -> Option<i32> {
        self.code
    }

    /// Returns the message payload text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Attaches an exit code to the message.
    #[must_use]
    pub const fn with_code(mut self, code: i32) -> Self {
        self.code = Some(code);
        self
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "trash-sweep {}: {}", self.severity.as_str(), self.text)?;

        if let (Severity::Error, Some(code)) = (self.severity, self.code) {
            write!(f, " (code {code})")?;
        }

        Ok(())
    }
}
