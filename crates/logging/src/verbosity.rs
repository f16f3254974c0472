/// Output threshold derived from the `-v` and `-q` command-line flags.
///
/// Levels are ordered: a sink configured at one level emits everything at
/// that level and below. Warnings and errors are not gated by verbosity at
/// all; [`Verbosity::Quiet`] only suppresses informational and report
/// output.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum Verbosity {
    /// `-q`: warnings and errors only.
    Quiet,
    /// Default: report lines and summary output.
    Normal,
    /// `-v`: per-candidate decision lines.
    Verbose,
    /// `-vv` and up: per-entry removal detail.
    Debug,
}

impl Verbosity {
    /// Maps the parsed flag state onto a threshold.
    ///
    /// `-q` wins over any number of `-v` occurrences, mirroring the usual
    /// last-resort use of quiet mode in cron jobs.
    #[must_use]
    pub const fn from_flags(verbose: u8, quiet: bool) -> Self {
        if quiet {
            Self::Quiet
        } else {
            match verbose {
                0 => Self::Normal,
                1 => Self::Verbose,
                _ => Self::Debug,
            }
        }
    }

    /// Returns `true` when output gated at `level` should be emitted.
    #[must_use]
    pub const fn allows(self, level: Self) -> bool {
        self as u8 >= level as u8
    }
}

impl Default for Verbosity {
    fn default() -> Self {
        Self::Normal
    }
}
