//! Output verbosity.

/// Output verbosity mode, picked from the `-v` / `-q` flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Progress plus the processed template description.
    Verbose,
    /// Show progress and status.
    #[default]
    Normal,
    /// Only warnings and errors.
    Quiet,
}

impl OutputMode {
    /// Pick the mode from the `-v` / `-q` flags. `-q` wins.
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        if quiet {
            Self::Quiet
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    /// Check if this mode shows headers and status lines.
    pub fn shows_status(&self) -> bool {
        !matches!(self, Self::Quiet)
    }
}
