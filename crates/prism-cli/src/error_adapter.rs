//! Error adapter for converting PrismError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error type
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use prism::PrismError;

/// Adapter giving a [`PrismError`] a stable diagnostic code and help text.
pub struct ErrorAdapter<'a>(pub &'a PrismError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            PrismError::InvalidChannel { .. } => "prism::channel",
            PrismError::LayoutConfiguration(_) => "prism::layout",
            PrismError::Io(_) => "prism::io",
            PrismError::Config(_) => "prism::config",
            PrismError::Export(_) => "prism::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            PrismError::InvalidChannel { channels, .. } => format!(
                "channel indices run from 0 to {}",
                channels.saturating_sub(1)
            ),
            PrismError::LayoutConfiguration(_) => {
                "check `depth` and `pixels_per_column` in the [layout] table".to_string()
            }
            PrismError::Config(_) => {
                "check the configuration and circuit files for TOML syntax and field names"
                    .to_string()
            }
            PrismError::Io(_) | PrismError::Export(_) => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}
