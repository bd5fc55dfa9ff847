use std::process::Termination;

use ariadne::{Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::compile::semantic::SemanticError;

pub struct ExitCode(u8);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAIL_SEMANTIC: ExitCode = ExitCode(7);
}

impl Termination for ExitCode {
    fn report(self) -> std::process::ExitCode {
        std::process::ExitCode::from(self.0)
    }
}

impl From<TanukiError> for ExitCode {
    fn from(value: TanukiError) -> Self {
        match value {
            TanukiError::SemanticError(_) => ExitCode::FAIL_SEMANTIC,
            _ => ExitCode(255),
        }
    }
}

#[derive(Error, Debug)]
pub enum TanukiError {
    #[error("Semantical Analysis failed: {0}")]
    SemanticError(#[from] SemanticError),

    #[error("There was an I/O error: {0}")]
    IOError(#[from] std::io::Error),
}

/// Renders the diagnostic against the source text it points into. The
/// plain `Display` of the error stays available for sinks without the
/// source at hand.
pub fn report(error: &SemanticError, path: &str, src: &str) -> std::io::Result<()> {
    let span = error.span();

    Report::build(ReportKind::Error, (path, span.clone()))
        .with_message("Semantical Analysis failed")
        .with_label(Label::new((path, span)).with_message(error.to_string()))
        .finish()
        .eprint((path, Source::from(src)))
}
