use std::process::ExitCode;

/// Exit status of a CLI run.
///
/// - `Success` (0): every source file was extracted
/// - `Failure` (1): some source files could not be read or parsed
/// - `Error` (2): the run was aborted (invalid config, unwritable catalog, ...)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::SUCCESS,
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
