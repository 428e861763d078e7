use std::process::ExitCode;

/// Process exit status of the CLI.
///
/// - `Success` (0): every template was extracted
/// - `Failure` (1): extraction ran, but some templates had problems
/// - `Error` (2): the run itself failed (bad config, unwritable output, ...)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl ExitStatus {
    pub fn from_problem_count(problems: usize) -> Self {
        if problems == 0 {
            ExitStatus::Success
        } else {
            ExitStatus::Failure
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
