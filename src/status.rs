//! Exit status codes for the CLI
//!
//! - 0: Success
//! - 1: Any error (unparseable command, network failure, non-2xx with
//!   --check-status)

use std::process::{ExitCode, Termination};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitStatus {
    Success = 0,
    Error = 1,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status as u8)
    }
}

impl Termination for ExitStatus {
    fn report(self) -> ExitCode {
        ExitCode::from(self)
    }
}

impl ExitStatus {
    /// Exit status for a response summary.
    ///
    /// A status-0 summary (request never completed) is always an error; other
    /// statuses only fail when `check_status` is set and the code is not 2xx.
    pub fn from_http_status(status_code: u16, check_status: bool) -> Self {
        if status_code == 0 {
            return ExitStatus::Error;
        }
        if !check_status || (200..300).contains(&status_code) {
            ExitStatus::Success
        } else {
            ExitStatus::Error
        }
    }
}
