/*!
 * Process Validation
 * Admission checks for caller-supplied processes
 */

use super::types::{Process, ProcessResult, ProcessState};
use crate::core::errors::ProcessError;
use crate::core::limits::MAX_PROCESS_NAME_LEN;

/// Validate a process before it is admitted
pub(crate) fn validate_for_admission(process: &Process) -> ProcessResult<()> {
    if process.pid() == 0 {
        return Err(ProcessError::InvalidProcess(
            "PID must be positive".to_string(),
        ));
    }

    validate_name(process.name())?;

    if process.state() != ProcessState::Unadmitted {
        return Err(ProcessError::InvalidStateTransition {
            pid: process.pid(),
            from: process.state(),
            to: ProcessState::Running,
        });
    }

    Ok(())
}

/// Validate a process name
pub(crate) fn validate_name(name: &str) -> ProcessResult<()> {
    if name.trim().is_empty() {
        return Err(ProcessError::InvalidProcess(
            "Process name cannot be empty".to_string(),
        ));
    }

    if name.len() > MAX_PROCESS_NAME_LEN {
        return Err(ProcessError::InvalidProcess(format!(
            "Process name exceeds {} bytes",
            MAX_PROCESS_NAME_LEN
        )));
    }

    if name.contains('\0') {
        return Err(ProcessError::InvalidProcess(
            "Process name contains NUL byte".to_string(),
        ));
    }

    Ok(())
}
