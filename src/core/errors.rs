/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use crate::core::types::Pid;
use crate::process::ProcessState;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export domain errors that live next to their subsystems
pub use crate::memory::MemoryError;
pub use crate::vfs::VfsError;

/// Process-related errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ProcessError {
    #[error("Process {0} is already registered")]
    #[diagnostic(
        code(process::duplicate),
        help("Process identifiers must be unique. Terminate the existing process or pick another PID.")
    )]
    DuplicateProcess(Pid),

    #[error("Process {0} not found")]
    #[diagnostic(
        code(process::unknown),
        help("The process may have terminated or never been admitted. Check PID validity.")
    )]
    UnknownProcess(Pid),

    #[error("Invalid process: {0}")]
    #[diagnostic(
        code(process::invalid),
        help("Processes need a positive PID and a non-empty name.")
    )]
    InvalidProcess(String),

    #[error("Invalid state transition for PID {pid}: {from} -> {to}")]
    #[diagnostic(
        code(process::invalid_transition),
        help("Process status only moves forward: unadmitted -> running -> terminated.")
    )]
    InvalidStateTransition {
        pid: Pid,
        from: ProcessState,
        to: ProcessState,
    },
}

/// Configuration errors
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {message}")]
    #[diagnostic(code(config::io), help("Check that the file exists and is readable."))]
    Io { path: String, message: String },

    #[error("Failed to parse config: {0}")]
    #[diagnostic(code(config::parse), help("The config file must be a JSON object."))]
    Parse(String),

    #[error("Invalid value for {var}: {value:?}")]
    #[diagnostic(code(config::env))]
    InvalidEnv { var: String, value: String },

    #[error("Invalid configuration: {0}")]
    #[diagnostic(code(config::invalid))]
    Invalid(String),
}

/// Unified kernel error
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "subsystem", content = "error", rename_all = "snake_case")]
pub enum KernelError {
    #[error("Memory error: {0}")]
    #[diagnostic(transparent)]
    Memory(#[from] MemoryError),

    #[error("Process error: {0}")]
    #[diagnostic(transparent)]
    Process(#[from] ProcessError),

    #[error("Storage error: {0}")]
    #[diagnostic(transparent)]
    Vfs(#[from] VfsError),

    #[error("Configuration error: {0}")]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

impl KernelError {
    /// True if the error is an admission rejection for lack of memory
    pub fn is_insufficient_memory(&self) -> bool {
        matches!(self, KernelError::Memory(MemoryError::InsufficientMemory { .. }))
    }

    /// True if the error names a PID that is not registered
    pub fn is_unknown_process(&self) -> bool {
        matches!(self, KernelError::Process(ProcessError::UnknownProcess(_)))
    }

    /// True if the error names a PID that is already registered
    pub fn is_duplicate_process(&self) -> bool {
        matches!(self, KernelError::Process(ProcessError::DuplicateProcess(_)))
    }
}
