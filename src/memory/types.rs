/*!
 * Memory Types
 * Common types for memory accounting
 */

use crate::core::limits::{
    PRESSURE_CRITICAL_THRESHOLD, PRESSURE_HIGH_THRESHOLD, PRESSURE_MEDIUM_THRESHOLD,
};
use crate::core::types::Size;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Memory operation result
pub type MemoryResult<T> = Result<T, MemoryError>;

/// Memory errors
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum MemoryError {
    #[error("Insufficient memory: requested {requested} bytes, {free} bytes free of {total} total")]
    #[diagnostic(
        code(memory::insufficient),
        help("Terminate a running process to reclaim its quota.")
    )]
    InsufficientMemory {
        requested: Size,
        free: Size,
        total: Size,
    },

    #[error("Release of {amount} bytes would exceed capacity ({free} bytes free of {total} total)")]
    #[diagnostic(
        code(memory::over_release),
        help("Only release memory that was previously granted.")
    )]
    OverRelease { amount: Size, free: Size, total: Size },

    #[error("Invalid memory capacity: {0}")]
    #[diagnostic(code(memory::invalid_capacity))]
    InvalidCapacity(Size),
}

/// What happens when a release would push free capacity above the total.
///
/// The allocator only counts bytes, it does not remember who holds them,
/// so a caller can release memory it was never granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleasePolicy {
    /// Reject the release and leave state unchanged
    #[default]
    Strict,
    /// Credit up to the total and drop the excess
    Clamp,
    /// Credit unconditionally; free may exceed total
    Permissive,
}

impl ReleasePolicy {
    /// Whether callers must prove a grant exists before releasing
    pub fn is_guarded(&self) -> bool {
        !matches!(self, ReleasePolicy::Permissive)
    }
}

impl fmt::Display for ReleasePolicy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ReleasePolicy::Strict => write!(f, "strict"),
            ReleasePolicy::Clamp => write!(f, "clamp"),
            ReleasePolicy::Permissive => write!(f, "permissive"),
        }
    }
}

impl FromStr for ReleasePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(ReleasePolicy::Strict),
            "clamp" => Ok(ReleasePolicy::Clamp),
            "permissive" => Ok(ReleasePolicy::Permissive),
            other => Err(format!("unknown release policy: {}", other)),
        }
    }
}

/// Memory statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryStats {
    pub total_memory: Size,
    pub used_memory: Size,
    pub free_memory: Size,
    pub usage_percentage: f64,
}

impl MemoryStats {
    pub fn new(total: Size, free: Size) -> Self {
        let used = total.saturating_sub(free);
        Self {
            total_memory: total,
            used_memory: used,
            free_memory: free,
            usage_percentage: (used as f64 / total as f64) * 100.0,
        }
    }

    pub fn memory_pressure(&self) -> MemoryPressure {
        MemoryPressure::from_ratio(self.usage_percentage / 100.0)
    }
}

/// Memory pressure levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MemoryPressure {
    Low,
    Medium,
    High,
    Critical,
}

impl MemoryPressure {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= PRESSURE_CRITICAL_THRESHOLD {
            MemoryPressure::Critical
        } else if ratio >= PRESSURE_HIGH_THRESHOLD {
            MemoryPressure::High
        } else if ratio >= PRESSURE_MEDIUM_THRESHOLD {
            MemoryPressure::Medium
        } else {
            MemoryPressure::Low
        }
    }
}

impl fmt::Display for MemoryPressure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MemoryPressure::Low => write!(f, "LOW"),
            MemoryPressure::Medium => write!(f, "MEDIUM"),
            MemoryPressure::High => write!(f, "HIGH"),
            MemoryPressure::Critical => write!(f, "CRITICAL"),
        }
    }
}
