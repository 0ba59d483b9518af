//! Progress reporting for persona A/B testing workflows.
//!
//! Two channels are provided:
//!
//! - [`WorkflowLog`] events, one JSON line per event on stderr, for a
//!   supervising process to parse (`__AB_EVENT__:{...}`).
//! - Console macros (`log_info!`, `log_file_saved!`, ...) for humans.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};

/// Line prefix that marks a structured event on stderr.
pub const EVENT_PREFIX: &str = "__AB_EVENT__:";

static EVENT_OUTPUT: AtomicBool = AtomicBool::new(false);

/// Enable or disable structured event output for the whole process.
pub fn set_event_output(enabled: bool) {
    EVENT_OUTPUT.store(enabled, Ordering::Relaxed);
}

/// Whether structured events are currently written to stderr.
pub fn event_output_enabled() -> bool {
    EVENT_OUTPUT.load(Ordering::Relaxed)
}

/// Outcome of a single workflow run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStatus {
    NotStarted,
    Running,
    Completed,
    Failed,
}

/// Structured logging events emitted by workflows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WorkflowLog {
    /// Stage started
    StageStarted {
        stage: usize,
        name: String,
        total_stages: usize,
    },
    /// Stage completed
    StageCompleted { stage: usize, name: String },
    /// Stage failed
    StageFailed {
        stage: usize,
        name: String,
        error: String,
    },
    /// Task started
    TaskStarted {
        stage: usize,
        task_id: String,
        description: String,
        total_tasks: Option<usize>,
    },
    /// Task completed
    TaskCompleted {
        task_id: String,
        result: Option<String>,
    },
    /// Task failed
    TaskFailed { task_id: String, error: String },
    /// One persona scored one variant
    PersonaScored {
        variant: String,
        persona: String,
        purchase_likelihood: f64,
    },
    /// A stage substituted fallback content for a failed upstream call
    FallbackUsed { stage: usize, reason: String },
    /// Artifact written to disk
    StateFileCreated {
        file_path: String,
        description: String,
    },
}

impl WorkflowLog {
    /// Render the event as a prefixed JSON line.
    pub fn to_line(&self) -> Option<String> {
        serde_json::to_string(self)
            .ok()
            .map(|json| format!("{}{}", EVENT_PREFIX, json))
    }

    /// Parse a line previously produced by [`WorkflowLog::to_line`].
    pub fn from_line(line: &str) -> Option<Self> {
        line.strip_prefix(EVENT_PREFIX)
            .and_then(|json| serde_json::from_str(json).ok())
    }

    /// Emit this event to stderr if event output is enabled
    pub fn emit(&self) {
        if !event_output_enabled() {
            return;
        }
        if let Some(line) = self.to_line() {
            use std::io::Write;
            eprintln!("{}", line);
            // Concurrent batch runs interleave; flush per event
            let _ = std::io::stderr().flush();
        }
    }
}

/// Helper macros for workflow logging
#[macro_export]
macro_rules! log_stage_start {
    ($stage:expr, $name:expr, $total:expr) => {
        $crate::WorkflowLog::StageStarted {
            stage: $stage,
            name: $name.to_string(),
            total_stages: $total,
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_stage_complete {
    ($stage:expr, $name:expr) => {
        $crate::WorkflowLog::StageCompleted {
            stage: $stage,
            name: $name.to_string(),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_stage_failed {
    ($stage:expr, $name:expr, $error:expr) => {
        $crate::WorkflowLog::StageFailed {
            stage: $stage,
            name: $name.to_string(),
            error: $error.to_string(),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_task_start {
    ($stage:expr, $task_id:expr, $desc:expr) => {
        $crate::WorkflowLog::TaskStarted {
            stage: $stage,
            task_id: $task_id.to_string(),
            description: $desc.to_string(),
            total_tasks: None,
        }
        .emit();
    };
    ($stage:expr, $task_id:expr, $desc:expr, $total:expr) => {
        $crate::WorkflowLog::TaskStarted {
            stage: $stage,
            task_id: $task_id.to_string(),
            description: $desc.to_string(),
            total_tasks: Some($total),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_task_complete {
    ($task_id:expr) => {
        $crate::WorkflowLog::TaskCompleted {
            task_id: $task_id.to_string(),
            result: None,
        }
        .emit();
    };
    ($task_id:expr, $result:expr) => {
        $crate::WorkflowLog::TaskCompleted {
            task_id: $task_id.to_string(),
            result: Some($result.to_string()),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_task_failed {
    ($task_id:expr, $error:expr) => {
        $crate::WorkflowLog::TaskFailed {
            task_id: $task_id.to_string(),
            error: $error.to_string(),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_persona_scored {
    ($variant:expr, $persona:expr, $likelihood:expr) => {
        $crate::WorkflowLog::PersonaScored {
            variant: $variant.to_string(),
            persona: $persona.to_string(),
            purchase_likelihood: $likelihood,
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_fallback {
    ($stage:expr, $reason:expr) => {
        $crate::WorkflowLog::FallbackUsed {
            stage: $stage,
            reason: $reason.to_string(),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_state_file {
    ($path:expr, $desc:expr) => {
        $crate::WorkflowLog::StateFileCreated {
            file_path: $path.to_string(),
            description: $desc.to_string(),
        }
        .emit();
    };
}

// ============================================================================
// Console Logging Macros
// ============================================================================
// Colored output for the command-line binaries, complementing the
// structured WorkflowLog events above.
// ============================================================================

/// Logs the start of a workflow stage with a header and description.
///
/// Outputs:
/// ```text
/// ═══ STAGE 1: Analyze Image ═══
/// Describe the marketing image
/// ```
#[macro_export]
macro_rules! log_stage_start_console {
    ($stage:expr, $title:expr, $description:expr) => {
        println!("\x1b[1;36m═══ STAGE {}: {} ═══\x1b[0m", $stage, $title);
        println!("\x1b[36m{}\x1b[0m", $description);
    };
}

/// Logs the completion of a workflow stage.
#[macro_export]
macro_rules! log_stage_complete_console {
    ($stage:expr) => {
        println!("\x1b[32m✓ Stage {} complete\x1b[0m", $stage);
    };
}

/// Logs progress of an operation.
///
/// Outputs:
/// ```text
/// Progress: 3/5 scenarios
/// ```
#[macro_export]
macro_rules! log_progress {
    ($current:expr, $total:expr, $item_type:expr) => {
        println!(
            "\x1b[36mProgress: {}/{} {}\x1b[0m",
            $current, $total, $item_type
        );
    };
}

/// Logs the number of items found.
#[macro_export]
macro_rules! log_found {
    ($count:expr, $item_type:expr) => {
        println!("\x1b[36mFound {} {}\x1b[0m", $count, $item_type);
    };
}

/// Logs an informational message.
///
/// # Example
/// ```
/// use ab_testing_sdk::log_info;
/// log_info!("Using sample image");
/// let count = 3;
/// log_info!("Scoring {} personas", count);
/// ```
#[macro_export]
macro_rules! log_info {
    ($message:expr) => {
        println!("\x1b[36mℹ {}\x1b[0m", $message);
    };
    ($fmt:expr, $($arg:tt)*) => {
        println!("\x1b[36mℹ {}\x1b[0m", format!($fmt, $($arg)*));
    };
}

/// Logs a warning message.
#[macro_export]
macro_rules! log_warning {
    ($message:expr) => {
        println!("\x1b[33m⚠ Warning: {}\x1b[0m", $message);
    };
    ($fmt:expr, $($arg:tt)*) => {
        println!("\x1b[33m⚠ Warning: {}\x1b[0m", format!($fmt, $($arg)*));
    };
}

/// Logs that a file has been saved.
///
/// Outputs:
/// ```text
/// ✓ Saved: results/ab_test_results_20250101_120000.json
/// ```
#[macro_export]
macro_rules! log_file_saved {
    ($path:expr) => {
        println!("\x1b[32m✓ Saved: {}\x1b[0m", $path);
    };
}
