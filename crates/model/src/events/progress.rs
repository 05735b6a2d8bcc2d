use crate::events::Event;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Verbosity of a progress span. `Info` spans wrap `Debug` spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressLevel {
    Info,
    Debug,
}

impl ProgressLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressLevel::Info => "info",
            ProgressLevel::Debug => "debug",
        }
    }
}

impl fmt::Display for ProgressLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressEvent {
    Started {
        depth: usize,
        level: ProgressLevel,
        total: u64,
    },
    Advanced {
        depth: usize,
        level: ProgressLevel,
        completed: u64,
        total: u64,
    },
    Finished {
        depth: usize,
        level: ProgressLevel,
        completed: u64,
        total: u64,
    },
}

impl ProgressEvent {
    pub fn level(&self) -> ProgressLevel {
        match self {
            ProgressEvent::Started { level, .. }
            | ProgressEvent::Advanced { level, .. }
            | ProgressEvent::Finished { level, .. } => *level,
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            ProgressEvent::Started { depth, .. }
            | ProgressEvent::Advanced { depth, .. }
            | ProgressEvent::Finished { depth, .. } => *depth,
        }
    }

    /// Completion ratio in `[0, 1]`; an empty span counts as complete.
    pub fn percentage(&self) -> f64 {
        match self {
            ProgressEvent::Started { total, .. } => {
                if *total == 0 {
                    1.0
                } else {
                    0.0
                }
            }
            ProgressEvent::Advanced {
                completed, total, ..
            }
            | ProgressEvent::Finished {
                completed, total, ..
            } => {
                if *total == 0 {
                    1.0
                } else {
                    (*completed as f64 / *total as f64).min(1.0)
                }
            }
        }
    }
}

impl Event for ProgressEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ProgressEvent::Started { .. } => "progress.started",
            ProgressEvent::Advanced { .. } => "progress.advanced",
            ProgressEvent::Finished { .. } => "progress.finished",
        }
    }
}
