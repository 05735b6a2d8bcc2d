use crate::error::ProgressError;
use model::events::{
    Event,
    progress::{ProgressEvent, ProgressLevel},
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, trace};

/// One open progress span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressState {
    pub total_units: u64,
    pub completed_units: u64,
    pub level: ProgressLevel,
}

/// Observer of progress events. Called synchronously; implementations must
/// not block.
pub trait ProgressSink: Send + Sync {
    fn on_event(&self, event: &ProgressEvent);
}

/// Stack of nested progress spans. `start` and `finish` calls must pair up
/// by level, innermost first.
pub struct ProgressReporter {
    sink: Arc<dyn ProgressSink>,
    spans: Vec<ProgressState>,
}

impl ProgressReporter {
    pub fn new(sink: Arc<dyn ProgressSink>) -> Self {
        ProgressReporter {
            sink,
            spans: Vec::new(),
        }
    }

    pub fn start(&mut self, total_units: u64, level: ProgressLevel) {
        self.spans.push(ProgressState {
            total_units,
            completed_units: 0,
            level,
        });
        self.sink.on_event(&ProgressEvent::Started {
            depth: self.spans.len() - 1,
            level,
            total: total_units,
        });
    }

    /// Completes one unit of the innermost span.
    pub fn advance(&mut self, level: ProgressLevel) -> Result<(), ProgressError> {
        let depth = self.spans.len().checked_sub(1).ok_or(ProgressError::NotStarted)?;
        let span = &mut self.spans[depth];
        if span.level != level {
            return Err(ProgressError::Unbalanced {
                expected: span.level,
                found: level,
            });
        }

        span.completed_units += 1;
        let event = ProgressEvent::Advanced {
            depth,
            level,
            completed: span.completed_units,
            total: span.total_units,
        };
        self.sink.on_event(&event);
        Ok(())
    }

    /// Closes the innermost span and returns its final state.
    pub fn finish(&mut self, level: ProgressLevel) -> Result<ProgressState, ProgressError> {
        let span = *self.spans.last().ok_or(ProgressError::NotStarted)?;
        if span.level != level {
            return Err(ProgressError::Unbalanced {
                expected: span.level,
                found: level,
            });
        }

        self.spans.pop();
        self.sink.on_event(&ProgressEvent::Finished {
            depth: self.spans.len(),
            level,
            completed: span.completed_units,
            total: span.total_units,
        });
        Ok(span)
    }

    pub fn depth(&self) -> usize {
        self.spans.len()
    }

    /// Drops every open span, returning how many were left open.
    pub fn reset(&mut self) -> usize {
        let open = self.spans.len();
        self.spans.clear();
        open
    }
}

/// Writes progress to the `tracing` log, dropping spans more verbose than
/// `min_level`.
pub struct TracingProgressSink {
    min_level: ProgressLevel,
}

impl TracingProgressSink {
    pub fn new(min_level: ProgressLevel) -> Self {
        TracingProgressSink { min_level }
    }
}

impl ProgressSink for TracingProgressSink {
    fn on_event(&self, event: &ProgressEvent) {
        if event.level() > self.min_level {
            return;
        }

        let percent = (event.percentage() * 100.0).round() as u64;
        match event {
            ProgressEvent::Started { depth, total, .. } => {
                info!(event = event.event_type(), depth, total, "Progress started");
            }
            ProgressEvent::Advanced {
                depth,
                completed,
                total,
                ..
            } => {
                info!(event = event.event_type(), depth, completed, total, percent, "Progress");
            }
            ProgressEvent::Finished {
                depth,
                completed,
                total,
                ..
            } => {
                info!(event = event.event_type(), depth, completed, total, percent, "Progress finished");
            }
        }
    }
}

/// Forwards progress events to a channel, e.g. to drive a progress bar in
/// another task.
pub struct ChannelProgressSink {
    sender: mpsc::UnboundedSender<ProgressEvent>,
}

impl ChannelProgressSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ProgressEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (ChannelProgressSink { sender }, receiver)
    }
}

impl ProgressSink for ChannelProgressSink {
    fn on_event(&self, event: &ProgressEvent) {
        if self.sender.send(*event).is_err() {
            trace!("Progress receiver dropped");
        }
    }
}
