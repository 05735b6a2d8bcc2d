use std::fmt::Debug;

pub mod progress;

/// A trait for events emitted to observers of a running stage.
pub trait Event: Send + Sync + Debug + 'static {
    /// Returns a unique identifier for this event type.
    fn event_type(&self) -> &'static str;
}
