pub mod core;
pub mod documents;
pub mod events;
