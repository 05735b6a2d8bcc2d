pub mod defaults;
pub mod error;
pub mod settings;
