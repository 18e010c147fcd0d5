pub mod message;
pub mod event;
pub mod rule;
pub mod config;
pub mod error;
pub mod session;


pub use error::AssistantError;
pub type Result<T> = std::result::Result<T, AssistantError>;
