pub mod chat;
pub mod header;
