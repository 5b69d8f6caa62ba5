pub mod chat;
pub mod render;
