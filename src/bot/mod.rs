//! Bot module for handling Telegram interactions
//!
//! - `message_handler`: teloxide endpoint for incoming messages
//! - `ui_builder`: creates reply keyboards
//! - `dialogue_manager`: transport-free dialogue state machine

pub mod dialogue_manager;
pub mod message_handler;
pub mod ui_builder;

// Re-export main handler function for use in main.rs
pub use message_handler::message_handler;

pub use dialogue_manager::{DialogueController, Keyboard, Reply, ScheduleDocument, Step};
