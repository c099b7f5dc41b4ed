//! # KemSU Assistant Telegram Bot
//!
//! A Telegram bot for the Digital Institute of Kemerovo State University: it shows the
//! latest university news and sends schedule PDFs picked through a category → group
//! dialogue.

pub mod bot;
pub mod config;
pub mod dialogue;
pub mod document_loader;
pub mod errors;
pub mod localization;
pub mod logging;
pub mod news_scraper;
pub mod news_service;
pub mod schedule_catalog;
