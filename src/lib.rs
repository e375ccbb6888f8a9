// src/lib.rs

pub mod app;
pub mod app_state;
pub mod chat_message;
pub mod config;
pub mod constants;
pub mod controller;
pub mod conversation;
pub mod credentials;
pub mod errors;
pub mod export;
pub mod history;
pub mod key_handlers;
pub mod logging;
pub mod models;
pub mod reply;
pub mod scroll;
pub mod speech;
pub mod status_indicator;
pub mod storage;
pub mod ui;
