//! Taskdeck -- terminal task board library.

pub mod app;
pub mod board;
pub mod config;
pub mod net;
pub mod ui;
