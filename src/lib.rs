pub mod config;
pub mod controller;
pub mod error;
pub mod line_coding;
pub mod trace;
pub mod ui;
pub mod utils;
