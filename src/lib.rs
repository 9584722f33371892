//! Analyze a YouTube script's style with Gemini and write new scripts in it.

pub mod app;
pub mod cli;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod defaults;
pub mod error;
pub mod gemini;
pub mod logging;
pub mod screens;
pub mod types;
pub mod ui;
pub mod workflow;
