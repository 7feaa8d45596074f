//! Camera-pose prompt helper: azimuth/elevation/distance prompts for
//! multi-angle video generation, plus an egui panel that a host UI can inject.

pub mod taxonomy;
pub mod prompt;
pub mod blocks;
pub mod config;
pub mod panel;
pub mod host;
pub mod ui_panels;
pub mod app;
