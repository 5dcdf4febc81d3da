pub mod app;
pub mod backend;
pub mod cli;
pub mod config;
pub mod events;
pub mod submission;
pub mod tea;
pub mod theme;
pub mod timing;
pub mod ui;

pub use app::App;
