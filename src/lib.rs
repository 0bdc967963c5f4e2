pub mod config;
pub mod display;
pub mod engine;
pub mod feed;
pub mod logging;
pub mod runner;
