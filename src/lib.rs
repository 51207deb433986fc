pub mod cli;
pub mod commands;
pub mod config;
pub mod engine;
pub mod input;
pub mod limits;
pub mod model;
pub mod observability;
pub mod prompt;
pub mod render;
pub mod shell;
pub mod storage;
