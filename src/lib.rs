pub mod config;
pub mod error;
pub mod logging;
pub mod mocker;
pub mod parser;
pub mod render;
pub mod server;
pub mod service;
