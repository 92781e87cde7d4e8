//! Shared test utilities

#![allow(dead_code)]

mod http;
mod workspace;

pub use http::*;
pub use workspace::*;
