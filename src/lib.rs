#![forbid(unsafe_code)]

pub mod app;
pub mod cli;
pub mod convert;
pub mod extract;
pub mod formats;
pub mod logging;
pub mod render;
pub mod sheet;
pub mod stats;
pub mod tree;
pub mod xml;
