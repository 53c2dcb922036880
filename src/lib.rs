#![deny(clippy::print_stdout)]

pub mod command_line;
pub mod pipeline;
pub mod rest_api;
