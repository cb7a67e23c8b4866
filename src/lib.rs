#[macro_use]
pub mod macros;

pub mod api;
pub mod chrono_util;
pub mod parser;
pub mod report;
pub mod schema;
