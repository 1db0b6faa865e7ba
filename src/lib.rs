pub mod api;
pub mod chrono_util;
pub mod config;
pub mod diff;
pub mod document;
pub mod parser;
pub mod pipeline;
pub mod schedule;
pub mod store;
