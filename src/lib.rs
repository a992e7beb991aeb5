#![forbid(unsafe_code)]

pub mod app;
pub mod author;
pub mod category;
pub mod cli;
pub mod config;
pub mod formats;
pub mod logging;
pub mod provider;
pub mod review;
pub mod search;
