pub mod app;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod env;
pub mod fetch;
pub mod info;
pub mod output;
pub mod runtime;
pub mod seed;
