//! Operations client for the Sconto admin backend: typed HTTP requests,
//! a query cache with mutation hooks, the session guard, and a terminal
//! dashboard built on top of them.

pub mod api;
pub mod app;
pub mod commands;
pub mod config;
pub mod event;
pub mod guard;
pub mod hooks;
pub mod logging;
pub mod notify;
pub mod query;
pub mod session;
pub mod ui;
