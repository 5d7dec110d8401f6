//! Nebula Tasks: a minimal task-list web application.
//!
//! One SQLite table of tasks, a JSON API over it, and a task-list UI served
//! from the same binary. The pieces:
//!
//! - [`models`]: the task entity and the JSON wire shapes.
//! - [`db`]: the task store (SQLite through a shared connection handle).
//! - [`api`]: axum router and handlers for the four task endpoints.
//! - [`web`]: the embedded browser page.
//! - [`client`]: HTTP client for the API.
//! - [`ui`]: the task-list state machine and the controller driving it.
//! - [`config`]: server configuration from environment variables.

pub mod api;
pub mod client;
pub mod config;
pub mod db;
pub mod models;
pub mod ui;
pub mod web;
