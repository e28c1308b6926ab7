//! # Core Application Logic
//!
//! This module contains Captr's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No terminal. No UI.    │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │ Responder  │      │ Clipboard  │
//!     │  Adapter   │      │  (tokio)   │      │  / export  │
//!     │ (ratatui)  │      │            │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`chat`]: One conversation and its Idle/Pending reply machine
//! - [`transcript`]: Append-only message history
//! - [`responder`]: Where replies come from, and the tasks that fetch them
//! - [`notes`]: The notes document, export and clipboard
//! - [`content`]: Bundled demo content
//! - [`config`]: TOML config, env and CLI resolution

pub mod action;
pub mod chat;
pub mod config;
pub mod content;
pub mod notes;
pub mod responder;
pub mod state;
pub mod transcript;
