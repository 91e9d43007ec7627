//! Application controller and presentation contract.
//!
//! # Responsibility
//! - Translate user intents into note store calls.
//! - Keep presentation layers decoupled from storage details.

pub mod notes_app;
pub mod view;
