//! Parlance is a terminal client for practicing a foreign language with a
//! remote tutor.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`api`] defines the tutor wire payloads and the [`api::TutorApi`] seam
//!   with its reqwest-backed implementation.
//! - [`core`] owns the session workflow ([`core::controller`]), the
//!   observable view state, evaluation display rules, and configuration.
//! - [`ui`] renders the terminal interface and runs the event loop that turns
//!   key presses into controller operations.
//! - [`cli`] parses arguments and dispatches subcommands.
//!
//! The binary (`src/main.rs`) routes straight into [`cli::main`].

pub mod api;
pub mod cli;
pub mod core;
pub mod ui;
pub mod utils;
