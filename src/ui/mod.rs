//! Terminal UI layer for language-practice sessions.
//!
//! - [`chat_loop`]: the interaction loop that turns key presses into
//!   [`crate::core::controller::SessionController`] calls.
//! - [`renderer`] and [`layout`]: view composition and line wrapping.
//! - [`theme`]: color and style policy.
//! - [`picker`]: the language selector's cursor state.
//!
//! This layer presents and captures interaction state; [`crate::core`] owns
//! the workflow and backend coordination.

pub mod chat_loop;
pub mod layout;
pub mod picker;
pub mod renderer;
pub mod theme;
