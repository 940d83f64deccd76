pub mod config;
pub mod controller;
pub mod dialogs;
pub mod evaluation;
pub mod message;
pub mod state;
