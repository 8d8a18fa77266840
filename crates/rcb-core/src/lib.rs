//! Core of the remote-control bot.
//!
//! This crate is framework-agnostic. The Telegram transport lives behind the
//! messaging port (see `messaging::port`) implemented in `rcb-telegram`.

pub mod config;
pub mod delivery;
pub mod domain;
pub mod errors;
pub mod formatting;
pub mod logging;
pub mod messaging;
pub mod replies;
pub mod router;
pub mod scheduler;
pub mod security;

pub use errors::{Error, Result};
