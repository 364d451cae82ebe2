//! # stopgate
//!
//! Termination predicates for multi-turn conversational agent loops.
//!
//! A hosting loop calls a terminator strategy after every round with the
//! newest batch of response messages; the strategy accumulates state across
//! rounds and reports when the conversation should stop. Strategies share the
//! [`traits::ResponseTerminator`] capability and can be chained with
//! [`traits::first_terminated`] or built from a TOML file via
//! [`config::TerminatorConfig`].

pub mod config;
pub mod error;
pub mod message;
pub mod round_limit;
pub mod traits;
pub mod word_threshold;
