//! Vocabulary quiz core (question bank, round state machine) plus the
//! ranking table and configuration used by the Telegram front end.

pub mod config;
pub mod quiz;
pub mod ranking;
