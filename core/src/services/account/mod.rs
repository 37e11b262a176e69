//! Account state machine driven by one-shot action tokens

mod action;


pub use action::{ActionTokenService, ValidatedAction};
