//! Data Transfer Objects
//!
//! Small types describing how actions travel over the wire (export formats,
//! import outcomes) rather than what an action is.

pub mod action;
