//! CDS Core
//!
//! Shared types for talking to the CDS action API.
//!
//! This crate contains:
//! - Domain types: the records the API hands out (Action, usages, audits)
//! - DTOs: request/response helpers used by the client and the CLI

pub mod domain;
pub mod dto;
