//! Thai vocabulary set management
//!
//! Word sets live as JSON files in a data directory ([`store`]). New sets
//! can be generated by a language model ([`generator`], [`pipeline`]) and
//! are filtered against every term already stored. Sets are edited by hand
//! through [`editor`].

pub mod ai_provider;
pub mod auth;
pub mod cli;
pub mod config;
pub mod editor;
pub mod error;
pub mod generator;
pub mod pipeline;
pub mod store;

pub use error::{Result, VocabError};
pub use thai_vocab_common as common;
