//! `emlmsg`: convert MIME (`.eml`) messages into a structured message model.
//!
//! This crate provides the loader that flattens a MIME document, the
//! conversion engine that classifies its parts and resolves identities,
//! recipients and bodies, and a binary container writer for the result.

pub mod config;
pub mod container;
pub mod convert;
pub mod error;
pub mod export;
pub mod model;
pub mod parser;

pub use convert::{
    convert_bytes, convert_eml_to_model, convert_eml_to_msg, convert_msg_to_eml, convert_source,
};
pub use error::{ConvertError, Result};
