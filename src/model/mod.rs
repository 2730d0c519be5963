//! Core data model: the loaded source document and the assembled message model.

pub mod address;
pub mod attachment;
pub mod mail;
pub mod source;
