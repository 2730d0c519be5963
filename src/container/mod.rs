//! Message container: on-disk persistence of the assembled model.

pub mod format;
pub mod reader;
pub mod writer;

pub use writer::{ContainerWriter, MsgmWriter};
