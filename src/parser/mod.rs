//! Email loading: EML files, MIME tree flattening, and header decoding.

pub mod eml;
pub mod header;
pub mod mime;
