//! Binary message container format (`.msgm`).
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ HEADER (128 bytes, fixed)            │
//! │  magic: [u8; 8] = b"EMLMSG\0\0"     │
//! │  version: u32                        │
//! │  flags: u32                          │
//! │  recipient_count: u32                │
//! │  attachment_count: u32               │
//! │  payload_len: u64                    │
//! │  sha256_payload: [u8; 32]            │
//! │  (padding to 128 bytes)              │
//! ├──────────────────────────────────────┤
//! │ PAYLOAD (variable)                   │
//! │  bincode-serialized MessageModel     │
//! └──────────────────────────────────────┘
//! ```

/// Magic bytes identifying a message container.
pub const MAGIC: &[u8; 8] = b"EMLMSG\0\0";

/// Current container format version.
pub const VERSION: u32 = 1;

/// Fixed header size in bytes.
pub const HEADER_SIZE: usize = 128;

/// Default file extension (without the dot).
pub const EXTENSION: &str = "msgm";

/// Serializable container header.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ContainerHeader {
    /// Magic bytes (must equal [`MAGIC`]).
    pub magic: [u8; 8],
    /// Format version (must equal [`VERSION`]).
    pub version: u32,
    /// Reserved flags (currently unused).
    pub flags: u32,
    pub recipient_count: u32,
    pub attachment_count: u32,
    /// Length of the payload following the header.
    pub payload_len: u64,
    /// SHA-256 of the payload.
    pub sha256_payload: [u8; 32],
}

impl ContainerHeader {
    /// Validate that the header is well-formed and matches the current format.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.magic != *MAGIC {
            return Err("Invalid magic bytes".into());
        }
        if self.version != VERSION {
            return Err(format!(
                "Incompatible version: expected {VERSION}, found {}",
                self.version
            ));
        }
        Ok(())
    }
}
