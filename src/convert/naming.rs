//! Attachment naming.
//!
//! Every extracted part gets a filename: its provisional name with invalid
//! characters stripped, or `Nameless` / `Nameless1` / `Nameless2` / … when it
//! has none. The nameless counter is an explicit value threaded through the
//! conversion rather than hidden state.

/// Base name for parts without a usable name.
pub const NAMELESS: &str = "Nameless";

/// Number of nameless attachments named so far in one conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NamelessCounter(u32);

impl NamelessCounter {
    /// Name for the next nameless attachment, and the advanced counter.
    ///
    /// The first is plain `Nameless`, then `Nameless1`, `Nameless2`, …
    pub fn next_name(self) -> (String, Self) {
        let name = if self.0 == 0 {
            NAMELESS.to_string()
        } else {
            format!("{NAMELESS}{}", self.0)
        };
        (name, Self(self.0 + 1))
    }

    pub fn count(self) -> u32 {
        self.0
    }
}

/// Assign the final filename for an extracted part.
///
/// The forced extension (e.g. `.eml`) is appended after naming, so a nested
/// message without a subject becomes `Nameless.eml`.
pub fn assign_filename(
    provisional: Option<&str>,
    forced_extension: Option<&str>,
    counter: NamelessCounter,
) -> (String, NamelessCounter) {
    let cleaned = provisional
        .filter(|name| !name.trim().is_empty())
        .map(remove_invalid_filename_chars)
        .filter(|name| !name.is_empty());

    let (mut name, counter) = match cleaned {
        Some(name) => (name, counter),
        None => counter.next_name(),
    };

    if let Some(ext) = forced_extension {
        name.push_str(ext);
    }
    (name, counter)
}

/// Remove characters that are not allowed in file names on common filesystems.
///
/// Unlike a display-oriented sanitizer, characters are dropped rather than
/// replaced, and everything else (spaces included) is kept.
pub fn remove_invalid_filename_chars(name: &str) -> String {
    name.chars()
        .filter(|&c| (c as u32) >= 0x20)
        .filter(|c| !matches!(c, '"' | '<' | '>' | '|' | ':' | '*' | '?' | '\\' | '/'))
        .collect()
}
