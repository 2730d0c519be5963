//! Sender and representing (on-behalf-of) identities.

use crate::error::{ConvertError, Result};
use crate::model::address::{EmailAddress, Identity};

/// The sending mailbox: the first `From:` entry, or the empty identity.
pub fn resolve_sender(from: &[EmailAddress]) -> Identity {
    from.first().map(Identity::from).unwrap_or_default()
}

/// The identity the message is sent on behalf of.
///
/// `Resent-Sender` wins when present. Otherwise this falls back to the first
/// `From:` entry, which must exist.
pub fn resolve_representing(
    from: &[EmailAddress],
    resent_sender: Option<&EmailAddress>,
) -> Result<Identity> {
    match resent_sender {
        Some(resent) => Ok(Identity::from(resent)),
        None => from
            .first()
            .map(Identity::from)
            .ok_or(ConvertError::MissingSender),
    }
}
