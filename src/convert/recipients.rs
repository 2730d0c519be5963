//! Flatten `To` / `Cc` / `Bcc` into one ordered recipient list.

use crate::model::address::EmailAddress;
use crate::model::mail::{RecipientEntry, RecipientKind};

/// All recipients: the `To` block, then `Cc`, then `Bcc`, each in header order.
pub fn collect_recipients(
    to: &[EmailAddress],
    cc: &[EmailAddress],
    bcc: &[EmailAddress],
) -> Vec<RecipientEntry> {
    let blocks = [
        (to, RecipientKind::To),
        (cc, RecipientKind::Cc),
        (bcc, RecipientKind::Bcc),
    ];

    blocks
        .into_iter()
        .flat_map(|(list, kind)| {
            list.iter().map(move |addr| RecipientEntry {
                address: addr.address.clone(),
                display_name: addr.display_name.clone(),
                kind,
            })
        })
        .collect()
}
