//! Source priority / importance → model enums.
//!
//! Unrecognized source values map to `None`; the caller keeps the model
//! default (`Normal`) in that case.

use crate::model::mail::{Importance, Priority};
use crate::model::source::{SourceImportance, SourcePriority};

pub fn map_priority(source: &SourcePriority) -> Option<Priority> {
    match source {
        SourcePriority::NonUrgent => Some(Priority::NonUrgent),
        SourcePriority::Normal => Some(Priority::Normal),
        SourcePriority::Urgent => Some(Priority::Urgent),
        SourcePriority::Unrecognized(_) => None,
    }
}

pub fn map_importance(source: &SourceImportance) -> Option<Importance> {
    match source {
        SourceImportance::Low => Some(Importance::Low),
        SourceImportance::Normal => Some(Importance::Normal),
        SourceImportance::High => Some(Importance::High),
        SourceImportance::Unrecognized(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_table() {
        assert_eq!(map_priority(&SourcePriority::NonUrgent), Some(Priority::NonUrgent));
        assert_eq!(map_priority(&SourcePriority::Normal), Some(Priority::Normal));
        assert_eq!(map_priority(&SourcePriority::Urgent), Some(Priority::Urgent));
    }

    #[test]
    fn test_importance_table() {
        assert_eq!(map_importance(&SourceImportance::Low), Some(Importance::Low));
        assert_eq!(map_importance(&SourceImportance::Normal), Some(Importance::Normal));
        assert_eq!(map_importance(&SourceImportance::High), Some(Importance::High));
    }

    #[test]
    fn test_unrecognized_keeps_default() {
        let p = map_priority(&SourcePriority::Unrecognized("asap".into())).unwrap_or_default();
        let i = map_importance(&SourceImportance::Unrecognized("5".into())).unwrap_or_default();
        assert_eq!(p, Priority::Normal);
        assert_eq!(i, Importance::Normal);
    }
}
