//! Event classification

use serde::{Deserialize, Serialize};

/// Closed set of event categories the handler distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    Created,
    Removed,
    Other,
}

/// Substring markers checked in order. Backends append subtypes such as
/// `:Put` or `:DeleteMarkerCreated`, so matching is not exact.
const VOCABULARY: &[(&str, EventCategory)] = &[
    ("ObjectCreated", EventCategory::Created),
    ("ObjectRemoved", EventCategory::Removed),
];

impl EventCategory {
    /// Classify a raw event name. Case-sensitive; never fails.
    pub fn classify(event_name: &str) -> Self {
        VOCABULARY
            .iter()
            .find(|(marker, _)| event_name.contains(marker))
            .map(|(_, category)| *category)
            .unwrap_or(EventCategory::Other)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Created => "created",
            EventCategory::Removed => "removed",
            EventCategory::Other => "other",
        }
    }
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_created() {
        assert_eq!(EventCategory::classify("ObjectCreated:Put"), EventCategory::Created);
        assert_eq!(
            EventCategory::classify("aws:s3:ObjectCreated:Put"),
            EventCategory::Created
        );
        assert_eq!(
            EventCategory::classify("s3:ObjectCreated:CompleteMultipartUpload"),
            EventCategory::Created
        );
    }

    #[test]
    fn test_classify_removed() {
        assert_eq!(
            EventCategory::classify("ObjectRemoved:Delete"),
            EventCategory::Removed
        );
        assert_eq!(
            EventCategory::classify("s3:ObjectRemoved:DeleteMarkerCreated"),
            EventCategory::Removed
        );
    }

    #[test]
    fn test_classify_other() {
        assert_eq!(
            EventCategory::classify("ObjectRestore:Post"),
            EventCategory::Other
        );
        assert_eq!(EventCategory::classify(""), EventCategory::Other);
        assert_eq!(EventCategory::classify("s3:TestEvent"), EventCategory::Other);
    }

    #[test]
    fn test_classify_is_case_sensitive() {
        assert_eq!(
            EventCategory::classify("objectcreated:put"),
            EventCategory::Other
        );
        assert_eq!(
            EventCategory::classify("OBJECTREMOVED:DELETE"),
            EventCategory::Other
        );
    }

    #[test]
    fn test_created_marker_wins() {
        // Both markers present: the first vocabulary entry decides.
        assert_eq!(
            EventCategory::classify("ObjectRemoved/ObjectCreated"),
            EventCategory::Created
        );
    }
}
