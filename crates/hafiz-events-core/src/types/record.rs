//! Notification record types
//!
//! AWS-compatible S3 event record format, as delivered inside the
//! `Records` array of a notification message. Only the fields the
//! handler consumes are modelled; anything else is ignored on decode.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One storage change event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRecord {
    /// Raw event name, e.g. `ObjectCreated:Put`
    pub event_name: String,
    /// Event time, kept exactly as received
    pub event_time: String,
    /// Event source (`aws:s3` or a compatible backend)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_source: Option<String>,
    /// Region the event originated in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws_region: Option<String>,
    /// S3 info
    pub s3: S3Entity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3Entity {
    pub bucket: S3BucketEntity,
    pub object: S3ObjectEntity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3BucketEntity {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arn: Option<String>,
}

/// Object reference as received; `key` is still escaped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3ObjectEntity {
    pub key: String,
    /// Absent for removal events
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub e_tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequencer: Option<String>,
}

impl NotificationRecord {
    /// Extract a typed record from its raw JSON form
    pub fn from_value(value: &Value) -> crate::Result<Self> {
        Self::deserialize(value).map_err(|e| crate::Error::UnexpectedField(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_from_aws_shape() {
        let value = json!({
            "eventVersion": "2.1",
            "eventSource": "aws:s3",
            "awsRegion": "us-east-1",
            "eventTime": "2024-05-01T12:30:00.000Z",
            "eventName": "ObjectCreated:Put",
            "userIdentity": { "principalId": "EXAMPLE" },
            "s3": {
                "s3SchemaVersion": "1.0",
                "bucket": { "name": "b1", "arn": "arn:aws:s3:::b1" },
                "object": {
                    "key": "a+b.txt",
                    "size": 42,
                    "eTag": "0123456789abcdef",
                    "sequencer": "0A1B2C3D4E5F678901"
                }
            }
        });

        let record = NotificationRecord::from_value(&value).unwrap();
        assert_eq!(record.event_name, "ObjectCreated:Put");
        assert_eq!(record.event_source.as_deref(), Some("aws:s3"));
        assert_eq!(record.s3.bucket.arn.as_deref(), Some("arn:aws:s3:::b1"));
        assert_eq!(record.s3.object.key, "a+b.txt");
        assert_eq!(record.s3.object.size, Some(42));
        assert_eq!(record.s3.object.e_tag.as_deref(), Some("0123456789abcdef"));
        assert!(record.s3.object.version_id.is_none());
        assert_eq!(record.event_time, "2024-05-01T12:30:00.000Z");
    }

    #[test]
    fn test_event_time_is_opaque() {
        for event_time in [
            "2024-05-01T12:30:00.123456Z",
            "2024-05-01T12:30:00+02:00",
            "2024-05-01 12:30:00",
        ] {
            let value = json!({
                "eventTime": event_time,
                "eventName": "ObjectCreated:Put",
                "s3": { "bucket": { "name": "b1" }, "object": { "key": "k" } }
            });

            let record = NotificationRecord::from_value(&value).unwrap();
            assert_eq!(record.event_time, event_time);
        }
    }

    #[test]
    fn test_removal_without_size() {
        let value = json!({
            "eventTime": "2024-05-01T12:30:00Z",
            "eventName": "ObjectRemoved:Delete",
            "s3": {
                "bucket": { "name": "b1" },
                "object": { "key": "gone.txt", "sequencer": "0055AED6DCD90281E5" }
            }
        });

        let record = NotificationRecord::from_value(&value).unwrap();
        assert!(record.s3.object.size.is_none());
        assert!(record.s3.object.e_tag.is_none());
        assert!(record.aws_region.is_none());
        assert!(record.event_source.is_none());
    }

    #[test]
    fn test_missing_field_is_unexpected_field() {
        let value = json!({
            "eventTime": "2024-05-01T12:30:00Z",
            "eventName": "ObjectCreated:Put",
            "s3": { "bucket": { "name": "b1" } }
        });

        let err = NotificationRecord::from_value(&value).unwrap_err();
        assert_eq!(err.code(), "UnexpectedFieldError");
        assert!(err.to_string().contains("object"));
    }

    #[test]
    fn test_negative_size_is_rejected() {
        let value = json!({
            "eventTime": "2024-05-01T12:30:00Z",
            "eventName": "ObjectCreated:Put",
            "s3": {
                "bucket": { "name": "b1" },
                "object": { "key": "k", "size": -1 }
            }
        });

        assert!(NotificationRecord::from_value(&value).is_err());
    }
}
