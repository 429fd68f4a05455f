use crate::config::ElasticsearchConfig;
use crate::record::Record;
use chrono::{DateTime, Utc};
use serde_json::Value;

/// A single optional mutation applied to a record before serialization.
///
/// Decorators are independent and order-insensitive: each one writes its
/// own field, overwriting any pre-existing field of the same name.
pub trait RecordDecorator: Send + Sync {
    /// Apply the mutation. `when` is the record's own time resolved to UTC.
    fn decorate(&self, record: &mut Record, when: DateTime<Utc>);
}

/// Stamps the record's own time into its document as an RFC 3339 string.
///
/// The value is derived from the record's time field, never from the wall
/// clock, so redelivered chunks carry the same timestamps.
pub struct TimestampDecorator {
    pub key: String,
}

impl RecordDecorator for TimestampDecorator {
    fn decorate(&self, record: &mut Record, when: DateTime<Utc>) {
        record
            .fields
            .insert(self.key.clone(), Value::String(when.to_rfc3339()));
    }
}

/// Copies the record's originating tag into its document.
pub struct TagDecorator {
    pub key: String,
}

impl RecordDecorator for TagDecorator {
    fn decorate(&self, record: &mut Record, _when: DateTime<Utc>) {
        let tag = record.tag.clone();
        record.fields.insert(self.key.clone(), Value::String(tag));
    }
}

/// Assemble the decorators selected by the configuration flags.
pub fn decorators_for(config: &ElasticsearchConfig) -> Vec<Box<dyn RecordDecorator>> {
    let mut decorators: Vec<Box<dyn RecordDecorator>> = Vec::new();
    if config.add_timestamp {
        decorators.push(Box::new(TimestampDecorator {
            key: config.timestamp_key.clone(),
        }));
    }
    if config.include_tag_key {
        decorators.push(Box::new(TagDecorator {
            key: config.tag_key.clone(),
        }));
    }
    decorators
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn utc(epoch: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(epoch, 0).expect("valid epoch")
    }

    #[test]
    fn timestamp_decorator_writes_record_time_in_utc() {
        let decorator = TimestampDecorator {
            key: "@timestamp".to_string(),
        };
        let mut record = Record::new("app", 1_699_948_800, BTreeMap::new());

        let ts = utc(record.time);
        decorator.decorate(&mut record, ts);

        assert_eq!(
            record.fields.get("@timestamp"),
            Some(&Value::String("2023-11-14T08:00:00+00:00".to_string()))
        );
    }

    #[test]
    fn timestamp_decorator_overwrites_existing_field() {
        let decorator = TimestampDecorator {
            key: "@timestamp".to_string(),
        };
        let mut fields = BTreeMap::new();
        fields.insert("@timestamp".to_string(), Value::String("stale".into()));
        let mut record = Record::new("app", 0, fields);

        decorator.decorate(&mut record, utc(0));

        assert_eq!(
            record.fields.get("@timestamp"),
            Some(&Value::String("1970-01-01T00:00:00+00:00".to_string()))
        );
    }

    #[test]
    fn tag_decorator_copies_tag_into_document() {
        let decorator = TagDecorator {
            key: "tag".to_string(),
        };
        let mut record = Record::new("app.access", 0, BTreeMap::new());

        decorator.decorate(&mut record, utc(0));

        assert_eq!(
            record.fields.get("tag"),
            Some(&Value::String("app.access".to_string()))
        );
    }

    #[test]
    fn decorators_follow_config_flags() {
        assert!(decorators_for(&ElasticsearchConfig::default()).is_empty());

        let config = ElasticsearchConfig {
            add_timestamp: true,
            include_tag_key: true,
            ..ElasticsearchConfig::default()
        };
        assert_eq!(decorators_for(&config).len(), 2);
    }
}
