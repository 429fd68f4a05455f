use crate::config::ElasticsearchConfig;
use chrono::{DateTime, Utc};

/// Resolve the target index name for a record.
///
/// In time-rolling mode the name is `prefix-date`, with the date derived
/// from the record's own time rather than the wall clock at send time: a
/// chunk may span a day boundary, and each record resolves independently.
/// Otherwise the configured static index name is returned unchanged.
pub fn resolve_index(config: &ElasticsearchConfig, when: DateTime<Utc>) -> String {
    if config.logstash_format {
        format!(
            "{}-{}",
            config.logstash_prefix,
            when.format(&config.logstash_dateformat)
        )
    } else {
        config.index_name.clone()
    }
}
