use crate::env;

/// Connection and formatting options for the Elasticsearch bulk sink.
///
/// Constructed once at startup and read-only afterwards; the sink never
/// mutates it. Defaults match the conventional plugin settings: a local
/// cluster, static `fluentd` index, no ids, no decoration.
#[derive(Debug, Clone)]
pub struct ElasticsearchConfig {
    /// Target host name or address.
    pub host: String,
    /// Target HTTP port.
    pub port: u16,
    /// Derive each record's index name from its own time instead of using
    /// `index_name`.
    pub logstash_format: bool,
    /// Index name prefix in time-rolling mode.
    pub logstash_prefix: String,
    /// strftime pattern appended to the prefix in time-rolling mode.
    pub logstash_dateformat: String,
    /// Document type label stamped into every meta line.
    pub type_name: String,
    /// Static index name while time-rolling mode is off.
    pub index_name: String,
    /// Ordered field names joined into a deterministic document id. Empty
    /// disables explicit ids and the engine assigns its own.
    pub id_keys: Vec<String>,
    /// Inject each record's own time into its document.
    pub add_timestamp: bool,
    /// Field name for the injected timestamp.
    pub timestamp_key: String,
    /// Inject the originating tag into each document.
    pub include_tag_key: bool,
    /// Field name for the injected tag.
    pub tag_key: String,
}

impl Default for ElasticsearchConfig {
    fn default() -> Self {
        ElasticsearchConfig {
            host: "localhost".to_string(),
            port: 9200,
            logstash_format: false,
            logstash_prefix: "logstash".to_string(),
            logstash_dateformat: "%Y.%m.%d".to_string(),
            type_name: "fluentd".to_string(),
            index_name: "fluentd".to_string(),
            id_keys: Vec::new(),
            add_timestamp: false,
            timestamp_key: "@timestamp".to_string(),
            include_tag_key: false,
            tag_key: "tag".to_string(),
        }
    }
}

impl ElasticsearchConfig {
    /// Build a config from the `ES_SINK_*` environment variables, falling
    /// back to defaults for anything absent or malformed.
    pub fn from_env() -> Self {
        let defaults = ElasticsearchConfig::default();
        ElasticsearchConfig {
            host: env::env_or(env::ES_SINK_HOST_ENV, &defaults.host),
            port: env::env_or(env::ES_SINK_PORT_ENV, "")
                .parse()
                .unwrap_or(defaults.port),
            logstash_format: is_truthy(&env::env_or(env::ES_SINK_LOGSTASH_FORMAT_ENV, "")),
            logstash_prefix: env::env_or(env::ES_SINK_LOGSTASH_PREFIX_ENV, &defaults.logstash_prefix),
            type_name: env::env_or(env::ES_SINK_TYPE_NAME_ENV, &defaults.type_name),
            index_name: env::env_or(env::ES_SINK_INDEX_NAME_ENV, &defaults.index_name),
            id_keys: parse_id_keys(&env::env_or(env::ES_SINK_ID_KEYS_ENV, "")),
            ..defaults
        }
    }
}

/// Split the comma-separated `id_keys` option into an ordered key list.
///
/// Whitespace around keys is trimmed and empty segments are dropped, so a
/// malformed list degrades to fewer keys rather than failing.
pub fn parse_id_keys(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(str::to_string)
        .collect()
}

fn is_truthy(value: &str) -> bool {
    matches!(value, "1" | "true" | "TRUE" | "True")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_conventional_settings() {
        let config = ElasticsearchConfig::default();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 9200);
        assert!(!config.logstash_format);
        assert_eq!(config.logstash_dateformat, "%Y.%m.%d");
        assert_eq!(config.index_name, "fluentd");
        assert_eq!(config.type_name, "fluentd");
        assert!(config.id_keys.is_empty());
        assert_eq!(config.timestamp_key, "@timestamp");
        assert_eq!(config.tag_key, "tag");
    }

    #[test]
    fn id_keys_split_in_declared_order() {
        assert_eq!(parse_id_keys("request_id,host"), vec!["request_id", "host"]);
    }

    #[test]
    fn id_keys_tolerate_whitespace_and_empty_segments() {
        assert_eq!(parse_id_keys(" a , b ,,"), vec!["a", "b"]);
        assert!(parse_id_keys("").is_empty());
        assert!(parse_id_keys(" , ").is_empty());
    }
}
