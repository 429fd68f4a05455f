/// Environment variable names used by this crate for convenient
/// configuration of the sink from services.
///
/// These are purely helpers; the core sink types remain decoupled from
/// environment access.

/// Elasticsearch host name or address, e.g. `localhost`.
pub const ES_SINK_HOST_ENV: &str = "ES_SINK_HOST";

/// Elasticsearch HTTP port, e.g. `9200`.
pub const ES_SINK_PORT_ENV: &str = "ES_SINK_PORT";

/// Static index name used while time-rolling naming is off.
pub const ES_SINK_INDEX_NAME_ENV: &str = "ES_SINK_INDEX_NAME";

/// Document type label stamped into every bulk meta line.
pub const ES_SINK_TYPE_NAME_ENV: &str = "ES_SINK_TYPE_NAME";

/// Set to `true` or `1` to derive index names from each record's time.
pub const ES_SINK_LOGSTASH_FORMAT_ENV: &str = "ES_SINK_LOGSTASH_FORMAT";

/// Index name prefix used in time-rolling mode.
pub const ES_SINK_LOGSTASH_PREFIX_ENV: &str = "ES_SINK_LOGSTASH_PREFIX";

/// Comma-separated ordered field list for deterministic document ids.
pub const ES_SINK_ID_KEYS_ENV: &str = "ES_SINK_ID_KEYS";

/// Read an environment variable or fall back to a provided default.
pub fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
