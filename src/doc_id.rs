use crate::record::Record;
use serde_json::Value;

/// Generate the deterministic document id for a record.
///
/// Returns `None` when no keys are configured; the meta line then omits
/// `_id` and the engine assigns one. Otherwise each configured key is
/// looked up in declared order and the rendered values are joined with
/// `_`. A missing field substitutes the empty string rather than failing,
/// so a sparsely populated record still yields a stable id.
///
/// Identical field values always produce the identical id, which makes
/// redelivery of an unmodified chunk an overwrite instead of a duplicate.
/// The flip side is intentional: two distinct records that agree on every
/// configured key collapse to one document, and the second write wins.
pub fn generate_id(id_keys: &[String], record: &Record) -> Option<String> {
    if id_keys.is_empty() {
        return None;
    }

    let parts: Vec<String> = id_keys
        .iter()
        .map(|key| record.fields.get(key).map(id_part).unwrap_or_default())
        .collect();
    Some(parts.join("_"))
}

// Strings participate as-is, null as empty, everything else in its
// compact JSON form.
fn id_part(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
