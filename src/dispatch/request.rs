//! Request payload construction

use serde_json::{Map, Value};

use super::fields::FieldSource;
use super::table::ActionConfig;

/// Build the JSON payload for `config` from the current field values.
///
/// Every configured key is present. An empty optional field becomes its
/// declared default, or `null` when none is declared. An empty required
/// field is forwarded as `""`; the generation service decides whether that
/// is acceptable.
pub fn build(config: &ActionConfig, fields: &dyn FieldSource) -> Map<String, Value> {
    let mut payload = Map::with_capacity(config.field_specs.len());

    for spec in &config.field_specs {
        let text = fields.read(config.input(spec));

        let value = if !text.is_empty() || spec.required {
            Value::String(text)
        } else {
            match spec.default {
                Some(default) => Value::String(default.to_string()),
                None => Value::Null,
            }
        };

        payload.insert(spec.key.to_string(), value);
    }

    tracing::debug!(action = %config.action, ?payload, "built request payload");
    payload
}
