use serde_yaml::Value;

/// Render a `when` clause as block-style YAML for display in a single cell.
///
/// Nested maps and sequences each land on their own indented line. Output is
/// trimmed and deterministic: map keys keep their source order.
pub fn serialize_when(when: Option<&Value>) -> String {
    let when = match when {
        None | Some(Value::Null) => return String::new(),
        Some(value) => value,
    };

    match serde_yaml::to_string(when) {
        Ok(text) => text.trim().to_string(),
        Err(e) => {
            tracing::warn!("Could not serialize when clause: {e}");
            String::new()
        }
    }
}
