use serde_json::Value;

/// Number of name characters kept at the front of a SKU.
pub const SKU_NAME_CHARS: usize = 10;

/// Build a SKU such as `HOMEJERSEY-1` from a product name and its source id.
///
/// The name part keeps the first ten alphanumeric characters of the uppercased
/// name; the source id follows a dash so catalog entries stay traceable.
pub fn generate_sku(product_name: &str, source_id: &Value) -> String {
    let name_part: String = product_name
        .to_uppercase()
        .chars()
        .filter(|c| c.is_alphanumeric())
        .take(SKU_NAME_CHARS)
        .collect();
    format!("{}-{}", name_part, source_id_string(source_id))
}

/// Render a source id as plain text: strings unquoted, everything else as JSON.
pub fn source_id_string(source_id: &Value) -> String {
    match source_id {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
