use serde::Serialize;

const INDENT: &[u8] = b"    ";

/// Serialize a value as JSON indented with four spaces
pub fn to_pretty_vec<T>(value: &T) -> serde_json::Result<Vec<u8>>
where
    T: Serialize + ?Sized,
{
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    Ok(buf)
}

/// Four-space indented JSON for console output; falls back to compact form
pub fn to_pretty_string<T>(value: &T) -> String
where
    T: Serialize + ?Sized,
{
    match to_pretty_vec(value) {
        Ok(buf) => String::from_utf8_lossy(&buf).into_owned(),
        Err(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_four_space_indent() {
        let shown = to_pretty_string(&json!({"serialNumber": "SN1"}));
        assert_eq!(shown, "{\n    \"serialNumber\": \"SN1\"\n}");
    }

    #[test]
    fn test_nested_indent() {
        let shown = to_pretty_string(&json!({"a": {"b": 1}}));
        assert_eq!(shown, "{\n    \"a\": {\n        \"b\": 1\n    }\n}");
    }
}
