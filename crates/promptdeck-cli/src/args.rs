//! Custom value parsers for CLI arguments.

/// Parse a key=value pair. The value may itself contain `=`.
pub fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("Invalid key=value pair: {s}"))?;

    if key.trim().is_empty() {
        return Err(format!("Missing key in: {s}"));
    }

    Ok((key.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_value() {
        assert_eq!(
            parse_key_value("subject=a red fox").unwrap(),
            ("subject".to_string(), "a red fox".to_string())
        );
        assert_eq!(
            parse_key_value("eq=a=b").unwrap(),
            ("eq".to_string(), "a=b".to_string())
        );
        assert_eq!(parse_key_value("empty=").unwrap().1, "");
    }

    #[test]
    fn test_parse_key_value_errors() {
        assert!(parse_key_value("novalue").is_err());
        assert!(parse_key_value("=x").is_err());
    }
}
