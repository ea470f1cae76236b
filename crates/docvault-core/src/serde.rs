use serde::{Deserialize, Deserializer};

/// Deserializes an optional query string value, trimming whitespace and
/// treating blank values as absent.
pub fn deserialize_optional_trimmed<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

/// Deserializes a string with surrounding whitespace removed, so that a
/// blank value reaches validation as empty.
pub fn deserialize_trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(s.trim().to_string())
}

/// Like [`deserialize_trimmed`] for optional fields. A blank value stays
/// `Some("")` rather than becoming absent.
pub fn deserialize_trimmed_option<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.map(|s| s.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Search {
        #[serde(default, deserialize_with = "super::deserialize_optional_trimmed")]
        query: Option<String>,
    }

    #[test]
    fn test_blank_query_is_none() {
        let s: Search = serde_json::from_str(r#"{"query":"   "}"#).unwrap();
        assert!(s.query.is_none());
    }

    #[test]
    fn test_missing_query_is_none() {
        let s: Search = serde_json::from_str("{}").unwrap();
        assert!(s.query.is_none());
    }

    #[test]
    fn test_query_is_trimmed() {
        let s: Search = serde_json::from_str(r#"{"query":" ada "}"#).unwrap();
        assert_eq!(s.query.as_deref(), Some("ada"));
    }

    #[derive(Deserialize)]
    struct Body {
        #[serde(default, deserialize_with = "super::deserialize_trimmed")]
        title: String,
        #[serde(default, deserialize_with = "super::deserialize_trimmed_option")]
        note: Option<String>,
    }

    #[test]
    fn test_trimmed_keeps_blank_as_empty() {
        let b: Body = serde_json::from_str(r#"{"title":"   ","note":"\t "}"#).unwrap();
        assert_eq!(b.title, "");
        assert_eq!(b.note.as_deref(), Some(""));
    }

    #[test]
    fn test_trimmed_missing_fields() {
        let b: Body = serde_json::from_str("{}").unwrap();
        assert_eq!(b.title, "");
        assert!(b.note.is_none());

        let b: Body = serde_json::from_str(r#"{"title":" Notes ","note":null}"#).unwrap();
        assert_eq!(b.title, "Notes");
        assert!(b.note.is_none());
    }
}
