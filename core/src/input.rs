use std::collections::HashMap;
use anyhow::{anyhow, Result};

pub const LOG_KEYS: &[&str] = &["date", "note"];

#[derive(Debug, PartialEq)]
pub struct ParsedInput {
    /// Bare words, in order.
    pub words: Vec<String>,
    pub metadata: HashMap<String, String>,
}

/// Splits `8h date:yesterday note:standup` into bare words and `key:value`
/// pairs. Keys are expanded against `known_keys`; unknown keys are returned
/// as errors alongside the parse.
pub fn parse_args(args: &[String], known_keys: &[&str]) -> (ParsedInput, Vec<anyhow::Error>) {
    let mut words = Vec::new();
    let mut metadata = HashMap::new();
    let mut errors = Vec::new();

    for arg in args {
        if let Some((key, value)) = arg.split_once(':') {
            // Timestamps like 2025-05-01T08:00 stay bare words.
            if !key.is_empty() && key.chars().all(|c| c.is_ascii_alphabetic()) {
                match expand_key(key, known_keys) {
                    Ok(full_key) => {
                        metadata.insert(full_key, value.to_string());
                    }
                    Err(e) => errors.push(e),
                }
                continue;
            }
        }
        words.push(arg.clone());
    }

    (ParsedInput { words, metadata }, errors)
}

pub fn expand_key(key: &str, candidates: &[&str]) -> Result<String> {
    // 1. Exact match
    if candidates.contains(&key) {
        return Ok(key.to_string());
    }

    // 2. Prefix match
    let matches: Vec<&str> = candidates
        .iter()
        .filter(|&&c| c.starts_with(key))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(matches[0].to_string()),
        0 => Err(anyhow!("Unknown key: '{}'", key)),
        _ => Err(anyhow!("Ambiguous key: '{}' matches {:?}", key, matches)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_log_line() {
        let (parsed, errors) = parse_args(&args(&["7.5h", "d:yesterday", "note:onboarding"]), LOG_KEYS);
        assert!(errors.is_empty());
        assert_eq!(parsed.words, vec!["7.5h".to_string()]);
        assert_eq!(parsed.metadata.get("date"), Some(&"yesterday".to_string()));
        assert_eq!(parsed.metadata.get("note"), Some(&"onboarding".to_string()));
    }

    #[test]
    fn test_unknown_key_reported() {
        let (parsed, errors) = parse_args(&args(&["8", "project:x"]), LOG_KEYS);
        assert_eq!(parsed.words, vec!["8".to_string()]);
        assert!(parsed.metadata.is_empty());
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_timestamp_is_not_metadata() {
        let (parsed, errors) = parse_args(&args(&["2025-05-01T08:00:00"]), LOG_KEYS);
        assert!(errors.is_empty());
        assert_eq!(parsed.words.len(), 1);
    }

    #[test]
    fn test_expand_key() {
        let candidates = vec!["name", "note", "date"];

        assert_eq!(expand_key("d", &candidates).unwrap(), "date");
        assert_eq!(expand_key("no", &candidates).unwrap(), "note");
        assert_eq!(expand_key("name", &candidates).unwrap(), "name");

        // Ambiguous
        assert!(expand_key("n", &candidates).is_err());

        // Unknown
        assert!(expand_key("x", &candidates).is_err());
    }
}
