//! Path segmentation.
//!
//! Splits a dotted/bracketed path like `a.b[2]["odd key"]` into classified
//! segments, left to right. Three flavors: plain object key, bracket-quoted
//! key, all-digit array index. Empty parts (from `[]` or `..`) are skipped.
//!
//! Also `get_path`, a value getter that walks a concrete `Value` by the same
//! segmentation.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

// Parts are anything between `.`, `[`, `]`. Quotes survive into the match,
// which is how bracket-quoted keys are recognized.
static SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^.\[\]]+").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Matched text, quotes included for quoted segments.
    pub raw: String,
    /// Bracket-quoted key: `["key"]` or `['key']`.
    pub is_quoted: bool,
    /// All-digit array index.
    pub is_index: bool,
}

impl Segment {
    /// The key text with surrounding quotes stripped.
    pub fn name(&self) -> &str {
        if self.is_quoted {
            &self.raw[1..self.raw.len() - 1]
        } else {
            &self.raw
        }
    }

    /// Diagnostic form: `.key` for plain keys, `[3]` for indices,
    /// `["key"]` for quoted keys.
    pub fn render(&self) -> String {
        if self.is_quoted || self.is_index {
            format!("[{}]", self.raw)
        } else {
            format!(".{}", self.raw)
        }
    }
}

/// Lazy left-to-right segmentation of `path`.
pub fn segments(path: &str) -> impl Iterator<Item = Segment> + '_ {
    SPLIT.find_iter(path).map(|m| classify(m.as_str()))
}

fn classify(raw: &str) -> Segment {
    let is_quoted = raw.len() >= 2 && {
        let first = raw.as_bytes()[0];
        (first == b'"' || first == b'\'') && raw.as_bytes()[raw.len() - 1] == first
    };
    let is_index = !is_quoted && raw.bytes().all(|b| b.is_ascii_digit());
    Segment { raw: raw.to_string(), is_quoted, is_index }
}

/// Walk a concrete value by path, returning `None` as soon as a step is
/// missing or the value shape does not admit the segment.
pub fn get_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut cur = root;
    for seg in segments(path) {
        cur = match cur {
            Value::Array(items) => items.get(seg.name().parse::<usize>().ok()?)?,
            Value::Object(map) => map.get(seg.name())?,
            _ => return None,
        };
    }
    Some(cur)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parts(path: &str) -> Vec<Segment> {
        segments(path).collect()
    }

    #[test]
    fn splits_and_classifies_mixed_paths() {
        let segs = parts("a.b[1][0]");
        assert_eq!(segs.len(), 4);
        assert_eq!(segs[0].name(), "a");
        assert!(!segs[0].is_index && !segs[0].is_quoted);
        assert_eq!(segs[2].name(), "1");
        assert!(segs[2].is_index);
        assert!(segs[3].is_index);
    }

    #[test]
    fn quoted_keys_keep_their_text_and_lose_their_quotes() {
        let segs = parts(r#"a["odd key"]['other']"#);
        assert_eq!(segs.len(), 3);
        assert!(segs[1].is_quoted);
        assert_eq!(segs[1].name(), "odd key");
        assert!(segs[2].is_quoted);
        assert_eq!(segs[2].name(), "other");
        // quoted digits are keys, not indices
        let segs = parts(r#"a["1"]"#);
        assert!(segs[1].is_quoted);
        assert!(!segs[1].is_index);
    }

    #[test]
    fn empty_parts_are_skipped() {
        assert_eq!(parts("a..b").len(), 2);
        assert_eq!(parts("a[].b").len(), 2);
        assert_eq!(parts("").len(), 0);
    }

    #[test]
    fn render_shows_bracket_or_dot_form() {
        let segs = parts(r#"a[3]["k"]"#);
        assert_eq!(segs[0].render(), ".a");
        assert_eq!(segs[1].render(), "[3]");
        assert_eq!(segs[2].render(), r#"["k"]"#);
    }

    #[test]
    fn get_path_walks_objects_and_arrays() {
        let v = json!({"a": {"b": [10, {"c": true}]}});
        assert_eq!(get_path(&v, "a.b[0]"), Some(&json!(10)));
        assert_eq!(get_path(&v, "a.b[1].c"), Some(&json!(true)));
        assert_eq!(get_path(&v, "a.missing"), None);
        assert_eq!(get_path(&v, "a.b[9]"), None);
        assert_eq!(get_path(&v, "a.b[0].c"), None);
        assert_eq!(get_path(&v, ""), Some(&v));
    }
}
