//! HTML escaping and unsafe-content detection.
//!
//! Every user-supplied string that reaches rendered output goes through
//! [`escape_html`]; section prop trees go through [`sanitize_value`] before
//! any builder sees them.

use serde_json::{Map, Value};

/// Literal markers that must never appear in renderable section content.
const UNSAFE_MARKERS: &[&str] = &["<script", "<iframe", "<object", "<embed", "javascript:"];

/// Escape `& < > " '` for safe embedding in HTML text and attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            other => out.push(other),
        }
    }
    out
}

/// Recursively escape every string in a props tree. Keys are template-
/// declared and left untouched; only values carry user content.
pub fn sanitize_value(value: &Value) -> Value {
    match value {
        Value::String(s) => Value::String(escape_html(s)),
        Value::Array(items) => Value::Array(items.iter().map(sanitize_value).collect()),
        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            for (k, v) in map {
                out.insert(k.clone(), sanitize_value(v));
            }
            Value::Object(out)
        }
        scalar => scalar.clone(),
    }
}

/// Scan serialized section content for unsafe patterns: the literal markers
/// plus inline event handlers (`on<word>=`, optional whitespace before the
/// equals sign). Matching is case-insensitive. Returns the matched pattern.
pub fn find_unsafe(serialized: &str) -> Option<String> {
    let lower = serialized.to_lowercase();
    for marker in UNSAFE_MARKERS {
        if lower.contains(marker) {
            return Some((*marker).to_string());
        }
    }
    find_event_handler(&lower)
}

/// Detect `on\w+\s*=` in an already-lowercased string.
fn find_event_handler(lower: &str) -> Option<String> {
    let bytes = lower.as_bytes();
    let mut i = 0;
    while i + 2 < bytes.len() {
        if bytes[i] == b'o' && bytes[i + 1] == b'n' {
            let mut j = i + 2;
            let word_start = j;
            while j < bytes.len()
                && (bytes[j].is_ascii_alphanumeric() || bytes[j] == b'_')
            {
                j += 1;
            }
            if j > word_start {
                let mut k = j;
                while k < bytes.len() && (bytes[k] as char).is_ascii_whitespace() {
                    k += 1;
                }
                if k < bytes.len() && bytes[k] == b'=' {
                    return Some(format!("{}=", &lower[i..j]));
                }
            }
        }
        i += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn escapes_all_five_characters() {
        assert_eq!(
            escape_html("<script>alert('xss')</script> & \"q\""),
            "&lt;script&gt;alert(&#x27;xss&#x27;)&lt;/script&gt; &amp; &quot;q&quot;"
        );
    }

    #[test]
    fn sanitize_walks_nested_structures() {
        let v = json!({
            "title": "<b>hi</b>",
            "items": [{"text": "a<br>b"}, {"n": 3}],
        });
        let s = sanitize_value(&v);
        assert_eq!(s["title"], "&lt;b&gt;hi&lt;/b&gt;");
        assert_eq!(s["items"][0]["text"], "a&lt;br&gt;b");
        assert_eq!(s["items"][1]["n"], 3);
    }

    #[test]
    fn escaped_markup_carries_no_unsafe_marker() {
        let s = sanitize_value(&json!({"t": "<script>alert(1)</script>"}));
        assert_eq!(find_unsafe(&serde_json::to_string(&s).unwrap()), None);
    }

    #[test]
    fn raw_markers_are_detected_case_insensitively() {
        assert!(find_unsafe("x <SCRIPT>y").is_some());
        assert!(find_unsafe("<IFrame src=x>").is_some());
        assert!(find_unsafe("a JAVASCRIPT:alert(1)").is_some());
        assert!(find_unsafe("<object data=x>").is_some());
        assert!(find_unsafe("<embed src=x>").is_some());
    }

    #[test]
    fn event_handlers_are_detected() {
        assert_eq!(find_unsafe("a onclick=go()"), Some("onclick=".to_string()));
        assert_eq!(find_unsafe("a onLoad  = x"), Some("onload=".to_string()));
        assert_eq!(find_unsafe("on ly"), None);
        assert_eq!(find_unsafe("conversion rate"), None);
    }

    #[test]
    fn clean_content_passes() {
        assert_eq!(find_unsafe(r#"{"heading":"Кодовая — IT"}"#), None);
    }
}
