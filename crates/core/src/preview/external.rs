//! Optional external rendering backend.
//!
//! The capability is opaque: anything implementing [`ExternalRenderer`] may
//! produce the HTML body. Its output is validated against a strict tag,
//! attribute, and URL-protocol whitelist; any failure falls through to the
//! built-in renderer. A successful external render is not observable from
//! the outside (same ETag, same contract).

use crate::config::SiteConfig;
use crate::draft::PreviewMode;
use crate::error::CoreError;
use crate::preview::renderer::{self, Preview, PreviewBody};

/// An out-of-process or dynamically provided HTML renderer.
pub trait ExternalRenderer: Send + Sync {
    /// Whether the backend is currently usable. Checked per render.
    fn is_available(&self) -> bool;

    /// Produce a full HTML document for the config. The output is
    /// post-sanitized by the caller; implementations need not escape.
    fn render_html(&self, config: &SiteConfig) -> Result<String, String>;
}

/// Render a preview, preferring the external backend when present, HTML is
/// requested, and its output passes post-sanitization.
pub fn render_with_fallback(
    config: &SiteConfig,
    mode: PreviewMode,
    external: Option<&dyn ExternalRenderer>,
) -> Result<Preview, CoreError> {
    let builtin = renderer::render(config, mode)?;

    if mode != PreviewMode::Html {
        return Ok(builtin);
    }
    let Some(backend) = external.filter(|b| b.is_available()) else {
        return Ok(builtin);
    };

    match backend.render_html(config) {
        Ok(html) if validate_html(&html).is_ok() => Ok(Preview {
            // Same ETag and timestamp; only the body differs.
            body: PreviewBody::Html(html),
            ..builtin
        }),
        _ => Ok(builtin),
    }
}

const ALLOWED_TAGS: &[&str] = &[
    "html", "head", "meta", "title", "style", "body", "div", "section", "header",
    "footer", "main", "nav", "h1", "h2", "h3", "h4", "h5", "h6", "p", "ul", "ol",
    "li", "a", "img", "span", "blockquote", "strong", "em", "br",
];

const ALLOWED_ATTRS: &[&str] = &[
    "class", "id", "href", "src", "alt", "lang", "charset", "name", "content",
    "loading", "height", "width",
];

/// Validate external HTML against the whitelist. Rejection (rather than
/// rewriting) keeps the sanitizer total: a rejected document falls back to
/// the built-in renderer, which is always safe.
fn validate_html(html: &str) -> Result<(), String> {
    let lower = html.to_lowercase();
    let bytes = lower.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'<' {
            i += 1;
            continue;
        }
        let rest = &lower[i..];
        if rest.starts_with("<!doctype") {
            i += rest.find('>').ok_or("unterminated doctype")? + 1;
            continue;
        }
        if rest.starts_with("<!--") {
            return Err("comments are not allowed".to_string());
        }

        let end = rest.find('>').ok_or("unterminated tag")?;
        let inner = rest[1..end].trim_start_matches('/');
        let mut parts = inner.split_whitespace();
        let tag = parts.next().unwrap_or("").trim_end_matches('/');

        if !ALLOWED_TAGS.contains(&tag) {
            return Err(format!("tag '{tag}' is not allowed"));
        }
        for attr in parts {
            let name = attr.split('=').next().unwrap_or("").trim_end_matches('/');
            if name.is_empty() {
                continue;
            }
            if !ALLOWED_ATTRS.contains(&name) {
                return Err(format!("attribute '{name}' is not allowed"));
            }
            if let Some(value) = attr.split_once('=').map(|(_, v)| v.trim_matches('"')) {
                if (name == "href" || name == "src") && !safe_url(value) {
                    return Err(format!("unsafe url in '{name}'"));
                }
            }
        }
        i += end + 1;
    }
    Ok(())
}

/// http(s), relative, anchor, or empty URLs only.
fn safe_url(url: &str) -> bool {
    url.is_empty()
        || url.starts_with("http://")
        || url.starts_with("https://")
        || url.starts_with('/')
        || url.starts_with('#')
}
