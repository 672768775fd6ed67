//! The built-in preview renderer.
//!
//! Pure: takes a generated [`SiteConfig`], returns escaped HTML or the
//! sanitized JSON model. Non-whitelisted sections are dropped before either
//! output sees them.

use serde_json::{json, Value};

use crate::canonical;
use crate::config::{Page, Section, SiteConfig};
use crate::draft::PreviewMode;
use crate::error::CoreError;
use crate::preview::sanitize;
use crate::types::Timestamp;

/// A rendered preview, ready for the transport layer.
#[derive(Debug, Clone)]
pub struct Preview {
    pub etag: String,
    pub generated_at: Timestamp,
    pub body: PreviewBody,
}

#[derive(Debug, Clone)]
pub enum PreviewBody {
    Html(String),
    Json(Value),
}

impl Preview {
    pub fn content_type(&self) -> &'static str {
        match self.body {
            PreviewBody::Html(_) => "text/html; charset=utf-8",
            PreviewBody::Json(_) => "application/json",
        }
    }
}

/// Render a preview of `config` in the requested mode.
///
/// Both modes return the same ETag for the same logical config.
pub fn render(config: &SiteConfig, mode: PreviewMode) -> Result<Preview, CoreError> {
    let pages = sanitize_pages(config)?;
    let etag = canonical::config_etag(config)?;

    let body = match mode {
        PreviewMode::Html => PreviewBody::Html(render_html(config, &pages)),
        PreviewMode::Json => PreviewBody::Json(render_model(config, &pages)),
    };

    Ok(Preview {
        etag,
        generated_at: config.generated_at,
        body,
    })
}

/// Drop non-whitelisted sections, escape every string, and reject content
/// that still carries unsafe patterns after escaping.
fn sanitize_pages(config: &SiteConfig) -> Result<Vec<Page>, CoreError> {
    let mut out = Vec::with_capacity(config.pages.len());
    for page in &config.pages {
        let mut sections = Vec::with_capacity(page.sections.len());
        for section in &page.sections {
            if !section.section_type.is_renderable() {
                continue;
            }
            let sanitized = Section {
                id: section.id.clone(),
                section_type: section.section_type,
                props: sanitize::sanitize_value(&section.props),
            };
            let serialized = serde_json::to_string(&sanitized)
                .map_err(|e| CoreError::Internal(format!("section serialization: {e}")))?;
            if let Some(pattern) = sanitize::find_unsafe(&serialized) {
                return Err(CoreError::PreviewUnsafe(format!(
                    "section '{}' contains '{pattern}'",
                    section.id
                )));
            }
            sections.push(sanitized);
        }
        out.push(Page {
            id: page.id.clone(),
            path: page.path.clone(),
            title: sanitize::escape_html(&page.title),
            sections,
        });
    }
    Ok(out)
}

/// The sanitized preview model: brand, theme, and escaped pages.
fn render_model(config: &SiteConfig, pages: &[Page]) -> Value {
    json!({
        "brand": {
            "name": sanitize::escape_html(&config.brand.name),
            "industry": config.brand.industry,
            "slug": config.brand.slug,
            "logo": config.brand.logo,
        },
        "theme": config.theme,
        "pages": pages,
    })
}

/// Fixed border-radius mapping for the theme stylesheet.
fn radius_css(radius: &str) -> &'static str {
    match radius {
        "none" => "0",
        "sm" => "4px",
        "md" => "8px",
        "lg" => "16px",
        "full" => "9999px",
        _ => "8px",
    }
}

fn render_html(config: &SiteConfig, pages: &[Page]) -> String {
    let theme = &config.theme;
    let entry = pages
        .iter()
        .find(|p| p.id == config.publishing.output.entry_page_id)
        .or_else(|| pages.first());

    let mut html = String::with_capacity(8 * 1024);
    html.push_str("<!doctype html>\n<html lang=\"");
    html.push_str(&sanitize::escape_html(&config.site.language));
    html.push_str("\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str("<title>");
    html.push_str(&sanitize::escape_html(&config.site.title));
    html.push_str("</title>\n<meta name=\"description\" content=\"");
    html.push_str(&sanitize::escape_html(&config.site.description));
    html.push_str("\">\n<style>\n");
    html.push_str(&format!(
        ":root{{--color-primary:{};--color-accent:{};--color-background:{};--color-surface:{};--color-text:{};--color-muted:{};--radius:{};--spacing:{}}}\n",
        sanitize::escape_html(&theme.palette.primary),
        sanitize::escape_html(&theme.palette.accent),
        sanitize::escape_html(&theme.palette.background),
        sanitize::escape_html(&theme.palette.surface),
        sanitize::escape_html(&theme.palette.text),
        sanitize::escape_html(&theme.palette.muted_text),
        radius_css(&theme.radius),
        sanitize::escape_html(&theme.spacing),
    ));
    html.push_str(&format!(
        "body{{margin:0;font-family:{};background:var(--color-background);color:var(--color-text)}}\n",
        theme.typography.font_family
    ));
    html.push_str("section{padding:calc(var(--spacing)*2) var(--spacing)}\n");
    html.push_str(".card{background:var(--color-surface);border-radius:var(--radius);padding:var(--spacing)}\n");
    html.push_str(".cta{display:inline-block;background:var(--color-primary);color:var(--color-background);border-radius:var(--radius);padding:calc(var(--spacing)/2) var(--spacing);text-decoration:none}\n");
    html.push_str(".muted{color:var(--color-muted)}\n");
    html.push_str("</style>\n</head>\n<body>\n");

    if let Some(page) = entry {
        for section in &page.sections {
            render_section(&mut html, section);
        }
    }

    html.push_str("</body>\n</html>\n");
    html
}

/// Pull an (already escaped) string prop, or an empty string.
fn prop<'a>(props: &'a Value, key: &str) -> &'a str {
    props.get(key).and_then(Value::as_str).unwrap_or("")
}

fn prop_items<'a>(props: &'a Value, key: &str) -> &'a [Value] {
    props.get(key).and_then(Value::as_array).map(Vec::as_slice).unwrap_or(&[])
}

/// One fixed builder per whitelisted section type. Props arrive escaped;
/// builders only compose markup around them.
fn render_section(out: &mut String, section: &Section) {
    use crate::config::SectionType::*;

    let props = &section.props;
    match section.section_type {
        Hero => {
            out.push_str("<section class=\"hero\">");
            let logo = prop(props, "logoUrl");
            if !logo.is_empty() {
                out.push_str(&format!("<img src=\"{logo}\" alt=\"\" height=\"64\">"));
            }
            out.push_str(&format!("<h1>{}</h1>", prop(props, "heading")));
            let sub = prop(props, "subheading");
            if !sub.is_empty() {
                out.push_str(&format!("<p class=\"muted\">{sub}</p>"));
            }
            let cta = prop(props, "ctaText");
            if !cta.is_empty() {
                out.push_str(&format!(
                    "<a class=\"cta\" href=\"{}\">{cta}</a>",
                    prop(props, "ctaLink")
                ));
            }
            out.push_str("</section>\n");
        }
        Features | Services => {
            let class = if section.section_type == Features { "features" } else { "services" };
            out.push_str(&format!("<section class=\"{class}\">"));
            out.push_str(&format!("<h2>{}</h2>", prop(props, "title")));
            for item in prop_items(props, "items") {
                out.push_str(&format!(
                    "<div class=\"card\"><h3>{}</h3><p>{}</p></div>",
                    prop(item, "title"),
                    prop(item, "text")
                ));
            }
            out.push_str("</section>\n");
        }
        About => {
            out.push_str("<section class=\"about\">");
            out.push_str(&format!("<h2>{}</h2>", prop(props, "title")));
            out.push_str(&format!("<p>{}</p>", prop(props, "text")));
            out.push_str("</section>\n");
        }
        Contact => {
            out.push_str("<section class=\"contact\">");
            out.push_str(&format!("<h2>{}</h2>", prop(props, "title")));
            for key in ["email", "phone", "address"] {
                let v = prop(props, key);
                if !v.is_empty() {
                    out.push_str(&format!("<p>{v}</p>"));
                }
            }
            out.push_str("</section>\n");
        }
        Gallery => {
            out.push_str("<section class=\"gallery\">");
            out.push_str(&format!("<h2>{}</h2>", prop(props, "title")));
            for image in prop_items(props, "images") {
                if let Some(url) = image.as_str() {
                    if !url.is_empty() {
                        out.push_str(&format!("<img src=\"{url}\" alt=\"\" loading=\"lazy\">"));
                    }
                }
            }
            out.push_str("</section>\n");
        }
        Testimonials => {
            out.push_str("<section class=\"testimonials\">");
            out.push_str(&format!("<h2>{}</h2>", prop(props, "title")));
            for item in prop_items(props, "items") {
                out.push_str(&format!(
                    "<blockquote>{}<footer class=\"muted\">{}</footer></blockquote>",
                    prop(item, "quote"),
                    prop(item, "author")
                ));
            }
            out.push_str("</section>\n");
        }
        Pricing => {
            out.push_str("<section class=\"pricing\">");
            out.push_str(&format!("<h2>{}</h2>", prop(props, "title")));
            for plan in prop_items(props, "plans") {
                out.push_str(&format!(
                    "<div class=\"card\"><h3>{}</h3><p>{}</p><ul>",
                    prop(plan, "name"),
                    prop(plan, "price")
                ));
                for feature in prop_items(plan, "features") {
                    if let Some(f) = feature.as_str() {
                        out.push_str(&format!("<li>{f}</li>"));
                    }
                }
                out.push_str("</ul></div>");
            }
            out.push_str("</section>\n");
        }
        Faq => {
            out.push_str("<section class=\"faq\">");
            out.push_str(&format!("<h2>{}</h2>", prop(props, "title")));
            for item in prop_items(props, "items") {
                out.push_str(&format!(
                    "<div class=\"card\"><h3>{}</h3><p>{}</p></div>",
                    prop(item, "question"),
                    prop(item, "answer")
                ));
            }
            out.push_str("</section>\n");
        }
        Team => {
            out.push_str("<section class=\"team\">");
            out.push_str(&format!("<h2>{}</h2>", prop(props, "title")));
            for member in prop_items(props, "members") {
                out.push_str(&format!(
                    "<div class=\"card\"><h3>{}</h3><p class=\"muted\">{}</p></div>",
                    prop(member, "name"),
                    prop(member, "role")
                ));
            }
            out.push_str("</section>\n");
        }
        Footer => {
            out.push_str(&format!(
                "<footer><section>{}</section></footer>\n",
                prop(props, "text")
            ));
        }
        Unknown => {}
    }
}
