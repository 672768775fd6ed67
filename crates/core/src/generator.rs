//! Deterministic draft → site-configuration generator.
//!
//! Pure except for the registry lookup: given the same draft state,
//! registry, and generator version, the emitted config is canonically
//! byte-identical apart from `generatedAt` (and `configId`, which is
//! content-addressed and therefore stable per draft state).

use serde_json::{Map, Value};

use crate::brand::AssetInfo;
use crate::canonical;
use crate::config::{
    BrandBlock, ConfigGenerator, Page, Routing, Section, Seo, SiteBlock, SiteConfig,
    CONFIG_VERSION,
};
use crate::draft::Draft;
use crate::error::CoreError;
use crate::preview::sanitize;
use crate::slug;
use crate::templates::TemplateRegistry;
use crate::types::{self, Timestamp};

/// Generator engine name stamped into drafts and configs.
pub const ENGINE: &str = "sitesmith";

/// Generator engine version. Bumping it changes every content hash.
pub const ENGINE_VERSION: &str = "1.0.0";

/// Locale stamped on new drafts.
pub const DEFAULT_LOCALE: &str = "ru";

/// Values substituted for the closed token vocabulary.
struct TokenContext {
    brand_name: String,
    industry_label: String,
    logo_url: String,
    logo_asset_id: Option<String>,
    slug: String,
}

impl TokenContext {
    fn from_draft(draft: &Draft) -> Self {
        let profile = &draft.brand_profile;
        Self {
            brand_name: profile.brand_name.clone(),
            industry_label: profile.industry.label.clone(),
            logo_url: profile
                .logo
                .as_ref()
                .map(|l| l.url.clone())
                .unwrap_or_default(),
            logo_asset_id: profile.logo.as_ref().map(|l| l.asset_id.clone()),
            slug: slug::slugify(&profile.brand_name),
        }
    }

    fn resolve_str(&self, input: &str) -> String {
        input
            .replace("{{brandName}}", &self.brand_name)
            .replace("{{industryLabel}}", &self.industry_label)
            .replace("{{logoUrl}}", &self.logo_url)
            // Embedded occurrences get the string form of the id-or-null
            // value; the entire-string case is handled in `resolve_value`.
            .replace(
                "{{logoAssetId}}",
                self.logo_asset_id.as_deref().unwrap_or("null"),
            )
            .replace("{{slug}}", &self.slug)
    }

    /// Walk a props tree, substituting every token occurrence. A string
    /// field that consists of exactly `{{logoAssetId}}` becomes the raw id
    /// value (or JSON `null` with no logo) instead of a string.
    fn resolve_value(&self, value: &Value) -> Value {
        match value {
            Value::String(s) if s == "{{logoAssetId}}" => match &self.logo_asset_id {
                Some(id) => Value::String(id.clone()),
                None => Value::Null,
            },
            Value::String(s) => Value::String(self.resolve_str(s)),
            Value::Array(items) => {
                Value::Array(items.iter().map(|v| self.resolve_value(v)).collect())
            }
            Value::Object(map) => {
                let mut out = Map::with_capacity(map.len());
                for (k, v) in map {
                    out.insert(k.clone(), self.resolve_value(v));
                }
                Value::Object(out)
            }
            scalar => scalar.clone(),
        }
    }
}

/// Generate the publish-ready configuration for a draft.
///
/// `now` becomes `generatedAt` and is excluded from the content hash.
pub fn generate(
    draft: &Draft,
    registry: &TemplateRegistry,
    now: Timestamp,
) -> Result<SiteConfig, CoreError> {
    let profile = &draft.brand_profile;
    if profile.brand_name.trim().is_empty() {
        return Err(CoreError::InvalidInput(
            "Draft has an empty brand name".to_string(),
        ));
    }

    let (template_id, _) = registry.lookup_by_industry(&profile.industry.code);
    let template = registry.load(template_id);

    // Template trees ship with the binary, but an unsafe section must never
    // make it into a persisted config regardless of where it came from.
    for page in &template.pages {
        for section in &page.sections {
            let serialized = serde_json::to_string(&section.props)
                .map_err(|e| CoreError::Internal(format!("template serialization: {e}")))?;
            if let Some(pattern) = sanitize::find_unsafe(&serialized) {
                return Err(CoreError::PreviewUnsafe(format!(
                    "template section '{}' contains '{pattern}'",
                    section.id
                )));
            }
        }
    }

    let ctx = TokenContext::from_draft(draft);

    let pages: Vec<Page> = template
        .pages
        .iter()
        .map(|page| Page {
            id: page.id.clone(),
            path: page.path.clone(),
            title: ctx.resolve_str(&page.title),
            sections: page
                .sections
                .iter()
                .map(|section| Section {
                    id: section.id.clone(),
                    section_type: section.section_type,
                    props: ctx.resolve_value(&section.props),
                })
                .collect(),
        })
        .collect();

    let logo: Option<AssetInfo> = profile.logo.clone();
    let title = format!("{} — {}", ctx.brand_name, template.title_suffix);
    let description = ctx.resolve_str(&template.description);

    let mut config = SiteConfig {
        schema_version: types::SCHEMA_VERSION,
        config_version: CONFIG_VERSION.to_string(),
        config_id: String::new(),
        draft_id: draft.draft_id.clone(),
        generated_at: types::truncate_to_millis(now),
        generator: ConfigGenerator {
            engine: ENGINE.to_string(),
            engine_version: ENGINE_VERSION.to_string(),
            template_id: template.template_id.clone(),
            template_version: template.template_version,
        },
        brand: BrandBlock {
            name: ctx.brand_name.clone(),
            industry: profile.industry.clone(),
            slug: ctx.slug.clone(),
            logo: logo.clone(),
        },
        site: SiteBlock {
            language: template.language.clone(),
            title: title.clone(),
            description: description.clone(),
            routing: Routing {
                base_path: "/".to_string(),
                trailing_slash: false,
            },
            seo: Seo {
                meta_title: title,
                meta_description: description,
                og_image_asset_id: ctx.logo_asset_id.clone(),
            },
        },
        theme: template.theme.clone(),
        pages,
        assets: logo.into_iter().collect(),
        publishing: template.publishing.clone(),
    };

    // Content-addressed id: stable across regenerations of the same draft
    // state, distinct across different drafts and different content.
    let hash = canonical::config_hash(&config)?;
    config.config_id = format!(
        "cfg_{}",
        &canonical::sha256_hex(format!("{}:{hash}", draft.draft_id).as_bytes())[..32]
    );
    Ok(config)
}
