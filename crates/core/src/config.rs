//! The publish-ready site configuration derived from a draft.
//!
//! A `SiteConfig` is a pure function of `(draft, template registry,
//! generator version)`; see [`crate::generator`]. Everything here is data.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::brand::{AssetInfo, IndustryInfo};
use crate::types::{self, Timestamp};

/// Config schema version emitted by generator v1.
pub const CONFIG_VERSION: &str = "1.0.0";

/// The closed set of renderable section types.
///
/// Anything deserialized outside this set lands on `Unknown` and is dropped
/// by the preview renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    Hero,
    Features,
    About,
    Contact,
    Services,
    Gallery,
    Testimonials,
    Pricing,
    Faq,
    Team,
    Footer,
    #[serde(other)]
    Unknown,
}

impl SectionType {
    pub fn is_renderable(self) -> bool {
        !matches!(self, SectionType::Unknown)
    }
}

/// One section of a page: a whitelisted type plus its (tokenized or
/// resolved) props tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    #[serde(rename = "type")]
    pub section_type: SectionType,
    pub props: Value,
}

/// One page of the generated site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    pub path: String,
    pub title: String,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigGenerator {
    pub engine: String,
    pub engine_version: String,
    pub template_id: String,
    pub template_version: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandBlock {
    pub name: String,
    pub industry: IndustryInfo,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<AssetInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Routing {
    pub base_path: String,
    pub trailing_slash: bool,
}

/// SEO defaults. `og_image_asset_id` is intentionally serialized even when
/// absent: consumers distinguish "no image" (`null`) from a missing key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seo {
    pub meta_title: String,
    pub meta_description: String,
    pub og_image_asset_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteBlock {
    pub language: String,
    pub title: String,
    pub description: String,
    pub routing: Routing,
    pub seo: Seo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub primary: String,
    pub accent: String,
    pub background: String,
    pub surface: String,
    pub text: String,
    pub muted_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    pub font_family: String,
    pub scale: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub theme_id: String,
    pub palette: Palette,
    pub typography: Typography,
    pub radius: String,
    pub spacing: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishingOutput {
    pub format: String,
    pub entry_page_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishingConstraints {
    pub max_pages: u32,
    pub max_sections_per_page: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Publishing {
    pub target: String,
    pub output: PublishingOutput,
    pub constraints: PublishingConstraints,
}

/// The publish-ready configuration. Serializing twice yields byte-identical
/// canonical JSON (see [`crate::canonical`]); `configId` and `generatedAt`
/// are the only fields outside the content hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    pub schema_version: i32,
    pub config_version: String,
    pub config_id: String,
    pub draft_id: String,
    #[serde(with = "types::iso_millis")]
    pub generated_at: Timestamp,
    pub generator: ConfigGenerator,
    pub brand: BrandBlock,
    pub site: SiteBlock,
    pub theme: Theme,
    pub pages: Vec<Page>,
    pub assets: Vec<AssetInfo>,
    pub publishing: Publishing,
}
