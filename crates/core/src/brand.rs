//! Brand-facing value objects: industry classification, logo metadata, and
//! the validated brand profile.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::industry;
use crate::types::{self, Timestamp};

/// Maximum brand name length in Unicode code points, after normalization.
pub const MAX_BRAND_NAME_CHARS: usize = 100;

/// Industry classification attached to a brand.
///
/// `code` is always a member of the closed taxonomy; construction maps
/// anything unrecognized to `other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryInfo {
    pub code: String,
    pub label: String,
}

impl IndustryInfo {
    /// Resolve a raw code (and optional caller-supplied label) against the
    /// taxonomy. Unknown codes become the fallback industry; a missing
    /// label is derived from the taxonomy entry.
    pub fn resolve(code: &str, label: Option<String>) -> Self {
        let def = industry::lookup(code);
        Self {
            code: def.code.to_string(),
            label: label
                .filter(|l| !l.trim().is_empty())
                .unwrap_or_else(|| def.label.to_string()),
        }
    }
}

/// Metadata for a previously uploaded logo, as reported by the blob
/// metadata adapter. The service never reads the blob itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetInfo {
    pub asset_id: String,
    pub url: String,
    pub mime_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    pub bytes: u64,
    pub sha256: String,
    #[serde(with = "types::iso_millis")]
    pub uploaded_at: Timestamp,
}

/// A validated brand profile: the user-supplied portion of a draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandProfile {
    pub schema_version: i32,
    pub brand_name: String,
    pub industry: IndustryInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<AssetInfo>,
}

impl BrandProfile {
    /// Build a profile from raw input, normalizing the brand name and
    /// resolving the industry against the taxonomy.
    pub fn new(
        raw_brand_name: &str,
        industry: IndustryInfo,
        logo: Option<AssetInfo>,
    ) -> Result<Self, CoreError> {
        Ok(Self {
            schema_version: types::SCHEMA_VERSION,
            brand_name: normalize_brand_name(raw_brand_name)?,
            industry,
            logo,
        })
    }
}

/// Normalize a brand name: strip `U+0000..U+001F` and `U+007F`, collapse
/// whitespace runs to single spaces, trim. Empty results and results over
/// 100 code points are rejected.
pub fn normalize_brand_name(raw: &str) -> Result<String, CoreError> {
    let mut out = String::with_capacity(raw.len());
    let mut pending_space = false;

    for c in raw.chars() {
        if matches!(c, '\u{0000}'..='\u{001F}' | '\u{007F}') {
            continue;
        }
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        out.push(c);
    }

    if out.is_empty() {
        return Err(CoreError::InvalidInput(
            "Brand name must not be empty".to_string(),
        ));
    }
    if out.chars().count() > MAX_BRAND_NAME_CHARS {
        return Err(CoreError::InvalidInput(format!(
            "Brand name exceeds {MAX_BRAND_NAME_CHARS} characters"
        )));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_chars_and_whitespace_runs() {
        assert_eq!(
            normalize_brand_name("  Acme\u{0}  \t\tCo  ").unwrap(),
            "Acme Co"
        );
    }

    #[test]
    fn interior_control_chars_do_not_split_words() {
        assert_eq!(normalize_brand_name("A\u{1}B").unwrap(), "AB");
    }

    #[test]
    fn empty_is_rejected() {
        assert!(matches!(
            normalize_brand_name("   \t "),
            Err(CoreError::InvalidInput(_))
        ));
    }

    #[test]
    fn length_boundaries() {
        let exactly = "a".repeat(100);
        assert_eq!(normalize_brand_name(&exactly).unwrap().chars().count(), 100);

        let over = "a".repeat(101);
        assert!(matches!(
            normalize_brand_name(&over),
            Err(CoreError::InvalidInput(_))
        ));
    }

    #[test]
    fn non_ascii_counts_code_points() {
        let cyrillic = "я".repeat(100);
        assert!(normalize_brand_name(&cyrillic).is_ok());
    }

    #[test]
    fn unknown_industry_resolves_to_other() {
        let info = IndustryInfo::resolve("unknown", None);
        assert_eq!(info.code, "other");
        assert_eq!(info.label, "Другое");
    }

    #[test]
    fn caller_label_wins_over_taxonomy() {
        let info = IndustryInfo::resolve("tech", Some("Custom".to_string()));
        assert_eq!(info.code, "tech");
        assert_eq!(info.label, "Custom");
    }

    #[test]
    fn profile_normalizes_on_construction() {
        let profile = BrandProfile::new(
            " Tech\u{0} Corp ",
            IndustryInfo::resolve("tech", None),
            None,
        )
        .unwrap();
        assert_eq!(profile.brand_name, "Tech Corp");
        assert_eq!(profile.schema_version, 1);
    }
}
