//! Handlers for the anonymous `/drafts` resource.
//!
//! Validation happens here, at the boundary; the core only ever sees
//! normalized values. Asset lookups run before any store write so a
//! compare-and-set retry never repeats I/O.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use sitesmith_core::brand::{AssetInfo, BrandProfile, IndustryInfo};
use sitesmith_core::draft::{Draft, SOURCE_WEB};
use sitesmith_core::error::CoreError;

use crate::error::{AppError, AppResult};
use crate::patch::Patch;
use crate::state::AppState;

/// Hard ceiling on a caller-supplied TTL (7 days).
const MAX_DRAFT_TTL_SECS: i64 = 7 * 24 * 3600;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryInput {
    pub code: String,
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoInput {
    pub asset_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDraftRequest {
    pub brand_name: String,
    pub industry: IndustryInput,
    #[serde(default)]
    pub logo: Option<LogoInput>,
    /// Overrides the configured default lifetime.
    #[serde(default)]
    pub ttl_seconds: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateDraftRequest {
    pub brand_name: Option<String>,
    pub industry: Option<IndustryInput>,
    /// `null` clears the logo; an absent field leaves it untouched.
    pub logo: Patch<LogoInput>,
}

/// Fetch a draft and apply the semantic expiry check on top of the store's
/// TTL. A record the store still holds but whose `expiresAt` has elapsed
/// (clock skew) is reported as expired and removed.
pub(crate) async fn load_live_draft(
    state: &AppState,
    draft_id: &str,
    slide: bool,
) -> AppResult<Draft> {
    let draft = state
        .drafts
        .find_by_id(draft_id, slide)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::DraftNotFound(draft_id.to_string())))?;

    if draft.is_expired(Utc::now()) {
        if let Err(e) = state.drafts.delete(draft_id).await {
            tracing::warn!(draft_id, error = %e, "Failed to remove elapsed draft");
        }
        return Err(AppError::Core(CoreError::DraftExpired(draft_id.to_string())));
    }
    Ok(draft)
}

async fn resolve_logo(state: &AppState, input: &LogoInput) -> AppResult<AssetInfo> {
    state
        .assets
        .find(&input.asset_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::AssetNotFound(input.asset_id.clone())))
}

fn validated_ttl(state: &AppState, requested: Option<i64>) -> AppResult<i64> {
    match requested {
        None => Ok(state.config.draft_ttl_secs),
        Some(ttl) if ttl > 0 && ttl <= MAX_DRAFT_TTL_SECS => Ok(ttl),
        Some(ttl) => Err(AppError::Core(CoreError::InvalidInput(format!(
            "ttlSeconds must be in 1..={MAX_DRAFT_TTL_SECS}, got {ttl}"
        )))),
    }
}

/// Hash of a request header value, for provenance metadata. Raw addresses
/// and agent strings are never stored.
fn header_hash(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| sitesmith_core::canonical::sha256_hex(v.as_bytes()))
}

/// POST /api/v1/drafts
pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<CreateDraftRequest>,
) -> AppResult<(StatusCode, Json<Draft>)> {
    let ttl_seconds = validated_ttl(&state, input.ttl_seconds)?;

    let logo = match &input.logo {
        Some(logo_input) => Some(resolve_logo(&state, logo_input).await?),
        None => None,
    };

    let industry = IndustryInfo::resolve(&input.industry.code, input.industry.label.clone());
    let profile = BrandProfile::new(&input.brand_name, industry, logo)?;
    let mut draft = Draft::new(profile, ttl_seconds, SOURCE_WEB, Utc::now())?;
    draft.meta.ip_hash = header_hash(&headers, "x-forwarded-for");
    draft.meta.user_agent_hash = header_hash(&headers, "user-agent");

    state.drafts.save(&draft).await?;
    tracing::info!(draft_id = %draft.draft_id, industry = %draft.brand_profile.industry.code, "Draft created");

    Ok((StatusCode::CREATED, Json(draft)))
}

/// GET /api/v1/drafts/{draft_id} -- never slides the TTL.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(draft_id): Path<String>,
) -> AppResult<Json<Draft>> {
    let draft = load_live_draft(&state, &draft_id, false).await?;
    Ok(Json(draft))
}

/// PATCH /api/v1/drafts/{draft_id} -- partial update, slides the TTL.
pub async fn update(
    State(state): State<AppState>,
    Path(draft_id): Path<String>,
    Json(input): Json<UpdateDraftRequest>,
) -> AppResult<Json<Draft>> {
    // Validate and resolve everything before the CAS loop.
    let brand_name = input
        .brand_name
        .as_deref()
        .map(sitesmith_core::brand::normalize_brand_name)
        .transpose()?;

    let industry = input
        .industry
        .as_ref()
        .map(|i| IndustryInfo::resolve(&i.code, i.label.clone()));

    let logo: Patch<AssetInfo> = match &input.logo {
        Patch::Unset => Patch::Unset,
        Patch::Clear => Patch::Clear,
        Patch::Set(logo_input) => Patch::Set(resolve_logo(&state, logo_input).await?),
    };

    // Surface semantic expiry before the write path touches the record.
    load_live_draft(&state, &draft_id, false).await?;

    let now = Utc::now();
    let updated = state
        .drafts
        .update_with_lock(
            &draft_id,
            Box::new(move |draft: &mut Draft| {
                let mut profile = draft.brand_profile.clone();
                if let Some(name) = &brand_name {
                    profile.brand_name = name.clone();
                }
                if let Some(industry) = &industry {
                    profile.industry = industry.clone();
                }
                match &logo {
                    Patch::Unset => {}
                    Patch::Clear => profile.logo = None,
                    Patch::Set(asset) => profile.logo = Some(asset.clone()),
                }
                draft.set_brand_profile(profile);
                draft.touch(now);
            }),
        )
        .await?;

    Ok(Json(updated))
}
