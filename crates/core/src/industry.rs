//! The industry taxonomy: a closed set of codes, their display labels, and
//! the template each one maps to.
//!
//! The taxonomy ships with the binary and changes only with a deploy.

/// One entry of the industry table.
#[derive(Debug, Clone, Copy)]
pub struct IndustryDef {
    pub code: &'static str,
    pub label: &'static str,
    pub template_id: &'static str,
}

/// The catch-all industry for any unrecognized code.
pub const FALLBACK_CODE: &str = "other";

/// The closed industry set. Order is presentation order.
pub const INDUSTRIES: &[IndustryDef] = &[
    IndustryDef { code: "tech", label: "IT и технологии", template_id: "tech" },
    IndustryDef { code: "finance", label: "Финансы и инвестиции", template_id: "default" },
    IndustryDef { code: "healthcare", label: "Медицина и здоровье", template_id: "default" },
    IndustryDef { code: "retail", label: "Розничная торговля", template_id: "retail" },
    IndustryDef { code: "education", label: "Образование", template_id: "default" },
    IndustryDef { code: "real-estate", label: "Недвижимость", template_id: "default" },
    IndustryDef { code: "consulting", label: "Консалтинг", template_id: "default" },
    IndustryDef { code: "restaurant", label: "Рестораны и кафе", template_id: "restaurant" },
    IndustryDef { code: "other", label: "Другое", template_id: "default" },
];

/// Whether `code` is a member of the closed set.
pub fn is_known(code: &str) -> bool {
    INDUSTRIES.iter().any(|d| d.code == code)
}

/// Look up an industry definition. Unknown codes resolve to the
/// [`FALLBACK_CODE`] entry.
pub fn lookup(code: &str) -> &'static IndustryDef {
    INDUSTRIES
        .iter()
        .find(|d| d.code == code)
        .unwrap_or_else(|| {
            INDUSTRIES
                .iter()
                .find(|d| d.code == FALLBACK_CODE)
                .expect("taxonomy must contain the fallback industry")
        })
}

/// Template id for an industry code (unknown codes use the fallback's).
pub fn template_for(code: &str) -> &'static str {
    lookup(code).template_id
}
