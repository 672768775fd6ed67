//! The template registry: versioned, industry-specific sets of theme
//! defaults and tokenized page/section trees.
//!
//! Templates are part of the service artifact. The registry is built once
//! at startup from the compiled-in definitions and shared immutably.

mod builtin;

use std::collections::HashMap;

use crate::config::{Page, Publishing, Theme};
use crate::industry;

/// Id of the template every unmapped industry falls back to.
pub const DEFAULT_TEMPLATE_ID: &str = "default";

/// A registered template: everything the generator needs to turn a brand
/// profile into a full site configuration.
#[derive(Debug, Clone)]
pub struct TemplateDefinition {
    pub template_id: String,
    pub template_version: i32,
    /// Appended to the brand name to form the site title.
    pub title_suffix: String,
    /// Tokenized site description.
    pub description: String,
    pub language: String,
    pub theme: Theme,
    /// Tokenized pages, in declared order.
    pub pages: Vec<Page>,
    pub publishing: Publishing,
}

/// Immutable lookup table from template id to definition.
#[derive(Debug)]
pub struct TemplateRegistry {
    templates: HashMap<String, TemplateDefinition>,
}

impl TemplateRegistry {
    /// The compiled-in registry shipped with the binary.
    pub fn builtin() -> Self {
        Self::from_definitions(builtin::all())
    }

    /// Build a registry from explicit definitions. The set must contain the
    /// default template, which every unknown lookup falls back to.
    pub fn from_definitions(definitions: Vec<TemplateDefinition>) -> Self {
        let mut templates = HashMap::new();
        for def in definitions {
            templates.insert(def.template_id.clone(), def);
        }
        debug_assert!(templates.contains_key(DEFAULT_TEMPLATE_ID));
        Self { templates }
    }

    /// Map an industry code to its template id and version. Unknown codes
    /// use the fallback industry's mapping.
    pub fn lookup_by_industry(&self, code: &str) -> (&str, i32) {
        let def = self.load(industry::template_for(code));
        (&def.template_id, def.template_version)
    }

    /// Load a template by id. Unknown ids resolve to the default template;
    /// callers that can log should check [`TemplateRegistry::get`] first
    /// when they want the diagnostic.
    pub fn load(&self, template_id: &str) -> &TemplateDefinition {
        self.templates.get(template_id).unwrap_or_else(|| {
            self.templates
                .get(DEFAULT_TEMPLATE_ID)
                .expect("builtin registry must contain the default template")
        })
    }

    /// Exact lookup without the default fallback.
    pub fn get(&self, template_id: &str) -> Option<&TemplateDefinition> {
        self.templates.get(template_id)
    }

    /// All registered template ids.
    pub fn template_ids(&self) -> Vec<&str> {
        self.templates.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SectionType;

    #[test]
    fn builtin_registry_contains_expected_templates() {
        let registry = TemplateRegistry::builtin();
        for id in ["default", "tech", "restaurant", "retail"] {
            assert!(registry.get(id).is_some(), "missing template {id}");
        }
    }

    #[test]
    fn unknown_template_loads_default() {
        let registry = TemplateRegistry::builtin();
        assert_eq!(registry.load("no-such-template").template_id, "default");
    }

    #[test]
    fn industry_lookup_resolves_through_taxonomy() {
        let registry = TemplateRegistry::builtin();
        let (id, version) = registry.lookup_by_industry("tech");
        assert_eq!(id, "tech");
        assert!(version >= 1);

        let (id, _) = registry.lookup_by_industry("does-not-exist");
        assert_eq!(id, "default");
    }

    #[test]
    fn every_template_respects_its_own_constraints() {
        let registry = TemplateRegistry::builtin();
        for id in registry.template_ids() {
            let def = registry.load(id);
            let c = &def.publishing.constraints;
            assert!(def.pages.len() <= c.max_pages as usize, "{id}: too many pages");
            for page in &def.pages {
                assert!(
                    page.sections.len() <= c.max_sections_per_page as usize,
                    "{id}/{}: too many sections",
                    page.id
                );
            }
        }
    }

    #[test]
    fn every_template_section_type_is_renderable() {
        let registry = TemplateRegistry::builtin();
        for id in registry.template_ids() {
            for page in &registry.load(id).pages {
                for section in &page.sections {
                    assert_ne!(section.section_type, SectionType::Unknown, "{id}/{}", section.id);
                }
            }
        }
    }

    #[test]
    fn entry_page_exists_in_every_template() {
        let registry = TemplateRegistry::builtin();
        for id in registry.template_ids() {
            let def = registry.load(id);
            let entry = &def.publishing.output.entry_page_id;
            assert!(def.pages.iter().any(|p| &p.id == entry), "{id}: missing entry page");
        }
    }
}
