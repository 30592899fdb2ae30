//! Settings view builder.
//!
//! Builds the ordered section/control tree from a registry snapshot:
//! sections alphabetical by display name, options within a section sorted
//! by their declared order with name as the tiebreak.

use std::sync::Arc;

use uuid::Uuid;

use modsettings_service::{OptionSpec, SettingsService};

use crate::controls::build_control;
use crate::view_model::{SectionView, SettingsView};

/// Builds a settings view from the current registry snapshot.
#[derive(Debug)]
pub struct SettingsViewBuilder {
    placeholder: String,
}

impl SettingsViewBuilder {
    /// Create a builder with the default placeholder message
    pub fn new() -> Self {
        Self {
            placeholder: "No mod has registered any options.".to_string(),
        }
    }

    /// Set the message rendered when the registry is empty
    pub fn with_placeholder(mut self, message: impl Into<String>) -> Self {
        self.placeholder = message.into();
        self
    }

    /// Build the view.
    ///
    /// The result is a snapshot: options registered after this call render
    /// only in views built later. Each view carries a fresh correlation
    /// token that its controls attach to every commit.
    pub fn build(&self, service: &Arc<SettingsService>) -> SettingsView {
        let token = Uuid::new_v4().to_string();

        let mut mods = service.mods();
        if mods.is_empty() {
            return SettingsView::placeholder_view(self.placeholder.clone(), token);
        }

        mods.sort_by(|a, b| {
            a.display_name()
                .cmp(b.display_name())
                .then_with(|| a.id.cmp(&b.id))
        });

        let mut sections = Vec::with_capacity(mods.len());
        for entry in &mods {
            let mut specs: Vec<&OptionSpec> = entry.options.values().collect();
            // One sort on the composite key. Chaining "sort by name, then
            // sort by order" would lean on sort stability instead.
            specs.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.name.cmp(&b.name)));

            let controls = specs
                .iter()
                .map(|spec| build_control(service, &entry.id, spec, &token))
                .collect();

            sections.push(SectionView {
                mod_id: entry.id.clone(),
                title: entry.display_name().to_string(),
                description: entry.description().to_string(),
                controls,
            });
        }

        tracing::debug!("Built settings view with {} sections", sections.len());
        SettingsView::with_sections(sections, token)
    }
}

impl Default for SettingsViewBuilder {
    fn default() -> Self {
        Self::new()
    }
}
