//! Settings view model.
//!
//! The transient tree handed to the host for rendering. It is a snapshot
//! of the registry at build time; options registered afterward appear
//! only after the view is rebuilt.

use crate::controls::Control;

/// A section of the settings view: one mod and its controls.
#[derive(Debug)]
pub struct SectionView {
    /// The mod this section renders.
    pub mod_id: String,
    /// Section title (the mod's display name).
    pub title: String,
    /// Mod description shown under the title.
    pub description: String,
    /// Controls in render order.
    pub controls: Vec<Control>,
}

/// The built settings view.
#[derive(Debug)]
pub struct SettingsView {
    /// Sections in render order, one per mod.
    pub sections: Vec<SectionView>,
    placeholder: Option<String>,
    token: String,
}

impl SettingsView {
    pub(crate) fn with_sections(sections: Vec<SectionView>, token: String) -> Self {
        Self {
            sections,
            placeholder: None,
            token,
        }
    }

    pub(crate) fn placeholder_view(message: String, token: String) -> Self {
        Self {
            sections: Vec::new(),
            placeholder: Some(message),
            token,
        }
    }

    /// Placeholder message to render instead of sections, when no mod has
    /// registered any options.
    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    /// Whether the view has nothing to render but the placeholder
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Correlation token attached to every commit made from this view.
    ///
    /// Subscribers belonging to the view can compare event tokens against
    /// this to skip changes the view itself triggered.
    pub fn token(&self) -> &str {
        &self.token
    }
}
