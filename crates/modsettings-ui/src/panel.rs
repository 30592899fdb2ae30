//! Settings panel handle.
//!
//! Opaque open/close surface the host wires into its menu system. The
//! host owns menu placement and window management; this handle only
//! builds, exposes, and drops the view.

use std::sync::Arc;

use modsettings_service::SettingsService;

use crate::dialog::SettingsViewBuilder;
use crate::view_model::SettingsView;

/// Open/close handle over the settings view.
#[derive(Debug)]
pub struct SettingsPanel {
    service: Arc<SettingsService>,
    builder: SettingsViewBuilder,
    view: Option<SettingsView>,
}

impl SettingsPanel {
    /// Create a closed panel bound to a service
    pub fn new(service: Arc<SettingsService>) -> Self {
        Self {
            service,
            builder: SettingsViewBuilder::new(),
            view: None,
        }
    }

    /// Use a custom view builder (placeholder message etc.)
    pub fn with_builder(mut self, builder: SettingsViewBuilder) -> Self {
        self.builder = builder;
        self
    }

    /// Build a fresh view and open the panel.
    ///
    /// Reopening rebuilds from the current registry; options registered
    /// while the panel was open appear on the next open.
    pub fn open(&mut self) -> &SettingsView {
        let view = self.builder.build(&self.service);
        &*self.view.insert(view)
    }

    /// Close the panel, dropping the view.
    ///
    /// Nothing is discarded: every control committed on interaction.
    pub fn close(&mut self) {
        self.view = None;
    }

    /// Whether the panel is open
    pub fn is_open(&self) -> bool {
        self.view.is_some()
    }

    /// The open view, if any
    pub fn view(&self) -> Option<&SettingsView> {
        self.view.as_ref()
    }

    /// Mutable access to the open view, for dispatching interactions
    pub fn view_mut(&mut self) -> Option<&mut SettingsView> {
        self.view.as_mut()
    }
}
