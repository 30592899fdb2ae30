//! # ModSettings UI
//!
//! Schema-driven construction of the settings view: one section per mod,
//! one self-committing control per option. The tree built here is the
//! UI-facing contract; the host toolkit renders it and owns menu
//! placement and window management.

pub mod controls;
pub mod dialog;
pub mod panel;
pub mod view_model;

pub use controls::{build_control, Control, CycleControl, StepModifier, StepperControl, ToggleControl};
pub use dialog::SettingsViewBuilder;
pub use panel::SettingsPanel;
pub use view_model::{SectionView, SettingsView};
