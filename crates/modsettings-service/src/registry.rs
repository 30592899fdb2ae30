//! Option registry.
//!
//! In-memory catalog of mods and the options they declare. The registry
//! holds schema only; user-set values live in the settings store. Mods
//! register during their own initialization and entries live for the
//! process lifetime.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use modsettings_core::{OptionValue, RegistryError};

/// One selectable entry of a choice option.
///
/// Declaration order is significant and preserved exactly; the cyclic
/// control pages through entries in this order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceItem {
    /// The value committed when this entry is selected.
    pub value: OptionValue,
    /// The label shown for this entry.
    pub label: String,
}

impl ChoiceItem {
    /// Create a new choice entry
    pub fn new(value: impl Into<OptionValue>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// The declared type of an option, with its type-specific schema.
///
/// A closed set: the control factory matches exhaustively, so adding a
/// kind is a compile-time-checked extension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OptionKind {
    /// An on/off toggle.
    Boolean {
        /// Default state. Synthesized as `false` when not declared.
        default: bool,
    },
    /// One of an ordered list of values.
    Choice {
        /// The selectable entries, in declaration order.
        choices: Vec<ChoiceItem>,
        /// Declared default value. No default is synthesized for choices.
        default: Option<OptionValue>,
    },
    /// A number, optionally bounded.
    Number {
        /// Default value. Synthesized as `0` when not declared.
        default: f64,
        /// Inclusive lower bound, if any.
        min: Option<f64>,
        /// Inclusive upper bound, if any.
        max: Option<f64>,
        /// Step applied per increment/decrement. Defaults to `1`.
        step: f64,
    },
}

impl OptionKind {
    /// The declared (or synthesized) default value for this kind.
    pub fn default_value(&self) -> Option<OptionValue> {
        match self {
            Self::Boolean { default } => Some(OptionValue::Bool(*default)),
            Self::Number { default, .. } => Some(OptionValue::Number(*default)),
            Self::Choice { default, .. } => default.clone(),
        }
    }
}

/// Declared schema for a single option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionSpec {
    /// Option id, unique within its mod.
    pub id: String,
    /// Display name. Defaults to the id.
    pub name: String,
    /// Description shown alongside the control. Defaults to empty.
    pub description: String,
    /// Sort key within the mod's section; ties break on name.
    pub order: i32,
    /// Declared type and type-specific schema.
    pub kind: OptionKind,
}

impl OptionSpec {
    fn new(id: impl Into<String>, kind: OptionKind) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            description: String::new(),
            order: 1,
            kind,
        }
    }

    /// Create a boolean option. Default state is off.
    pub fn boolean(id: impl Into<String>) -> Self {
        Self::new(id, OptionKind::Boolean { default: false })
    }

    /// Create a choice option over the given entries.
    pub fn choice(id: impl Into<String>, choices: Vec<ChoiceItem>) -> Self {
        Self::new(
            id,
            OptionKind::Choice {
                choices,
                default: None,
            },
        )
    }

    /// Create an unbounded number option with default `0` and step `1`.
    pub fn number(id: impl Into<String>) -> Self {
        Self::new(
            id,
            OptionKind::Number {
                default: 0.0,
                min: None,
                max: None,
                step: 1.0,
            },
        )
    }

    /// Set the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the sort key within the mod's section
    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    /// Set the declared default.
    ///
    /// The value is interpreted per the option kind; a non-boolean default
    /// on a boolean option is ignored.
    pub fn with_default(mut self, value: impl Into<OptionValue>) -> Self {
        let value = value.into();
        match &mut self.kind {
            OptionKind::Boolean { default } => {
                if let Some(b) = value.as_bool() {
                    *default = b;
                }
            }
            OptionKind::Number { default, .. } => *default = value.coerce_number(),
            OptionKind::Choice { default, .. } => *default = Some(value),
        }
        self
    }

    /// Set inclusive bounds on a number option. No-op for other kinds.
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        if let OptionKind::Number {
            min: spec_min,
            max: spec_max,
            ..
        } = &mut self.kind
        {
            *spec_min = Some(min);
            *spec_max = Some(max);
        }
        self
    }

    /// Set the step of a number option. No-op for other kinds.
    pub fn with_step(mut self, step: f64) -> Self {
        if let OptionKind::Number { step: spec_step, .. } = &mut self.kind {
            *spec_step = step;
        }
        self
    }

    /// Validate the declared schema
    pub fn validate(&self) -> Result<(), RegistryError> {
        match &self.kind {
            OptionKind::Boolean { .. } => Ok(()),
            OptionKind::Choice { choices, .. } => {
                if choices.is_empty() {
                    return Err(RegistryError::EmptyChoices {
                        option: self.id.clone(),
                    });
                }
                Ok(())
            }
            OptionKind::Number { min, max, step, .. } => {
                if let (Some(min), Some(max)) = (min, max) {
                    if min > max {
                        return Err(RegistryError::InvalidBounds {
                            option: self.id.clone(),
                            min: *min,
                            max: *max,
                        });
                    }
                }
                if *step <= 0.0 {
                    return Err(RegistryError::InvalidStep {
                        option: self.id.clone(),
                        step: *step,
                    });
                }
                Ok(())
            }
        }
    }
}

/// A registered mod and its declared options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModEntry {
    /// Unique mod id.
    pub id: String,
    display_name: Option<String>,
    description: Option<String>,
    /// Declared options by id. Insertion order is irrelevant; render order
    /// comes from the option sort keys.
    pub options: HashMap<String, OptionSpec>,
}

impl ModEntry {
    fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            display_name: None,
            description: None,
            options: HashMap::new(),
        }
    }

    /// Display name, falling back to the id when none was declared.
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.id)
    }

    /// Description, falling back to empty when none was declared.
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

/// In-memory catalog of mods and their declared options.
#[derive(Debug, Default)]
pub struct OptionRegistry {
    mods: HashMap<String, ModEntry>,
}

impl OptionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a mod, creating its entry if absent.
    ///
    /// Re-registration is a fill-only merge: an explicitly set display
    /// name or description is never overwritten by a later call, so a
    /// second caller passing only defaults cannot clobber the first.
    pub fn register_mod(&mut self, id: &str, name: Option<&str>, description: Option<&str>) {
        let entry = self
            .mods
            .entry(id.to_string())
            .or_insert_with(|| ModEntry::new(id));
        if entry.display_name.is_none() {
            if let Some(name) = name {
                entry.display_name = Some(name.to_string());
            }
        }
        if entry.description.is_none() {
            if let Some(description) = description {
                entry.description = Some(description.to_string());
            }
        }
    }

    /// Register (or re-register) an option for a mod.
    ///
    /// Auto-registers the mod when unknown. Re-registering an option id
    /// replaces its whole spec: last writer wins. Option ids only need to
    /// be unique within their mod.
    pub fn register_option(&mut self, mod_id: &str, spec: OptionSpec) -> Result<(), RegistryError> {
        spec.validate()?;
        self.register_mod(mod_id, None, None);
        tracing::debug!("Registered option {}/{}", mod_id, spec.id);
        if let Some(entry) = self.mods.get_mut(mod_id) {
            entry.options.insert(spec.id.clone(), spec);
        }
        Ok(())
    }

    /// Look up a mod entry. Never mutates.
    pub fn mod_entry(&self, id: &str) -> Option<&ModEntry> {
        self.mods.get(id)
    }

    /// Look up an option spec. Never mutates.
    pub fn option(&self, mod_id: &str, option_id: &str) -> Option<&OptionSpec> {
        self.mods.get(mod_id).and_then(|m| m.options.get(option_id))
    }

    /// Whether no mods are registered
    pub fn is_empty(&self) -> bool {
        self.mods.is_empty()
    }

    /// Clone the registered mods for view construction.
    pub fn snapshot(&self) -> Vec<ModEntry> {
        self.mods.values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_normalization() {
        let spec = OptionSpec::boolean("signals");
        assert_eq!(spec.name, "signals");
        assert_eq!(spec.description, "");
        assert_eq!(spec.order, 1);
        assert_eq!(spec.kind.default_value(), Some(OptionValue::Bool(false)));

        let spec = OptionSpec::number("speed");
        assert_eq!(spec.kind.default_value(), Some(OptionValue::Number(0.0)));

        let spec = OptionSpec::choice("theme", vec![ChoiceItem::new("dark", "Dark")]);
        assert_eq!(spec.kind.default_value(), None);
    }

    #[test]
    fn test_spec_builders() {
        let spec = OptionSpec::number("speed")
            .with_name("Train Speed")
            .with_description("Top speed multiplier")
            .with_order(5)
            .with_range(0.0, 10.0)
            .with_step(2.0)
            .with_default(4.0);

        assert_eq!(spec.name, "Train Speed");
        assert_eq!(spec.order, 5);
        match spec.kind {
            OptionKind::Number {
                default,
                min,
                max,
                step,
            } => {
                assert_eq!(default, 4.0);
                assert_eq!(min, Some(0.0));
                assert_eq!(max, Some(10.0));
                assert_eq!(step, 2.0);
            }
            _ => panic!("expected number kind"),
        }
    }

    #[test]
    fn test_spec_validation() {
        let spec = OptionSpec::number("speed").with_range(10.0, 0.0);
        assert!(matches!(
            spec.validate(),
            Err(RegistryError::InvalidBounds { .. })
        ));

        let spec = OptionSpec::number("speed").with_step(0.0);
        assert!(matches!(
            spec.validate(),
            Err(RegistryError::InvalidStep { .. })
        ));

        let spec = OptionSpec::choice("theme", Vec::new());
        assert!(matches!(
            spec.validate(),
            Err(RegistryError::EmptyChoices { .. })
        ));
    }

    #[test]
    fn test_register_mod_fill_only_merge() {
        let mut registry = OptionRegistry::new();
        registry.register_mod("trainyard", Some("Trainyard"), None);
        // A later defaults-only call must not clobber the explicit name.
        registry.register_mod("trainyard", None, Some("Rail logistics"));

        let entry = registry.mod_entry("trainyard").unwrap();
        assert_eq!(entry.display_name(), "Trainyard");
        assert_eq!(entry.description(), "Rail logistics");

        // And an explicit value never overwrites an earlier explicit one.
        registry.register_mod("trainyard", Some("Other"), Some("Other"));
        let entry = registry.mod_entry("trainyard").unwrap();
        assert_eq!(entry.display_name(), "Trainyard");
        assert_eq!(entry.description(), "Rail logistics");
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        let mut registry = OptionRegistry::new();
        registry.register_mod("trainyard", None, None);
        let entry = registry.mod_entry("trainyard").unwrap();
        assert_eq!(entry.display_name(), "trainyard");
        assert_eq!(entry.description(), "");
    }

    #[test]
    fn test_register_option_auto_registers_mod() {
        let mut registry = OptionRegistry::new();
        registry
            .register_option("trainyard", OptionSpec::boolean("signals"))
            .unwrap();

        assert!(registry.mod_entry("trainyard").is_some());
        assert!(registry.option("trainyard", "signals").is_some());
    }

    #[test]
    fn test_reregister_option_replaces_spec() {
        let mut registry = OptionRegistry::new();
        registry
            .register_option("trainyard", OptionSpec::boolean("signals").with_order(3))
            .unwrap();
        registry
            .register_option(
                "trainyard",
                OptionSpec::boolean("signals").with_name("Block Signals"),
            )
            .unwrap();

        // Last writer wins: the whole spec is replaced, including order.
        let spec = registry.option("trainyard", "signals").unwrap();
        assert_eq!(spec.name, "Block Signals");
        assert_eq!(spec.order, 1);
    }

    #[test]
    fn test_option_ids_unique_per_mod_only() {
        let mut registry = OptionRegistry::new();
        registry
            .register_option("trainyard", OptionSpec::boolean("enabled"))
            .unwrap();
        registry
            .register_option("conveyors", OptionSpec::number("enabled"))
            .unwrap();

        assert!(matches!(
            registry.option("trainyard", "enabled").unwrap().kind,
            OptionKind::Boolean { .. }
        ));
        assert!(matches!(
            registry.option("conveyors", "enabled").unwrap().kind,
            OptionKind::Number { .. }
        ));
    }

    #[test]
    fn test_lookups_return_none_for_unknown() {
        let registry = OptionRegistry::new();
        assert!(registry.mod_entry("ghost").is_none());
        assert!(registry.option("ghost", "speed").is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_choice_order_preserved() {
        let choices = vec![
            ChoiceItem::new("high", "High"),
            ChoiceItem::new("low", "Low"),
            ChoiceItem::new("medium", "Medium"),
        ];
        let mut registry = OptionRegistry::new();
        registry
            .register_option("trainyard", OptionSpec::choice("detail", choices.clone()))
            .unwrap();

        match &registry.option("trainyard", "detail").unwrap().kind {
            OptionKind::Choice { choices: stored, .. } => assert_eq!(stored, &choices),
            _ => panic!("expected choice kind"),
        }
    }
}
