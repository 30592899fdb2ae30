//! Interactive settings controls.
//!
//! One control per option, built by dispatching on the declared option
//! kind. Every control is bound to the settings service and commits on
//! each discrete interaction; there is no pending/cancel transaction, so
//! closing the view never discards an edit.

use std::sync::Arc;

use modsettings_core::OptionValue;
use modsettings_service::{ChoiceItem, OptionKind, OptionSpec, SettingsService};

/// Step multiplier applied by input modifiers.
///
/// Which keys map to which modifier is host input-binding policy; the
/// control only applies the factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepModifier {
    /// Single step.
    #[default]
    Normal,
    /// Ten steps at once.
    Fine,
    /// A hundred steps at once.
    Coarse,
}

impl StepModifier {
    /// The multiplier applied to the declared step
    pub fn factor(self) -> f64 {
        match self {
            StepModifier::Normal => 1.0,
            StepModifier::Fine => 10.0,
            StepModifier::Coarse => 100.0,
        }
    }
}

/// An interactive control bound to one option.
#[derive(Debug)]
pub enum Control {
    /// Boolean toggle.
    Toggle(ToggleControl),
    /// Cyclic pager over a choice option's entries.
    Cycle(CycleControl),
    /// Bounded number stepper.
    Stepper(StepperControl),
}

impl Control {
    /// The option this control edits
    pub fn option_id(&self) -> &str {
        match self {
            Control::Toggle(c) => &c.option_id,
            Control::Cycle(c) => &c.option_id,
            Control::Stepper(c) => &c.option_id,
        }
    }

    /// The display name of the option
    pub fn name(&self) -> &str {
        match self {
            Control::Toggle(c) => &c.name,
            Control::Cycle(c) => &c.name,
            Control::Stepper(c) => &c.name,
        }
    }

    /// The option description
    pub fn description(&self) -> &str {
        match self {
            Control::Toggle(c) => &c.description,
            Control::Cycle(c) => &c.description,
            Control::Stepper(c) => &c.description,
        }
    }
}

/// Build the control for one option.
///
/// The match is exhaustive over the closed kind set: adding an option kind
/// fails compilation here until a control exists for it.
pub fn build_control(
    service: &Arc<SettingsService>,
    mod_id: &str,
    spec: &OptionSpec,
    token: &str,
) -> Control {
    match &spec.kind {
        OptionKind::Boolean { default } => Control::Toggle(ToggleControl::new(
            service.clone(),
            mod_id,
            spec,
            *default,
            token,
        )),
        OptionKind::Choice { choices, .. } => Control::Cycle(CycleControl::new(
            service.clone(),
            mod_id,
            spec,
            choices.clone(),
            token,
        )),
        OptionKind::Number {
            min, max, step, ..
        } => Control::Stepper(StepperControl::new(
            service.clone(),
            mod_id,
            spec,
            *min,
            *max,
            *step,
            token,
        )),
    }
}

/// Toggle control for a boolean option.
pub struct ToggleControl {
    service: Arc<SettingsService>,
    mod_id: String,
    option_id: String,
    /// Display name of the option.
    pub name: String,
    /// Option description.
    pub description: String,
    token: String,
    state: bool,
}

impl ToggleControl {
    fn new(
        service: Arc<SettingsService>,
        mod_id: &str,
        spec: &OptionSpec,
        default: bool,
        token: &str,
    ) -> Self {
        let state = service
            .get(mod_id, &spec.id)
            .and_then(|v| v.as_bool())
            .unwrap_or(default);
        Self {
            service,
            mod_id: mod_id.to_string(),
            option_id: spec.id.clone(),
            name: spec.name.clone(),
            description: spec.description.clone(),
            token: token.to_string(),
            state,
        }
    }

    /// Current visual state
    pub fn state(&self) -> bool {
        self.state
    }

    /// Flip the toggle, commit, and mirror the committed value.
    pub fn toggle(&mut self) -> bool {
        let committed =
            self.service
                .set(&self.mod_id, &self.option_id, !self.state, Some(&self.token));
        self.state = committed.as_bool().unwrap_or(!self.state);
        self.state
    }
}

impl std::fmt::Debug for ToggleControl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToggleControl")
            .field("option", &format_args!("{}/{}", self.mod_id, self.option_id))
            .field("state", &self.state)
            .finish()
    }
}

/// Cyclic pager over the entries of a choice option.
pub struct CycleControl {
    service: Arc<SettingsService>,
    mod_id: String,
    option_id: String,
    /// Display name of the option.
    pub name: String,
    /// Option description.
    pub description: String,
    token: String,
    /// Never empty; registration rejects choice options with no entries.
    choices: Vec<ChoiceItem>,
    index: usize,
}

impl CycleControl {
    fn new(
        service: Arc<SettingsService>,
        mod_id: &str,
        spec: &OptionSpec,
        choices: Vec<ChoiceItem>,
        token: &str,
    ) -> Self {
        // Select the entry matching the current value; fall back to the
        // first entry when nothing matches.
        let current = service.get(mod_id, &spec.id);
        let index = choices
            .iter()
            .position(|c| Some(&c.value) == current.as_ref())
            .unwrap_or(0);
        Self {
            service,
            mod_id: mod_id.to_string(),
            option_id: spec.id.clone(),
            name: spec.name.clone(),
            description: spec.description.clone(),
            token: token.to_string(),
            choices,
            index,
        }
    }

    /// Label of the selected entry
    pub fn label(&self) -> &str {
        &self.choices[self.index].label
    }

    /// Value of the selected entry
    pub fn value(&self) -> &OptionValue {
        &self.choices[self.index].value
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.choices.len()
    }

    /// Whether there are no entries. Always false for a registered option.
    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    /// Advance to the next entry, wrapping, and commit its value.
    pub fn next(&mut self) -> &str {
        self.select((self.index + 1) % self.choices.len())
    }

    /// Step back to the previous entry, wrapping, and commit its value.
    pub fn previous(&mut self) -> &str {
        self.select((self.index + self.choices.len() - 1) % self.choices.len())
    }

    fn select(&mut self, index: usize) -> &str {
        self.index = index;
        let value = self.choices[index].value.clone();
        self.service
            .set(&self.mod_id, &self.option_id, value, Some(&self.token));
        self.label()
    }
}

impl std::fmt::Debug for CycleControl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CycleControl")
            .field("option", &format_args!("{}/{}", self.mod_id, self.option_id))
            .field("index", &self.index)
            .field("entries", &self.choices.len())
            .finish()
    }
}

/// Stepper control for a bounded number option.
pub struct StepperControl {
    service: Arc<SettingsService>,
    mod_id: String,
    option_id: String,
    /// Display name of the option.
    pub name: String,
    /// Option description.
    pub description: String,
    token: String,
    value: f64,
    min: Option<f64>,
    max: Option<f64>,
    step: f64,
}

impl StepperControl {
    #[allow(clippy::too_many_arguments)]
    fn new(
        service: Arc<SettingsService>,
        mod_id: &str,
        spec: &OptionSpec,
        min: Option<f64>,
        max: Option<f64>,
        step: f64,
        token: &str,
    ) -> Self {
        // Non-numeric state coerces to 0 before clamping.
        let current = service
            .get(mod_id, &spec.id)
            .map(|v| v.coerce_number())
            .unwrap_or(0.0);
        let mut control = Self {
            service,
            mod_id: mod_id.to_string(),
            option_id: spec.id.clone(),
            name: spec.name.clone(),
            description: spec.description.clone(),
            token: token.to_string(),
            value: current,
            min,
            max,
            step,
        };
        control.value = control.clamp(current);
        control
    }

    fn clamp(&self, value: f64) -> f64 {
        let mut value = value;
        if let Some(min) = self.min {
            value = value.max(min);
        }
        if let Some(max) = self.max {
            value = value.min(max);
        }
        value
    }

    /// Current numeric state
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Whether the increment affordance is enabled
    pub fn can_increment(&self) -> bool {
        self.max.is_none_or(|max| self.value < max)
    }

    /// Whether the decrement affordance is enabled
    pub fn can_decrement(&self) -> bool {
        self.min.is_none_or(|min| self.value > min)
    }

    /// Step up by `step × multiplier`, re-clamp, and commit.
    pub fn increment(&mut self, modifier: StepModifier) -> f64 {
        self.apply(self.step * modifier.factor())
    }

    /// Step down by `step × multiplier`, re-clamp, and commit.
    pub fn decrement(&mut self, modifier: StepModifier) -> f64 {
        self.apply(-(self.step * modifier.factor()))
    }

    fn apply(&mut self, delta: f64) -> f64 {
        let next = self.clamp(self.value + delta);
        let committed = self
            .service
            .set(&self.mod_id, &self.option_id, next, Some(&self.token));
        self.value = committed.coerce_number();
        self.value
    }
}

impl std::fmt::Debug for StepperControl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepperControl")
            .field("option", &format_args!("{}/{}", self.mod_id, self.option_id))
            .field("value", &self.value)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("step", &self.step)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modsettings_service::{MemoryStorage, SettingsStore};
    use std::path::PathBuf;

    fn memory_service() -> Arc<SettingsService> {
        let store = SettingsStore::with_backend(
            PathBuf::from("settings.json"),
            Box::new(MemoryStorage::new()),
        );
        let service = Arc::new(SettingsService::new(store));
        service.load();
        service
    }

    fn spec_of(service: &SettingsService, mod_id: &str, option_id: &str) -> OptionSpec {
        service
            .mods()
            .into_iter()
            .find(|m| m.id == mod_id)
            .and_then(|m| m.options.get(option_id).cloned())
            .expect("option registered")
    }

    #[test]
    fn test_toggle_control_commits() {
        let service = memory_service();
        service
            .register_option("trainyard", OptionSpec::boolean("signals"))
            .unwrap();

        let spec = spec_of(&service, "trainyard", "signals");
        let mut control = match build_control(&service, "trainyard", &spec, "view") {
            Control::Toggle(c) => c,
            other => panic!("expected toggle, got {:?}", other),
        };

        assert!(!control.state());
        assert!(control.toggle());
        assert_eq!(
            service.get("trainyard", "signals"),
            Some(OptionValue::Bool(true))
        );
        assert!(!control.toggle());
        assert_eq!(
            service.get("trainyard", "signals"),
            Some(OptionValue::Bool(false))
        );
    }

    #[test]
    fn test_cycle_control_wraps_and_commits() {
        let service = memory_service();
        service
            .register_option(
                "trainyard",
                OptionSpec::choice(
                    "detail",
                    vec![
                        ChoiceItem::new("low", "Low"),
                        ChoiceItem::new("medium", "Medium"),
                        ChoiceItem::new("high", "High"),
                    ],
                ),
            )
            .unwrap();
        service.set("trainyard", "detail", "medium", None);

        let spec = spec_of(&service, "trainyard", "detail");
        let mut control = match build_control(&service, "trainyard", &spec, "view") {
            Control::Cycle(c) => c,
            other => panic!("expected cycle, got {:?}", other),
        };

        // Initialized from the current value.
        assert_eq!(control.label(), "Medium");

        assert_eq!(control.next(), "High");
        assert_eq!(
            service.get("trainyard", "detail"),
            Some(OptionValue::Text("high".into()))
        );

        // Wraps past the end.
        assert_eq!(control.next(), "Low");
        assert_eq!(
            service.get("trainyard", "detail"),
            Some(OptionValue::Text("low".into()))
        );

        // And back around the other way.
        assert_eq!(control.previous(), "High");
    }

    #[test]
    fn test_cycle_control_defaults_to_first_entry() {
        let service = memory_service();
        service
            .register_option(
                "trainyard",
                OptionSpec::choice(
                    "detail",
                    vec![ChoiceItem::new("low", "Low"), ChoiceItem::new("high", "High")],
                ),
            )
            .unwrap();
        // Stored value matches no entry.
        service.set("trainyard", "detail", "ultra", None);

        let spec = spec_of(&service, "trainyard", "detail");
        let control = match build_control(&service, "trainyard", &spec, "view") {
            Control::Cycle(c) => c,
            other => panic!("expected cycle, got {:?}", other),
        };
        assert_eq!(control.label(), "Low");
    }

    #[test]
    fn test_stepper_clamps_at_bounds() {
        let service = memory_service();
        service
            .register_option(
                "trainyard",
                OptionSpec::number("speed")
                    .with_range(0.0, 10.0)
                    .with_step(2.0)
                    .with_default(4.0),
            )
            .unwrap();

        let spec = spec_of(&service, "trainyard", "speed");
        let mut control = match build_control(&service, "trainyard", &spec, "view") {
            Control::Stepper(c) => c,
            other => panic!("expected stepper, got {:?}", other),
        };

        assert_eq!(control.value(), 4.0);
        assert_eq!(control.increment(StepModifier::Normal), 6.0);
        assert_eq!(control.increment(StepModifier::Normal), 8.0);
        assert_eq!(control.increment(StepModifier::Normal), 10.0);
        // A fourth increment stays clamped at the bound.
        assert_eq!(control.increment(StepModifier::Normal), 10.0);
        assert!(!control.can_increment());
        assert!(control.can_decrement());

        assert_eq!(
            service.get("trainyard", "speed"),
            Some(OptionValue::Number(10.0))
        );
    }

    #[test]
    fn test_stepper_modifiers() {
        let service = memory_service();
        service
            .register_option("volume", OptionSpec::number("level").with_range(0.0, 500.0))
            .unwrap();

        let spec = spec_of(&service, "volume", "level");
        let mut control = match build_control(&service, "volume", &spec, "view") {
            Control::Stepper(c) => c,
            other => panic!("expected stepper, got {:?}", other),
        };

        assert_eq!(control.increment(StepModifier::Fine), 10.0);
        assert_eq!(control.increment(StepModifier::Coarse), 110.0);
        assert_eq!(control.decrement(StepModifier::Normal), 109.0);
    }

    #[test]
    fn test_stepper_coerces_non_numeric_state() {
        let service = memory_service();
        service
            .register_option(
                "trainyard",
                OptionSpec::number("speed").with_range(0.0, 10.0),
            )
            .unwrap();
        service.set("trainyard", "speed", "garbage", None);

        let spec = spec_of(&service, "trainyard", "speed");
        let control = match build_control(&service, "trainyard", &spec, "view") {
            Control::Stepper(c) => c,
            other => panic!("expected stepper, got {:?}", other),
        };

        // Coerced to 0, then clamped into range.
        assert_eq!(control.value(), 0.0);
        assert!(!control.can_decrement());
    }

    #[test]
    fn test_controls_carry_view_token() {
        use modsettings_core::{EventFilter, EventKind, SettingsEvent};
        use std::sync::Mutex;

        let service = memory_service();
        service
            .register_option("trainyard", OptionSpec::boolean("signals"))
            .unwrap();

        let seen = Arc::new(Mutex::new(None));
        let sink = seen.clone();
        service.notifier().subscribe(
            EventFilter::Kinds(vec![EventKind::ValueChanged]),
            move |event| {
                if let SettingsEvent::ValueChanged { token, .. } = event {
                    *sink.lock().unwrap() = token;
                }
            },
        );

        let spec = spec_of(&service, "trainyard", "signals");
        let mut control = match build_control(&service, "trainyard", &spec, "view-42") {
            Control::Toggle(c) => c,
            other => panic!("expected toggle, got {:?}", other),
        };
        control.toggle();

        assert_eq!(seen.lock().unwrap().as_deref(), Some("view-42"));
    }
}
