//! Per-domain input forms.

use ecmo_core::{
    fields, format_value, AnticoagulationInput, Command, Domain, FieldSpec, FluidBalanceInput,
    ObservationInput, PressureInput, RequestId,
};

/// Longest text a field buffer accepts.
const MAX_FIELD_LEN: usize = 8;

/// One editable numeric field.
#[derive(Debug, Clone)]
pub struct FieldState {
    pub spec: FieldSpec,
    /// Text as typed; parsed on submit.
    pub text: String,
}

impl FieldState {
    /// Create a field showing its default value.
    pub fn new(spec: FieldSpec) -> Self {
        Self {
            spec,
            text: format_value(spec.default),
        }
    }

    /// Parsed value, or `None` if the buffer is empty or not a number.
    pub fn value(&self) -> Option<f64> {
        self.text.trim().parse().ok()
    }

    /// Step the value up or down, clamped to the field's range.
    ///
    /// An unparsable buffer steps from the field's default.
    pub fn step(&mut self, steps: i32) {
        let base = self.value().map(|v| self.spec.clamp(v)).unwrap_or(self.spec.default);
        self.text = format_value(self.spec.step_by(base, steps));
    }

    /// Append a typed character. Only digits and a single decimal point are
    /// accepted.
    pub fn push_char(&mut self, c: char) {
        if self.text.len() >= MAX_FIELD_LEN {
            return;
        }
        if c.is_ascii_digit() || (c == '.' && !self.text.contains('.')) {
            self.text.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        self.text.pop();
    }

    /// Whether the buffer holds a value inside the declared range.
    pub fn is_valid(&self) -> bool {
        self.spec.validate(self.value()).is_ok()
    }
}

/// Input form for one monitoring domain.
///
/// The form owns the domain's action counter: every submit increments it and
/// carries a fresh request id.
#[derive(Debug, Clone)]
pub struct FormState {
    pub domain: Domain,
    pub fields: Vec<FieldState>,
    pub selected: usize,
    pub action_count: u64,
}

impl FormState {
    /// Create a form with every field at its default.
    pub fn new(domain: Domain) -> Self {
        Self {
            domain,
            fields: fields::for_domain(domain).iter().copied().map(FieldState::new).collect(),
            selected: 0,
            action_count: 0,
        }
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.fields.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Select a field by row; out-of-range rows are ignored.
    pub fn select(&mut self, index: usize) {
        if index < self.fields.len() {
            self.selected = index;
        }
    }

    pub fn selected_field_mut(&mut self) -> Option<&mut FieldState> {
        self.fields.get_mut(self.selected)
    }

    /// Current value of the field with this wire key.
    fn value_of(&self, key: &str) -> Option<f64> {
        self.fields.iter().find(|f| f.spec.key == key).and_then(FieldState::value)
    }

    /// Snapshot the form as a domain-tagged input.
    pub fn input(&self) -> ObservationInput {
        match self.domain {
            Domain::Anticoagulation => AnticoagulationInput {
                ptt: self.value_of(fields::PTT.key),
                anti_xa: self.value_of(fields::ANTI_XA.key),
                heparin_rate: self.value_of(fields::HEPARIN_RATE.key),
            }
            .into(),
            Domain::Pressure => PressureInput {
                pre_oxygenator: self.value_of(fields::PRE_OXYGENATOR.key),
                post_oxygenator: self.value_of(fields::POST_OXYGENATOR.key),
            }
            .into(),
            Domain::FluidBalance => FluidBalanceInput {
                input: self.value_of(fields::INPUT_VOLUME.key),
                output: self.value_of(fields::OUTPUT_VOLUME.key),
                goal: self.value_of(fields::FLUID_GOAL.key),
                diuretic_dose: self.value_of(fields::DIURETIC_DOSE.key),
            }
            .into(),
        }
    }

    /// Register a submit action and build its command.
    pub fn submit(&mut self) -> Command {
        self.action_count += 1;
        Command::new(RequestId::new(), self.action_count, self.input())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_starts_at_defaults() {
        let form = FormState::new(Domain::Anticoagulation);
        let texts: Vec<&str> = form.fields.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(texts, vec!["60", "0.3", "1000"]);
        assert_eq!(form.action_count, 0);
        assert!(form.fields.iter().all(FieldState::is_valid));
    }

    #[test]
    fn test_step_clamps_to_range() {
        let mut form = FormState::new(Domain::Pressure);
        let field = form.selected_field_mut().unwrap();
        field.text = "499".to_string();
        field.step(5);
        assert_eq!(field.text, "500");

        field.text = "garbage".to_string();
        field.step(1);
        assert_eq!(field.text, "201");
    }

    #[test]
    fn test_decimal_step() {
        let mut form = FormState::new(Domain::Anticoagulation);
        form.select_next();
        let field = form.selected_field_mut().unwrap();
        field.step(1);
        assert_eq!(field.text, "0.4");
        field.step(-10);
        assert_eq!(field.text, "0");
    }

    #[test]
    fn test_typing_rejects_non_numeric() {
        let mut field = FieldState::new(fields::PTT);
        field.text.clear();
        for c in "5a.5.x".chars() {
            field.push_char(c);
        }
        assert_eq!(field.text, "5.5");
        field.pop_char();
        assert_eq!(field.value(), Some(5.0));
    }

    #[test]
    fn test_empty_field_is_missing() {
        let mut form = FormState::new(Domain::FluidBalance);
        form.select(1);
        form.selected_field_mut().unwrap().text.clear();

        let ObservationInput::FluidBalance(input) = form.input() else {
            panic!("expected fluid balance input");
        };
        assert_eq!(input.input, Some(0.0));
        assert_eq!(input.output, None);
        assert_eq!(input.goal, Some(1000.0));
    }

    #[test]
    fn test_submit_increments_action_count() {
        let mut form = FormState::new(Domain::Pressure);
        let first = form.submit();
        let second = form.submit();
        assert_eq!(first.action_count, 1);
        assert_eq!(second.action_count, 2);
        assert_ne!(first.request_id, second.request_id);
        assert_eq!(first.input.domain(), Domain::Pressure);
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut form = FormState::new(Domain::Pressure);
        form.select_prev();
        assert_eq!(form.selected, 0);
        form.select_next();
        form.select_next();
        assert_eq!(form.selected, 1);
        form.select(7);
        assert_eq!(form.selected, 1);
    }
}
