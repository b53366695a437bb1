//! Schema-driven form state shared by every page with inputs.
//!
//! A form is a static `FormSchema` (field keys, labels, kinds, limits) plus a
//! `FormState` holding the typed values and which field has focus. The only
//! validation is the presence check on required fields.

/// Maximum length for free-text and email inputs
const MAX_TEXT_LENGTH: usize = 120;

/// Maximum length for password inputs.
/// 128 chars accommodates password managers and passphrases.
const MAX_SECRET_LENGTH: usize = 128;

/// Length of a `YYYY-MM-DD` date
const DATE_LENGTH: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Rendered masked
    Secret,
    /// `YYYY-MM-DD`
    Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub max_len: usize,
}

impl FieldSpec {
    pub const fn text(key: &'static str, label: &'static str) -> Self {
        Self { key, label, kind: FieldKind::Text, required: true, max_len: MAX_TEXT_LENGTH }
    }

    pub const fn secret(key: &'static str, label: &'static str) -> Self {
        Self { key, label, kind: FieldKind::Secret, required: true, max_len: MAX_SECRET_LENGTH }
    }

    pub const fn date(key: &'static str, label: &'static str) -> Self {
        Self { key, label, kind: FieldKind::Date, required: true, max_len: DATE_LENGTH }
    }

    pub const fn optional(self) -> Self {
        Self { required: false, ..self }
    }

    /// Check if a character may be appended to a value of `current_len` chars
    pub fn accepts(&self, current_len: usize, c: char) -> bool {
        if current_len >= self.max_len || c.is_control() {
            return false;
        }
        match self.kind {
            FieldKind::Date => c.is_ascii_digit() || c == '-',
            FieldKind::Text | FieldKind::Secret => true,
        }
    }
}

pub type FormSchema = &'static [FieldSpec];

pub const LOGIN: FormSchema = &[
    FieldSpec::text("email", "E-mail"),
    FieldSpec::secret("password", "Password"),
];

pub const REGISTER: FormSchema = &[
    FieldSpec::text("name", "Full name"),
    FieldSpec::text("email", "E-mail"),
    FieldSpec::secret("password", "Password"),
    FieldSpec::secret("password_confirm", "Confirm password"),
];

pub const TRANSACTION: FormSchema = &[
    FieldSpec::text("amount", "Amount"),
    FieldSpec::text("category", "Category"),
    FieldSpec::text("description", "Description"),
    FieldSpec::date("date", "Date"),
    FieldSpec::text("type", "Type"),
];

pub const DATE_RANGE: FormSchema = &[
    FieldSpec::date("start_date", "Start date").optional(),
    FieldSpec::date("end_date", "End date").optional(),
];

#[derive(Debug, Clone)]
pub struct FormState {
    schema: FormSchema,
    values: Vec<String>,
    focus: usize,
}

impl FormState {
    pub fn new(schema: FormSchema) -> Self {
        Self {
            schema,
            values: vec![String::new(); schema.len()],
            focus: 0,
        }
    }

    pub fn schema(&self) -> FormSchema {
        self.schema
    }

    fn index_of(&self, key: &str) -> Option<usize> {
        self.schema.iter().position(|field| field.key == key)
    }

    /// Value for `key`; empty for unknown keys
    pub fn value(&self, key: &str) -> &str {
        self.index_of(key)
            .map(|i| self.values[i].as_str())
            .unwrap_or("")
    }

    /// Trimmed owned value, for building payloads
    pub fn take_trimmed(&self, key: &str) -> String {
        self.value(key).trim().to_string()
    }

    /// Replace a value outright (truncated to the field's limit)
    pub fn set(&mut self, key: &str, value: &str) {
        if let Some(i) = self.index_of(key) {
            let max = self.schema[i].max_len;
            self.values[i] = value.chars().filter(|c| !c.is_control()).take(max).collect();
        }
    }

    /// Fields paired with their current values, in schema order
    pub fn fields(&self) -> impl Iterator<Item = (&FieldSpec, &str)> {
        self.schema.iter().zip(self.values.iter().map(String::as_str))
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn focused_field(&self) -> Option<&FieldSpec> {
        self.schema.get(self.focus)
    }

    pub fn set_focus(&mut self, index: usize) {
        if index < self.schema.len() {
            self.focus = index;
        }
    }

    pub fn focus_next(&mut self) {
        if !self.schema.is_empty() {
            self.focus = (self.focus + 1) % self.schema.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.schema.is_empty() {
            self.focus = (self.focus + self.schema.len() - 1) % self.schema.len();
        }
    }

    /// Append a typed character to the focused field. Returns false when
    /// the field rejects it.
    pub fn push_char(&mut self, c: char) -> bool {
        let Some(field) = self.schema.get(self.focus) else {
            return false;
        };
        let value = &mut self.values[self.focus];
        if field.accepts(value.chars().count(), c) {
            value.push(c);
            true
        } else {
            false
        }
    }

    pub fn pop_char(&mut self) {
        if let Some(value) = self.values.get_mut(self.focus) {
            value.pop();
        }
    }

    /// Labels of required fields that are blank
    pub fn missing_required(&self) -> Vec<&'static str> {
        self.fields()
            .filter(|(field, value)| field.required && value.trim().is_empty())
            .map(|(field, _)| field.label)
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_required().is_empty()
    }

    /// Clear every value and move focus to the first field
    pub fn reset(&mut self) {
        for value in &mut self.values {
            value.clear();
        }
        self.focus = 0;
    }
}

/// Message shown when required fields are blank
pub fn missing_fields_message(missing: &[&str]) -> String {
    format!("Required: {}", missing.join(", "))
}
