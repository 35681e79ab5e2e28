//! Field configuration supplied by the embedding form.

/// Input configuration of a rich-text field.
///
/// `value` makes the field controlled; `initial_value` is only used when
/// `value` is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldProps {
    pub label: Option<String>,
    pub error: Option<String>,
    pub required: bool,
    pub value: Option<String>,
    pub initial_value: Option<String>,
    pub placeholder: Option<String>,
    pub max_length: Option<usize>,
    /// Read-only rendering of the raw content
    pub show_preview: bool,
}

impl FieldProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_initial_value(mut self, value: impl Into<String>) -> Self {
        self.initial_value = Some(value.into());
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn with_preview(mut self, show_preview: bool) -> Self {
        self.show_preview = show_preview;
        self
    }

    pub fn is_controlled(&self) -> bool {
        self.value.is_some()
    }
}
