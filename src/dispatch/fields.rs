use std::collections::HashMap;

use super::platform::{FieldKind, InputField, Platform};

/// Reads the current text of an on-screen input
///
/// Implementations must return the value as of the call; nothing is cached
/// between dispatches.
pub trait FieldSource {
    fn read(&self, field: InputField) -> String;
}

/// Plain in-memory field values, used by the headless runner and tests
#[derive(Debug, Clone, Default)]
pub struct FieldValues {
    values: HashMap<InputField, String>,
}

impl FieldValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: InputField, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    pub fn with(mut self, platform: Platform, kind: FieldKind, value: impl Into<String>) -> Self {
        self.set(InputField::new(platform, kind), value);
        self
    }
}

impl FieldSource for FieldValues {
    fn read(&self, field: InputField) -> String {
        self.values.get(&field).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_field_reads_empty() {
        let values = FieldValues::new();
        assert_eq!(values.read(InputField::new(Platform::Email, FieldKind::Topic)), "");
    }

    #[test]
    fn test_fields_are_scoped_per_platform() {
        let values = FieldValues::new().with(Platform::Video, FieldKind::Topic, "cats");
        assert_eq!(values.read(InputField::new(Platform::Video, FieldKind::Topic)), "cats");
        assert_eq!(values.read(InputField::new(Platform::Photo, FieldKind::Topic)), "");
    }
}
