use serde::Deserialize;

use crate::PhoneFormat;

/// Knobs for a deserialization call. Can be read from JSON settings; missing
/// keys fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DeserializeOptions {
    pub phone_format: PhoneFormat,
    /// Store string fields with surrounding whitespace removed.
    pub trim_strings: bool,
}

impl Default for DeserializeOptions {
    fn default() -> Self {
        DeserializeOptions {
            phone_format: PhoneFormat::Canonical,
            trim_strings: true,
        }
    }
}

impl DeserializeOptions {
    pub fn with_phone_format(mut self, phone_format: PhoneFormat) -> Self {
        self.phone_format = phone_format;
        self
    }

    pub fn with_trim_strings(mut self, trim_strings: bool) -> Self {
        self.trim_strings = trim_strings;
        self
    }
}
