use regex::Regex;

/// Decides which path segments are legal page titles.
///
/// Only ASCII letters, digits and spaces are allowed, across the whole
/// segment. Anything that could step outside the storage directory
/// (`.`, `/`, `]`, ...) is rejected by omission.
pub struct TitleValidator {
    pattern: Regex,
}

impl TitleValidator {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(r"^[a-zA-Z0-9 ]+$").expect("Invalid title regex"),
        }
    }

    pub fn is_valid(&self, raw: &str) -> bool {
        self.pattern.is_match(raw)
    }
}

impl Default for TitleValidator {
    fn default() -> Self {
        Self::new()
    }
}
