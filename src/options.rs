//! Processing options.

use crate::error::{Error, Result};

/// Label targeted for removal when none is configured.
pub const DEFAULT_LABEL: &str = "0";

/// Sentinel phrase for the first-page rule, compared after trimming and
/// case-folding.
pub const DEFAULT_SENTINEL: &str = "thẻ 1";

/// Options for one pipeline run.
#[derive(Debug, Clone)]
pub struct ProcessOptions {
    /// Label whose START/ROW tags select content for removal.
    pub removal_label: String,

    /// Sentinel phrase for the first-page rule.
    pub sentinel: String,

    /// Whether the first-page rule runs at all.
    pub first_page_rule: bool,
}

impl ProcessOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the removal label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.removal_label = label.into();
        self
    }

    /// Set the first-page sentinel phrase.
    pub fn with_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.sentinel = sentinel.into();
        self
    }

    /// Disable the first-page rule.
    pub fn without_first_page_rule(mut self) -> Self {
        self.first_page_rule = false;
        self
    }

    /// Validate option values. The removal label must be a non-empty digit
    /// string, matching the tag wire syntax.
    pub fn validate(&self) -> Result<()> {
        if self.removal_label.is_empty()
            || !self.removal_label.chars().all(|c| c.is_ascii_digit())
        {
            return Err(Error::InvalidLabel(self.removal_label.clone()));
        }
        Ok(())
    }
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            removal_label: DEFAULT_LABEL.to_string(),
            sentinel: DEFAULT_SENTINEL.to_string(),
            first_page_rule: true,
        }
    }
}
