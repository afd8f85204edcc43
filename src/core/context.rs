//! Execution context - Values that the current caller, not the record, decides.

use crate::config::settings::Settings;

/// Context passed to every operation that stamps caller-specific values on new records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Context {
    /// Current company, copied onto generated timesheet works
    pub company_id: Option<i64>,
}

impl Context {
    /// Creates a context for the given company.
    #[must_use]
    pub const fn new(company_id: Option<i64>) -> Self {
        Self { company_id }
    }

    /// Builds the context from the `[context]` table of the settings.
    #[must_use]
    pub const fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.context.company)
    }
}
