//! Unified error type for the crate.
//!
//! User-facing validation failures carry the display name of the offending record,
//! infrastructure failures wrap the underlying error.

use thiserror::Error;

/// Every failure the crate can report.
#[derive(Debug, Error)]
pub enum Error {
    /// Database access failed
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Settings could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// A payload failed basic field validation
    #[error("Validation error: {message}")]
    Validation {
        /// What went wrong
        message: String,
    },

    /// Analytic account lookup failed
    #[error("Analytic account not found: {id}")]
    AccountNotFound {
        /// Requested id
        id: i64,
    },

    /// Product template lookup failed
    #[error("Product template not found: {id}")]
    TemplateNotFound {
        /// Requested id
        id: i64,
    },

    /// Product lookup failed
    #[error("Product not found: {id}")]
    ProductNotFound {
        /// Requested id
        id: i64,
    },

    /// Kit line lookup failed
    #[error("Kit line not found: {id}")]
    KitLineNotFound {
        /// Requested id
        id: i64,
    },

    /// Timesheet work lookup failed
    #[error("Timesheet work not found: {id}")]
    WorkNotFound {
        /// Requested id
        id: i64,
    },

    /// The parent chain of an analytic account loops back on itself
    #[error("Analytic account \"{name}\" is its own ancestor")]
    RecursiveAccount {
        /// Name of the account where the loop was detected
        name: String,
    },

    /// An account was selected under an analytic root it does not descend from
    #[error("Analytic account \"{account}\" does not belong to root {root}")]
    AccountOutsideRoot {
        /// Name of the selected account
        account: String,
        /// Root the account was selected for
        root: i64,
    },

    /// Kit line quantity is zero, negative or not finite
    #[error("Invalid quantity: {quantity}")]
    InvalidQuantity {
        /// Rejected quantity
        quantity: f64,
    },

    /// Timesheet hours are zero, negative or not finite
    #[error("Invalid hours: {hours}")]
    InvalidHours {
        /// Rejected hours
        hours: f64,
    },

    /// Hours were logged against a work closed to timesheets
    #[error("Work \"{name}\" is not available for timesheets")]
    WorkNotAvailable {
        /// Display name of the work
        name: String,
    },

    /// A kit line component was reassigned while it has works
    #[error("You cannot modify component \"{name}\" associated to works")]
    LineWithWork {
        /// Display name of the kit line
        name: String,
    },

    /// A product's works disagree with its work eligibility
    #[error(
        "You can not modify \"{name}\" product fields: \"Type, Kit components or Analytic \
         Accounts\" because exists Timesheet Work associated"
    )]
    ProductWorkConsistency {
        /// Display name of the product
        name: String,
    },

    /// A work with logged timesheet lines was about to be deleted
    #[error("You cannot delete work \"{name}\" with lines computed")]
    WorkWithLines {
        /// Display name of the work
        name: String,
    },
}

impl Error {
    /// Name of the message template for the three consistency rules, if this is one of them.
    #[must_use]
    pub const fn message_key(&self) -> Option<&'static str> {
        match self {
            Self::LineWithWork { .. } => Some("line_with_work"),
            Self::ProductWorkConsistency { .. } => Some("product_work_consistance"),
            Self::WorkWithLines { .. } => Some("work_with_lines"),
            _ => None,
        }
    }

    /// Whether this error should be shown to the end user as a validation failure
    /// rather than treated as an internal fault.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        !matches!(self, Self::Database(_) | Self::Config { .. })
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
