//! Unified error type for the coffee-cups crate.
//!
//! Every layer returns [`Error`]. Presentation adapters use [`Error::kind`] to
//! translate failures into HTTP statuses or chat replies.

use std::fmt;
use thiserror::Error;

/// Coarse classification of an [`Error`], used by the presentation adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A referenced box, user, payment or log does not exist
    NotFound,
    /// Malformed creation parameters
    InvalidArgument,
    /// Operation against a deactivated box
    Inactive,
    /// The box has no remaining cups
    Exhausted,
    /// The underlying store failed
    PersistenceFailure,
    /// Configuration, I/O or framework failures
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::InvalidArgument => write!(f, "INVALID_ARGUMENT"),
            Self::Inactive => write!(f, "INACTIVE"),
            Self::Exhausted => write!(f, "EXHAUSTED"),
            Self::PersistenceFailure => write!(f, "PERSISTENCE_FAILURE"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// No (non-deleted) box with this id
    #[error("Box {id} not found")]
    BoxNotFound {
        /// Box id that was looked up
        id: i64,
    },

    /// No (non-deleted) user with this id
    #[error("User '{id}' not found")]
    UserNotFound {
        /// Internal or external id that was looked up
        id: String,
    },

    /// No payment with this id
    #[error("Payment {id} not found")]
    PaymentNotFound {
        /// Payment id that was looked up
        id: i64,
    },

    /// No (non-deleted) coffee log with this id
    #[error("Coffee log {id} not found")]
    CoffeeLogNotFound {
        /// Coffee log id that was looked up
        id: i64,
    },

    /// Creation parameters were rejected
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// What was wrong with the input
        message: String,
    },

    /// The box has been deactivated
    #[error("Box {id} is inactive")]
    BoxInactive {
        /// Box id
        id: i64,
    },

    /// The box has no cups left
    #[error("Box {id} is exhausted (all {total_cups} cups used)")]
    BoxExhausted {
        /// Box id
        id: i64,
        /// Capacity of the box
        total_cups: i32,
    },

    /// Persistence failure from the store
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Configuration could not be loaded
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the problem
        message: String,
    },

    /// I/O failure (config file, socket binding)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or malformed environment variable
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Integer conversion failure
    #[error("Integer conversion error: {0}")]
    TryFromInt(#[from] std::num::TryFromIntError),

    /// Formatting failure while building a reply
    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// Serenity/Poise framework failure
    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

impl Error {
    /// Shorthand for [`Error::InvalidArgument`].
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Classifies the error for the presentation adapters.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::BoxNotFound { .. }
            | Self::UserNotFound { .. }
            | Self::PaymentNotFound { .. }
            | Self::CoffeeLogNotFound { .. } => ErrorKind::NotFound,
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::BoxInactive { .. } => ErrorKind::Inactive,
            Self::BoxExhausted { .. } => ErrorKind::Exhausted,
            Self::Database(_) => ErrorKind::PersistenceFailure,
            Self::Config { .. }
            | Self::Io(_)
            | Self::EnvVar(_)
            | Self::TryFromInt(_)
            | Self::Fmt(_)
            | Self::Framework(_) => ErrorKind::Internal,
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
