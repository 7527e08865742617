// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use plazas::CoreError;
use plazas_catalog::CatalogError;
use plazas_domain::DomainError;
use plazas_persistence::PersistenceError;

use crate::export::ExportError;

/// Authentication errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Invalid input was provided; nothing was written.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The catalog could not be read.
    CatalogUnavailable {
        /// A description of the failure.
        message: String,
    },
    /// The catalog was read but its content is malformed.
    CatalogFormat {
        /// A description of the failure.
        message: String,
    },
    /// The claims store could not be read.
    StoreUnavailable {
        /// A description of the failure.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::CatalogUnavailable { message } => write!(f, "Catalog unavailable: {message}"),
            Self::CatalogFormat { message } => write!(f, "Catalog format error: {message}"),
            Self::StoreUnavailable { message } => {
                write!(f, "Claims store unavailable: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
        }
    }
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        Self::Internal {
            message: err.to_string(),
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidZone(msg) => ApiError::InvalidInput {
            field: String::from("zone"),
            message: msg,
        },
        DomainError::InvalidSpecialty(msg) => ApiError::InvalidInput {
            field: String::from("specialty"),
            message: msg,
        },
        DomainError::InvalidPositionKey(key) => ApiError::InvalidInput {
            field: String::from("key"),
            message: format!("'{key}' is not of the form zone||specialty"),
        },
        DomainError::PositionNotFound(_) => ApiError::InvalidInput {
            field: String::from("specialty"),
            message: err.to_string(),
        },
        DomainError::NegativeClaim { kind, .. } | DomainError::ClaimExceedsTotal { kind, .. } => {
            ApiError::InvalidInput {
                field: String::from(kind.claimed_field()),
                message: err.to_string(),
            }
        }
        DomainError::InvalidQuotaFilter(_) => ApiError::InvalidInput {
            field: String::from("kind"),
            message: err.to_string(),
        },
        DomainError::EventDayOutOfRange { .. } => ApiError::InvalidInput {
            field: String::from("event_day"),
            message: err.to_string(),
        },
        DomainError::DuplicatePosition(_) => ApiError::CatalogFormat {
            message: err.to_string(),
        },
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
    }
}

/// Translates a catalog load error into an API error.
#[must_use]
pub fn translate_catalog_error(err: CatalogError) -> ApiError {
    if err.is_format_error() {
        ApiError::CatalogFormat {
            message: err.to_string(),
        }
    } else {
        ApiError::CatalogUnavailable {
            message: err.to_string(),
        }
    }
}

/// Translates a claims store error into an API error.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    if err.is_unavailable() {
        ApiError::StoreUnavailable {
            message: err.to_string(),
        }
    } else {
        ApiError::Internal {
            message: err.to_string(),
        }
    }
}
