//! # Error Types
//!
//! Domain-specific error types for merka-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  merka-core errors (this file)                                         │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Sale form validation failures                  │
//! │                                                                         │
//! │  merka-db errors (separate crate)                                      │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  Server errors (in app)                                                │
//! │  └── ApiError         - What the client sees (serialized)              │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Client                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Username/password pair is not one of the known accounts.
    #[error("Usuario o contraseña incorrectos")]
    InvalidCredentials,

    /// The action requires an Admin session.
    ///
    /// ## When This Occurs
    /// - A `Barbero` session opens the owner monitor
    #[error("Acceso restringido solo para Administradores.")]
    AdminOnly,

    /// The selected barber name does not resolve to a registered barber.
    #[error("Error al identificar barbero.")]
    BarberNotFound(String),

    /// Ticket cannot be found.
    #[error("Ticket not found: {0}")]
    TicketNotFound(i64),

    /// Validation error (wraps ValidationError).
    #[error("{0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when sale form input doesn't meet requirements.
/// Used for early validation before anything touches the database.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The sale form is missing the client name or has no services selected.
    #[error("Falta nombre del cliente o servicios.")]
    MissingClientOrServices,

    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g., NaN amount, invalid date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Selected service is not part of the catalog.
    #[error("Unknown service: {0}")]
    UnknownService(String),

    /// A sum of amounts does not fit in `Money`.
    #[error("{field} is out of range")]
    Overflow { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
