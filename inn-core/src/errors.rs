//! # Errors
//!
//! innkeep reports failures through one structured error type, [`InnError`],
//! that rides inside `anyhow::Error` so every layer can use `?` freely and
//! callers can still recover the kind with [`InnError::from_anyhow`].
//!
//! - `Validation`: a single entity violates its own invariant
//! - `NotFound`: a reservation references a hotel or customer that does not exist
//! - `CapacityExceeded`: a reservation would overbook a hotel
//! - `Storage`: a write could not be completed
//!
//! Absence (lookups that find nothing, cancelling twice) is never an error;
//! services return `Option`/`bool` for that.
//!
//! `data` and `errors` are JSON values, and [`InnError::to_json`] renders
//! the whole error for display.

use std::fmt;

use anyhow::Error as AnyError;

/// Error classes with their status codes and names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,       // 422
    NotFound,         // 404
    CapacityExceeded, // 409
    MethodNotAllowed, // 405
    NotImplemented,   // 501
    Storage,          // 500
}

impl ErrorKind {
    pub fn status_code(&self) -> u16 {
        match self {
            ErrorKind::Validation => 422,
            ErrorKind::NotFound => 404,
            ErrorKind::CapacityExceeded => 409,
            ErrorKind::MethodNotAllowed => 405,
            ErrorKind::NotImplemented => 501,
            ErrorKind::Storage => 500,
        }
    }

    /// Error `name` (e.g. "NotFound")
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "ValidationError",
            ErrorKind::NotFound => "NotFoundError",
            ErrorKind::CapacityExceeded => "CapacityExceededError",
            ErrorKind::MethodNotAllowed => "MethodNotAllowed",
            ErrorKind::NotImplemented => "NotImplemented",
            ErrorKind::Storage => "StorageError",
        }
    }

    /// Kebab-cased class name
    pub fn class_name(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::NotFound => "not-found",
            ErrorKind::CapacityExceeded => "capacity-exceeded",
            ErrorKind::MethodNotAllowed => "method-not-allowed",
            ErrorKind::NotImplemented => "not-implemented",
            ErrorKind::Storage => "storage",
        }
    }
}

pub type ErrorValue = serde_json::Value;

/// A structured innkeep error that can live inside `anyhow::Error`.
///
/// Fields:
/// - kind (gives name, code and class_name)
/// - message
/// - data (optional, e.g. the hotel and counts behind a capacity rejection)
/// - errors (optional, per-field validation messages)
#[derive(Debug)]
pub struct InnError {
    pub kind: ErrorKind,
    pub message: String,
    pub data: Option<ErrorValue>,
    pub errors: Option<ErrorValue>,
    pub source: Option<AnyError>,
}

impl InnError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            data: None,
            errors: None,
            source: None,
        }
    }

    pub fn with_data(mut self, data: ErrorValue) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_errors(mut self, errors: ErrorValue) -> Self {
        self.errors = Some(errors);
        self
    }

    pub fn with_source(mut self, source: AnyError) -> Self {
        self.source = Some(source);
        self
    }

    pub fn code(&self) -> u16 {
        self.kind.status_code()
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn class_name(&self) -> &'static str {
        self.kind.class_name()
    }

    /// Convert into `anyhow::Error`.
    pub fn into_anyhow(self) -> AnyError {
        AnyError::new(self)
    }

    /// Downcast an `anyhow::Error` to an `InnError` if possible.
    pub fn from_anyhow(err: &AnyError) -> Option<&InnError> {
        err.downcast_ref::<InnError>()
    }

    /// Kind of an arbitrary error; anything that is not an `InnError`
    /// counts as `Storage`.
    pub fn kind_of(err: &AnyError) -> ErrorKind {
        Self::from_anyhow(err)
            .map(|e| e.kind)
            .unwrap_or(ErrorKind::Storage)
    }

    /// Turn any error into an InnError:
    /// - if it's already an InnError, keep it (lossless)
    /// - otherwise wrap as Storage
    pub fn normalize(err: AnyError) -> InnError {
        match err.downcast::<InnError>() {
            Ok(inn) => inn,
            Err(other) => InnError::new(ErrorKind::Storage, other.to_string()).with_source(other),
        }
    }

    /// Copy without the inner `source` chain, suitable for showing to users.
    pub fn sanitize_for_client(&self) -> InnError {
        InnError {
            kind: self.kind,
            message: self.message.clone(),
            data: self.data.clone(),
            errors: self.errors.clone(),
            source: None,
        }
    }

    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }

    // ---- Constructors ----

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, msg)
    }
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, msg)
    }
    pub fn capacity_exceeded(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::CapacityExceeded, msg)
    }
    pub fn method_not_allowed(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::MethodNotAllowed, msg)
    }
    pub fn not_implemented(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotImplemented, msg)
    }
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Storage, msg)
    }
}

impl fmt::Display for InnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.name(), self.code(), self.message)
    }
}

impl std::error::Error for InnError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl InnError {
    /// JSON payload: `{name, message, code, className, data?, errors?}`.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::json;

        let mut base = json!({
            "name": self.name(),
            "message": self.message,
            "code": self.code(),
            "className": self.class_name(),
        });

        if let Some(d) = &self.data {
            base["data"] = d.clone();
        }
        if let Some(e) = &self.errors {
            base["errors"] = e.clone();
        }
        base
    }
}

/// Convenience helper for "bail with InnError".
#[macro_export]
macro_rules! bail_inn {
    ($ctor:ident, $msg:expr) => {
        return Err($crate::errors::InnError::$ctor($msg).into_anyhow());
    };
    ($ctor:ident, $fmt:expr, $($arg:tt)*) => {
        return Err($crate::errors::InnError::$ctor(format!($fmt, $($arg)*)).into_anyhow());
    };
}
