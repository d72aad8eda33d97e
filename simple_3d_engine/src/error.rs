//! Error types for the Simple3D engine
//!
//! Spatial render-queue operations are total and never fail: unknown ids are
//! no-ops. The errors below come from context objects (light capacity, layer
//! lookup, configuration validation, draw dispatch).

use std::fmt;

/// Result type for Simple3D engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Simple3D engine errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Configuration rejected by `validate()`
    InvalidConfig(String),

    /// A fixed-capacity table (light buffers) is full
    CapacityExceeded(String),

    /// Named entity (layer, light) does not exist
    NotFound(String),

    /// Argument rejected by an operation
    InvalidArgument(String),

    /// Error reported by a caller-supplied draw dispatcher
    DispatchFailed(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            Error::CapacityExceeded(msg) => write!(f, "Capacity exceeded: {}", msg),
            Error::NotFound(msg) => write!(f, "Not found: {}", msg),
            Error::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            Error::DispatchFailed(msg) => write!(f, "Draw dispatch failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Build an [`Error`] and log it at ERROR severity with file:line.
///
/// Without a variant the error is `Error::InvalidArgument`.
///
/// ```ignore
/// let err = engine_err!("simple3d::LightManager", CapacityExceeded, "{} point lights", 512);
/// let err = engine_err!("simple3d::Renderer", "bad layer name '{}'", name);
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $variant:ident, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::simple3d::Engine::log_detailed(
            $crate::simple3d::log::LogSeverity::Error,
            $source,
            message.clone(),
            file!(),
            line!()
        );
        $crate::simple3d::Error::$variant(message)
    }};
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::simple3d::Engine::log_detailed(
            $crate::simple3d::log::LogSeverity::Error,
            $source,
            message.clone(),
            file!(),
            line!()
        );
        $crate::simple3d::Error::InvalidArgument(message)
    }};
}

/// Log an error and return it from the current function.
#[macro_export]
macro_rules! engine_bail {
    ($($arg:tt)*) => {
        return Err($crate::engine_err!($($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
