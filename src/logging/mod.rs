//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - JSON-formatted log files
//! - Configurable log levels, overridable through `RUST_LOG`
//! - Local file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use lead_router::logging::init_logging;
//! use lead_router::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! // Use tracing macros for logging
//! tracing::info!("Application started");
//! tracing::error!(error = "Something went wrong", "Error occurred");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log an error with context
///
/// An optional literal replaces the default message.
///
/// # Example
///
/// ```no_run
/// use lead_router::log_error_with_context;
/// use lead_router::domain::RouterError;
///
/// let error = RouterError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "config load");
/// log_error_with_context!(&error, "config load", "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        $crate::log_error_with_context!($error, $context, "Error occurred")
    };
    ($error:expr, $context:expr, $message:literal) => {
        tracing::error!(
            error = %$error,
            context = %$context,
            $message
        )
    };
}

#[cfg(test)]
mod tests {
    use crate::domain::RouterError;

    #[test]
    fn test_log_error_with_context_forms() {
        let error = RouterError::Routing("fair pool is empty".to_string());
        let context = String::from("owner=HEDER");
        log_error_with_context!(&error, "startup");
        log_error_with_context!(error, context, "Sink failure");
    }
}
