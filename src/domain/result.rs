//! Result type alias for the lead router

use super::errors::RouterError;

/// Result type alias for lead router operations
///
/// # Examples
///
/// ```
/// use lead_router::domain::result::Result;
/// use lead_router::domain::errors::RouterError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(RouterError::Routing("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, RouterError>;
