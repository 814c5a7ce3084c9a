//! Field normalization
//!
//! Pure functions that turn raw source cells into destination values. None of
//! them fail: malformed input degrades to an empty or partially formatted
//! value.
//!
//! - [`phone`] - phone number formatting
//! - [`deadline`] - follow-up deadline and export date
//! - [`region`] - area code to state code lookup

pub mod deadline;
pub mod phone;
pub mod region;

pub use deadline::{
    compute_deadline, format_export_date, parse_submitted_date, DATE_FORMAT,
    DEFAULT_DEADLINE_OFFSET_DAYS,
};
pub use phone::format_phone;
pub use region::{assigned_area_codes, region_for_area_code, REGION_TABLE};

/// Picks the display name: the lead name, else its fallback, else empty
///
/// # Examples
///
/// ```
/// use lead_router::core::normalize::display_name;
///
/// assert_eq!(display_name("Ana", "Aninha"), "Ana");
/// assert_eq!(display_name("  ", "Aninha"), "Aninha");
/// ```
pub fn display_name(name: &str, alt_name: &str) -> String {
    [name, alt_name]
        .into_iter()
        .find(|candidate| !candidate.trim().is_empty())
        .unwrap_or_default()
        .to_string()
}

/// Classifies a free-text tag against the traffic-source marker
///
/// Returns `label` when the trimmed, upper-cased tag equals `marker`
/// (compared upper-cased too), otherwise an empty string.
pub fn source_tag(tag: &str, marker: &str, label: &str) -> String {
    if !marker.trim().is_empty() && tag.trim().to_uppercase() == marker.trim().to_uppercase() {
        label.to_string()
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_fallbacks() {
        assert_eq!(display_name("Maria", "Mari"), "Maria");
        assert_eq!(display_name("", "Mari"), "Mari");
        assert_eq!(display_name("", ""), "");
        assert_eq!(display_name(" ", "\t"), "");
    }

    #[test]
    fn test_source_tag_matches_marker() {
        assert_eq!(source_tag("VINDO DO QG", "VINDO DO QG", "QG"), "QG");
        assert_eq!(source_tag("  vindo do qg ", "VINDO DO QG", "QG"), "QG");
    }

    #[test]
    fn test_source_tag_other_values() {
        assert_eq!(source_tag("INSTAGRAM", "VINDO DO QG", "QG"), "");
        assert_eq!(source_tag("", "VINDO DO QG", "QG"), "");
        assert_eq!(source_tag("anything", "", "QG"), "");
    }
}
