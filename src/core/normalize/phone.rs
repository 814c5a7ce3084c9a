//! Phone number formatting

/// Country prefix dropped from raw numbers and prepended to formatted ones
const COUNTRY_PREFIX: &str = "55";

/// Formats a free-form phone number as `55 (DD) XXXXX-XXXX`
///
/// All non-digits are stripped and a leading `55` is dropped. Ten remaining
/// digits format as a landline, eleven as a mobile number; any other length
/// keeps the remaining digits unformatted after the area code. Input without
/// digits yields an empty string; a bare `55` still formats, with an empty
/// area code. Formatting is not restartable: feeding an already formatted
/// number back in strips its prefix again.
///
/// # Examples
///
/// ```
/// use lead_router::core::normalize::format_phone;
///
/// assert_eq!(format_phone("(21) 99876-5432"), "55 (21) 99876-5432");
/// assert_eq!(format_phone("+55 11 3456-7890"), "55 (11) 3456-7890");
/// assert_eq!(format_phone("12345"), "55 (12) 345");
/// assert_eq!(format_phone("n/a"), "");
/// ```
pub fn format_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return String::new();
    }
    let digits = digits.strip_prefix(COUNTRY_PREFIX).unwrap_or(&digits);

    let split = digits.len().min(2);
    let (area, rest) = digits.split_at(split);

    match digits.len() {
        10 => format!("{COUNTRY_PREFIX} ({area}) {}-{}", &rest[..4], &rest[4..]),
        11 => format!("{COUNTRY_PREFIX} ({area}) {}-{}", &rest[..5], &rest[5..]),
        _ => format!("{COUNTRY_PREFIX} ({area}) {rest}"),
    }
}
