//! Area code to state code lookup

use crate::domain::AreaCode;

/// Every assigned Brazilian area code with its state (UF)
///
/// Codes absent from this table (20, 23, 25, 26, 29, 30, 36, 39, 40, 50, 52,
/// 56-60, 70, 72, 76, 78, 80, 90) are not assigned to any region.
#[rustfmt::skip]
pub const REGION_TABLE: [(u32, &str); 67] = [
    (11, "SP"), (12, "SP"), (13, "SP"), (14, "SP"), (15, "SP"),
    (16, "SP"), (17, "SP"), (18, "SP"), (19, "SP"),
    (21, "RJ"), (22, "RJ"), (24, "RJ"),
    (27, "ES"), (28, "ES"),
    (31, "MG"), (32, "MG"), (33, "MG"), (34, "MG"), (35, "MG"),
    (37, "MG"), (38, "MG"),
    (41, "PR"), (42, "PR"), (43, "PR"), (44, "PR"), (45, "PR"), (46, "PR"),
    (47, "SC"), (48, "SC"), (49, "SC"),
    (51, "RS"), (53, "RS"), (54, "RS"), (55, "RS"),
    (61, "DF"),
    (62, "GO"), (64, "GO"),
    (63, "TO"),
    (65, "MT"), (66, "MT"),
    (67, "MS"),
    (68, "AC"),
    (69, "RO"),
    (71, "BA"), (73, "BA"), (74, "BA"), (75, "BA"), (77, "BA"),
    (79, "SE"),
    (81, "PE"), (87, "PE"),
    (82, "AL"),
    (83, "PB"),
    (84, "RN"),
    (85, "CE"), (88, "CE"),
    (86, "PI"), (89, "PI"),
    (91, "PA"), (93, "PA"), (94, "PA"),
    (92, "AM"), (97, "AM"),
    (95, "RR"),
    (96, "AP"),
    (98, "MA"), (99, "MA"),
];

/// Returns the state code for an area code, or an empty string if unmapped
///
/// # Examples
///
/// ```
/// use lead_router::core::normalize::region_for_area_code;
/// use lead_router::domain::AreaCode;
///
/// assert_eq!(region_for_area_code(AreaCode::new(21)), "RJ");
/// assert_eq!(region_for_area_code(AreaCode::new(20)), "");
/// ```
pub fn region_for_area_code(code: AreaCode) -> &'static str {
    REGION_TABLE
        .iter()
        .find(|(candidate, _)| *candidate == code.value())
        .map(|(_, state)| *state)
        .unwrap_or("")
}

/// Iterates over every assigned area code
pub fn assigned_area_codes() -> impl Iterator<Item = AreaCode> {
    REGION_TABLE.iter().map(|(code, _)| AreaCode::new(*code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use test_case::test_case;

    #[test_case(11, "SP")]
    #[test_case(19, "SP")]
    #[test_case(21, "RJ")]
    #[test_case(27, "ES")]
    #[test_case(48, "SC")]
    #[test_case(61, "DF")]
    #[test_case(63, "TO")]
    #[test_case(79, "SE")]
    #[test_case(96, "AP")]
    #[test_case(99, "MA")]
    fn test_region_for_mapped_codes(code: u32, expected: &str) {
        assert_eq!(region_for_area_code(AreaCode::new(code)), expected);
    }

    #[test_case(0)]
    #[test_case(20)]
    #[test_case(23)]
    #[test_case(52)]
    #[test_case(60)]
    #[test_case(99999)]
    fn test_region_for_unmapped_codes(code: u32) {
        assert_eq!(region_for_area_code(AreaCode::new(code)), "");
    }

    #[test]
    fn test_region_table_has_no_duplicates() {
        let codes: HashSet<u32> = REGION_TABLE.iter().map(|(code, _)| *code).collect();
        assert_eq!(codes.len(), REGION_TABLE.len());
        assert!(codes.iter().all(|code| (11..=99).contains(code)));
    }

    #[test]
    fn test_assigned_area_codes_count() {
        assert_eq!(assigned_area_codes().count(), 67);
    }
}
