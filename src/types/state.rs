//! Static FIPS-to-state-name lookup.

/// State FIPS codes and names, 50 states plus D.C., sorted by code so the
/// lookup can binary-search. Codes outside this table (territories, typos)
/// resolve to `None`.
const STATE_NAMES: [(&str, &str); 51] = [
    ("01", "Alabama"),
    ("02", "Alaska"),
    ("04", "Arizona"),
    ("05", "Arkansas"),
    ("06", "California"),
    ("08", "Colorado"),
    ("09", "Connecticut"),
    ("10", "Delaware"),
    ("11", "District of Columbia"),
    ("12", "Florida"),
    ("13", "Georgia"),
    ("15", "Hawaii"),
    ("16", "Idaho"),
    ("17", "Illinois"),
    ("18", "Indiana"),
    ("19", "Iowa"),
    ("20", "Kansas"),
    ("21", "Kentucky"),
    ("22", "Louisiana"),
    ("23", "Maine"),
    ("24", "Maryland"),
    ("25", "Massachusetts"),
    ("26", "Michigan"),
    ("27", "Minnesota"),
    ("28", "Mississippi"),
    ("29", "Missouri"),
    ("30", "Montana"),
    ("31", "Nebraska"),
    ("32", "Nevada"),
    ("33", "New Hampshire"),
    ("34", "New Jersey"),
    ("35", "New Mexico"),
    ("36", "New York"),
    ("37", "North Carolina"),
    ("38", "North Dakota"),
    ("39", "Ohio"),
    ("40", "Oklahoma"),
    ("41", "Oregon"),
    ("42", "Pennsylvania"),
    ("44", "Rhode Island"),
    ("45", "South Carolina"),
    ("46", "South Dakota"),
    ("47", "Tennessee"),
    ("48", "Texas"),
    ("49", "Utah"),
    ("50", "Vermont"),
    ("51", "Virginia"),
    ("53", "Washington"),
    ("54", "West Virginia"),
    ("55", "Wisconsin"),
    ("56", "Wyoming"),
];

/// Resolve a 2-digit state FIPS code to its canonical name.
pub fn state_name(code: &str) -> Option<&'static str> {
    STATE_NAMES
        .binary_search_by_key(&code, |(fips, _)| fips)
        .ok()
        .map(|idx| STATE_NAMES[idx].1)
}

#[cfg(test)]
mod tests {
    use super::{STATE_NAMES, state_name};

    #[test]
    fn table_is_sorted_for_binary_search() {
        for pair in STATE_NAMES.windows(2) {
            assert!(pair[0].0 < pair[1].0, "{} !< {}", pair[0].0, pair[1].0);
        }
    }

    #[test]
    fn covers_fifty_states_and_dc() {
        assert_eq!(STATE_NAMES.len(), 51);
        for (code, name) in STATE_NAMES {
            assert!(!name.is_empty());
            assert_eq!(state_name(code), Some(name));
        }
    }

    #[test]
    fn known_codes() {
        assert_eq!(state_name("55"), Some("Wisconsin"));
        assert_eq!(state_name("11"), Some("District of Columbia"));
        assert_eq!(state_name("06"), Some("California"));
    }

    #[test]
    fn unmapped_codes_are_absent() {
        assert_eq!(state_name("99"), None);
        assert_eq!(state_name("03"), None); // gap in the FIPS sequence
        assert_eq!(state_name("72"), None); // Puerto Rico, outside the table
    }
}
