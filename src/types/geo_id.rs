use std::fmt;
use std::sync::Arc;

/// Stable key for a county across both input tables.
/// Keep the original GEOID text (with leading zeros) but avoid repeated owned Strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GeoId {
    id: Arc<str>, // e.g., "55025" = state "55" + county "025"
}

/// 2-digit state prefix + 3-digit county suffix.
const STATE_WIDTH: usize = 2;
const COUNTY_WIDTH: usize = 3;
const GEOID_WIDTH: usize = STATE_WIDTH + COUNTY_WIDTH;

impl GeoId {
    /// Build from a raw GEOID value, left-padding with zeros to 5 characters.
    /// Numeric sources commonly drop the leading zero ("9001" for Fairfield, CT).
    pub fn new(raw: &str) -> GeoId {
        let id: Arc<str> = if raw.len() < GEOID_WIDTH {
            Arc::from(format!("{:0>width$}", raw, width = GEOID_WIDTH).as_str())
        } else {
            Arc::from(raw)
        };
        GeoId { id }
    }

    /// Build from separate state and county FIPS fields, padding each to its
    /// fixed width before concatenation.
    pub fn from_parts(state: &str, county: &str) -> GeoId {
        GeoId {
            id: Arc::from(
                format!(
                    "{:0>sw$}{:0>cw$}",
                    state,
                    county,
                    sw = STATE_WIDTH,
                    cw = COUNTY_WIDTH
                )
                .as_str(),
            ),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The 2-digit state FIPS prefix.
    pub fn state_fips(&self) -> &str {
        &self.id[..STATE_WIDTH.min(self.id.len())]
    }
}

impl fmt::Display for GeoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::GeoId;

    #[test]
    fn pads_short_geoids() {
        assert_eq!(GeoId::new("9001").id(), "09001");
        assert_eq!(GeoId::new("55025").id(), "55025");
    }

    #[test]
    fn from_parts_pads_each_field() {
        assert_eq!(GeoId::from_parts("55", "25").id(), "55025");
        assert_eq!(GeoId::from_parts("6", "37").id(), "06037");
    }

    #[test]
    fn normalized_geoid_is_five_digits() {
        for raw in ["1001", "9001", "55025", "06037"] {
            let geo_id = GeoId::new(raw);
            assert_eq!(geo_id.id().len(), 5);
            assert!(geo_id.id().chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn state_prefix() {
        assert_eq!(GeoId::new("9001").state_fips(), "09");
        assert_eq!(GeoId::from_parts("55", "025").state_fips(), "55");
    }

    #[test]
    fn equality_and_hashing_use_normalized_text() {
        assert_eq!(GeoId::new("9001"), GeoId::from_parts("9", "1"));
    }
}
