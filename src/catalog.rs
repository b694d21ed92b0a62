//! Static catalog of the 50 states plus the District of Columbia.
//! Names are the canonical region identifiers used everywhere else.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub name: &'static str,
    pub abbreviation: &'static str,
}

const fn region(name: &'static str, abbreviation: &'static str) -> Region {
    Region { name, abbreviation }
}

pub const REGIONS: [Region; 51] = [
    region("Alabama", "AL"),
    region("Alaska", "AK"),
    region("Arizona", "AZ"),
    region("Arkansas", "AR"),
    region("California", "CA"),
    region("Colorado", "CO"),
    region("Connecticut", "CT"),
    region("Delaware", "DE"),
    region("Florida", "FL"),
    region("Georgia", "GA"),
    region("Hawaii", "HI"),
    region("Idaho", "ID"),
    region("Illinois", "IL"),
    region("Indiana", "IN"),
    region("Iowa", "IA"),
    region("Kansas", "KS"),
    region("Kentucky", "KY"),
    region("Louisiana", "LA"),
    region("Maine", "ME"),
    region("Maryland", "MD"),
    region("Massachusetts", "MA"),
    region("Michigan", "MI"),
    region("Minnesota", "MN"),
    region("Mississippi", "MS"),
    region("Missouri", "MO"),
    region("Montana", "MT"),
    region("Nebraska", "NE"),
    region("Nevada", "NV"),
    region("New Hampshire", "NH"),
    region("New Jersey", "NJ"),
    region("New Mexico", "NM"),
    region("New York", "NY"),
    region("North Carolina", "NC"),
    region("North Dakota", "ND"),
    region("Ohio", "OH"),
    region("Oklahoma", "OK"),
    region("Oregon", "OR"),
    region("Pennsylvania", "PA"),
    region("Rhode Island", "RI"),
    region("South Carolina", "SC"),
    region("South Dakota", "SD"),
    region("Tennessee", "TN"),
    region("Texas", "TX"),
    region("Utah", "UT"),
    region("Vermont", "VT"),
    region("Virginia", "VA"),
    region("Washington", "WA"),
    region("West Virginia", "WV"),
    region("Wisconsin", "WI"),
    region("Wyoming", "WY"),
    region("District of Columbia", "DC"),
];

pub const CATALOG_SIZE: usize = REGIONS.len();

pub fn find_by_name(name: &str) -> Option<&'static Region> {
    REGIONS.iter().find(|r| r.name == name)
}

pub fn find_by_abbreviation(abbreviation: &str) -> Option<&'static Region> {
    REGIONS.iter().find(|r| r.abbreviation == abbreviation)
}

pub fn is_region(name: &str) -> bool {
    find_by_name(name).is_some()
}

/// Canonical name for an abbreviation; unknown abbreviations pass through unchanged.
pub fn name_for(abbreviation: &str) -> &str {
    find_by_abbreviation(abbreviation)
        .map(|r| r.name)
        .unwrap_or(abbreviation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_and_abbreviations_are_unique() {
        let names: HashSet<_> = REGIONS.iter().map(|r| r.name).collect();
        let abbrs: HashSet<_> = REGIONS.iter().map(|r| r.abbreviation).collect();
        assert_eq!(names.len(), 51);
        assert_eq!(abbrs.len(), 51);
        assert_eq!(CATALOG_SIZE, 51);
    }

    #[test]
    fn lookups_go_both_ways() {
        assert_eq!(find_by_name("New Mexico").map(|r| r.abbreviation), Some("NM"));
        assert_eq!(name_for("DC"), "District of Columbia");
        assert!(find_by_name("Atlantis").is_none());
        assert_eq!(name_for("ZZ"), "ZZ");
    }

    #[test]
    fn identity_is_case_sensitive() {
        assert!(is_region("Ohio"));
        assert!(!is_region("ohio"));
    }
}
