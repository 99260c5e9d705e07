//! Province and territory reference table. LMI-EO region ids follow the
//! Statistics Canada SGC province codes.

pub struct Region {
    pub id: &'static str,
    pub name: &'static str,
}

pub const REGIONS: &[Region] = &[
    Region { id: "10", name: "Newfoundland and Labrador" },
    Region { id: "11", name: "Prince Edward Island" },
    Region { id: "12", name: "Nova Scotia" },
    Region { id: "13", name: "New Brunswick" },
    Region { id: "24", name: "Quebec" },
    Region { id: "35", name: "Ontario" },
    Region { id: "46", name: "Manitoba" },
    Region { id: "47", name: "Saskatchewan" },
    Region { id: "48", name: "Alberta" },
    Region { id: "59", name: "British Columbia" },
    Region { id: "60", name: "Yukon" },
    Region { id: "61", name: "Northwest Territories" },
    Region { id: "62", name: "Nunavut" },
];

/// Region used when a request does not name one.
pub const DEFAULT_REGION_ID: &str = "59";

pub fn region_by_id(id: &str) -> Option<&'static Region> {
    REGIONS.iter().find(|r| r.id == id)
}
