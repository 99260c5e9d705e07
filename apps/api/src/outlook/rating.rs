use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::outlook::client::RawOutlook;

/// Employment potential on the ascending scale served to clients.
///
/// LMI-EO rates potential 0=undetermined, 1=good, 2=limited, 3=fair.
/// [`OutlookPotential::from_source_scale`] is the only constructor from that
/// scale, so the remap cannot be applied to an already-normalized rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum OutlookPotential {
    Undetermined = 0,
    Limited = 1,
    Fair = 2,
    Good = 3,
}

impl OutlookPotential {
    /// Remaps a raw LMI-EO potential rating onto the ascending scale.
    /// Unrecognized input degrades to `Undetermined` rather than failing.
    pub fn from_source_scale(raw: u8) -> Self {
        match raw {
            1 => OutlookPotential::Good,
            2 => OutlookPotential::Limited,
            3 => OutlookPotential::Fair,
            _ => OutlookPotential::Undetermined,
        }
    }

    /// Human-readable label for the rating.
    pub fn label(self) -> &'static str {
        match self {
            OutlookPotential::Undetermined => "Undetermined",
            OutlookPotential::Limited => "Limited",
            OutlookPotential::Fair => "Fair",
            OutlookPotential::Good => "Good",
        }
    }
}

impl Serialize for OutlookPotential {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

/// Normalized outlook for one (unit group, region) pair. This is the shape
/// that gets cached and served; `trends` is carried through verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outlook {
    pub potential: OutlookPotential,
    pub outlook_verbose: String,
    pub trends: Value,
}

impl Outlook {
    /// Builds the normalized outlook from a raw upstream response.
    pub fn from_raw(raw: RawOutlook) -> Self {
        let potential = OutlookPotential::from_source_scale(raw.potential);
        Outlook {
            potential,
            outlook_verbose: potential.label().to_string(),
            trends: raw.trends,
        }
    }
}
