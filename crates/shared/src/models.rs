use serde::{Deserialize, Serialize};

use crate::geo::LatLng;

/// A fixed point of interest shown on the map.
///
/// Built once at startup from the catalog; never mutated. Entries have no
/// identity beyond their position in the catalog array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointOfInterest {
    pub lat: f64,
    pub lon: f64,
    /// Path to the photo shown in the popup, e.g. `/images/aarhus_cathedral.jpg`.
    pub image: String,
    pub name: String,
    pub address: String,
    pub text: String,
    /// Short glyph rendered inside the custom marker icon.
    pub icon: String,
}

impl PointOfInterest {
    pub fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lon)
    }

    /// Generate a URL-safe slug from the display name.
    pub fn slug(&self) -> String {
        self.name
            .to_lowercase()
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '-' })
            .collect::<String>()
            .split('-')
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("-")
    }
}
