use serde::{Deserialize, Serialize};

/// Courier position response. `status` is "ok" once the courier is assigned
/// and reporting coordinates; "waiting" or "error" otherwise, with the
/// optional fields absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CourierTrack {
    pub status: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub job_status: Option<String>,
}

impl CourierTrack {
    pub fn position(&self) -> Option<(f64, f64)> {
        if self.status != "ok" {
            return None;
        }
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }
}
