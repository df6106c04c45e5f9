use serde::{Deserialize, Serialize};
use validator::Validate;

/// Inbound `Restaurant` message
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestaurantRequest {
    pub latitude: f64,
    pub longitude: f64,
    /// 0 (or absent) disables the radius filter
    #[serde(default)]
    pub miles_radius: f64,
    #[serde(default)]
    pub additional_amenities: Option<String>,
    #[serde(default)]
    pub cuisine_type: Option<String>,
}

/// A message together with the identity of the agent that sent it
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RestaurantEnvelope {
    #[validate(length(min = 1))]
    pub sender: String,
    pub message: RestaurantRequest,
}
