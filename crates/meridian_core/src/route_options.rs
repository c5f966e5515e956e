use jiff::Timestamp;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteOptions {
    pub avoid_tolls: bool,
    pub avoid_highways: bool,
    pub avoid_ferries: bool,

    /// Let the aggregator reorder intermediate stops. Start and end stay fixed.
    pub optimize_waypoints: bool,

    /// Departure instant used for the traffic estimate. Defaults to "now".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<Timestamp>,
}
