use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TimeSlotStatus {
    #[default]
    Confirmed,
    Cancelled,
}

impl Display for TimeSlotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            TimeSlotStatus::Confirmed => "confirmed",
            TimeSlotStatus::Cancelled => "cancelled",
        };
        write!(f, "{}", status)
    }
}
