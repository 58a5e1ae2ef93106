use std::fmt::Display;

use serde::{Deserialize, Serialize};

pub const PHOTOBOOTH_PREFIX: &str = "photobooth";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ServiceFamily {
    Dj,
    Photobooth,
}

impl ServiceFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceFamily::Dj => "dj",
            ServiceFamily::Photobooth => "photobooth",
        }
    }

    /// Every identifier carrying the `photobooth` prefix draws from the shared
    /// two-unit pool; everything else is scheduled as a DJ.
    pub fn of_provider(provider: &str) -> Self {
        if provider.starts_with(PHOTOBOOTH_PREFIX) {
            ServiceFamily::Photobooth
        } else {
            ServiceFamily::Dj
        }
    }
}

impl Display for ServiceFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
