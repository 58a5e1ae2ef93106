use serde::Serialize;

use super::enums::service_families::ServiceFamily;

/// Flat price with its included hours and the rate for every hour beyond them.
/// Amounts are in minor units.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PricingTier {
    pub base_price: i32,
    pub base_hours: i32,
    pub hourly_rate: i32,
}

impl PricingTier {
    /// Total for the billed hours. Billing never drops below the included hours.
    /// `None` when the total does not fit in an `i32`.
    pub fn total_for(&self, billed_hours: i32) -> Option<i32> {
        let overage = billed_hours.saturating_sub(self.base_hours).max(0);
        self.hourly_rate
            .checked_mul(overage)?
            .checked_add(self.base_price)
    }
}

const DJ_CEASE_PARTY: PricingTier = PricingTier {
    base_price: 50_000,
    base_hours: 4,
    hourly_rate: 10_000,
};

const DJ_ELEV8_PARTY: PricingTier = PricingTier {
    base_price: 45_000,
    base_hours: 4,
    hourly_rate: 10_000,
};

const TKO_THE_DJ_PARTY: PricingTier = PricingTier {
    base_price: 40_000,
    base_hours: 4,
    hourly_rate: 10_000,
};

const DJ_WEDDING: PricingTier = PricingTier {
    base_price: 85_000,
    base_hours: 5,
    hourly_rate: 12_500,
};

const PHOTOBOOTH_STANDARD: PricingTier = PricingTier {
    base_price: 50_000,
    base_hours: 4,
    hourly_rate: 10_000,
};

/// Everything a client can put in a booking's service or provider field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceCatalog {
    DjCease,
    DjElev8,
    TkoTheDj,
    /// Generic DJ service type, billed at the house rate.
    Dj,
    PhotoboothUnit1,
    PhotoboothUnit2,
    /// Generic photobooth service type.
    Photobooth,
}

impl ServiceCatalog {
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "dj_cease" => Some(ServiceCatalog::DjCease),
            "dj_elev8" => Some(ServiceCatalog::DjElev8),
            "tko_the_dj" => Some(ServiceCatalog::TkoTheDj),
            "dj" => Some(ServiceCatalog::Dj),
            "photobooth_unit1" => Some(ServiceCatalog::PhotoboothUnit1),
            "photobooth_unit2" => Some(ServiceCatalog::PhotoboothUnit2),
            "photobooth" => Some(ServiceCatalog::Photobooth),
            _ => None,
        }
    }

    pub fn family(&self) -> ServiceFamily {
        match self {
            ServiceCatalog::DjCease
            | ServiceCatalog::DjElev8
            | ServiceCatalog::TkoTheDj
            | ServiceCatalog::Dj => ServiceFamily::Dj,
            ServiceCatalog::PhotoboothUnit1
            | ServiceCatalog::PhotoboothUnit2
            | ServiceCatalog::Photobooth => ServiceFamily::Photobooth,
        }
    }

    /// Wedding pricing replaces the DJ's party tier whichever DJ was chosen.
    /// Photobooth pricing has no wedding tier.
    pub fn pricing(&self, is_wedding: bool) -> PricingTier {
        match (self, is_wedding) {
            (ServiceCatalog::DjCease | ServiceCatalog::Dj, false) => DJ_CEASE_PARTY,
            (ServiceCatalog::DjElev8, false) => DJ_ELEV8_PARTY,
            (ServiceCatalog::TkoTheDj, false) => TKO_THE_DJ_PARTY,
            (
                ServiceCatalog::DjCease
                | ServiceCatalog::DjElev8
                | ServiceCatalog::TkoTheDj
                | ServiceCatalog::Dj,
                true,
            ) => DJ_WEDDING,
            (
                ServiceCatalog::PhotoboothUnit1
                | ServiceCatalog::PhotoboothUnit2
                | ServiceCatalog::Photobooth,
                _,
            ) => PHOTOBOOTH_STANDARD,
        }
    }
}

pub fn is_wedding_event(event_type: &str) -> bool {
    event_type.to_ascii_lowercase().contains("wedding")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_keys() {
        assert_eq!(
            ServiceCatalog::from_key("dj_cease"),
            Some(ServiceCatalog::DjCease)
        );
        assert_eq!(
            ServiceCatalog::from_key("Photobooth_Unit2"),
            Some(ServiceCatalog::PhotoboothUnit2)
        );
        assert_eq!(ServiceCatalog::from_key("karaoke"), None);
    }

    #[test]
    fn party_total_adds_overage_hours() {
        let tier = ServiceCatalog::DjCease.pricing(false);
        assert_eq!(tier.total_for(5), Some(60_000));
        assert_eq!(tier.total_for(4), Some(50_000));
        assert_eq!(tier.total_for(2), Some(50_000));
    }

    #[test]
    fn oversized_total_is_none() {
        let tier = ServiceCatalog::DjCease.pricing(false);
        assert_eq!(tier.total_for(400_000), None);
        assert_eq!(tier.total_for(i32::MAX), None);
    }

    #[test]
    fn wedding_tier_is_provider_agnostic() {
        let cease = ServiceCatalog::DjCease.pricing(true);
        let tko = ServiceCatalog::TkoTheDj.pricing(true);
        assert_eq!(cease, tko);
        assert_eq!(cease.total_for(7), Some(85_000 + 2 * 12_500));
    }

    #[test]
    fn photobooth_ignores_wedding_flag() {
        assert_eq!(
            ServiceCatalog::PhotoboothUnit1.pricing(true),
            ServiceCatalog::PhotoboothUnit1.pricing(false)
        );
    }

    #[test]
    fn wedding_detection_is_substring_and_case_insensitive() {
        assert!(is_wedding_event("Wedding Reception"));
        assert!(is_wedding_event("pre-wedding party"));
        assert!(!is_wedding_event("birthday"));
    }
}
