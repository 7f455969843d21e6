//! Static eSIM plan catalog.

use serde::Serialize;

/// One sellable plan.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EsimPlan {
    pub id: &'static str,
    pub name: &'static str,
    pub data: &'static str,
    pub validity: &'static str,
    /// Price in MMK. Kyat prices are whole numbers; the payment format
    /// still renders two fractional digits.
    pub price: u32,
    pub features: &'static [&'static str],
    pub is_popular: bool,
    pub is_available: bool,
}

pub const PLANS: &[EsimPlan] = &[
    EsimPlan {
        id: "tourist-7",
        name: "Tourist Pack",
        data: "5 GB",
        validity: "7 Days",
        price: 35_000,
        features: &[
            "High-speed 4G/LTE",
            "Nationwide Coverage",
            "Ideal for short trips",
        ],
        is_popular: false,
        is_available: false,
    },
    EsimPlan {
        id: "power-30",
        name: "Power User",
        data: "15 GB",
        validity: "30 Days",
        price: 80_000,
        features: &[
            "Best Value",
            "High-speed 4G/LTE/5G",
            "Perfect for residents & long stays",
        ],
        is_popular: true,
        is_available: true,
    },
    EsimPlan {
        id: "business-30",
        name: "Business Pro",
        data: "30 GB",
        validity: "30 Days",
        price: 120_000,
        features: &[
            "Maximum Data",
            "Priority 5G Access",
            "24/7 Premium Support",
        ],
        is_popular: false,
        is_available: false,
    },
];

/// Look up a plan by id.
pub fn find(id: &str) -> Option<&'static EsimPlan> {
    PLANS.iter().find(|p| p.id == id)
}
