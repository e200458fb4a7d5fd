use serde::{Deserialize, Serialize};

use crate::answers::{FirmSize, Specialization};

/// How crowded a specialization's market is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Density {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl Density {
    /// Display label for the crowding index.
    pub fn label(self) -> &'static str {
        match self {
            Density::VeryHigh => "Very High (Saturated)",
            Density::High => "High",
            Density::Medium => "Moderate",
            Density::Low => "Low (Opportunity)",
        }
    }
}

/// Competitive pressure weights for one specialization.
/// `big4_pressure` and `moore_pressure` are both in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PressureProfile {
    pub big4_pressure: f64,
    pub moore_pressure: f64,
    pub density: Density,
}

pub fn profile_of(specialization: Specialization) -> PressureProfile {
    match specialization {
        Specialization::TaxLitigation => PressureProfile {
            big4_pressure: 0.3,
            moore_pressure: 0.2,
            density: Density::Medium,
        },
        Specialization::CorporateMa => PressureProfile {
            big4_pressure: 0.9,
            moore_pressure: 0.8,
            density: Density::High,
        },
        Specialization::EsgAdvisory => PressureProfile {
            big4_pressure: 0.8,
            moore_pressure: 0.4,
            density: Density::High,
        },
        Specialization::AuditAssurance => PressureProfile {
            big4_pressure: 0.95,
            moore_pressure: 0.9,
            density: Density::VeryHigh,
        },
    }
}

/// Size weighting, in `[0.7, 1.3]`.
pub fn multiplier_of(size: FirmSize) -> f64 {
    match size {
        FirmSize::Small => 0.7,
        FirmSize::Medium => 1.0,
        FirmSize::Large => 1.3,
    }
}

/// A candidate partner-firm type for a flanking consortium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConsortiumArchetype {
    pub name: &'static str,
    pub role: &'static str,
}

pub const ARCHETYPES: [ConsortiumArchetype; 5] = [
    ConsortiumArchetype {
        name: "Technical Niche Firm",
        role: "Sector-specific expertise (e.g., Pharma, Fintech)",
    },
    ConsortiumArchetype {
        name: "Independent ESG Advisory",
        role: "CSRD reporting & Sustainability Due Diligence",
    },
    ConsortiumArchetype {
        name: "Tax Litigation Boutique",
        role: "Complex cross-border tax disputes",
    },
    ConsortiumArchetype {
        name: "IT Advisory Specialist",
        role: "Cybersecurity & Data compliance",
    },
    ConsortiumArchetype {
        name: "Independent Corporate Finance",
        role: "Mid-market M&A & fundraising",
    },
];
