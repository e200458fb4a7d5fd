use serde::Serialize;

use crate::answers::{AnswerSet, CompleteAnswers, FirmSize, PricingTier, Reach, Specialization};
use crate::error::WizardError;
use crate::reference::{ARCHETYPES, ConsortiumArchetype, Density, multiplier_of, profile_of};

const BIG4_WEIGHT: f64 = 0.6;
const MOORE_WEIGHT: f64 = 0.4;
const GLOBAL_REACH_FACTOR: f64 = 1.2;
const LOCAL_REACH_FACTOR: f64 = 0.8;

/// Threat bucket, from the calmest to the most exposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreatLevel {
    Low,
    Moderate,
    High,
    Structural,
}

impl ThreatLevel {
    /// Thresholds are strict and checked from the top down.
    pub fn from_score(threat_score: f64) -> Self {
        if threat_score > 0.9 {
            ThreatLevel::Structural
        } else if threat_score > 0.6 {
            ThreatLevel::High
        } else if threat_score > 0.4 {
            ThreatLevel::Moderate
        } else {
            ThreatLevel::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ThreatLevel::Structural => "Structural Threat",
            ThreatLevel::High => "High Pressure",
            ThreatLevel::Moderate => "Moderate Pressure",
            ThreatLevel::Low => "Low Pressure",
        }
    }

    pub fn context(self) -> &'static str {
        match self {
            ThreatLevel::Structural => "High vulnerability to Big 4 tender processes.",
            ThreatLevel::High => "Active competition on major accounts.",
            ThreatLevel::Moderate => "Relative comfort zone but monitoring required.",
            ThreatLevel::Low => "Strong defensive position in niche.",
        }
    }
}

/// Colour band for the headline. Uses its own cut points, independent of
/// [`ThreatLevel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreatTone {
    Calm,
    Elevated,
    Critical,
}

impl ThreatTone {
    pub fn from_score(threat_score: f64) -> Self {
        if threat_score > 0.8 {
            ThreatTone::Critical
        } else if threat_score > 0.5 {
            ThreatTone::Elevated
        } else {
            ThreatTone::Calm
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    /// Unclamped; global large firms land well above 1.0.
    pub threat_score: f64,
    pub asymmetry_score: u8,
    pub threat_level: ThreatLevel,
    pub density: Density,
    pub consortium: Vec<ConsortiumArchetype>,
}

impl ScoreResult {
    pub fn tone(&self) -> ThreatTone {
        ThreatTone::from_score(self.threat_score)
    }
}

pub fn score(answers: &CompleteAnswers) -> ScoreResult {
    let profile = profile_of(answers.specialization);
    let threat_score = threat_score(answers);

    ScoreResult {
        threat_score,
        asymmetry_score: asymmetry_score(answers, threat_score),
        threat_level: ThreatLevel::from_score(threat_score),
        density: profile.density,
        consortium: consortium_for(answers.specialization),
    }
}

/// Score a possibly partial answer set, refusing if any step is unanswered.
pub fn score_answers(answers: &AnswerSet) -> Result<ScoreResult, WizardError> {
    Ok(score(&answers.complete()?))
}

pub fn threat_score(answers: &CompleteAnswers) -> f64 {
    let profile = profile_of(answers.specialization);
    let base = (profile.big4_pressure * BIG4_WEIGHT + profile.moore_pressure * MOORE_WEIGHT)
        * multiplier_of(answers.size);

    match answers.reach {
        Reach::Global => base * GLOBAL_REACH_FACTOR,
        Reach::Local => base * LOCAL_REACH_FACTOR,
        Reach::Unspecified => base,
    }
}

/// First matching rule wins; premium small firms outrank the ESG rule.
pub fn asymmetry_score(answers: &CompleteAnswers, threat_score: f64) -> u8 {
    if answers.pricing == PricingTier::Premium && answers.size == FirmSize::Small {
        85
    } else if answers.specialization == Specialization::EsgAdvisory
        && answers.size != FirmSize::Large
    {
        75
    } else if threat_score > 0.8 {
        40
    } else {
        60
    }
}

/// Three archetypes that complement, rather than duplicate, the firm's own practice.
pub fn consortium_for(specialization: Specialization) -> Vec<ConsortiumArchetype> {
    let picks: [usize; 3] = match specialization {
        Specialization::TaxLitigation => [1, 3, 4],
        Specialization::CorporateMa => [0, 2, 3],
        Specialization::EsgAdvisory => [0, 2, 4],
        Specialization::AuditAssurance => [0, 1, 4],
    };
    picks.iter().map(|&idx| ARCHETYPES[idx]).collect()
}
