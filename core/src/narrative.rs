use std::fmt;

use serde::Serialize;

const SITUATION_HEADING: &str = "Analysis:";
const RECOMMENDATION_HEADING: &str = "Strategic Recommendation:";

const SITUATION_CROSSHAIRS: &str = "Your current positioning sits directly in the crosshairs of Big 4 \
encirclement strategies. Public hiring density in your specialization indicates intent to absorb \
the mid-market.";
const SITUATION_STRUCTURED: &str = "You operate in a zone of active but structured competition.";
const SITUATION_NICHE: &str =
    "Your niche positioning offers natural defense against Big 4 standardization.";

const RECOMMEND_FLANKING: &str = "Your high asymmetry index suggests a \"flanking\" opportunity. \
Rather than frontal competition on generalist tenders, focus on creating an excellence consortium \
(see simulation below) as a credible alternative to international networks.";
const RECOMMEND_SPECIALIZE: &str = "Differentiation through ultra-specialized technical expertise \
remains your best defense. Avoid price wars on generic segments.";

/// Two-part report text: where the firm stands, then what to do about it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Narrative {
    pub situation: &'static str,
    pub recommendation: &'static str,
}

impl Narrative {
    /// Rich-text rendering with bold headings and a paragraph break between segments.
    pub fn to_html(&self) -> String {
        format!(
            "<strong>{SITUATION_HEADING}</strong> {}<br><br><strong>{RECOMMENDATION_HEADING}</strong> {}",
            self.situation, self.recommendation
        )
    }
}

impl fmt::Display for Narrative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{SITUATION_HEADING} {}\n\n{RECOMMENDATION_HEADING} {}",
            self.situation, self.recommendation
        )
    }
}

pub fn narrate(threat_score: f64, asymmetry_score: u8) -> Narrative {
    let situation = if threat_score > 0.8 {
        SITUATION_CROSSHAIRS
    } else if threat_score > 0.5 {
        SITUATION_STRUCTURED
    } else {
        SITUATION_NICHE
    };

    let recommendation = if asymmetry_score > 70 {
        RECOMMEND_FLANKING
    } else {
        RECOMMEND_SPECIALIZE
    };

    Narrative {
        situation,
        recommendation,
    }
}
