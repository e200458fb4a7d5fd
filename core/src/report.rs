use serde::Serialize;

use crate::answers::CompleteAnswers;
use crate::narrative::{Narrative, narrate};
use crate::reference::ConsortiumArchetype;
use crate::scoring::{ScoreResult, ThreatTone, score};

/// Screen the presentation layer should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "view", content = "step")]
pub enum View {
    Intro,
    Step(u8),
    Results,
}

impl View {
    /// Stable identifier for the section/page that renders this view.
    pub fn id(&self) -> String {
        match self {
            View::Intro => "intro-section".to_string(),
            View::Step(n) => format!("step-{n}"),
            View::Results => "results-section".to_string(),
        }
    }
}

/// Display surface driven by the questionnaire.
///
/// Implementations own all rendering: markup, colours, the service heatmap.
/// The session only tells them which view to show and hands over the
/// finished report before switching to [`View::Results`].
pub trait Presenter {
    fn show_view(&mut self, view: View);
    fn render_results(&mut self, report: &Report);
}

/// Everything the results view displays, already formatted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub answers: CompleteAnswers,
    pub threat_level: &'static str,
    pub threat_context: &'static str,
    pub tone: ThreatTone,
    /// e.g. "85/100"
    pub asymmetry_index: String,
    pub crowding_index: &'static str,
    pub narrative: Narrative,
    pub narrative_html: String,
    pub consortium: Vec<ConsortiumArchetype>,
    pub score: ScoreResult,
}

impl Report {
    pub fn build(answers: CompleteAnswers) -> Self {
        Self::from_score(answers, score(&answers))
    }

    pub fn from_score(answers: CompleteAnswers, score: ScoreResult) -> Self {
        let narrative = narrate(score.threat_score, score.asymmetry_score);
        Self {
            answers,
            threat_level: score.threat_level.label(),
            threat_context: score.threat_level.context(),
            tone: score.tone(),
            asymmetry_index: format!("{}/100", score.asymmetry_score),
            crowding_index: score.density.label(),
            narrative_html: narrative.to_html(),
            narrative,
            consortium: score.consortium.clone(),
            score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::{FirmSize, PricingTier, Reach, Specialization};

    #[test]
    fn view_ids_match_section_names() {
        assert_eq!(View::Intro.id(), "intro-section");
        assert_eq!(View::Step(3).id(), "step-3");
        assert_eq!(View::Results.id(), "results-section");
    }

    #[test]
    fn report_formats_scores_for_display() {
        let report = Report::build(CompleteAnswers {
            specialization: Specialization::TaxLitigation,
            size: FirmSize::Small,
            reach: Reach::Local,
            pricing: PricingTier::Premium,
        });

        assert_eq!(report.threat_level, "Low Pressure");
        assert_eq!(report.asymmetry_index, "85/100");
        assert_eq!(report.crowding_index, "Moderate");
        assert_eq!(report.tone, ThreatTone::Calm);
        assert_eq!(report.consortium.len(), 3);
        assert!(report.narrative_html.contains("flanking"));
    }

    #[test]
    fn report_serializes_wire_values() {
        let report = Report::build(CompleteAnswers {
            specialization: Specialization::CorporateMa,
            size: FirmSize::Large,
            reach: Reach::Global,
            pricing: PricingTier::Other,
        });
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["answers"]["specialization"], "corporate_ma");
        assert_eq!(json["tone"], "critical");
        assert_eq!(json["score"]["threat_level"], "structural");
        assert_eq!(json["score"]["asymmetry_score"], 40);
        assert_eq!(json["consortium"][0]["name"], "Technical Niche Firm");
    }
}
