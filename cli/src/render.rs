use std::fmt::Write;

use flank_core::report::{Presenter, Report, View};
use flank_core::scoring::ThreatTone;
use flank_core::{Category, FirmSize, PricingTier, Reach, Selection, Specialization};

/// One selectable card on a question screen.
pub struct OptionCard {
    pub selection: Selection,
    pub title: &'static str,
    pub hint: &'static str,
}

pub struct Question {
    pub category: Category,
    pub prompt: &'static str,
    pub options: &'static [OptionCard],
}

const SPECIALIZATION_OPTIONS: &[OptionCard] = &[
    OptionCard {
        selection: Selection::Specialization(Specialization::TaxLitigation),
        title: "Tax Litigation",
        hint: "Disputes, audits and controversy",
    },
    OptionCard {
        selection: Selection::Specialization(Specialization::CorporateMa),
        title: "Corporate / M&A",
        hint: "Transactions, restructuring, due diligence",
    },
    OptionCard {
        selection: Selection::Specialization(Specialization::EsgAdvisory),
        title: "ESG Advisory",
        hint: "CSRD, sustainability reporting",
    },
    OptionCard {
        selection: Selection::Specialization(Specialization::AuditAssurance),
        title: "Audit & Assurance",
        hint: "Statutory audit, assurance engagements",
    },
];

const SIZE_OPTIONS: &[OptionCard] = &[
    OptionCard {
        selection: Selection::Size(FirmSize::Small),
        title: "Small",
        hint: "Boutique practice",
    },
    OptionCard {
        selection: Selection::Size(FirmSize::Medium),
        title: "Medium",
        hint: "Established independent firm",
    },
    OptionCard {
        selection: Selection::Size(FirmSize::Large),
        title: "Large",
        hint: "Multi-office firm",
    },
];

const REACH_OPTIONS: &[OptionCard] = &[
    OptionCard {
        selection: Selection::Reach(Reach::Global),
        title: "International",
        hint: "Cross-border mandates and clients",
    },
    OptionCard {
        selection: Selection::Reach(Reach::Local),
        title: "Local",
        hint: "Domestic market focus",
    },
];

const PRICING_OPTIONS: &[OptionCard] = &[
    OptionCard {
        selection: Selection::Pricing(PricingTier::Premium),
        title: "Premium",
        hint: "Fees above market rate",
    },
    OptionCard {
        selection: Selection::Pricing(PricingTier::Other),
        title: "Market rate",
        hint: "Competitive or standard fees",
    },
];

pub static QUESTIONS: [Question; 4] = [
    Question {
        category: Category::Specialization,
        prompt: "What is your firm's core specialization?",
        options: SPECIALIZATION_OPTIONS,
    },
    Question {
        category: Category::Size,
        prompt: "How large is your firm?",
        options: SIZE_OPTIONS,
    },
    Question {
        category: Category::Reach,
        prompt: "What is your international reach?",
        options: REACH_OPTIONS,
    },
    Question {
        category: Category::Pricing,
        prompt: "How do you position your fees?",
        options: PRICING_OPTIONS,
    },
];

pub fn question_for(category: Category) -> &'static Question {
    &QUESTIONS[usize::from(category.step() - 1)]
}

/// Big 4 service-line intensity shown on every results screen.
pub const SERVICE_HEATMAP: [(&str, f64); 8] = [
    ("Audit", 0.9),
    ("Tax", 0.7),
    ("Advisory", 0.8),
    ("ESG", 0.6),
    ("Risk", 0.75),
    ("Data", 0.85),
    ("Legal", 0.5),
    ("M&A", 0.9),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeatBand {
    Light,
    Mid,
    Dark,
}

impl HeatBand {
    pub fn from_intensity(intensity: f64) -> Self {
        if intensity > 0.8 {
            HeatBand::Dark
        } else if intensity > 0.6 {
            HeatBand::Mid
        } else {
            HeatBand::Light
        }
    }

    fn shade(self) -> &'static str {
        match self {
            HeatBand::Dark => "████████",
            HeatBand::Mid => "▓▓▓▓▓▓▓▓",
            HeatBand::Light => "░░░░░░░░",
        }
    }
}

fn tone_tag(tone: ThreatTone) -> &'static str {
    match tone {
        ThreatTone::Critical => "[!!]",
        ThreatTone::Elevated => "[! ]",
        ThreatTone::Calm => "[ok]",
    }
}

/// Presenter that renders views as plain text into an internal buffer.
/// The caller drains the buffer with [`TerminalPresenter::take`] and owns the
/// actual write, so I/O errors surface where they can be handled.
#[derive(Default)]
pub struct TerminalPresenter {
    buffer: String,
}

impl TerminalPresenter {
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.buffer)
    }

    fn intro(&mut self) {
        let _ = writeln!(self.buffer, "\nBig 4 Encirclement Diagnostic");
        let _ = writeln!(
            self.buffer,
            "Four questions on your practice, then a threat assessment and a suggested consortium."
        );
        let _ = writeln!(self.buffer, "Press Enter to begin, or 'q' to quit.");
    }

    fn step(&mut self, n: u8) {
        let Some(question) = Category::for_step(n).map(question_for) else {
            return;
        };
        let _ = writeln!(self.buffer, "\nStep {n}/4  {}", question.prompt);
        for (idx, card) in question.options.iter().enumerate() {
            let _ = writeln!(
                self.buffer,
                "  {}) {:<18} {}",
                idx + 1,
                card.title,
                card.hint
            );
        }
    }

    fn results(&mut self, report: &Report) {
        let buf = &mut self.buffer;
        let _ = writeln!(buf, "\n=== Threat assessment ===");
        let _ = writeln!(buf, "{} {}", tone_tag(report.tone), report.threat_level);
        let _ = writeln!(buf, "    {}", report.threat_context);
        let _ = writeln!(buf, "Asymmetry index:  {}", report.asymmetry_index);
        let _ = writeln!(buf, "Market crowding:  {}", report.crowding_index);
        let _ = writeln!(buf, "\n{}", report.narrative);

        let _ = writeln!(buf, "\nBig 4 service intensity");
        for (name, intensity) in SERVICE_HEATMAP {
            let band = HeatBand::from_intensity(intensity);
            let _ = writeln!(buf, "  {name:<9} {}", band.shade());
        }

        let _ = writeln!(buf, "\nSuggested consortium");
        for archetype in &report.consortium {
            let _ = writeln!(buf, "  * {}: {}", archetype.name, archetype.role);
        }
    }
}

impl Presenter for TerminalPresenter {
    fn show_view(&mut self, view: View) {
        match view {
            View::Intro => self.intro(),
            View::Step(n) => self.step(n),
            View::Results => {
                let _ = writeln!(self.buffer, "\n'r' to restart, 'q' to quit.");
            }
        }
    }

    fn render_results(&mut self, report: &Report) {
        self.results(report);
    }
}
