//! Competitive-threat questionnaire: reference tables, scoring, report text
//! and the four-step session that collects answers.

pub mod answers;
pub mod error;
pub mod narrative;
pub mod reference;
pub mod report;
pub mod scoring;
pub mod wizard;

pub use answers::{
    AnswerSet, Category, CompleteAnswers, FirmSize, PricingTier, Reach, Selection, Specialization,
};
pub use error::WizardError;
pub use report::{Presenter, Report, View};
pub use scoring::{ScoreResult, ThreatLevel, score};
pub use wizard::{Advance, WizardSession, WizardState};
