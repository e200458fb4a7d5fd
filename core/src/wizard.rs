use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::answers::{AnswerSet, Category, Selection};
use crate::error::WizardError;
use crate::report::{Presenter, Report, View};

pub const STEP_COUNT: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "step")]
pub enum WizardState {
    Intro,
    Step(u8),
    Results,
}

impl WizardState {
    pub fn as_str(self) -> &'static str {
        match self {
            WizardState::Intro => "intro",
            WizardState::Step(_) => "step",
            WizardState::Results => "results",
        }
    }

    pub fn view(self) -> View {
        match self {
            WizardState::Intro => View::Intro,
            WizardState::Step(n) => View::Step(n),
            WizardState::Results => View::Results,
        }
    }
}

/// What a successful selection led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved on to the given step.
    Step(u8),
    /// All answers in; the report has been rendered.
    Results,
}

/// One questionnaire run, owned by whoever drives the presenter.
///
/// Each session carries its own answers, so independent sessions never
/// interfere. Transitions:
///
/// ```text
/// Intro --start--> Step(1) --select--> ... Step(4) --select--> Results
///   ^                                                            |
///   +---------------------------reset----------------------------+
/// ```
#[derive(Debug, Clone)]
pub struct WizardSession {
    id: Uuid,
    started_at: DateTime<Utc>,
    state: WizardState,
    answers: AnswerSet,
    report: Option<Report>,
}

impl Default for WizardSession {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::now_v7(),
            started_at: Utc::now(),
            state: WizardState::Intro,
            answers: AnswerSet::default(),
            report: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn state(&self) -> WizardState {
        self.state
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    /// Report of the last completed run, until the next reset or start.
    pub fn report(&self) -> Option<&Report> {
        self.report.as_ref()
    }

    /// 0 before the first question, 1-4 while answering, 4 on results.
    pub fn current_step(&self) -> u8 {
        match self.state {
            WizardState::Intro => 0,
            WizardState::Step(n) => n,
            WizardState::Results => STEP_COUNT,
        }
    }

    /// Category the open question asks for, if a question is open.
    pub fn expected_category(&self) -> Option<Category> {
        match self.state {
            WizardState::Step(n) => Category::for_step(n),
            _ => None,
        }
    }

    /// Show the landing view without touching any answers.
    pub fn open<P: Presenter + ?Sized>(&self, presenter: &mut P) {
        presenter.show_view(self.state.view());
    }

    /// Begin (or restart) the questionnaire at step 1.
    pub fn start<P: Presenter + ?Sized>(&mut self, presenter: &mut P) {
        self.clear();
        self.started_at = Utc::now();
        self.state = WizardState::Step(1);
        tracing::debug!(session_id = %self.id, "questionnaire started");
        presenter.show_view(self.state.view());
    }

    /// Record an answer reported as loose strings and advance.
    pub fn select_option<P: Presenter + ?Sized>(
        &mut self,
        category: &str,
        value: &str,
        presenter: &mut P,
    ) -> Result<Advance, WizardError> {
        let selection = Selection::parse(category, value)?;
        self.select(selection, presenter)
    }

    /// Record a typed answer and advance.
    ///
    /// The state is updated before the presenter is called, so a late
    /// duplicate selection is checked against the next question rather than
    /// the one already answered.
    pub fn select<P: Presenter + ?Sized>(
        &mut self,
        selection: Selection,
        presenter: &mut P,
    ) -> Result<Advance, WizardError> {
        let WizardState::Step(step) = self.state else {
            return Err(WizardError::NotAtStep {
                state: self.state.as_str(),
            });
        };

        let expected = self
            .expected_category()
            .ok_or(WizardError::NotAtStep { state: "step" })?;
        if selection.category() != expected {
            return Err(WizardError::OutOfStep {
                step,
                expected,
                received: selection.category(),
            });
        }

        self.answers.record(selection);
        tracing::debug!(
            session_id = %self.id,
            step,
            category = %expected,
            value = selection.value_str(),
            "selection recorded"
        );

        if step < STEP_COUNT {
            self.state = WizardState::Step(step + 1);
            presenter.show_view(self.state.view());
            return Ok(Advance::Step(step + 1));
        }

        let complete = self.answers.complete()?;
        let report = Report::build(complete);
        tracing::info!(
            session_id = %self.id,
            threat_score = report.score.threat_score,
            asymmetry_score = report.score.asymmetry_score,
            threat_level = report.threat_level,
            "questionnaire completed"
        );

        self.state = WizardState::Results;
        presenter.render_results(&report);
        presenter.show_view(View::Results);
        self.report = Some(report);
        Ok(Advance::Results)
    }

    /// Drop all answers and return to the intro view.
    pub fn reset<P: Presenter + ?Sized>(&mut self, presenter: &mut P) {
        self.clear();
        self.state = WizardState::Intro;
        tracing::debug!(session_id = %self.id, "questionnaire reset");
        presenter.show_view(View::Intro);
    }

    fn clear(&mut self) {
        self.answers = AnswerSet::default();
        self.report = None;
    }
}
