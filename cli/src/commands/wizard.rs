use std::time::Duration;

use flank_core::{Category, Selection, WizardError, WizardSession, WizardState};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::render::{TerminalPresenter, question_for};
use crate::util::exit_error;

pub const TERMINAL_HINT: &str =
    "Check that stdin is a terminal or a pipe and stdout is writable; use `flank score` for scripted runs.";

/// Run the questionnaire on stdin/stdout until the user quits or input ends.
pub async fn run(advance_delay: Duration) -> i32 {
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();

    match drive(stdin, stdout, advance_delay).await {
        Ok(()) => 0,
        Err(e) => exit_error(&format!("terminal I/O failed: {e}"), Some(TERMINAL_HINT)),
    }
}

pub async fn drive<R, W>(mut input: R, mut out: W, advance_delay: Duration) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut session = WizardSession::new();
    let mut presenter = TerminalPresenter::default();
    session.open(&mut presenter);
    tracing::debug!(session_id = %session.id(), "interactive session opened");

    let mut line = String::new();
    loop {
        out.write_all(presenter.take().as_bytes()).await?;
        out.write_all(b"> ").await?;
        out.flush().await?;

        line.clear();
        if input.read_line(&mut line).await? == 0 {
            out.write_all(b"\n").await?;
            break;
        }
        let answer = line.trim();
        if answer.eq_ignore_ascii_case("q") {
            break;
        }

        match session.state() {
            WizardState::Intro => session.start(&mut presenter),
            WizardState::Results => {
                if answer.eq_ignore_ascii_case("r") {
                    session.reset(&mut presenter);
                } else {
                    out.write_all(b"  'r' to restart, 'q' to quit.\n").await?;
                }
            }
            WizardState::Step(_) => {
                let Some(category) = session.expected_category() else {
                    continue;
                };
                let outcome = resolve_choice(category, answer)
                    .and_then(|selection| {
                        session.select(selection, &mut presenter).map(|_| selection)
                    });
                match outcome {
                    Ok(selection) => {
                        let echo = format!("  -> {}\n", choice_title(category, selection));
                        out.write_all(echo.as_bytes()).await?;
                        out.flush().await?;
                        // The session has already moved on; this only holds
                        // the next screen back so the choice stays visible.
                        tokio::time::sleep(advance_delay).await;
                    }
                    Err(err) => {
                        tracing::debug!(error = %err, "selection rejected");
                        out.write_all(format!("  {err}\n").as_bytes()).await?;
                    }
                }
            }
        }
    }

    out.flush().await
}

/// Accept either the card number shown on screen or the value itself.
fn resolve_choice(category: Category, answer: &str) -> Result<Selection, WizardError> {
    let options = question_for(category).options;
    if let Ok(n) = answer.parse::<usize>() {
        return n
            .checked_sub(1)
            .and_then(|idx| options.get(idx))
            .map(|card| card.selection)
            .ok_or_else(|| WizardError::UnknownValue {
                category,
                value: answer.to_string(),
            });
    }
    Selection::parse(category.as_str(), answer)
}

fn choice_title(category: Category, selection: Selection) -> &'static str {
    question_for(category)
        .options
        .iter()
        .find(|card| card.selection == selection)
        .map(|card| card.title)
        .unwrap_or_else(|| selection.value_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn transcript(input: &str) -> String {
        let mut out = Vec::new();
        drive(input.as_bytes(), &mut out, Duration::ZERO)
            .await
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn numbered_answers_reach_the_results_screen() {
        let out = transcript("\n2\n3\n1\n2\nq\n").await;

        assert!(out.contains("Step 1/4"));
        assert!(out.contains("-> Corporate / M&A"));
        assert!(out.contains("-> International"));
        assert!(out.contains("[!!] Structural Threat"));
        assert!(out.contains("Asymmetry index:  40/100"));
    }

    #[tokio::test]
    async fn typed_values_and_unspecified_reach_are_accepted() {
        let out = transcript("\ntax_litigation\nsmall\nunspecified\npremium\nq\n").await;

        assert!(out.contains("-> unspecified"));
        assert!(out.contains("Low Pressure"));
        assert!(out.contains("85/100"));
    }

    #[tokio::test]
    async fn bad_choice_is_reported_and_the_step_repeats() {
        let out = transcript("\n9\n1\nq\n").await;

        assert!(out.contains("unknown value '9' for category 'spec'"));
        assert!(out.contains("-> Tax Litigation"));
        assert!(out.contains("Step 2/4"));
    }

    #[tokio::test]
    async fn restart_returns_to_the_intro() {
        let out = transcript("\n1\n1\n2\n1\nr\n").await;

        assert_eq!(out.matches("Big 4 Encirclement Diagnostic").count(), 2);
    }

    #[tokio::test]
    async fn end_of_input_exits_cleanly() {
        let out = transcript("\n1\n").await;
        assert!(out.contains("Step 2/4"));
    }

    #[tokio::test]
    async fn input_arriving_later_does_not_stall_the_runtime() {
        // Single-threaded runtime: the feeder task only runs if `drive`
        // yields while waiting for input.
        let (mut feeder, reader) = tokio::io::duplex(64);
        let feed = tokio::spawn(async move {
            for line in ["\n", "3\n", "2\n", "2\n", "2\n", "q\n"] {
                tokio::task::yield_now().await;
                feeder.write_all(line.as_bytes()).await.unwrap();
            }
        });

        let mut out = Vec::new();
        drive(tokio::io::BufReader::new(reader), &mut out, Duration::ZERO)
            .await
            .unwrap();
        feed.await.unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("-> ESG Advisory"));
        assert!(out.contains("Asymmetry index:  75/100"));
    }

    #[test]
    fn terminal_hint_points_at_scripted_alternative() {
        assert!(TERMINAL_HINT.contains("flank score"));
    }
}
