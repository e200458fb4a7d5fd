use std::io::Write;

use clap::Args;
use flank_core::{Category, Presenter, Report, WizardError, WizardSession};
use serde::Serialize;

use crate::render::TerminalPresenter;
use crate::util::write_error;

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    /// Specialization (tax_litigation, corporate_ma, esg_advisory, audit_assurance)
    #[arg(long)]
    pub spec: String,
    /// Firm size (small, medium, large)
    #[arg(long)]
    pub size: String,
    /// International reach (global, local, unspecified)
    #[arg(long, default_value = "unspecified")]
    pub intl: String,
    /// Pricing tier (premium, other)
    #[arg(long)]
    pub pricing: String,
    /// Output format
    #[arg(long, default_value = "json", value_parser = ["json", "text"])]
    pub format: String,
    /// Compact single-line JSON
    #[arg(long)]
    pub raw: bool,
}

/// JSON envelope for one-shot scoring.
#[derive(Debug, Serialize)]
pub struct ScoredSession {
    pub session_id: String,
    pub started_at: String,
    pub report: Report,
}

/// Answer all four questions in one go and print the report.
pub fn run(args: ScoreArgs) -> i32 {
    run_with(&args, &mut std::io::stdout(), &mut std::io::stderr())
}

/// Exit codes: 0=success, 1=invalid answer, 2=output failed.
pub fn run_with<O: Write, E: Write>(args: &ScoreArgs, out: &mut O, err: &mut E) -> i32 {
    let scored = match score_session(args) {
        Ok(scored) => scored,
        Err(e) => {
            write_error(err, &e.to_body());
            return 1;
        }
    };

    let written = if args.format == "text" {
        let mut results = TerminalPresenter::default();
        results.render_results(&scored.report);
        out.write_all(results.take().as_bytes())
    } else {
        let serialized = if args.raw {
            serde_json::to_writer(&mut *out, &scored)
        } else {
            serde_json::to_writer_pretty(&mut *out, &scored)
        };
        serialized
            .map_err(std::io::Error::from)
            .and_then(|()| writeln!(out))
    };

    match written.and_then(|()| out.flush()) {
        Ok(()) => 0,
        Err(e) => {
            tracing::error!(error = %e, "failed to write report");
            2
        }
    }
}

/// Drive a fresh session through all four steps with the given answers.
pub fn score_session(args: &ScoreArgs) -> Result<ScoredSession, WizardError> {
    let mut session = WizardSession::new();
    // Step screens are not part of one-shot output.
    let mut presenter = TerminalPresenter::default();
    session.start(&mut presenter);

    let picks = [
        (Category::Specialization, args.spec.as_str()),
        (Category::Size, args.size.as_str()),
        (Category::Reach, args.intl.as_str()),
        (Category::Pricing, args.pricing.as_str()),
    ];
    for (category, value) in picks {
        session.select_option(category.as_str(), value, &mut presenter)?;
    }

    let report = session
        .report()
        .cloned()
        .ok_or_else(|| WizardError::Incomplete {
            missing: session.answers().missing(),
        })?;

    Ok(ScoredSession {
        session_id: session.id().to_string(),
        started_at: session.started_at().to_rfc3339(),
        report,
    })
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    struct ScoreCli {
        #[command(flatten)]
        args: ScoreArgs,
    }

    fn parse(argv: &[&str]) -> ScoreArgs {
        let mut full = vec!["flank"];
        full.extend_from_slice(argv);
        ScoreCli::parse_from(full).args
    }

    fn run_captured(argv: &[&str]) -> (i32, String, String) {
        let args = parse(argv);
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run_with(&args, &mut out, &mut err);
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn json_output_carries_session_and_report() {
        let (code, out, err) = run_captured(&[
            "--spec",
            "corporate_ma",
            "--size",
            "large",
            "--intl",
            "global",
            "--pricing",
            "other",
        ]);

        assert_eq!(code, 0);
        assert!(err.is_empty());
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert!(json["session_id"].is_string());
        assert!(json["started_at"].is_string());
        assert_eq!(json["report"]["threat_level"], "Structural Threat");
        assert_eq!(json["report"]["asymmetry_index"], "40/100");
    }

    #[test]
    fn raw_json_is_a_single_line() {
        let (code, out, _) = run_captured(&[
            "--spec",
            "tax_litigation",
            "--size",
            "small",
            "--pricing",
            "premium",
            "--raw",
        ]);
        assert_eq!(code, 0);
        assert_eq!(out.trim_end().lines().count(), 1);
    }

    #[test]
    fn reach_defaults_to_unspecified() {
        let args = parse(&["--spec", "audit_assurance", "--size", "medium", "--pricing", "other"]);
        assert_eq!(args.intl, "unspecified");

        let scored = score_session(&args).unwrap();
        assert_eq!(scored.report.answers.reach, flank_core::Reach::Unspecified);
        // 0.57 + 0.36, no reach modifier
        assert!((scored.report.score.threat_score - 0.93).abs() < 1e-9);
    }

    #[test]
    fn text_output_prints_only_the_results_view() {
        let (code, out, _) = run_captured(&[
            "--spec",
            "tax_litigation",
            "--size",
            "small",
            "--intl",
            "local",
            "--pricing",
            "premium",
            "--format",
            "text",
        ]);

        assert_eq!(code, 0);
        assert!(out.contains("[ok] Low Pressure"));
        assert!(out.contains("Asymmetry index:  85/100"));
        assert!(!out.contains("Step 1/4"));
    }

    #[test]
    fn unknown_spec_exits_1_with_structured_error() {
        let (code, out, err) = run_captured(&[
            "--spec",
            "forensics",
            "--size",
            "small",
            "--pricing",
            "premium",
        ]);

        assert_eq!(code, 1);
        assert!(out.is_empty());
        let body: serde_json::Value = serde_json::from_str(&err).unwrap();
        assert_eq!(body["error"], "unknown_value");
        assert_eq!(body["field"], "spec");
        assert_eq!(body["received"], "forensics");
    }

    #[test]
    fn unknown_size_exits_1_with_valid_values_hint() {
        let (code, _, err) = run_captured(&[
            "--spec",
            "esg_advisory",
            "--size",
            "huge",
            "--pricing",
            "other",
        ]);

        assert_eq!(code, 1);
        let body: serde_json::Value = serde_json::from_str(&err).unwrap();
        assert_eq!(body["field"], "size");
        assert_eq!(body["docs_hint"], "Valid values: small, medium, large");
    }
}
