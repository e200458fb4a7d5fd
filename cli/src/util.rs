use std::io::Write;

use flank_core::error::ErrorBody;
use serde_json::json;

/// Write a structured error, pretty-printed, to `w` (stderr in production).
pub fn write_error<W: Write>(w: &mut W, body: &ErrorBody) {
    let written = match serde_json::to_string_pretty(body) {
        Ok(formatted) => writeln!(w, "{formatted}"),
        Err(_) => writeln!(w, "{}: {}", body.error, body.message),
    };
    if let Err(e) = written {
        tracing::warn!(error = %e, "could not write error output");
    }
}

pub fn cli_error_body(message: &str, docs_hint: Option<&str>) -> serde_json::Value {
    let mut err = json!({
        "error": "cli_error",
        "message": message
    });
    if let Some(hint) = docs_hint {
        err["docs_hint"] = json!(hint);
    }
    err
}

pub fn exit_error(message: &str, docs_hint: Option<&str>) -> ! {
    eprintln!("{:#}", cli_error_body(message, docs_hint));
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_error_body_includes_hint_only_when_given() {
        let with_hint = cli_error_body("terminal I/O failed", Some("check stdin"));
        assert_eq!(with_hint["error"], "cli_error");
        assert_eq!(with_hint["docs_hint"], "check stdin");

        let without = cli_error_body("terminal I/O failed", None);
        assert!(without.get("docs_hint").is_none());
    }

    #[test]
    fn write_error_emits_parseable_json() {
        let body = flank_core::WizardError::UnknownCategory("budget".to_string()).to_body();
        let mut out = Vec::new();
        write_error(&mut out, &body);

        let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed["error"], "unknown_category");
        assert_eq!(parsed["received"], "budget");
    }
}
