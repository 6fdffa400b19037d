//! `check` 命令：校验命令行给出的 NIP，每个结果一行输出到 stdout

use std::io::Write;

use crate::commands::cli::CheckArgs;
use vatcheck_core::api::{CliError, Services, VerificationResult};

pub async fn handle_check(args: CheckArgs, services: &Services) -> Result<(), CliError> {
    let results = services.verifier.verify_all(&args.nips).await;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for r in &results {
        writeln!(out, "{}", format_line(r, args.json)?)?;
    }
    out.flush()?;
    Ok(())
}

fn format_line(r: &VerificationResult, json: bool) -> Result<String, CliError> {
    if json {
        serde_json::to_string(r).map_err(|e| CliError::Command(e.to_string()))
    } else {
        Ok(r.as_row().join("\t"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line_tab_separated() {
        let r = VerificationResult::new("1234567819", "ACME", "Czynny");
        assert_eq!(format_line(&r, false).unwrap(), "1234567819\tACME\tCzynny");
    }

    #[test]
    fn test_format_line_json() {
        let r = VerificationResult::invalid("12");
        assert_eq!(
            format_line(&r, true).unwrap(),
            r#"{"nip":"12","label":"Nieprawidłowy NIP","status":"Błąd"}"#
        );
    }
}
