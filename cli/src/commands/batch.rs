//! `batch` 命令：读取 xlsx，逐个校验，写出结果工作簿

use indicatif::{ProgressBar, ProgressStyle};

use crate::commands::cli::BatchArgs;
use vatcheck_core::api::{
    collect_identifiers, write_results, CliError, ResultSet, Services, Upload, LABEL_INVALID_NIP,
};

pub async fn handle_batch(
    args: BatchArgs,
    services: &Services,
    max_identifiers: usize,
) -> Result<(), CliError> {
    let bytes = tokio::fs::read(&args.input).await?;
    let file_name = args
        .input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let identifiers = collect_identifiers(
        None,
        Some(Upload {
            file_name: &file_name,
            bytes: &bytes,
        }),
        max_identifiers,
    )?;

    let bar = progress_bar(identifiers.len(), !args.quiet && atty::is(atty::Stream::Stderr));
    let results = services
        .verifier
        .verify_all_with_progress(&identifiers, |done, _| bar.set_position(done as u64))
        .await;
    bar.finish_and_clear();

    let workbook = write_results(&results)?;
    tokio::fs::write(&args.output, workbook).await?;

    let summary = summarize(&results);
    tracing::info!(
        target: "vatcheck.batch",
        input = %args.input.display(),
        output = %args.output.display(),
        total = summary.total,
        invalid = summary.invalid,
        "batch written"
    );
    eprintln!(
        "{} NIP → {} ({} nieprawidłowych)",
        summary.total,
        args.output.display(),
        summary.invalid
    );
    Ok(())
}

fn progress_bar(total: usize, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new(total as u64);
    if let Ok(style) =
        ProgressStyle::default_bar().template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} NIP")
    {
        bar.set_style(style.progress_chars("█▓▒░  "));
    }
    bar
}

#[derive(Debug, PartialEq, Eq)]
struct Summary {
    total: usize,
    invalid: usize,
}

fn summarize(results: &ResultSet) -> Summary {
    Summary {
        total: results.len(),
        invalid: results
            .iter()
            .filter(|r| r.label == LABEL_INVALID_NIP)
            .count(),
    }
}
