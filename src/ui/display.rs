//! Outcome table and batch summary rendering.

use bytesize::ByteSize;
use comfy_table::Table;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use console::style;

use crate::types::{FileOutcome, Mode, OutcomeStatus, Summary};

/// Prints the per-file outcome table and the summary line for one batch.
pub fn show_outcomes(mode: Mode, outcomes: &[FileOutcome]) {
    if outcomes.is_empty() {
        println!("{}", style("no eligible files found").yellow());
        return;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Status", "Source", "Output", "Detail"]);

    for outcome in outcomes {
        let (status, detail) = describe(&outcome.status);
        table.add_row(vec![
            status.to_owned(),
            outcome.source.display().to_string(),
            outcome.output.display().to_string(),
            detail,
        ]);
    }

    println!("{table}");
    show_summary(mode, &Summary::tally(outcomes));
}

fn describe(status: &OutcomeStatus) -> (&'static str, String) {
    match status {
        OutcomeStatus::Done { bytes_in, removed_source: true } => ("done", format!("{}, source removed", ByteSize::b(*bytes_in))),
        OutcomeStatus::Done { bytes_in, removed_source: false } => ("done", ByteSize::b(*bytes_in).to_string()),
        OutcomeStatus::Planned => ("dry-run", "would write".to_owned()),
        OutcomeStatus::SkippedExists => ("skipped", "output already exists".to_owned()),
        OutcomeStatus::Failed(e) => ("failed", e.to_string()),
    }
}

fn show_summary(mode: Mode, summary: &Summary) {
    let line = format!(
        "{} {}, {} skipped, {} failed",
        summary.done + summary.planned,
        if summary.planned > 0 { "planned" } else { mode.acted() },
        summary.skipped,
        summary.failed,
    );

    if summary.failed > 0 {
        println!("{} {}", style("✗").red(), style(line).bold());
    } else {
        println!("{} {}", style("✓").green(), style(line).bold());
    }
}
