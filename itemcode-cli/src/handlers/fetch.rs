//! Item number fetch command handler

use crate::args::FetchArgs;
use crate::context::ItemcodeCliContext;
use crate::output::*;
use itemcode::core::SheetFetchSummary;
use itemcode::fetch::FetchOutcome;

pub async fn handle_fetch_command(
    args: FetchArgs,
    ctx: &ItemcodeCliContext,
    output_format: &str,
) -> itemcode::Result<SheetFetchSummary> {
    let pb = progress_spinner(output_format);

    let result = ctx
        .manager
        .fetch_sheet(&args.input, args.output_file.as_deref(), |row, outcome| {
            match outcome {
                FetchOutcome::Found { item_number, .. } => {
                    tracing::debug!(row, %item_number, "Item number found");
                }
                FetchOutcome::NotFound { .. } => {
                    tracing::warn!(row, "No item number on page");
                }
                FetchOutcome::Failed { attempts, error } => {
                    tracing::warn!(row, attempts, %error, "Page could not be fetched");
                }
            }
            if let Some(pb) = &pb {
                pb.inc(1);
                pb.set_message(format!("row {}", row + 1));
            }
        })
        .await;

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    let summary = result?;

    if output_format == "json" {
        print_json(&summary);
    } else {
        print_fetch_summary(&summary);
    }
    Ok(summary)
}
