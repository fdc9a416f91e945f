//! Configuration command handlers

use crate::commands::ConfigCommands;
use crate::context::ItemcodeCliContext;
use crate::output::*;
use colored::*;

pub fn handle_config_command(
    cmd: ConfigCommands,
    ctx: &ItemcodeCliContext,
    output_format: &str,
) -> itemcode::Result<()> {
    match cmd {
        ConfigCommands::Show => {
            let config = ctx.manager.config();
            if output_format == "json" {
                print_json(config);
                return Ok(());
            }

            println!(
                "{}",
                "━━━ Configuration ━━━".color(CliColors::accent()).bold()
            );
            let rows = [
                ("Models directory", config.storage.models_dir.display().to_string()),
                ("Similarity metric", config.extraction.metric.to_string()),
                (
                    "Similarity threshold",
                    config.extraction.similarity_threshold.to_string(),
                ),
                ("Training label", config.training.label.clone()),
                ("Epochs", config.training.epochs.to_string()),
                (
                    "Variants per code",
                    config.training.variants_per_code.to_string(),
                ),
                ("Code column", config.spreadsheet.code_column.clone()),
                ("Title column", config.spreadsheet.title_column.clone()),
                ("Output column", config.spreadsheet.output_column.clone()),
                ("URL column", config.fetch.url_column.clone()),
                ("Item number selector", config.fetch.selector.clone()),
                ("Fetch attempts", config.fetch.max_attempts.to_string()),
            ];
            for (name, value) in rows {
                println!("{}: {}", name.color(CliColors::muted()), value);
            }
        }
    }

    Ok(())
}
