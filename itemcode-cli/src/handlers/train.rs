//! Training command handler

use crate::args::TrainArgs;
use crate::context::ItemcodeCliContext;
use crate::output::*;
use itemcode::ItemcodeError;
use itemcode::prelude::*;

pub fn handle_train_command(
    args: TrainArgs,
    ctx: &ItemcodeCliContext,
    output_format: &str,
) -> itemcode::Result<TrainingReport> {
    let mode: TrainingMode = args
        .mode
        .parse()
        .map_err(ItemcodeError::Configuration)?;

    let codes = match &args.file {
        Some(path) => ctx.manager.load_codes_from_sheet(path)?,
        None => itemcode::training::clean_code_list(&args.codes),
    };

    tracing::info!(brand = %args.brand, codes = codes.len(), %mode, "Training brand");

    let epochs = ctx.manager.config().training.epochs;
    let pb = progress_bar(epochs as u64, output_format);
    if let Some(pb) = &pb {
        pb.set_message(format!("training {}", args.brand));
    }

    let result = ctx.manager.train_brand(&args.brand, &codes, mode, |epoch| {
        tracing::debug!(
            epoch = epoch.epoch,
            epochs = epoch.epochs,
            loss = epoch.loss,
            "Finished epoch"
        );
        if let Some(pb) = &pb {
            pb.set_position(epoch.epoch as u64);
            pb.set_message(format!("loss {}", epoch.loss));
        }
    });

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    let report = result?;

    if output_format == "json" {
        print_json(&report);
    } else {
        print_training_report(&report);
    }
    Ok(report)
}
