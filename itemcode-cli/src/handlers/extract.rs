//! Extraction command handlers

use crate::args::{ExtractArgs, ExtractTextArgs};
use crate::context::ItemcodeCliContext;
use crate::output::*;
use itemcode::core::ExtractionSummary;
use serde_json::json;

pub fn handle_extract_command(
    args: ExtractArgs,
    ctx: &ItemcodeCliContext,
    output_format: &str,
) -> itemcode::Result<ExtractionSummary> {
    let pb = progress_bar(0, output_format);

    let result = ctx.manager.extract_sheet(
        &args.brand,
        &args.input,
        args.output_file.as_deref(),
        args.threshold,
        |index, total| {
            if let Some(pb) = &pb {
                pb.set_length(total as u64);
                pb.set_position(index as u64 + 1);
            }
        },
    );

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    let summary = result?;

    if output_format == "json" {
        print_json(&summary);
    } else {
        print_extraction_summary(&summary);
    }
    Ok(summary)
}

pub fn handle_extract_text_command(
    args: ExtractTextArgs,
    ctx: &ItemcodeCliContext,
    output_format: &str,
) -> itemcode::Result<()> {
    let mut results = Vec::with_capacity(args.texts.len());

    for text in &args.texts {
        if args.detailed {
            let codes = ctx
                .manager
                .extract_detailed(&args.brand, text, args.threshold)?;
            if output_format == "json" {
                results.push(json!({ "text": text, "codes": codes }));
            } else {
                print_detailed_codes(text, &codes);
            }
        } else {
            let codes = match args.threshold {
                Some(threshold) => {
                    ctx.manager
                        .extract_with_threshold(&args.brand, text, threshold)?
                }
                None => ctx.manager.extract(&args.brand, text)?,
            };
            if output_format == "json" {
                results.push(json!({ "text": text, "codes": codes }));
            } else {
                print_codes(text, &codes);
            }
        }
    }

    if output_format == "json" {
        print_json(&json!({ "brand": args.brand, "results": results }));
    }
    Ok(())
}
