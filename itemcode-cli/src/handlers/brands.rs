//! Brand management command handlers

use crate::commands::BrandCommands;
use crate::context::ItemcodeCliContext;
use crate::output::*;
use colored::*;
use serde_json::json;
use std::io::{self, Write};

pub fn handle_brand_command(
    cmd: BrandCommands,
    ctx: &ItemcodeCliContext,
    output_format: &str,
) -> itemcode::Result<()> {
    match cmd {
        BrandCommands::List => {
            let brands = ctx.manager.brands()?;
            if output_format == "json" {
                print_json(&json!({ "brands": brands, "count": brands.len() }));
            } else {
                print_brand_list(&brands);
            }
        }

        BrandCommands::Show(args) => {
            let info = ctx.manager.brand_info(&args.brand)?;
            if output_format == "json" {
                print_json(&info);
            } else {
                print_brand_info(&info);
            }
        }

        BrandCommands::Codes(args) => {
            // surfaces BrandNotFound for unknown brands
            let info = ctx.manager.brand_info(&args.brand)?;
            let codes = ctx.manager.registry().store().load_codes(&info.name)?;
            if output_format == "json" {
                print_json(&json!({ "brand": info.name, "codes": codes }));
            } else {
                print_code_list(&info.name, &codes);
            }
        }

        BrandCommands::Delete(args) => {
            if !args.yes && output_format != "json" && !confirm_delete(&args.brand)? {
                println!("{}", format_info("Deletion cancelled"));
                return Ok(());
            }

            let deleted = ctx.manager.delete_brand(&args.brand)?;
            if output_format == "json" {
                print_json(&json!({ "brand": args.brand, "deleted": deleted }));
            } else if deleted {
                println!(
                    "{}",
                    format_success(&format!("Deleted brand '{}'", args.brand))
                );
            } else {
                println!(
                    "{}",
                    format_warning(&format!("Brand '{}' does not exist", args.brand))
                );
            }
        }
    }

    Ok(())
}

fn confirm_delete(brand: &str) -> itemcode::Result<bool> {
    print!(
        "{} ",
        format!(
            "Delete the model and code list of '{}'? Type 'yes' to confirm:",
            brand
        )
        .color(CliColors::warning())
    );
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "yes" | "y"))
}
