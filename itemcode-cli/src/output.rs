use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use is_terminal::IsTerminal;
use itemcode::ItemcodeError;
use itemcode::core::{ExtractionSummary, SheetFetchSummary};
use itemcode::prelude::{BrandInfo, ExtractedCode, MatchSource, TrainingReport};
use serde::Serialize;
use serde_json::json;

pub struct CliColors;

impl CliColors {
    pub fn success() -> Color {
        Color::TrueColor {
            r: 34,
            g: 197,
            b: 94,
        }
    }

    pub fn error() -> Color {
        Color::TrueColor {
            r: 239,
            g: 68,
            b: 68,
        }
    }

    pub fn warning() -> Color {
        Color::TrueColor {
            r: 245,
            g: 158,
            b: 11,
        }
    }

    pub fn info() -> Color {
        Color::TrueColor {
            r: 59,
            g: 130,
            b: 246,
        }
    }

    pub fn code() -> Color {
        Color::TrueColor {
            r: 168,
            g: 85,
            b: 247,
        }
    }

    pub fn muted() -> Color {
        Color::TrueColor {
            r: 148,
            g: 163,
            b: 184,
        }
    }

    pub fn primary() -> Color {
        Color::White
    }

    pub fn accent() -> Color {
        Color::TrueColor {
            r: 59,
            g: 130,
            b: 246,
        }
    }
}

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    );
}

/// Machine-readable code and optional details of an error
pub fn error_code(error: &ItemcodeError) -> (&'static str, Option<serde_json::Value>) {
    match error {
        ItemcodeError::Configuration(_) => ("CONFIGURATION_ERROR", None),
        ItemcodeError::Logging(_) => ("LOGGING_ERROR", None),
        ItemcodeError::Model(_) => ("MODEL_ERROR", None),
        ItemcodeError::InvalidBrandName { name } => {
            ("INVALID_BRAND_NAME", Some(json!({ "brand": name })))
        }
        ItemcodeError::BrandNotFound { brand } => (
            "BRAND_NOT_FOUND",
            Some(json!({
                "brand": brand,
                "hint": "Train the brand first with: itemcode-cli train <brand> --file <codes.xlsx>"
            })),
        ),
        ItemcodeError::EmptyCodeList => ("EMPTY_CODE_LIST", None),
        ItemcodeError::Spreadsheet(_) => ("SPREADSHEET_ERROR", None),
        ItemcodeError::MissingColumn { column } => {
            ("MISSING_COLUMN", Some(json!({ "column": column })))
        }
        ItemcodeError::UnsupportedFormat { path } => {
            ("UNSUPPORTED_FORMAT", Some(json!({ "path": path })))
        }
        ItemcodeError::Fetch(_) => ("FETCH_ERROR", None),
        ItemcodeError::Io(_) => ("IO_ERROR", None),
        ItemcodeError::Other(_) => ("OTHER_ERROR", None),
    }
}

/// Output an ItemcodeError in the requested format
pub fn output_error(error: &ItemcodeError, output_format: &str) {
    if output_format == "json" {
        let (code, details) = error_code(error);
        let mut error_response = json!({
            "error": true,
            "code": code,
            "message": error.to_string(),
            "timestamp": chrono::Utc::now().to_rfc3339()
        });

        if let Some(details) = details {
            error_response["details"] = details;
        }

        eprintln!(
            "{}",
            serde_json::to_string_pretty(&error_response).unwrap_or_else(|_| "{}".to_string())
        );
    } else {
        eprintln!("{}", format_error(&error.to_string()));
    }
}

pub fn format_success(msg: &str) -> String {
    format!(
        "{} {}",
        "✓".color(CliColors::success()).bold(),
        msg.color(CliColors::success())
    )
}

pub fn format_error(msg: &str) -> String {
    format!(
        "{} {}",
        "✗".color(CliColors::error()).bold(),
        msg.color(CliColors::error())
    )
}

pub fn format_warning(msg: &str) -> String {
    format!(
        "{} {}",
        "⚠".color(CliColors::warning()).bold(),
        msg.color(CliColors::warning())
    )
}

pub fn format_info(msg: &str) -> String {
    format!(
        "{} {}",
        "ℹ".color(CliColors::info()).bold(),
        msg.color(CliColors::info())
    )
}

pub fn format_source(source: MatchSource) -> ColoredString {
    match source {
        MatchSource::Ner => "ner".color(CliColors::accent()),
        MatchSource::Similarity => "similarity".color(CliColors::warning()),
    }
}

/// Progress bar for row-by-row work, only on an interactive terminal with text output
pub fn progress_bar(len: u64, output_format: &str) -> Option<ProgressBar> {
    if output_format == "json" || !std::io::stdout().is_terminal() {
        return None;
    }

    let pb = ProgressBar::new(len);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    Some(pb)
}

/// Spinner for work of unknown length, under the same conditions as [`progress_bar`]
pub fn progress_spinner(output_format: &str) -> Option<ProgressBar> {
    if output_format == "json" || !std::io::stdout().is_terminal() {
        return None;
    }

    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.green} [{elapsed_precise}] {pos} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.enable_steady_tick(std::time::Duration::from_millis(120));
    Some(pb)
}

pub fn print_codes(text: &str, codes: &[String]) {
    println!("{}", text.color(CliColors::primary()).bold());
    if codes.is_empty() {
        println!("  {}", "no codes found".color(CliColors::muted()));
    } else {
        for code in codes {
            println!("  {}", code.color(CliColors::code()).bold());
        }
    }
}

pub fn print_detailed_codes(text: &str, codes: &[ExtractedCode]) {
    println!("{}", text.color(CliColors::primary()).bold());
    if codes.is_empty() {
        println!("  {}", "no codes found".color(CliColors::muted()));
        return;
    }

    for code in codes {
        let sources: Vec<String> = code
            .sources
            .iter()
            .map(|source| format_source(*source).to_string())
            .collect();
        let mut line = format!(
            "  {} [{}]",
            code.text.color(CliColors::code()).bold(),
            sources.join(", ")
        );
        if let Some(score) = code.score {
            line.push_str(&format!(
                " {}",
                format!("score {:.3}", score).color(CliColors::muted())
            ));
        }
        if let Some(matched) = code.matched_code.as_ref().filter(|m| **m != code.text) {
            line.push_str(&format!(
                " {}",
                format!("≈ {}", matched).color(CliColors::muted())
            ));
        }
        println!("{}", line);
    }
}

pub fn print_brand_list(brands: &[String]) {
    if brands.is_empty() {
        println!("{}", format_info("No trained brands"));
        return;
    }

    println!(
        "{}",
        format!("Trained brands ({})", brands.len())
            .color(CliColors::accent())
            .bold()
    );
    println!("{}", "─".repeat(40).color(CliColors::muted()));
    for brand in brands {
        println!("  {}", brand.color(CliColors::primary()));
    }
}

pub fn print_brand_info(info: &BrandInfo) {
    println!(
        "{}",
        "━━━ Brand Details ━━━".color(CliColors::accent()).bold()
    );
    println!(
        "{}: {}",
        "Brand".color(CliColors::muted()),
        info.name.color(CliColors::accent()).bold()
    );
    println!(
        "{}: {}",
        "Known codes".color(CliColors::muted()),
        info.code_count
    );
    println!(
        "{}: {}",
        "Label".color(CliColors::muted()),
        info.metadata.label
    );
    println!(
        "{}: {} ({} epochs)",
        "Training runs".color(CliColors::muted()),
        info.metadata.training_runs,
        info.metadata.epochs_trained
    );
    println!(
        "{}: {}",
        "Last examples".color(CliColors::muted()),
        info.metadata.examples_seen
    );
    println!(
        "{}: {}",
        "Created".color(CliColors::muted()),
        info.metadata
            .created_at
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string()
            .color(CliColors::muted())
    );
    println!(
        "{}: {}",
        "Updated".color(CliColors::muted()),
        info.metadata
            .updated_at
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string()
            .color(CliColors::muted())
    );
    println!(
        "{}: {}",
        "Path".color(CliColors::muted()),
        info.path.display()
    );
}

pub fn print_code_list(brand: &str, codes: &[String]) {
    println!(
        "{}",
        format!("Known codes of {} ({})", brand, codes.len())
            .color(CliColors::accent())
            .bold()
    );
    println!("{}", "─".repeat(40).color(CliColors::muted()));
    for code in codes {
        println!("  {}", code.color(CliColors::code()));
    }
}

/// One line per finished epoch, e.g. `Epoch 1/5 loss 12`
pub fn epoch_loss_lines(report: &TrainingReport) -> Vec<String> {
    let epochs = report.epoch_losses.len();
    report
        .epoch_losses
        .iter()
        .enumerate()
        .map(|(index, loss)| format!("Epoch {}/{} loss {}", index + 1, epochs, loss))
        .collect()
}

pub fn print_training_report(report: &TrainingReport) {
    for line in epoch_loss_lines(report) {
        println!("{}", line.color(CliColors::muted()));
    }
    println!(
        "{}",
        format_success(&format!(
            "Trained brand '{}' on {} codes ({} examples, {} epochs, final loss {})",
            report.brand, report.trained_codes, report.examples, report.epochs, report.final_loss
        ))
    );
    if report.resumed {
        println!("{}", format_info("Continued the existing model"));
    }
    println!(
        "{}: {}",
        "Model".color(CliColors::muted()),
        report.model_path.display()
    );
}

pub fn print_extraction_summary(summary: &ExtractionSummary) {
    println!(
        "{}",
        format_success(&format!(
            "Extracted {} codes from {} of {} rows",
            summary.total_codes, summary.rows_with_codes, summary.rows
        ))
    );
    if let Some(path) = &summary.output_path {
        println!("{}: {}", "Output".color(CliColors::muted()), path.display());
    }
}

pub fn print_fetch_summary(result: &SheetFetchSummary) {
    let summary = &result.summary;
    println!(
        "{}",
        format_success(&format!(
            "Fetched {} item numbers from {} rows",
            summary.found, summary.rows
        ))
    );
    if summary.not_found > 0 || summary.failed > 0 {
        println!(
            "{}",
            format_warning(&format!(
                "{} pages without an item number, {} pages failed",
                summary.not_found, summary.failed
            ))
        );
    }
    if summary.skipped > 0 {
        println!(
            "{}",
            format_info(&format!("{} rows without a URL skipped", summary.skipped))
        );
    }
    println!(
        "{}: {}",
        "Output".color(CliColors::muted()),
        result.output_path.display()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let (code, details) = error_code(&ItemcodeError::BrandNotFound {
            brand: "nike".to_string(),
        });
        assert_eq!(code, "BRAND_NOT_FOUND");
        assert_eq!(details.unwrap()["brand"], "nike");

        let (code, details) = error_code(&ItemcodeError::MissingColumn {
            column: "商品名".to_string(),
        });
        assert_eq!(code, "MISSING_COLUMN");
        assert_eq!(details.unwrap()["column"], "商品名");

        assert_eq!(error_code(&ItemcodeError::EmptyCodeList).0, "EMPTY_CODE_LIST");
    }

    #[test]
    fn test_no_progress_bar_for_json() {
        assert!(progress_bar(10, "json").is_none());
    }
}
