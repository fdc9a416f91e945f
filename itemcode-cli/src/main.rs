use clap::{CommandFactory, Parser};
use itemcode_cli::commands::{Cli, Commands};
use itemcode_cli::context::{ItemcodeCliContext, apply_overrides, load_config};
use itemcode_cli::handlers::*;
use itemcode_cli::output::{output_error, print_json};
use serde_json::json;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Determine output format - priority: machine flag > env var > cli arg > default
    let output_format = cli.output_format();

    match run(cli, &output_format).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output_error(&e, &output_format);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, output_format: &str) -> itemcode::Result<()> {
    match &cli.command {
        Commands::Version => {
            if output_format == "json" {
                print_json(&json!({ "name": "itemcode-cli", "version": itemcode::VERSION }));
            } else {
                println!("ItemCode CLI v{}", itemcode::VERSION);
            }
            return Ok(());
        }
        Commands::Completions(args) => {
            let mut command = Cli::command();
            clap_complete::generate(args.shell, &mut command, "itemcode-cli", &mut std::io::stdout());
            return Ok(());
        }
        _ => {}
    }

    let is_quiet = cli.quiet
        || std::env::var("ITEMCODE_QUIET")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

    // Machine mode keeps stderr free of anything but errors
    let log_level = if is_quiet || output_format == "json" {
        Level::ERROR
    } else if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };

    let config = load_config(cli.config_file.as_deref(), cli.models_dir.as_deref())?;
    let config = apply_overrides(config, &cli.command)?;

    // A configured log file takes over; otherwise log to stderr
    let _guard = if config.logging.file.is_some() {
        itemcode::logging::init(&config.logging)?
    } else {
        let filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::from_level(log_level).into())
            .from_env_lossy();
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
        None
    };

    let ctx = ItemcodeCliContext::new(config)?;

    match cli.command {
        Commands::Train(args) => {
            handle_train_command(args, &ctx, output_format)?;
        }
        Commands::Extract(args) => {
            handle_extract_command(args, &ctx, output_format)?;
        }
        Commands::ExtractText(args) => {
            handle_extract_text_command(args, &ctx, output_format)?;
        }
        Commands::Brands(cmd) => {
            handle_brand_command(cmd, &ctx, output_format)?;
        }
        Commands::Fetch(args) => {
            handle_fetch_command(args, &ctx, output_format).await?;
        }
        Commands::Config(cmd) => {
            handle_config_command(cmd, &ctx, output_format)?;
        }
        Commands::Version | Commands::Completions(_) => {}
    }

    Ok(())
}
