pub mod args;
pub mod commands;
pub mod context;
pub mod handlers;
pub mod output;

pub use commands::Cli;
pub use context::{ItemcodeCliContext, apply_overrides, load_config};
pub use output::{
    CliColors, epoch_loss_lines, format_error, format_info, format_success, format_warning, output_error,
    print_brand_info, print_brand_list, print_codes, print_detailed_codes, print_json,
};
