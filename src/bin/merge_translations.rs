//! Merges overlay translations into each language file.

use std::process::ExitCode;

use locale_tools::cli::{
    Tool,
    run_in_current_dir,
};

fn main() -> ExitCode {
    locale_tools::logging::init();
    run_in_current_dir(Tool::Merge)
}
