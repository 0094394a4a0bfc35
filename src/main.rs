//! Pickr CLI application entry point
//!
//! Reads candidate items from a file or stdin and lets the user fuzzy pick
//! among them.
//!
//! # Usage
//!
//! ```bash
//! # Pick one line from stdin, print it to stdout
//! ls | pickr
//!
//! # Items as `id<TAB>name`, start with a query, collect several choices
//! pickr commands.tsv -q open --multi
//!
//! # JSON items with keywords
//! pickr --json commands.json
//!
//! # Non-interactive ranking
//! pickr commands.tsv --filter sav --output json
//! ```
//!
//! # Exit codes
//!
//! - `0` at least one item was chosen (or filter mode finished)
//! - `130` the picker was dismissed without a choice
//!
//! # Configuration
//!
//! Settings are read from `~/.config/pickr/config.toml` on Linux when the
//! file exists. Command-line flags take precedence.

use pickr::{
    PickrError,
    cli::{Cli, OutputFormat},
    config::PickrConfig,
    item::Item,
    matching::{MappedResult, NucleoEngine},
    picker::{Keymap, Picker, PickerOptions, recompute},
    ui::{RatatuiPicker, output},
};
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;

type Result<T> = std::result::Result<T, PickrError>;

/// Exit status when the picker is dismissed without a choice
const EXIT_ABORTED: u8 = 130;

/// Rank items for a query and print them without opening the TUI
fn run_filter(
    items: &[Item],
    config: &PickrConfig,
    query: &str,
    format: OutputFormat,
) -> Result<ExitCode> {
    // A blank filter lists every item in input order
    let results: Vec<MappedResult> = if query.trim().is_empty() {
        items.iter().map(MappedResult::unranked).collect()
    } else {
        let mut engine = NucleoEngine::new(config.matching.clone());
        recompute(items, &mut engine, query)
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Text => output::write_text(&mut out, &results, stdout.is_terminal())?,
        OutputFormat::Json => output::write_json(&mut out, &results)?,
    }
    out.flush()?;
    Ok(ExitCode::SUCCESS)
}

/// Open the TUI and print the chosen ids
fn run_interactive(items: Vec<Item>, config: &PickrConfig, query: &str) -> Result<ExitCode> {
    let engine = NucleoEngine::new(config.matching.clone());
    let picker = Picker::new(items, engine).with_options(PickerOptions {
        close_on_choose: config.picker.close_on_choose,
    });

    let finder = RatatuiPicker::new()
        .with_keymap(Keymap::with_binds(&config.bind))
        .with_prompt(config.picker.prompt.clone())
        .with_mouse(config.picker.mouse)
        .with_search(config.picker.show_search)
        .with_theme(config.picker.theme.into());

    let outcome = finder.run(picker, query)?;
    if outcome.aborted {
        log::debug!("picker dismissed without a choice");
        return Ok(ExitCode::from(EXIT_ABORTED));
    }

    let mut out = io::stdout().lock();
    for item in &outcome.chosen {
        writeln!(out, "{}", item.id)?;
    }
    out.flush()?;
    Ok(ExitCode::SUCCESS)
}

fn main() -> Result<ExitCode> {
    env_logger::init();

    let cli = Cli::parse_args();
    cli.validate()?;

    let mut config = cli.load_config()?;
    cli.apply_to(&mut config);

    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(ExitCode::SUCCESS);
    }

    let items = cli.read_items()?;

    match &cli.filter {
        Some(query) => run_filter(&items, &config, query, cli.output),
        None => {
            if items.is_empty() {
                log::warn!("no items to pick from");
                return Ok(ExitCode::from(EXIT_ABORTED));
            }
            run_interactive(items, &config, &cli.query)
        }
    }
}
