//! Flowcanvas CLI - terminal workflow editor

use clap::Parser;
use colored::Colorize;

use flowcanvas::error::FixSuggestion;
use flowcanvas::store::WorkflowStore;
use flowcanvas::{sample, tui};

#[derive(Parser)]
#[command(name = "flowcanvas")]
#[command(about = "Terminal visual editor for node-and-edge workflows")]
#[command(version)]
struct Cli {
    /// Print the built-in sample graph as JSON and exit
    #[arg(long)]
    print_sample: bool,
}

fn main() {
    // Initialize tracing; silent unless RUST_LOG is set, so log output
    // never bleeds into the alternate screen.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.print_sample {
        match sample::to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("{} {}", "Error:".red().bold(), e);
                if let Some(suggestion) = e.fix_suggestion() {
                    eprintln!("  {} {}", "Fix:".yellow(), suggestion);
                }
                std::process::exit(1);
            }
        }
        return;
    }

    let store = WorkflowStore::new(sample::nodes(), sample::edges());
    if let Err(e) = tui::run(store) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}
