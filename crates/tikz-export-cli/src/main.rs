//! tikz-export CLI - Convert plot scenes to PGF/TikZ

mod cli;

use clap::Parser;

fn main() {
    let cli_args = cli::Cli::parse();

    let mut app = cli::TikzExportApp::new();

    if let Err(e) = app.run(cli_args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
