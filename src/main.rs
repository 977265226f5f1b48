//! tdgen CLI — batch TableGen JSON extraction.

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "tdgen",
    version,
    about = "Resolve each LLVM target's grammar closure and drive llvm-tblgen in parallel"
)]
struct Cli {
    #[command(subcommand)]
    command: tdgen::cli::Commands,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = tdgen::cli::dispatch(cli.command) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
