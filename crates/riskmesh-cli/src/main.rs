use clap::Parser;

use riskmesh_cli::{run, Cli};

fn main() {
    riskmesh_core::tracing::init_tracing();
    let cli = Cli::parse();
    std::process::exit(run(&cli).code());
}
