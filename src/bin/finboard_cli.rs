use clap::Parser;
use finboard_core::{
    cli::{run, Cli},
    init,
};

fn main() {
    let cli = Cli::parse();
    init();

    let stdout = std::io::stdout();
    if let Err(err) = run(cli, &mut stdout.lock()) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
