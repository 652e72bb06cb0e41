mod cli;
mod logging;

use clap::Parser;

use crate::cli::Cli;

fn main() {
    logging::init_logging_stderr();

    let cli = Cli::parse();
    match cli.build() {
        Ok(builder) => println!("{builder}"),
        Err(err) => {
            eprintln!("url-buildr error: {err:#}");
            std::process::exit(1);
        }
    }
}
