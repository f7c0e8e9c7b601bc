//! `find-depot-tools` -- print where depot_tools lives.

use clap::Parser;

use depot_shims::cli::FindDepotToolsCli;
use depot_shims::{locate, logging};

fn main() {
    let cli = FindDepotToolsCli::parse();
    logging::init(cli.verbose);

    let path_var = std::env::var_os("PATH");
    match locate::run(&cli, path_var.as_deref()) {
        Ok(line) => println!("{line}"),
        Err(e) => {
            eprintln!("{e:#}");
            std::process::exit(1);
        }
    }
}
