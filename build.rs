// build.rs

use clap::{Arg, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

fn build_cli() -> Command {
    Command::new("recipe-box")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Recipe Box Contributors")
        .about("In-memory recipe service with a CRUD HTTP API")
        .subcommand_required(true)
        .subcommand(
            Command::new("serve")
                .about("Start the recipe server")
                .arg(
                    Arg::new("config")
                        .short('c')
                        .long("config")
                        .value_name("PATH")
                        .help("Path to a TOML config file"),
                )
                .arg(
                    Arg::new("bind")
                        .short('b')
                        .long("bind")
                        .value_name("ADDR")
                        .help("Address to bind to (host:port), overrides the config file"),
                ),
        )
        .subcommand(
            Command::new("check-config")
                .about("Load and validate a config file")
                .arg(Arg::new("path").required(true).help("Path to the TOML config file")),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=CARGO_MANIFEST_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = manifest_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();

    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    if let Err(e) = fs::write(man_dir.join("recipe-box.1"), buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
    }
}
