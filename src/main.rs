use anyhow::Result;
use clap::{crate_version, App, AppSettings, Arg, SubCommand};
use readshelf::build::build_site;
use readshelf::config::Config;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("readshelf=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let matches = App::new("readshelf")
        .version(crate_version!())
        .about("Renders the favorite-reads section of a personal site")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("build")
                .about("Builds the section pages from a project directory")
                .arg(
                    Arg::with_name("PROJECT_DIR")
                        .help("The project directory (or any of its subdirectories)")
                        .index(1),
                )
                .arg(
                    Arg::with_name("output")
                        .short("o")
                        .long("output")
                        .takes_value(true)
                        .help("The output directory [default: _site]"),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        ("build", Some(build)) => {
            let project_dir = match build.value_of("PROJECT_DIR") {
                Some(dir) => PathBuf::from(dir),
                None => std::env::current_dir()?,
            };
            let output_directory =
                PathBuf::from(build.value_of("output").unwrap_or("_site"));
            let config = Config::from_directory(&project_dir, &output_directory)?;
            build_site(&config)?;
            Ok(())
        }
        _ => unreachable!("a subcommand is required"),
    }
}
