//! `ishu` binary entry point.

use clap::Parser;
use ishu::cli::{Cli, Commands, commands};
use ishu::config::{self, Config};
use ishu::error::IshuError;
use ishu::logging;
use ishu::store::FsStore;
use std::env;
use std::process;

fn main() {
    // The config has to be read before clap parses anything: aliases
    // rewrite the raw argument vector.
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => handle_error(&e),
    };

    let mut args: Vec<String> = env::args().collect();
    if let Some(config) = &config {
        args = config::expand_alias(config, args);
    }
    let cli = Cli::parse_from(&args);

    if let Err(e) = logging::init_logging(cli.verbose, cli.quiet) {
        handle_error(&e);
    }

    if let Err(e) = run(cli, config) {
        handle_error(&e);
    }
}

fn run(cli: Cli, config: Option<Config>) -> ishu::Result<()> {
    let root = config::discover_root();
    let store = FsStore::new(config::ishu_dir(&root));

    match cli.command {
        // These three work before a tree or config exists.
        Commands::Init => commands::init::execute(&store),
        Commands::Conf(args) => commands::conf::execute(&args, config),
        Commands::Alias(args) => commands::alias::execute(&args, config),

        command => {
            let config = config.ok_or(IshuError::NoConfig)?;
            if !store.is_initialized() {
                return Err(IshuError::NotInitialized);
            }
            match command {
                Commands::Show(args) => commands::show::execute(&args, &config, &store),
                Commands::Open(args) => commands::open::execute(&args, &config, &store),
                Commands::Reopen(args) => commands::reopen::execute(&args, &config, &store),
                Commands::Edit(args) => commands::edit::execute(&args, &config, &store),
                Commands::Fixed(args) => commands::fixed::execute(&args, &config, &store),
                Commands::Wontfix(args) => commands::wontfix::execute(&args, &config, &store),
                Commands::Blocked(args) => commands::blocked::execute(&args, &config, &store),
                Commands::Unblock(args) => commands::unblock::execute(&args, &config, &store),
                Commands::Comment(args) => commands::comment::execute(&args, &config, &store),
                Commands::List(args) => commands::list::execute(&args, &config, &store),
                Commands::Log(args) => commands::log::execute(&args, &config, &store),
                Commands::Tag(args) => commands::tag::execute(&args, &config, &store),
                Commands::Init | Commands::Conf(_) | Commands::Alias(_) => unreachable!(),
            }
        }
    }
}

fn handle_error(e: &IshuError) -> ! {
    eprintln!("Error: {e}");
    if let Some(suggestion) = e.suggestion() {
        eprintln!("Hint: {suggestion}");
    }
    process::exit(e.exit_code());
}
