mod cli;
mod init_cmd;
mod inspect_cmd;
mod page_range;
mod shared;
mod split_cmd;

use clap::Parser;
use cli::Cli;
use env_logger::Env;

/// Map `-v` occurrences to a default filter. `RUST_LOG` still wins.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        cli::Commands::Split {
            ref input,
            ref output,
            ref template,
            quiet,
        } => split_cmd::run(
            cli.config.as_deref(),
            input.as_deref(),
            output.as_deref(),
            template.as_deref(),
            quiet,
        ),
        cli::Commands::Inspect {
            ref file,
            ref pages,
            ref template,
            ref format,
        } => inspect_cmd::run(
            cli.config.as_deref(),
            file,
            pages.as_deref(),
            template.as_deref(),
            format,
        ),
        cli::Commands::InitConfig { ref path, force } => init_cmd::run(path.as_deref(), force),
    };

    if let Err(code) = result {
        std::process::exit(code);
    }
}
