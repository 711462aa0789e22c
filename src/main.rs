use clap::Parser;
use std::ffi::OsString;
use std::process::ExitCode;

use app_entrypoint::logging::{self, LoggingGuard};
use app_entrypoint::{Component, DispatchConfig, Dispatcher, Result};

#[derive(Parser)]
#[command(name = "entrypoint")]
#[command(about = "Hands the container over to the program selected by APP_COMPONENT (api or converter)")]
// No --help/--version: argument handling alone must never end the process
// without the selector being checked.
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// Print the resolved target instead of running it
    #[arg(long)]
    dry_run: bool,

    /// Arguments passed on to the selected program, e.g. a container CMD
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "ARGS")]
    args: Vec<OsString>,
}

fn run(cli: Cli, guard: LoggingGuard) -> Result<()> {
    // The selector is checked first so a broken config file never masks it
    let component = Component::from_env()?;
    let config = DispatchConfig::load()?;

    let target = Dispatcher::new(config)
        .with_extra_args(cli.args)
        .resolve(component);

    if cli.dry_run {
        println!("{target}");
        return Ok(());
    }

    Err(Dispatcher::handoff(&target, guard))
}

fn main() -> ExitCode {
    dotenv::dotenv().ok();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // A bad selector is reported ahead of any usage error
            if let Err(selector) = Component::from_env() {
                eprintln!("{selector}");
                return ExitCode::from(selector.exit_code());
            }
            e.exit()
        }
    };
    let guard = logging::init_logging();

    match run(cli, guard) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}
