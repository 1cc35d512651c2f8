mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use tracing_subscriber::EnvFilter;

use ninjagen_lib::ConfigError;
use ninjagen_lib::consts::{APP_NAME, DEFAULT_OUTPUT};
use ninjagen_lib::options::{ConfigureArgs, OptionSet};

use crate::cmd::cmd_generate;
use crate::output::print_error;

/// Generate a ninja build descriptor for the project
#[derive(Parser, Debug)]
#[command(name = APP_NAME)]
#[command(version, long_about = None)]
struct Cli {
  #[command(flatten)]
  options: ConfigureArgs,

  /// Where to write the descriptor
  #[arg(short, long, value_name = "PATH", default_value = DEFAULT_OUTPUT)]
  output: PathBuf,

  /// Print the generation report as JSON
  #[arg(long)]
  json: bool,

  /// Enable verbose output
  #[arg(short, long)]
  verbose: bool,
}

fn init_tracing(verbose: bool) {
  let default_level = if verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}

fn main() -> ExitCode {
  let cli = match Cli::try_parse() {
    Ok(cli) => cli,
    Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => err.exit(),
    Err(err) => {
      print_error(&ConfigError::from(err).to_string());
      return ExitCode::FAILURE;
    }
  };

  init_tracing(cli.verbose);

  let argv: Vec<String> = std::env::args_os()
    .skip(1)
    .map(|arg| arg.to_string_lossy().into_owned())
    .collect();

  let options = match OptionSet::try_from(cli.options) {
    Ok(options) => options,
    Err(err) => {
      print_error(&err.to_string());
      return ExitCode::FAILURE;
    }
  };

  match cmd_generate(options, argv, &cli.output, cli.json) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      print_error(&format!("{err:#}"));
      ExitCode::FAILURE
    }
  }
}
