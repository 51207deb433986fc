use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error};

use datebook::cli::{Cli, Command};
use datebook::commands;
use datebook::config::Config;
use datebook::prompt::{LinePrompter, Prompter, TerminalPrompter};
use datebook::shell::{self, Shell};

fn interactive<P: Prompter>(config: &Config, mut prompter: P) -> io::Result<bool> {
    let mut out = io::stdout().lock();
    let Some(agenda) = shell::open_agenda(&config.data_file, &mut prompter, &mut out)? else {
        return Ok(false);
    };
    let mut shell = Shell::new(agenda, prompter, out, config.horizon_days);
    shell.run()?;
    Ok(true)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = Config::from_cli(&cli);
    datebook::observability::init(config.log_level);
    debug!(file = %config.data_file.display(), horizon = config.horizon_days, "starting");

    match cli.command {
        None | Some(Command::Shell) => {
            let result = if io::stdin().is_terminal() {
                interactive(&config, TerminalPrompter)
            } else {
                interactive(&config, LinePrompter::new(io::stdin().lock(), io::stdout()))
            };
            match result {
                Ok(true) => ExitCode::SUCCESS,
                Ok(false) => ExitCode::FAILURE,
                Err(e) => {
                    error!("terminal i/o failed: {e}");
                    ExitCode::FAILURE
                }
            }
        }
        Some(command) => {
            let today = chrono::Local::now().date_naive();
            let mut out = io::stdout().lock();
            let result = commands::run(command, &config, today, &mut out);
            let _ = out.flush();
            match result {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("error: {e}");
                    ExitCode::FAILURE
                }
            }
        }
    }
}
