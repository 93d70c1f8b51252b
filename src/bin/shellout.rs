// src/bin/shellout.rs

use anyhow::Result;
use clap::Parser;
use colored::*;
use shellout::{
    Arg, Shell, Template,
    cli::{Action, Cli},
    state,
};

/// Sets up logging and the process-wide defaults, runs the requested action
/// and exits with its status.
#[tokio::main]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("CLI args parsed: {:?}", cli);

    if cli.verbose {
        state::set_verbose(true);
    }
    if let Some(dir) = &cli.cwd {
        // Exits the process if the directory does not exist.
        state::cd(dir);
    }

    match run_cli(cli.action).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("\n{}: {}", "Error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

async fn run_cli(action: Action) -> Result<i32> {
    let shell = Shell::current();
    match action {
        Action::Exec { template, values } => {
            let values = values.into_iter().map(Arg::from).collect();
            let output = shell
                .clone()
                .nothrow(true)
                .run(Template::parse(&template), values)
                .await?;
            // Verbose mode already mirrored both streams live.
            if !shell.is_verbose() {
                print!("{}", output.stdout());
                eprint!("{}", output.stderr());
            }
            if !output.success() {
                log::debug!("Command issued at {} failed", output.origin());
            }
            Ok(output.exit_code())
        }
        Action::Quote { values } => {
            for value in values {
                println!("{}", shell.quote(&value));
            }
            Ok(0)
        }
        Action::Shell => {
            let resolved = shell.resolved();
            println!(
                "{} {} ({:?})",
                "→".blue(),
                resolved.program().display().to_string().green(),
                resolved.kind()
            );
            if let Some(prefix) = resolved.prefix() {
                println!("  prefix:  {}", prefix);
            }
            println!(
                "  quoting: {}",
                if resolved.quoting().is_safe() {
                    "posix".green()
                } else {
                    "none (unsafe)".yellow()
                }
            );
            Ok(0)
        }
    }
}
