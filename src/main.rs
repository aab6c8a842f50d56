#![allow(unused)]

use bdd_runner as imp;
use clap::{Parser, Subcommand};
use imp::{quickstart, runner, Registry};
use miette::WrapErr;

/// Runs the quick-start describe/it suites
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Execute every registered case and print a summary
    Run {
        /// Only run cases whose full name contains this text
        #[arg(long)]
        filter: Option<String>,

        /// Stop a case at its first failed expectation
        #[arg(long)]
        stop_on_expectation_failure: bool,
    },
    /// Print the suite tree, including skipped suites and cases
    List,
}

fn main() -> miette::Result<()> {
    let args = Args::parse();

    let mut registry = Registry::new();
    quickstart::register(&mut registry);
    let tree = registry
        .finish()
        .wrap_err("Failed to register the quick-start suites")?;

    match args.command {
        Commands::Run {
            filter,
            stop_on_expectation_failure,
        } => {
            let config = runner::RunConfig {
                filter,
                stop_on_expectation_failure,
            };
            let report = runner::Runner::new(&tree, config).run();

            imp::log_stdout!("");
            report.print();

            if !report.all_passed() {
                std::process::exit(report.exit_code());
            }
        }

        Commands::List => {
            for line in tree.outline() {
                imp::log_stdout!("{line}");
            }
            imp::log_stdout!("");
            imp::log_stdout!("{} specs registered", tree.case_count());
        }
    }

    Ok(())
}
