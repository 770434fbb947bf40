use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use codepatch::{
    apply_patch_to_file, create_minimal_patch, create_patch, process_builtin_command,
    read_file_lines, read_file_to_end, ApplyOptions, CommandOutcome,
};
use colored::Colorize;
use env_logger::Builder;
use log::{info, Level, LevelFilter};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    if let Err(e) = run(cli.command) {
        // {:?} prints the whole anyhow context chain.
        eprintln!("{} {:?}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Apply {
            patch_file,
            target_file,
            no_backup,
            dry_run,
        } => {
            let patch = fs::read_to_string(&patch_file).with_context(|| {
                format!("Failed to read patch file '{}'", patch_file.display())
            })?;
            let options = ApplyOptions::builder()
                .backup(!no_backup)
                .dry_run(dry_run)
                .build();
            let result = apply_patch_to_file(&patch, &target_file, options).with_context(|| {
                format!("Failed to apply patch to '{}'", target_file.display())
            })?;

            if let Some(diff) = result.diff {
                println!(
                    "----- Proposed Changes for {} -----",
                    target_file.display()
                );
                print!("{}", diff);
                println!("------------------------------------");
                info!("DRY RUN completed. No files were modified.");
            } else {
                println!(
                    "{} {} hunk(s) to {}",
                    "Applied".green().bold(),
                    result.hunks_applied,
                    target_file.display()
                );
                if let Some(backup) = result.backup_path {
                    info!("Backup written to '{}'", backup.display());
                }
            }
        }
        Commands::Diff { old, new, minimal } => {
            let diff = if minimal {
                create_minimal_patch(&old, &new)
            } else {
                create_patch(&old, &new)
            }
            .with_context(|| {
                format!(
                    "Failed to diff '{}' against '{}'",
                    old.display(),
                    new.display()
                )
            })?;
            println!("{}", diff);
        }
        Commands::Read {
            file,
            start,
            end,
            to_end,
        } => {
            if to_end && end.is_some() {
                return Err(anyhow!("--to-end cannot be combined with an end line."));
            }
            let content = if to_end {
                read_file_to_end(&file, start)
            } else {
                read_file_lines(&file, start, end)
            }
            .with_context(|| format!("Failed to read '{}'", file.display()))?;
            print!("{}", content);
        }
        Commands::Command { text } => match process_builtin_command(&text.join(" ")) {
            CommandOutcome::Exit => println!("{}", "Goodbye!".bold()),
            CommandOutcome::Display(text) => println!("{}", text),
            CommandOutcome::ClearScreen => print!("\x1B[2J\x1B[1;1H"),
            CommandOutcome::Forward(prompt) => {
                println!("{} {}", "forward:".cyan().bold(), prompt)
            }
            CommandOutcome::PassThrough(input) => {
                println!("{} {}", "pass-through:".dimmed(), input)
            }
        },
    }
    Ok(())
}

/// Defines the command-line arguments for the application.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Apply, create and inspect unified diffs for a coding assistant.",
    long_about = "Applies unified diffs by the line numbers in their @@ headers, writing a .orig backup first."
)]
struct Cli {
    /// Increase logging verbosity. Can be used multiple times.
    /// -v for info, -vv for debug, -vvv for trace.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Apply a unified diff to a single file.
    Apply {
        /// Path to the file containing the patch.
        patch_file: PathBuf,
        /// Path to the file to patch.
        target_file: PathBuf,
        /// Don't write a `.orig` backup before patching.
        #[arg(long)]
        no_backup: bool,
        #[arg(
            short = 'n',
            long,
            help = "Show what would be done, but don't modify files."
        )]
        dry_run: bool,
    },
    /// Print a unified diff between two files.
    Diff {
        old: PathBuf,
        new: PathBuf,
        /// Align unchanged lines instead of comparing line by line.
        #[arg(short, long)]
        minimal: bool,
    },
    /// Print a range of lines from a file.
    Read {
        file: PathBuf,
        /// First line to print (1-based).
        start: usize,
        /// Last line to print. Defaults to the start line.
        end: Option<usize>,
        /// Print through the last line of the file.
        #[arg(long)]
        to_end: bool,
    },
    /// Show how the assistant would treat a line of input.
    Command {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
}

/// Sets up the global logger.
fn setup_logging(verbose: u8) {
    let log_level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    Builder::new()
        .filter_level(log_level)
        .format(|buf, record| match record.level() {
            Level::Error => writeln!(buf, "{} {}", "error:".red().bold(), record.args()),
            Level::Warn => writeln!(buf, "{} {}", "warning:".yellow().bold(), record.args()),
            Level::Info => writeln!(buf, "{}", record.args()),
            Level::Debug => writeln!(buf, "{} {}", "debug:".blue().bold(), record.args()),
            Level::Trace => writeln!(buf, "{} {}", "trace:".cyan().bold(), record.args()),
        })
        .init();
}
