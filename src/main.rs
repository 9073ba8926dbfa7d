//  ____       _      ____
// |  _ \ __ _(_)_ __|  _ \ __ _ ___ ___
// | |_) / _` | | '__| |_) / _` / __/ __|
// |  __/ (_| | | |  |  __/ (_| \__ \__ \
// |_|   \__,_|_|_|  |_|   \__,_|___/___/
//
// Author : Sidney Zhang <zly@lyzhang.me>
// Date : 2025-08-12
// Version : 0.1.0
// License : Mulan PSL v2
//
// Generate words-and-symbols passwords from the command line.

use std::path::PathBuf;
use anyhow::Result;
use clap::{Parser, Subcommand};

use pairpass::logging::init_logging;
use pairpass::passgen::{DEFAULT_MAX_ATTEMPTS, DEFAULT_MAX_LENGTH, DEFAULT_MIN_LENGTH, DEFAULT_SYMBOLS};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "pairpass")]
#[command(about = "Generate memorable passwords from two random words, a number and a symbol", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    args: GenArgs,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Test password strength
    Testpass(TestpassArgs),
}

#[derive(Debug, Parser)]
struct TestpassArgs {
    /// Password to test
    password: String,
}

#[derive(Debug, Parser)]
struct GenArgs {
    /// Minimum password length
    #[arg(short = 'm', long, default_value_t = DEFAULT_MIN_LENGTH)]
    min_length: usize,

    /// Maximum password length
    #[arg(short = 'M', long, default_value_t = DEFAULT_MAX_LENGTH)]
    max_length: usize,

    /// Exclude the symbol separator
    #[arg(long, default_value_t = false)]
    no_symbols: bool,

    /// Exclude uppercase letters
    #[arg(long, default_value_t = false)]
    no_uppercase: bool,

    /// Exclude lowercase letters
    #[arg(long, default_value_t = false)]
    no_lowercase: bool,

    /// Exclude the number block
    #[arg(long, default_value_t = false)]
    no_numbers: bool,

    /// Newline-delimited word list (defaults to the built-in list)
    #[arg(short, long)]
    wordlist: Option<PathBuf>,

    /// Characters to pick the separator from
    #[arg(short, long, default_value = DEFAULT_SYMBOLS, allow_hyphen_values = true)]
    symbols: String,

    /// Reject word pairs flagged by the moderation service
    #[arg(short = 'a', long, default_value_t = false)]
    check_acceptability: bool,

    /// Number of passwords to generate
    #[arg(short = 'n', long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    count: u32,

    /// Give up after this many attempts
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    max_attempts: usize,

    /// Print a strength estimate for each password to stderr
    #[arg(long, default_value_t = false)]
    strength: bool,

    /// Chat completions endpoint for the moderation service
    #[arg(long)]
    api_url: Option<String>,

    /// Model name for the moderation service
    #[arg(long)]
    model: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Command::Testpass(args)) => commands::testpass::test_password(&args.password),
        None => commands::password_gen::generate_passwords(cli.args),
    }
}
