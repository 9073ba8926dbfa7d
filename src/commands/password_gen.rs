use anyhow::{Context, Result};
use tracing::info;

use pairpass::configtool::ModerationSettings;
use pairpass::passgen::{self, GenerationOptions, Generator};
use pairpass::wordlist::WordSource;
use crate::GenArgs;

impl From<&GenArgs> for GenerationOptions {
    fn from(args: &GenArgs) -> Self {
        Self {
            exclude_uppercase: args.no_uppercase,
            exclude_lowercase: args.no_lowercase,
            exclude_numbers: args.no_numbers,
            exclude_symbols: args.no_symbols,
            valid_symbols: args.symbols.chars().collect(),
            check_acceptability: args.check_acceptability,
            minimum_length: args.min_length,
            maximum_length: args.max_length,
            max_attempts: args.max_attempts,
        }
    }
}

pub fn generate_passwords(args: GenArgs) -> Result<()> {
    let options = GenerationOptions::from(&args);
    // 设置只在需要审核时才读取
    let settings = if options.check_acceptability {
        let mut settings = ModerationSettings::load()?;
        settings.apply_overrides(args.api_url.clone(), args.model.clone());
        settings
    } else {
        ModerationSettings::default()
    };
    let source = WordSource::from_path(args.wordlist.clone());

    let generator = Generator::new(options, &source, &settings)?;
    info!(count = args.count, "generating passwords");
    for _ in 0..args.count {
        let password = generator
            .next_password()
            .context("Failed to generate password")?;
        println!("{}", password);
        if args.strength {
            let (rating, score, feedback) = passgen::assess_password_strength(&password);
            eprintln!("Password strength: {} (score: {}/4)", rating, score);
            if !feedback.is_empty() {
                eprintln!("Suggestions: {}", feedback);
            }
        }
    }
    Ok(())
}
