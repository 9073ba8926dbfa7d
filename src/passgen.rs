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
// Password generator

use std::ops::{Range, RangeInclusive};
use rand::rngs::OsRng;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};
use zxcvbn::zxcvbn;
use zxcvbn::Score;

use crate::configtool::ModerationSettings;
use crate::error::{PassError, RetryStage};
use crate::moderation::{build_checker, AcceptabilityChecker};
use crate::wordlist::{WordList, WordSource};

pub const DEFAULT_SYMBOLS: &str = "!@#$%^&*_+-=";
pub const DEFAULT_MIN_LENGTH: usize = 15;
pub const DEFAULT_MAX_LENGTH: usize = 32;
pub const DEFAULT_MAX_ATTEMPTS: usize = 10_000;

/// Range the numeric block is drawn from. Upper bound exclusive.
pub const NUMBER_RANGE: Range<u32> = 100..9999;

/// Two words, a separator and digits.
pub const MIN_LENGTH_WITH_SYMBOLS_AND_NUMBERS: usize = 11;
/// Two words and digits, no separator.
pub const MIN_LENGTH_WITH_NUMBERS: usize = 9;

// 密码生成选项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOptions {
    pub exclude_uppercase: bool,
    pub exclude_lowercase: bool,
    pub exclude_numbers: bool,
    pub exclude_symbols: bool,
    pub valid_symbols: Vec<char>,
    pub check_acceptability: bool,
    pub minimum_length: usize,
    pub maximum_length: usize,
    /// Cap on length-loop iterations, and separately on checker calls
    /// across one whole generation, so a remote checker is asked at most
    /// this many times.
    pub max_attempts: usize,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            exclude_uppercase: false,
            exclude_lowercase: false,
            exclude_numbers: false,
            exclude_symbols: false,
            valid_symbols: DEFAULT_SYMBOLS.chars().collect(),
            check_acceptability: false,
            minimum_length: DEFAULT_MIN_LENGTH,
            maximum_length: DEFAULT_MAX_LENGTH,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl GenerationOptions {
    pub fn validate(&self) -> Result<(), PassError> {
        if self.exclude_uppercase && self.exclude_lowercase {
            return Err(PassError::config("Cannot exclude both uppercase and lowercase letters"));
        }
        if self.minimum_length > self.maximum_length {
            return Err(PassError::config(format!(
                "Minimum length ({}) cannot be greater than maximum length ({})",
                self.minimum_length, self.maximum_length
            )));
        }
        if !self.exclude_numbers {
            let floor = if self.exclude_symbols {
                MIN_LENGTH_WITH_NUMBERS
            } else {
                MIN_LENGTH_WITH_SYMBOLS_AND_NUMBERS
            };
            if self.minimum_length < floor {
                return Err(PassError::config(format!(
                    "Minimum length must be at least {} with the selected options",
                    floor
                )));
            }
        }
        if !self.exclude_symbols && self.valid_symbols.is_empty() {
            return Err(PassError::config("Symbol set is empty; provide symbols or exclude them"));
        }
        if self.max_attempts == 0 {
            return Err(PassError::config("Maximum attempts must be at least 1"));
        }
        Ok(())
    }

    pub fn length_range(&self) -> RangeInclusive<usize> {
        self.minimum_length..=self.maximum_length
    }
}

/// Draws word pairs until the checker accepts one.
///
/// `Unacceptable` and `Unknown` are both treated as a rejection.
/// Each checker call spends one unit of `budget`.
fn draw_pair<R, C>(
    words: &WordList,
    checker: &C,
    budget: &mut usize,
    max_attempts: usize,
    rng: &mut R,
) -> Result<(String, String), PassError>
where
    R: Rng + ?Sized,
    C: AcceptabilityChecker + ?Sized,
{
    while *budget > 0 {
        *budget -= 1;
        let first = words.choose(rng);
        let second = words.choose(rng);
        let verdict = checker.check(first, second);
        if verdict.is_acceptable() {
            return Ok((first.to_string(), second.to_string()));
        }
        debug!(remaining = *budget, ?verdict, "word pair rejected, drawing again");
    }
    Err(PassError::ExhaustedRetries {
        attempts: max_attempts,
        stage: RetryStage::Acceptability,
    })
}

/// Builds one candidate password from two words, an optional number and an
/// optional separator, in random order. Length bounds are not checked here.
pub fn compose<R, C>(
    words: &WordList,
    options: &GenerationOptions,
    checker: &C,
    rng: &mut R,
) -> Result<String, PassError>
where
    R: Rng + ?Sized,
    C: AcceptabilityChecker + ?Sized,
{
    let mut budget = options.max_attempts;
    compose_within(words, options, checker, &mut budget, rng)
}

fn compose_within<R, C>(
    words: &WordList,
    options: &GenerationOptions,
    checker: &C,
    pair_budget: &mut usize,
    rng: &mut R,
) -> Result<String, PassError>
where
    R: Rng + ?Sized,
    C: AcceptabilityChecker + ?Sized,
{
    let (block1, block2) = draw_pair(words, checker, pair_budget, options.max_attempts, rng)?;

    let number = if options.exclude_numbers {
        None
    } else {
        Some(rng.gen_range(NUMBER_RANGE))
    };

    let separator = if options.exclude_symbols {
        None
    } else {
        let symbol = options
            .valid_symbols
            .choose(rng)
            .ok_or_else(|| PassError::config("Symbol set is empty"))?;
        Some(*symbol)
    };

    // block1 is upper unless only uppercase is excluded,
    // block2 is lower unless only lowercase is excluded
    let block1 = if options.exclude_uppercase && !options.exclude_lowercase {
        block1.to_lowercase()
    } else {
        block1.to_uppercase()
    };
    let block2 = if options.exclude_lowercase && !options.exclude_uppercase {
        block2.to_uppercase()
    } else {
        block2.to_lowercase()
    };

    let mut parts = vec![block1, block2];
    if let Some(number) = number {
        parts.push(number.to_string());
    }
    parts.shuffle(rng);

    let joiner = separator.map(String::from).unwrap_or_default();
    Ok(parts.join(&joiner))
}

/// Composes candidates until one fits the length range.
pub fn generate_with<R, C>(
    words: &WordList,
    options: &GenerationOptions,
    checker: &C,
    rng: &mut R,
) -> Result<String, PassError>
where
    R: Rng + ?Sized,
    C: AcceptabilityChecker + ?Sized,
{
    options.validate()?;
    let range = options.length_range();
    let mut pair_budget = options.max_attempts;
    for attempt in 1..=options.max_attempts {
        let candidate = compose_within(words, options, checker, &mut pair_budget, rng)?;
        let length = candidate.chars().count();
        if range.contains(&length) {
            debug!(attempt, length, "password accepted");
            return Ok(candidate);
        }
        debug!(attempt, length, "candidate outside length range");
    }
    Err(PassError::ExhaustedRetries {
        attempts: options.max_attempts,
        stage: RetryStage::LengthBounds,
    })
}

/// A validated generator holding the word list and the checker for a run.
pub struct Generator {
    options: GenerationOptions,
    words: WordList,
    checker: Box<dyn AcceptabilityChecker>,
}

impl Generator {
    /// Validates options, selects the checker and loads the word list, in that order.
    pub fn new(
        options: GenerationOptions,
        source: &WordSource,
        settings: &ModerationSettings,
    ) -> Result<Self, PassError> {
        options.validate()?;
        let checker = build_checker(options.check_acceptability, settings)?;
        let words = source.load()?;
        info!(words = words.len(), "generator ready");
        Ok(Self { options, words, checker })
    }

    pub fn with_checker(
        options: GenerationOptions,
        words: WordList,
        checker: Box<dyn AcceptabilityChecker>,
    ) -> Result<Self, PassError> {
        options.validate()?;
        Ok(Self { options, words, checker })
    }

    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }

    pub fn next_password_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String, PassError> {
        generate_with(&self.words, &self.options, self.checker.as_ref(), rng)
    }

    pub fn next_password(&self) -> Result<String, PassError> {
        self.next_password_with(&mut OsRng)
    }
}

/// One-shot generation with the OS random source.
pub fn generate(
    options: &GenerationOptions,
    source: &WordSource,
    settings: &ModerationSettings,
) -> Result<String, PassError> {
    Generator::new(options.clone(), source, settings)?.next_password()
}

pub fn assess_password_strength(password: &str) -> (String, u8, String) {
    let strength_result = zxcvbn(password, &[]);
    let score = strength_result.score();
    let feedback = strength_result.feedback().map_or_else(
        String::new,
        |f| f.suggestions().iter().map(|s| s.to_string()).collect::<Vec<_>>().join(" ")
    );

    // 确定安全评级
    let rating = match score {
        Score::Zero => "very weak",
        Score::One => "weak",
        Score::Two => "fair",
        Score::Three => "strong",
        Score::Four => "very strong",
        _ => "unknown",
    }.to_string();

    (rating, score as u8, feedback)
}
