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
// Error types

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by password generation.
///
/// Moderation service failures never appear here: they are absorbed into
/// [`crate::moderation::Verdict::Unknown`] and retried with a fresh pair.
#[derive(Debug, Error)]
pub enum PassError {
    /// Invalid option combination or missing credential.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Word list could not be read.
    #[error("Failed to read word list {}: {source}", .path.display())]
    WordListIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Word list was readable but unusable.
    #[error("Word list error: {0}")]
    WordList(String),

    #[error("Gave up after {attempts} attempts while {stage}")]
    ExhaustedRetries { attempts: usize, stage: RetryStage },
}

/// Which retry loop ran out of attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryStage {
    Acceptability,
    LengthBounds,
}

impl std::fmt::Display for RetryStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RetryStage::Acceptability => write!(f, "looking for an acceptable word pair"),
            RetryStage::LengthBounds => write!(f, "fitting the password into the length range"),
        }
    }
}

impl PassError {
    pub fn config(msg: impl Into<String>) -> Self {
        PassError::Configuration(msg.into())
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, PassError::Configuration(_))
    }

    pub fn is_resource(&self) -> bool {
        matches!(self, PassError::WordListIo { .. } | PassError::WordList(_))
    }
}
