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
// Memorable word-pair password generator

pub mod configtool;
pub mod error;
pub mod logging;
pub mod moderation;
pub mod passgen;
pub mod wordlist;

pub use error::PassError;
pub use passgen::{GenerationOptions, Generator};
