// ============================================
// src/cli.rs
// コマンドライン引数
// ============================================

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use clap::builder::RangedU64ValueParser;

use crate::api::{ClientConfig, DEFAULT_API_URL};
use crate::questions::Difficulty;
use crate::quiz::{QuizConfig, TOTAL_QUESTIONS};

/// TRIVIA WiZ. のコマンドライン引数
#[derive(Parser, Debug)]
#[command(name = "triviawiz")]
#[command(author, version, about = "Terminal trivia quiz powered by Open Trivia DB")]
pub struct Cli {
    /// Number of questions per session
    #[arg(short = 'n', long, default_value_t = TOTAL_QUESTIONS, value_parser = RangedU64ValueParser::<usize>::new().range(1..=50))]
    pub amount: usize,

    /// Question difficulty
    #[arg(short, long, value_enum, default_value_t = Difficulty::Easy)]
    pub difficulty: Difficulty,

    /// Trivia API endpoint
    #[arg(long, env = "TRIVIA_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// HTTP request timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = 10)]
    pub timeout: u64,

    /// Use line-based prompts instead of the full-screen UI
    #[arg(long)]
    pub plain: bool,

    /// Print the last finished session as JSON on exit
    #[arg(long)]
    pub json: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Directory for the log file (defaults to the platform data directory)
    #[arg(long, value_name = "PATH")]
    pub log_dir: Option<PathBuf>,
}

impl Cli {
    pub fn quiz_config(&self) -> QuizConfig {
        QuizConfig {
            amount: self.amount,
            difficulty: self.difficulty,
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            api_url: self.api_url.clone(),
            timeout: Duration::from_secs(self.timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_fixed_constants() {
        let cli = Cli::try_parse_from(["triviawiz"]).unwrap();
        assert_eq!(cli.quiz_config(), QuizConfig::default());
        assert!(!cli.plain);
        assert_eq!(cli.verbose, 0);
        assert_eq!(cli.client_config().timeout, Duration::from_secs(10));
    }

    #[test]
    fn overrides_are_applied() {
        let cli = Cli::try_parse_from([
            "triviawiz",
            "-n",
            "5",
            "--difficulty",
            "hard",
            "--api-url",
            "http://localhost:8080/api.php",
            "--plain",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.amount, 5);
        assert_eq!(cli.difficulty, Difficulty::Hard);
        assert_eq!(cli.client_config().api_url, "http://localhost:8080/api.php");
        assert!(cli.plain);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn zero_questions_is_rejected() {
        assert!(Cli::try_parse_from(["triviawiz", "-n", "0"]).is_err());
    }
}
