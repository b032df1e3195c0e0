// ============================================
// src/api.rs
// 問題の取得 (Open Trivia DB)
// ============================================

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::questions::{Difficulty, Question, RawQuestion};

/// デフォルトの API エンドポイント
pub const DEFAULT_API_URL: &str = "https://opentdb.com/api.php";

/// 問題取得時のエラー
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("trivia API error (code {code}): {message}")]
    Api { code: u8, message: &'static str },

    #[error("no questions returned")]
    Empty,

    #[error("question loader stopped unexpectedly")]
    Disconnected,
}

/// 問題の取得元
///
/// テストではスタブに差し替える。
pub trait QuestionSource: Send + Sync {
    fn fetch(&self, amount: usize, difficulty: Difficulty) -> Result<Vec<Question>, FetchError>;
}

/// API レスポンス全体
#[derive(Debug, Deserialize)]
struct TriviaResponse {
    response_code: u8,
    #[serde(default)]
    results: Vec<RawQuestion>,
}

/// `response_code` の意味
fn response_code_message(code: u8) -> &'static str {
    match code {
        1 => "not enough questions for the query",
        2 => "invalid parameter",
        3 => "session token not found",
        4 => "session token exhausted",
        5 => "rate limited, try again in a few seconds",
        _ => "unknown response code",
    }
}

/// レスポンス本文をパースして問題リストにする
pub fn parse_response(body: &str, difficulty: Difficulty) -> Result<Vec<Question>, FetchError> {
    let response: TriviaResponse = serde_json::from_str(body)?;

    if response.response_code != 0 {
        return Err(FetchError::Api {
            code: response.response_code,
            message: response_code_message(response.response_code),
        });
    }
    if response.results.is_empty() {
        return Err(FetchError::Empty);
    }

    let mut rng = rand::rng();
    Ok(response
        .results
        .into_iter()
        .map(|raw| Question::from_raw(raw, difficulty, &mut rng))
        .collect())
}

/// HTTP クライアントの設定
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Open Trivia DB クライアント (ブロッキング)
pub struct OpenTriviaClient {
    client: reqwest::blocking::Client,
    api_url: String,
}

impl OpenTriviaClient {
    pub fn new(config: ClientConfig) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("triviawiz/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            api_url: config.api_url,
        })
    }
}

impl QuestionSource for OpenTriviaClient {
    fn fetch(&self, amount: usize, difficulty: Difficulty) -> Result<Vec<Question>, FetchError> {
        debug!(url = %self.api_url, amount, %difficulty, "fetching questions");

        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("amount", amount.to_string()),
                ("difficulty", difficulty.to_string()),
                ("type", "multiple".to_string()),
            ])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "trivia API returned an error status");
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text()?;
        parse_response(&body, difficulty)
    }
}
