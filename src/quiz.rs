// ============================================
// src/quiz.rs
// クイズのセッション状態と状態遷移 (リデューサー)
// ============================================

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::api::FetchError;
use crate::questions::{Difficulty, Question};

/// 1 セッションの問題数 (デフォルト)
pub const TOTAL_QUESTIONS: usize = 10;

/// セッションの設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizConfig {
    pub amount: usize,
    pub difficulty: Difficulty,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            amount: TOTAL_QUESTIONS,
            difficulty: Difficulty::Easy,
        }
    }
}

/// セッション中のエラー
#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("expected {expected} questions but received {got}")]
    IncompleteBatch { expected: usize, got: usize },
}

/// 1 問ごとの回答記録 (作成後は変更しない)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub question: String,
    pub answer: String,
    pub correct: bool,
    pub correct_answer: String,
}

/// 状態遷移を起こすイベント
#[derive(Debug)]
pub enum QuizEvent {
    /// スタートボタン
    Start,
    /// 問題の取得結果
    Loaded(Result<Vec<Question>, FetchError>),
    /// 選択肢がクリックされた
    Submit(String),
    /// 次の問題へ
    Advance,
}

/// UI から見たセッションの段階
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    InProgress,
    Finished,
    Failed,
}

/// セッション終了時の集計
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub score: usize,
    pub total: usize,
    pub percent: f64,
    pub difficulty: Difficulty,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    pub elapsed_sec: Option<i64>,
    pub answers: Vec<AnswerRecord>,
}

/// セッション全体の状態
#[derive(Debug)]
pub struct QuizState {
    pub config: QuizConfig,
    pub loading: bool,
    pub number: usize, // 今何問目か (0 始まり)
    pub score: usize,
    pub game_over: bool,
    pub questions: Vec<Question>,
    pub user_answers: Vec<AnswerRecord>,
    pub error: Option<SessionError>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl Default for QuizState {
    fn default() -> Self {
        Self::new(QuizConfig::default())
    }
}

impl QuizState {
    /// 待機状態 (game_over = true) で作成する
    pub fn new(config: QuizConfig) -> Self {
        Self {
            config,
            loading: false,
            number: 0,
            score: 0,
            game_over: true,
            questions: Vec::new(),
            user_answers: Vec::new(),
            error: None,
            started_at: None,
            finished_at: None,
        }
    }

    /// 状態遷移 (旧状態 + イベント → 新状態)
    pub fn reduce(self, event: QuizEvent) -> Self {
        match event {
            QuizEvent::Start => self.on_start(),
            QuizEvent::Loaded(result) => self.on_loaded(result),
            QuizEvent::Submit(answer) => self.on_submit(answer),
            QuizEvent::Advance => self.on_advance(),
        }
    }

    fn on_start(mut self) -> Self {
        // 読み込み中の二重スタートは無視する
        if self.loading {
            debug!("start ignored: questions are already loading");
            return self;
        }
        info!(amount = self.config.amount, difficulty = %self.config.difficulty, "starting session");
        self.loading = true;
        self.error = None;
        self
    }

    fn on_loaded(mut self, result: Result<Vec<Question>, FetchError>) -> Self {
        if !self.loading {
            debug!("late load result ignored");
            return self;
        }
        self.loading = false;

        let questions = match result {
            Ok(questions) if questions.is_empty() => Err(SessionError::Fetch(FetchError::Empty)),
            Ok(questions) if questions.len() != self.config.amount => {
                Err(SessionError::IncompleteBatch {
                    expected: self.config.amount,
                    got: questions.len(),
                })
            }
            Ok(questions) => Ok(questions),
            Err(e) => Err(SessionError::Fetch(e)),
        };

        match questions {
            Ok(questions) => {
                info!(count = questions.len(), "questions loaded");
                Self {
                    config: self.config,
                    loading: false,
                    number: 0,
                    score: 0,
                    game_over: false,
                    questions,
                    user_answers: Vec::new(),
                    error: None,
                    started_at: Some(Utc::now()),
                    finished_at: None,
                }
            }
            Err(e) => {
                warn!(error = %e, "failed to load questions");
                self.error = Some(e);
                self.game_over = true;
                self
            }
        }
    }

    fn on_submit(mut self, answer: String) -> Self {
        if self.game_over || self.loading || self.is_current_answered() {
            return self;
        }
        let Some(question) = self.questions.get(self.number) else {
            return self;
        };

        let correct = question.is_correct(&answer);
        debug!(number = self.number + 1, %answer, correct, "answer recorded");

        let record = AnswerRecord {
            question: question.question.clone(),
            answer,
            correct,
            correct_answer: question.correct_answer.clone(),
        };
        self.user_answers.push(record);
        if correct {
            self.score += 1;
        }
        self
    }

    fn on_advance(mut self) -> Self {
        // 未回答のまま進むと回答記録と問題の位置がずれる
        if self.game_over || self.loading || !self.is_current_answered() {
            return self;
        }

        let next = self.number + 1;
        if next == self.total() {
            self.game_over = true;
            self.finished_at = Some(Utc::now());
            info!(score = self.score, total = self.total(), "session finished");
        } else {
            self.number = next;
        }
        self
    }

    // MARK: 便利メソッド (reduce のラッパー)

    pub fn start(self) -> Self {
        self.reduce(QuizEvent::Start)
    }

    pub fn loaded(self, result: Result<Vec<Question>, FetchError>) -> Self {
        self.reduce(QuizEvent::Loaded(result))
    }

    pub fn submit_answer(self, answer: impl Into<String>) -> Self {
        self.reduce(QuizEvent::Submit(answer.into()))
    }

    pub fn advance(self) -> Self {
        self.reduce(QuizEvent::Advance)
    }

    // MARK: 参照系

    /// セッションの問題数
    pub fn total(&self) -> usize {
        self.config.amount
    }

    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::Loading
        } else if !self.game_over {
            Phase::InProgress
        } else if self.error.is_some() {
            Phase::Failed
        } else if self.finished_at.is_some() {
            Phase::Finished
        } else {
            Phase::Idle
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        if self.game_over {
            return None;
        }
        self.questions.get(self.number)
    }

    /// 現在の問題に対する回答記録
    pub fn current_answer(&self) -> Option<&AnswerRecord> {
        self.user_answers.get(self.number)
    }

    pub fn is_current_answered(&self) -> bool {
        self.user_answers.len() == self.number + 1
    }

    /// 最後の問題か
    pub fn is_last_question(&self) -> bool {
        self.number + 1 == self.total()
    }

    /// 終了したセッションの集計 (終了前は None)
    pub fn summary(&self) -> Option<SessionSummary> {
        if self.phase() != Phase::Finished {
            return None;
        }
        let total = self.total();
        let percent = if total > 0 {
            self.score as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        let elapsed_sec = match (self.started_at, self.finished_at) {
            (Some(start), Some(end)) => Some((end - start).num_seconds()),
            _ => None,
        };
        Some(SessionSummary {
            score: self.score,
            total,
            percent,
            difficulty: self.config.difficulty,
            started_at: self.started_at,
            finished_at: self.finished_at,
            elapsed_sec,
            answers: self.user_answers.clone(),
        })
    }
}
