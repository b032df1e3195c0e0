// ============================================
// src/app.rs
// TUI アプリの状態 (クイズ状態 + カーソル + 読み込みスレッド)
// ============================================

use std::mem;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use crossterm::event::KeyCode;
use tracing::{debug, error};

use crate::api::{FetchError, QuestionSource};
use crate::presenter::{QuestionCard, present};
use crate::questions::Question;
use crate::quiz::{Phase, QuizConfig, QuizState, SessionSummary};

type LoadResult = Result<Vec<Question>, FetchError>;

/// アプリ全体の状態を管理する
pub struct App {
    pub quiz: QuizState,
    /// 選択中の選択肢
    pub cursor: usize,
    /// 直前に終了したセッションの集計
    pub last_summary: Option<SessionSummary>,
    pub should_quit: bool,

    source: Arc<dyn QuestionSource>,
    loader: Option<Receiver<LoadResult>>,
}

impl App {
    pub fn new(config: QuizConfig, source: Arc<dyn QuestionSource>) -> Self {
        Self {
            quiz: QuizState::new(config),
            cursor: 0,
            last_summary: None,
            should_quit: false,
            source,
            loader: None,
        }
    }

    /// 状態遷移を適用する
    fn apply(&mut self, f: impl FnOnce(QuizState) -> QuizState) {
        let quiz = mem::take(&mut self.quiz);
        self.quiz = f(quiz);
    }

    /// 現在の問題カード (出題中のみ)
    pub fn card(&self) -> Option<QuestionCard<'_>> {
        let question = self.quiz.current_question()?;
        Some(present(
            &question.question,
            &question.answers,
            self.quiz.number,
            self.quiz.total(),
            self.quiz.current_answer(),
        ))
    }

    /// セッションを開始し、別スレッドで問題を取得する
    pub fn start(&mut self) {
        let was_loading = self.quiz.loading;
        self.apply(QuizState::start);
        if was_loading || !self.quiz.loading {
            return;
        }

        let (tx, rx) = mpsc::channel();
        let source = Arc::clone(&self.source);
        let QuizConfig { amount, difficulty } = self.quiz.config;
        thread::spawn(move || {
            let result = source.fetch(amount, difficulty);
            // 受信側が閉じていれば結果は捨てる
            let _ = tx.send(result);
        });
        self.loader = Some(rx);
    }

    /// 読み込みスレッドの結果を確認する (ループ毎に呼ぶ)
    pub fn tick(&mut self) {
        let Some(rx) = &self.loader else {
            return;
        };
        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => {
                error!("question loader thread exited without a result");
                Err(FetchError::Disconnected)
            }
        };
        self.loader = None;
        self.cursor = 0;
        self.apply(|quiz| quiz.loaded(result));
    }

    /// カーソル位置の選択肢で回答する
    fn answer_selected(&mut self) {
        let mut chosen = None;
        if let Some(card) = self.card() {
            card.click(self.cursor, |text| chosen = Some(text.to_string()));
        }
        if let Some(answer) = chosen {
            self.apply(|quiz| quiz.submit_answer(answer));
        }
    }

    fn advance(&mut self) {
        self.apply(QuizState::advance);
        self.cursor = 0;
        if self.quiz.phase() == Phase::Finished {
            self.last_summary = self.quiz.summary();
        }
    }

    fn move_cursor(&mut self, down: bool) {
        let len = self.card().map_or(0, |c| c.choices.len());
        if len == 0 {
            return;
        }
        self.cursor = if down {
            (self.cursor + 1) % len
        } else {
            (self.cursor + len - 1) % len
        };
    }

    /// キー入力の処理
    pub fn handle_key(&mut self, code: KeyCode) {
        if matches!(code, KeyCode::Esc | KeyCode::Char('q')) {
            self.should_quit = true;
            return;
        }

        match self.quiz.phase() {
            Phase::Idle | Phase::Finished | Phase::Failed => {
                if matches!(code, KeyCode::Enter | KeyCode::Char('s')) {
                    self.start();
                }
            }
            Phase::Loading => {}
            Phase::InProgress => {
                let answered = self.card().is_some_and(|card| card.is_answered());
                match code {
                    KeyCode::Up | KeyCode::Char('k') => self.move_cursor(false),
                    KeyCode::Down | KeyCode::Char('j') => self.move_cursor(true),
                    KeyCode::Char(c @ '1'..='9') => {
                        let index = c as usize - '1' as usize;
                        let len = self.card().map_or(0, |card| card.choices.len());
                        if !answered && index < len {
                            self.cursor = index;
                            self.answer_selected();
                        }
                    }
                    KeyCode::Enter if !answered => self.answer_selected(),
                    KeyCode::Enter | KeyCode::Right | KeyCode::Char('n') if answered => {
                        self.advance()
                    }
                    other => debug!(?other, "unhandled key"),
                }
            }
        }
    }
}
