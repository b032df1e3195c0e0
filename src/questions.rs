/*
 * src/questions.rs
 * 問題データ (Question) と難易度を管理するモジュール
 */

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::sanitize::plain_text;

/// 問題の難易度 (API の `difficulty` パラメータ)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// API から届いた 1 問分の生データ
#[derive(Debug, Clone, Deserialize)]
pub struct RawQuestion {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub difficulty: String,
    pub question: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
}

/// 1 問分のデータ (取得後は変更しない)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub question: String,       // 問題文 (プレーンテキスト)
    pub correct_answer: String, // 正解
    pub answers: Vec<String>,   // 選択肢 (正解を含み、シャッフル済み)
    pub difficulty: Difficulty,
    pub category: String,
}

impl Question {
    /// 生データを問題に変換する
    ///
    /// テキストはすべてプレーンテキスト化してから保持し、
    /// 正解と不正解をまとめた選択肢を `rng` でシャッフルする。
    pub fn from_raw<R: Rng + ?Sized>(raw: RawQuestion, fallback: Difficulty, rng: &mut R) -> Self {
        let correct_answer = plain_text(&raw.correct_answer);

        // 選択肢の文字列は一意 (プレゼンターは文字列で正誤を判定する)
        let mut answers: Vec<String> = Vec::with_capacity(raw.incorrect_answers.len() + 1);
        for answer in raw.incorrect_answers.iter().map(|a| plain_text(a)) {
            if answer != correct_answer && !answers.contains(&answer) {
                answers.push(answer);
            }
        }
        answers.push(correct_answer.clone());
        answers.shuffle(rng);

        Self {
            question: plain_text(&raw.question),
            correct_answer,
            answers,
            difficulty: raw.difficulty.parse().unwrap_or(fallback),
            category: plain_text(&raw.category),
        }
    }

    /// `answer` が正解か
    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct_answer == answer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn raw(question: &str, correct: &str, incorrect: &[&str]) -> RawQuestion {
        RawQuestion {
            category: "Geography".into(),
            difficulty: "easy".into(),
            question: question.into(),
            correct_answer: correct.into(),
            incorrect_answers: incorrect.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn choices_contain_correct_answer_once() {
        let mut rng = StdRng::seed_from_u64(7);
        let q = Question::from_raw(
            raw("Capital of France?", "Paris", &["London", "Berlin", "Madrid"]),
            Difficulty::Easy,
            &mut rng,
        );

        assert_eq!(q.answers.len(), 4);
        assert_eq!(q.answers.iter().filter(|a| *a == "Paris").count(), 1);
        for other in ["London", "Berlin", "Madrid"] {
            assert!(q.answers.iter().any(|a| a == other));
        }
        assert!(q.is_correct("Paris"));
        assert!(!q.is_correct("Berlin"));
    }

    #[test]
    fn entities_are_decoded_before_comparison() {
        let mut rng = StdRng::seed_from_u64(1);
        let q = Question::from_raw(
            raw(
                "Who wrote &quot;Hamlet&quot;?",
                "Shakespeare&#039;s",
                &["Marlowe&#039;s", "Jonson&#039;s", "Kyd&#039;s"],
            ),
            Difficulty::Easy,
            &mut rng,
        );

        assert_eq!(q.question, "Who wrote \"Hamlet\"?");
        assert_eq!(q.correct_answer, "Shakespeare's");
        assert!(q.answers.contains(&"Shakespeare's".to_string()));
        assert!(q.is_correct("Shakespeare's"));
    }

    #[test]
    fn unknown_difficulty_falls_back() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut r = raw("Q", "A", &["B"]);
        r.difficulty = "impossible".into();
        let q = Question::from_raw(r, Difficulty::Medium, &mut rng);
        assert_eq!(q.difficulty, Difficulty::Medium);
    }

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("HARD".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert!("nope".parse::<Difficulty>().is_err());
        assert_eq!(Difficulty::default().to_string(), "easy");
    }
}
