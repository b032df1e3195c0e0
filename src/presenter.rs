// ============================================
// src/presenter.rs
// 1 問分の表示内容を組み立てる (状態を持たない)
// ============================================

use crate::quiz::AnswerRecord;

/// 選択肢ボタン 1 つ分
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceView<'a> {
    pub text: &'a str,
    pub disabled: bool,
    pub marked_correct: bool,   // 正解の選択肢
    pub marked_incorrect: bool, // ユーザーが選んだ選択肢
}

/// ボタンの見た目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    None,
    Correct,
    Incorrect,
}

impl ChoiceView<'_> {
    /// 両方のマーカーが付いている場合は正解を優先する
    pub fn marker(&self) -> Marker {
        if self.marked_correct {
            Marker::Correct
        } else if self.marked_incorrect {
            Marker::Incorrect
        } else {
            Marker::None
        }
    }
}

/// 問題カード (表示用)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionCard<'a> {
    pub progress: String,
    pub question: &'a str,
    pub choices: Vec<ChoiceView<'a>>,
}

/// 問題カードを組み立てる
///
/// `number` は 0 始まり。`user_answer` があれば全ボタンを無効化し、
/// 正解と選んだ選択肢にマーカーを付ける。
pub fn present<'a>(
    question: &'a str,
    answers: &'a [String],
    number: usize,
    total: usize,
    user_answer: Option<&AnswerRecord>,
) -> QuestionCard<'a> {
    let choices = answers
        .iter()
        .map(|answer| ChoiceView {
            text: answer,
            disabled: user_answer.is_some(),
            marked_correct: user_answer.is_some_and(|ua| ua.correct_answer == *answer),
            marked_incorrect: user_answer.is_some_and(|ua| ua.answer == *answer),
        })
        .collect();

    QuestionCard {
        progress: format!("Question: {} / {}", number + 1, total),
        question,
        choices,
    }
}

impl QuestionCard<'_> {
    /// 選択肢 `index` をクリックする
    ///
    /// 有効なボタンなら `on_click` に選択肢のテキストを渡して true を返す。
    pub fn click<F: FnOnce(&str)>(&self, index: usize, on_click: F) -> bool {
        match self.choices.get(index) {
            Some(choice) if !choice.disabled => {
                on_click(choice.text);
                true
            }
            _ => false,
        }
    }

    /// 回答済みか (全ボタンが無効)
    pub fn is_answered(&self) -> bool {
        self.choices.iter().all(|c| c.disabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers() -> Vec<String> {
        ["London", "Paris", "Berlin", "Madrid"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn record(answer: &str) -> AnswerRecord {
        AnswerRecord {
            question: "Capital of France?".into(),
            answer: answer.into(),
            correct: answer == "Paris",
            correct_answer: "Paris".into(),
        }
    }

    #[test]
    fn unanswered_card_is_enabled_and_unmarked() {
        let answers = answers();
        let card = present("Capital of France?", &answers, 2, 10, None);

        assert_eq!(card.progress, "Question: 3 / 10");
        assert_eq!(card.question, "Capital of France?");
        assert_eq!(card.choices.len(), 4);
        assert!(card.choices.iter().all(|c| !c.disabled));
        assert!(card.choices.iter().all(|c| c.marker() == Marker::None));
        assert!(!card.is_answered());
    }

    #[test]
    fn wrong_answer_marks_two_buttons() {
        let answers = answers();
        let prior = record("Berlin");
        let card = present("Capital of France?", &answers, 0, 10, Some(&prior));

        assert!(card.is_answered());
        let marked: Vec<_> = card
            .choices
            .iter()
            .map(|c| (c.text, c.marker()))
            .filter(|(_, m)| *m != Marker::None)
            .collect();
        assert_eq!(
            marked,
            vec![("Paris", Marker::Correct), ("Berlin", Marker::Incorrect)]
        );
    }

    #[test]
    fn right_answer_carries_both_flags() {
        let answers = answers();
        let prior = record("Paris");
        let card = present("Capital of France?", &answers, 0, 10, Some(&prior));

        let paris = &card.choices[1];
        assert!(paris.marked_correct);
        assert!(paris.marked_incorrect);
        assert_eq!(paris.marker(), Marker::Correct);
        assert_eq!(
            card.choices.iter().filter(|c| c.marker() != Marker::None).count(),
            1
        );
    }

    #[test]
    fn click_invokes_handler_only_when_enabled() {
        let answers = answers();
        let card = present("Capital of France?", &answers, 0, 10, None);

        let mut clicked = None;
        assert!(card.click(1, |text| clicked = Some(text.to_string())));
        assert_eq!(clicked.as_deref(), Some("Paris"));

        assert!(!card.click(9, |_| panic!("out of range")));

        let prior = record("Paris");
        let answered = present("Capital of France?", &answers, 0, 10, Some(&prior));
        assert!(!answered.click(0, |_| panic!("disabled button clicked")));
    }
}
