// ============================================
// src/plain.rs
// 代替スクリーンを使わない行ベースのモード (--plain)
// ============================================

use anyhow::Result;
use console::style;
use dialoguer::{Confirm, Select, theme::ColorfulTheme};
use tracing::info;

use crate::api::QuestionSource;
use crate::presenter::{Marker, present};
use crate::quiz::{QuizConfig, QuizState, SessionSummary};

/// プロンプトでクイズを遊ぶ
///
/// ESC で中断した場合も含め、最後に終了したセッションの集計を返す。
pub fn run(config: QuizConfig, source: &dyn QuestionSource) -> Result<Option<SessionSummary>> {
    let theme = ColorfulTheme::default();
    let mut last_summary = None;

    loop {
        let mut quiz = QuizState::new(config).start();
        println!("{}", style("Loading Questions...").yellow());
        let result = source.fetch(config.amount, config.difficulty);
        quiz = quiz.loaded(result);

        if let Some(err) = &quiz.error {
            eprintln!("{} {}", style("Could not load questions:").red().bold(), err);
        } else {
            match play(quiz, &theme)? {
                Some(summary) => {
                    print_summary(&summary);
                    last_summary = Some(summary);
                }
                None => return Ok(last_summary), // ESC
            }
        }

        let again = Confirm::with_theme(&theme)
            .with_prompt("Play again?")
            .default(true)
            .interact()?;
        if !again {
            return Ok(last_summary);
        }
    }
}

/// 1 セッション分の出題ループ
fn play(mut quiz: QuizState, theme: &ColorfulTheme) -> Result<Option<SessionSummary>> {
    while !quiz.game_over {
        let Some(question) = quiz.current_question() else {
            break;
        };

        println!();
        println!("{}", style(&question.category).dim());
        let card = present(
            &question.question,
            &question.answers,
            quiz.number,
            quiz.total(),
            quiz.current_answer(),
        );
        let texts: Vec<&str> = card.choices.iter().map(|c| c.text).collect();

        let Some(index) = Select::with_theme(theme)
            .with_prompt(format!("{}  {}", card.progress, card.question))
            .items(&texts)
            .default(0)
            .interact_opt()?
        else {
            info!("session abandoned");
            return Ok(None);
        };

        let mut chosen = None;
        card.click(index, |text| chosen = Some(text.to_string()));
        let Some(answer) = chosen else {
            continue;
        };

        quiz = quiz.submit_answer(answer);
        print_feedback(&quiz);
        quiz = quiz.advance();
    }

    Ok(quiz.summary())
}

/// 回答直後の正誤表示
fn print_feedback(quiz: &QuizState) {
    let Some(question) = quiz.current_question() else {
        return;
    };
    let card = present(
        &question.question,
        &question.answers,
        quiz.number,
        quiz.total(),
        quiz.current_answer(),
    );

    for choice in &card.choices {
        match choice.marker() {
            Marker::Correct => println!("  {}", style(format!("o {}", choice.text)).green()),
            Marker::Incorrect => println!("  {}", style(format!("x {}", choice.text)).red()),
            Marker::None => println!("  {}", style(format!("  {}", choice.text)).dim()),
        }
    }
    println!("{}", style(format!("Score: {}", quiz.score)).yellow());
}

fn print_summary(summary: &SessionSummary) {
    println!();
    println!("{}", style("GAME OVER").bold());
    println!(
        "{}",
        style(format!(
            "Score: {} / {} ({:.0}%)",
            summary.score, summary.total, summary.percent
        ))
        .yellow()
    );
    if let Some(sec) = summary.elapsed_sec {
        println!("{}", style(format!("Time: {sec}s")).yellow());
    }
}
