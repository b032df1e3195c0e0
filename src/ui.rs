// ============================================
// src/ui.rs
// UI描画
// ============================================

use ratatui::{
    prelude::*,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};

use crate::app::App;
use crate::presenter::{ChoiceView, Marker};
use crate::quiz::Phase;

pub fn ui(f: &mut Frame, app: &App) {
    let size = f.area();
    // 枠線を描画
    let block = Block::default().borders(Borders::ALL).title("Trivia Wiz !");
    let inner_area = block.inner(size);
    f.render_widget(block, size);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // [0] ステータスバー (進捗ゲージ)
            Constraint::Length(1), // [1] スコア
            Constraint::Length(1), // [2] 空白
            Constraint::Min(3),    // [3] 本文
            Constraint::Length(1), // [4] 操作ガイド
        ])
        .split(inner_area);

    render_status(f, app, chunks[0], chunks[1]);

    let help = match app.quiz.phase() {
        Phase::Idle => {
            render_centered(f, chunks[3], vec![Line::from("Press ENTER to START").bold()]);
            "ENTER: start   ESC: quit"
        }
        Phase::Loading => {
            render_centered(
                f,
                chunks[3],
                vec![Line::from("Loading Questions...").fg(Color::Yellow)],
            );
            "ESC: quit"
        }
        Phase::InProgress => {
            render_question(f, app, chunks[3]);
            if app.quiz.is_current_answered() {
                if app.quiz.is_last_question() {
                    "ENTER: finish   ESC: quit"
                } else {
                    "ENTER: NEXT QUESTION   ESC: quit"
                }
            } else {
                "↑/↓: select   ENTER or 1-9: answer   ESC: quit"
            }
        }
        Phase::Finished => {
            render_summary(f, app, chunks[3]);
            "ENTER: play again   ESC: quit"
        }
        Phase::Failed => {
            let message = app
                .quiz
                .error
                .as_ref()
                .map(|e| e.to_string())
                .unwrap_or_default();
            render_centered(
                f,
                chunks[3],
                vec![
                    Line::from("Could not load questions").fg(Color::Red).bold(),
                    Line::from(message).fg(Color::Red),
                ],
            );
            "ENTER: try again   ESC: quit"
        }
    };

    f.render_widget(
        Paragraph::new(help).style(Style::default().fg(Color::DarkGray)).centered(),
        chunks[4],
    );
}

/// 進捗ゲージとスコア
fn render_status(f: &mut Frame, app: &App, gauge_area: Rect, score_area: Rect) {
    let quiz = &app.quiz;
    if quiz.game_over || quiz.loading {
        return;
    }

    let total = quiz.total();
    let answered = quiz.user_answers.len();
    let ratio = if total > 0 {
        (answered as f64 / total as f64).min(1.0)
    } else {
        0.0
    };
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::NONE))
        .gauge_style(Style::default().fg(Color::Magenta).bg(Color::Black))
        .ratio(ratio)
        .label(format!("{answered} / {total}"));
    f.render_widget(gauge, gauge_area);

    f.render_widget(
        Paragraph::new(format!("Score: {}", quiz.score)).style(Style::default().fg(Color::Yellow)),
        score_area,
    );
}

fn render_centered(f: &mut Frame, area: Rect, lines: Vec<Line<'_>>) {
    f.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }).centered(),
        area,
    );
}

/// 問題カード
fn render_question(f: &mut Frame, app: &App, area: Rect) {
    let Some(card) = app.card() else {
        return;
    };

    let mut lines = vec![
        Line::from(card.progress.clone()).fg(Color::Gray),
        Line::from(""),
        Line::from(card.question).fg(Color::White).bold(),
        Line::from(""),
    ];
    if let Some(question) = app.quiz.current_question() {
        lines.insert(1, Line::from(question.category.clone()).fg(Color::DarkGray));
    }

    for (i, choice) in card.choices.iter().enumerate() {
        lines.push(choice_line(i, choice, i == app.cursor));
    }

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn choice_line<'a>(index: usize, choice: &ChoiceView<'a>, selected: bool) -> Line<'a> {
    let style = match choice.marker() {
        Marker::Correct => Style::default().fg(Color::Black).bg(Color::Green),
        Marker::Incorrect => Style::default().fg(Color::White).bg(Color::Red),
        Marker::None if choice.disabled => Style::default().fg(Color::DarkGray),
        // カーソル (白)
        Marker::None if selected => Style::default().fg(Color::Black).bg(Color::White),
        Marker::None => Style::default().fg(Color::Gray),
    };
    let pointer = if selected && !choice.disabled { "> " } else { "  " };

    Line::from(vec![
        Span::raw(pointer),
        Span::styled(format!("{}. ", index + 1), Style::default().fg(Color::DarkGray)),
        Span::styled(choice.text, style),
    ])
}

/// 結果表示
fn render_summary(f: &mut Frame, app: &App, area: Rect) {
    let Some(summary) = &app.last_summary else {
        return;
    };

    let mut lines = vec![
        Line::from("GAME OVER").bold(),
        Line::from(format!(
            "Score: {} / {} ({:.0}%)",
            summary.score, summary.total, summary.percent
        ))
        .fg(Color::Yellow),
    ];
    if let Some(sec) = summary.elapsed_sec {
        lines.push(Line::from(format!("Time: {sec}s")).fg(Color::Yellow));
    }
    lines.push(Line::from(""));

    for (i, record) in summary.answers.iter().enumerate() {
        let mark = if record.correct {
            Span::styled("o ", Style::default().fg(Color::Green))
        } else {
            Span::styled("x ", Style::default().fg(Color::Red))
        };
        let mut spans = vec![
            Span::raw(format!("{:>2}. ", i + 1)),
            mark,
            Span::raw(record.question.clone()),
        ];
        if !record.correct {
            spans.push(Span::styled(
                format!("  ({})", record.correct_answer),
                Style::default().fg(Color::Green),
            ));
        }
        lines.push(Line::from(spans));
    }

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}
