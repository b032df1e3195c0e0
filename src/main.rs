// ============================================
// src/main.rs (メインファイル)
// ============================================

use std::io::stdout;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;

mod api;
mod app;
mod cli;
mod logging;
mod plain;
mod presenter;
mod questions;
mod quiz;
mod sanitize;
mod ui;

use api::{OpenTriviaClient, QuestionSource};
use app::App;
use cli::Cli;
use quiz::SessionSummary;

use crossterm::{
    ExecutableCommand,
    cursor::{Hide, Show},
    event::{self, Event, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tracing::info;

// --------------------------------------------------
// メイン関数 (TUIセットアップと実行ループ)
// --------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = logging::init(cli.verbose, cli.log_dir.as_deref())?;
    info!(?cli, "starting triviawiz");

    let source: Arc<dyn QuestionSource> = Arc::new(OpenTriviaClient::new(cli.client_config())?);

    let summary = if cli.plain {
        plain::run(cli.quiz_config(), source.as_ref())?
    } else {
        let mut terminal = setup_terminal()?;
        let mut app = App::new(cli.quiz_config(), source);
        let result = run_app(&mut terminal, &mut app);
        // エラーでも端末は必ず元に戻す
        restore_terminal()?;
        result?;
        app.last_summary
    };

    if cli.json {
        print_json(summary.as_ref())?;
    }
    Ok(())
}

fn print_json(summary: Option<&SessionSummary>) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn setup_terminal() -> Result<Terminal<impl Backend>> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?; // 代替スクリーンを使用
    stdout().execute(Hide)?; // カーソルを非表示
    let backend = CrosstermBackend::new(stdout());
    Ok(Terminal::new(backend)?)
}

fn restore_terminal() -> Result<()> {
    stdout().execute(Show)?; // カーソルを再表示
    stdout().execute(LeaveAlternateScreen)?; // 代替スクリーンを終了
    disable_raw_mode()?;
    Ok(())
}

fn run_app(terminal: &mut Terminal<impl Backend>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::ui(f, app))?;

        // 読み込みスレッドの結果を反映
        app.tick();

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
