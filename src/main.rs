use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use dotenv::dotenv;
use log::info;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use lunarchat::{api::ReplyFetcher, app::App, chat_view, config, key_handlers, logging};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    config::initialize_config()?;
    let config = config::get_config();
    let _logger = logging::init(&config.log_level)?;
    info!("starting lunarchat against {}", config.endpoint);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, ReplyFetcher::new(config.endpoint)).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    fetcher: ReplyFetcher,
) -> Result<()> {
    let fetcher = Arc::new(fetcher);
    let (tx, mut rx) = mpsc::channel::<String>(1);
    let mut app = App::new();

    while !app.should_quit {
        terminal.draw(|f| chat_view::draw(f, &mut app))?;

        // Single-loop scheduling: fetch completions and key events are both
        // applied here, so the conversation is only ever touched from this
        // task and appends never race.
        tokio::select! {
            Some(reply) = rx.recv() => {
                app.resolve_reply(reply);
            }
            _ = tokio::time::sleep(Duration::from_millis(30)) => {
                while event::poll(Duration::ZERO)? {
                    if let Event::Key(key) = event::read()? {
                        if key.kind == KeyEventKind::Press {
                            if let Some(text) = key_handlers::handle_chat_input(key, &mut app) {
                                spawn_fetch(&fetcher, &tx, text);
                            }
                        }
                    }
                }
            }
        }
    }

    info!("screen closed after {} messages", app.conversation.len());
    Ok(())
}

/// Runs the fetch off the UI loop. Its only output is one reply text on the
/// channel, which the loop turns into exactly one bot message; the task is
/// never cancelled and always runs to completion.
fn spawn_fetch(fetcher: &Arc<ReplyFetcher>, tx: &mpsc::Sender<String>, text: String) {
    let fetcher = Arc::clone(fetcher);
    let tx = tx.clone();
    tokio::spawn(async move {
        let reply = fetcher.fetch_reply(&text).await;
        let _ = tx.send(reply).await;
    });
}
