use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use gostr_core::app::{update, AppState, Message};
use gostr_core::runtime::CommandRunner;
use tracing::{debug, warn};

use crate::input::map_key;
use crate::render::render;
use crate::ui::Tui;

/// Dispatch loop: the only place application state changes.
pub(crate) async fn run_app(terminal: &mut Tui, app: &mut AppState, runner: &CommandRunner) -> Result<()> {
    let mut event_stream = EventStream::new();
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<Message>();

    while app.is_running() {
        terminal.draw(|f| render(f, app))?;

        let message = tokio::select! {
            maybe_event = event_stream.next() => match maybe_event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    match map_key(key) {
                        Some(key) => Message::Key(key),
                        None => continue,
                    }
                }
                Some(Ok(_)) => continue,
                Some(Err(e)) => {
                    warn!("terminal event error: {}", e);
                    continue;
                }
                None => {
                    debug!("terminal event stream ended");
                    break;
                }
            },
            Some(message) = rx.recv() => message,
        };

        if let Some(command) = update(app, message) {
            runner.spawn(command, tx.clone());
        }
    }
    Ok(())
}
