use crate::core::fetch::FetchRequest;
use crate::services::{FetchClient, spawn_fetch};
use crate::tui::app::App;
use crate::tui::terminal::{self, Tui};
use color_eyre::Result;
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{debug, info};

/// Run the TUI until the user quits
///
/// Keys, queued fetch requests and fetch completions are multiplexed on
/// one task; only the HTTP calls run as spawned tasks.
pub async fn run(
    mut app: App,
    client: Arc<FetchClient>,
    mut fetch_rx: UnboundedReceiver<FetchRequest>,
) -> Result<()> {
    let mut terminal = terminal::init()?;
    let result = event_loop(&mut terminal, &mut app, client, &mut fetch_rx).await;
    terminal::restore()?;
    result
}

async fn event_loop(
    terminal: &mut Tui,
    app: &mut App,
    client: Arc<FetchClient>,
    fetch_rx: &mut UnboundedReceiver<FetchRequest>,
) -> Result<()> {
    let (completion_tx, mut completion_rx) = mpsc::unbounded_channel();
    let mut events = EventStream::new();
    info!(root = %client.service_root(), "event loop started");

    loop {
        terminal.draw(|frame| app.render(frame))?;

        tokio::select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) => app.handle_key_event(key)?,
                // Resize and the rest only need a redraw
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
            Some(request) = fetch_rx.recv() => {
                debug!(kind = %request.ticket.kind, seq = request.ticket.seq, "spawning fetch");
                spawn_fetch(Arc::clone(&client), request, completion_tx.clone());
            }
            Some(completion) = completion_rx.recv() => {
                app.complete_fetch(completion)?;
            }
        }

        if app.should_quit() {
            break;
        }
    }

    info!("event loop finished");
    Ok(())
}
