//! Remote driver
//!
//! Serves the application over TCP to telnet clients. Every connection is an
//! independent session with its own dispatcher, scheduler and event channel;
//! only the data source is shared. The session loop is synchronous, so it
//! runs on the blocking pool while two small tasks move bytes between the
//! socket and the session.

pub mod telnet;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::Sender;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::tcp::OwnedReadHalf;
use tokio::net::{TcpListener, TcpStream};
use tracing::Instrument;
use uuid::Uuid;

use crate::app::{Dispatcher, Event};
use crate::error::Result;
use crate::runtime::{run_session, Scheduler};
use crate::screens::ScreenSettings;
use crate::services::Services;
use crate::terminal::{enter_screen, fixed_terminal, leave_screen};
use crate::ui::theme::ThemeId;

use self::telnet::{ChannelWriter, TelnetDecoder, DEFAULT_SIZE, NEGOTIATION};

/// How long a client gets to report its window size before the default is assumed
const WINDOW_SIZE_GRACE: Duration = Duration::from_secs(2);

/// Frames queued for the socket before the session gives up on the client
const OUTPUT_QUEUE_FRAMES: usize = 64;

/// How long queued output may take to reach the client after the session ends
const OUTPUT_DRAIN_GRACE: Duration = Duration::from_secs(5);

/// What every new session starts from
#[derive(Clone)]
pub struct SessionTemplate {
    pub services: Arc<Services>,
    pub settings: ScreenSettings,
    pub theme: ThemeId,
}

/// Accept connections on `listen` until SIGINT
///
/// # Errors
///
/// Fails when the address cannot be bound.
pub async fn serve(listen: &str, template: SessionTemplate) -> Result<()> {
    let listener = TcpListener::bind(listen).await?;
    tracing::info!(addr = %listener.local_addr()?, "accepting telnet sessions");
    accept_loop(listener, template, shutdown_signal()).await;
    Ok(())
}

/// Accept connections on an already bound listener until `shutdown` resolves
pub async fn accept_loop(
    listener: TcpListener,
    template: SessionTemplate,
    shutdown: impl std::future::Future<Output = ()>,
) {
    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            accepted = listener.accept() => match accepted {
                Ok((stream, peer)) => {
                    let id = Uuid::new_v4();
                    let span = tracing::info_span!("session", %id, %peer);
                    tokio::spawn(handle_connection(stream, peer, template.clone()).instrument(span));
                }
                Err(e) => tracing::warn!(error = %e, "accept failed"),
            },
            _ = &mut shutdown => {
                tracing::info!("shutting down listener");
                break;
            }
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "cannot listen for SIGINT");
        std::future::pending::<()>().await;
    }
}

async fn handle_connection(stream: TcpStream, peer: SocketAddr, template: SessionTemplate) {
    tracing::info!("session opened");
    let (reader, mut writer) = stream.into_split();
    if let Err(e) = writer.write_all(&NEGOTIATION).await {
        tracing::warn!(error = %e, "negotiation failed");
        return;
    }

    let (out_tx, mut out_rx) = tokio::sync::mpsc::channel::<Vec<u8>>(OUTPUT_QUEUE_FRAMES);
    let mut writer_task = tokio::spawn(async move {
        while let Some(frame) = out_rx.recv().await {
            if writer.write_all(&frame).await.is_err() {
                break;
            }
        }
        let _ = writer.shutdown().await;
    });

    let (events_tx, events_rx) = crossbeam_channel::unbounded();
    let reader_task = tokio::spawn(read_input(reader, events_tx.clone()).in_current_span());

    let handle = tokio::runtime::Handle::current();
    let services = Arc::new(template.services.for_remote_session());
    let span = tracing::Span::current();
    let session = tokio::task::spawn_blocking(move || -> Result<()> {
        let _entered = span.enter();
        let mut scheduler = Scheduler::new(handle, services, events_tx);
        let mut dispatcher = Dispatcher::new(template.theme, template.settings);
        let mut terminal = fixed_terminal(ChannelWriter::new(out_tx), DEFAULT_SIZE.0, DEFAULT_SIZE.1)?;

        enter_screen(terminal.backend_mut())?;
        let outcome = run_session(&mut terminal, &mut dispatcher, &mut scheduler, &events_rx);
        let _ = leave_screen(terminal.backend_mut());
        outcome
    })
    .await;

    reader_task.abort();
    match session {
        Ok(Ok(())) => tracing::info!(%peer, "session closed"),
        Ok(Err(e)) => tracing::warn!(%peer, error = %e, "session ended with error"),
        Err(e) => tracing::error!(%peer, error = %e, "session crashed"),
    }
    if tokio::time::timeout(OUTPUT_DRAIN_GRACE, &mut writer_task).await.is_err() {
        tracing::debug!(%peer, "client stopped reading, dropping queued output");
        writer_task.abort();
    }
}

async fn read_input(mut reader: OwnedReadHalf, events: Sender<Event>) {
    let mut decoder = TelnetDecoder::default();
    let mut buf = [0u8; 1024];
    let mut sized = false;

    loop {
        let read = if sized {
            reader.read(&mut buf).await
        } else {
            match tokio::time::timeout(WINDOW_SIZE_GRACE, reader.read(&mut buf)).await {
                Ok(read) => read,
                Err(_) => {
                    tracing::debug!("no window size reported, assuming default");
                    sized = true;
                    if events.send(Event::Resize(DEFAULT_SIZE.0, DEFAULT_SIZE.1)).is_err() {
                        return;
                    }
                    continue;
                }
            }
        };

        let n = match read {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) => {
                tracing::debug!(error = %e, "read failed");
                break;
            }
        };

        for event in decoder.feed(&buf[..n]) {
            if matches!(event, Event::Resize(..)) {
                sized = true;
            }
            if events.send(event).is_err() {
                return;
            }
        }
    }

    // peer went away: end the session the way Ctrl+C would
    let _ = events.send(Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
}
