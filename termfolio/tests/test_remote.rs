//! Remote driver over a real loopback socket

use std::sync::Arc;
use std::time::Duration;

use libtermfolio::mock::MockSource;
use termfolio::remote::telnet::NEGOTIATION;
use termfolio::remote::{accept_loop, SessionTemplate};
use termfolio::services::Services;
use termfolio::ui::theme::ThemeId;
use termfolio::ScreenSettings;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

const IAC: u8 = 255;
const SB: u8 = 250;
const SE: u8 = 240;
const NAWS: u8 = 31;

async fn start_server() -> (std::net::SocketAddr, tokio::sync::oneshot::Sender<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let services = Services::with_source(Arc::new(MockSource::with_repositories(3)), "octocat", Duration::from_secs(5));
    let template = SessionTemplate {
        services: Arc::new(services),
        settings: ScreenSettings {
            intro_banner: Vec::new(),
            ..ScreenSettings::default()
        },
        theme: ThemeId::Default,
    };
    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
    tokio::spawn(accept_loop(listener, template, async move {
        let _ = stop_rx.await;
    }));
    (addr, stop_tx)
}

async fn read_until_closed(stream: &mut TcpStream) -> Vec<u8> {
    let mut received = Vec::new();
    let mut buf = [0u8; 4096];
    loop {
        match stream.read(&mut buf).await {
            Ok(0) | Err(_) => return received,
            Ok(n) => received.extend_from_slice(&buf[..n]),
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_session_negotiates_draws_and_quits_on_ctrl_c() {
    let (addr, _stop) = start_server().await;
    let mut client = TcpStream::connect(addr).await.unwrap();

    let mut greeting = [0u8; NEGOTIATION.len()];
    client.read_exact(&mut greeting).await.unwrap();
    assert_eq!(greeting, NEGOTIATION);

    client.write_all(&[IAC, SB, NAWS, 0, 80, 0, 24, IAC, SE]).await.unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;
    client.write_all(&[0x03]).await.unwrap();

    let received = tokio::time::timeout(Duration::from_secs(10), read_until_closed(&mut client))
        .await
        .expect("session did not end after Ctrl+C");
    let text = String::from_utf8_lossy(&received);
    assert!(text.contains("\x1b[?1049h"), "alternate screen not entered");
    assert!(text.contains("\x1b[?1049l"), "alternate screen not left");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_sessions_are_independent() {
    let (addr, _stop) = start_server().await;
    let mut first = TcpStream::connect(addr).await.unwrap();
    let mut second = TcpStream::connect(addr).await.unwrap();

    let mut greeting = [0u8; NEGOTIATION.len()];
    first.read_exact(&mut greeting).await.unwrap();
    second.read_exact(&mut greeting).await.unwrap();

    // ending the first session leaves the second one running
    first.write_all(&[0x03]).await.unwrap();
    tokio::time::timeout(Duration::from_secs(10), read_until_closed(&mut first))
        .await
        .expect("first session did not end");

    second.write_all(&[IAC, SB, NAWS, 0, 80, 0, 24, IAC, SE]).await.unwrap();
    let mut buf = [0u8; 1024];
    let n = tokio::time::timeout(Duration::from_secs(5), second.read(&mut buf))
        .await
        .expect("second session stopped drawing")
        .unwrap();
    assert!(n > 0);

    second.write_all(&[0x03]).await.unwrap();
    tokio::time::timeout(Duration::from_secs(10), read_until_closed(&mut second))
        .await
        .expect("second session did not end");
}
