//! Minimal telnet: option negotiation and input decoding
//!
//! The server announces WILL ECHO and WILL SGA so the client switches to
//! character-at-a-time mode without local echo, and asks DO NAWS so the
//! client reports its window size. Everything else the client negotiates is
//! ignored. Input bytes are decoded into key events, window-size
//! subnegotiations into resizes.

use std::io::{self, Write};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc::{error::TrySendError, Sender};

use crate::app::Event;

const IAC: u8 = 255;
const DONT: u8 = 254;
const DO: u8 = 253;
const WONT: u8 = 252;
const WILL: u8 = 251;
const SB: u8 = 250;
const SE: u8 = 240;

const ECHO: u8 = 1;
const SGA: u8 = 3;
const NAWS: u8 = 31;

const ESC: u8 = 0x1b;

/// Sent once when a connection opens
pub const NEGOTIATION: [u8; 9] = [IAC, WILL, ECHO, IAC, WILL, SGA, IAC, DO, NAWS];

/// Assumed window size for clients that never report one
pub const DEFAULT_SIZE: (u16, u16) = (80, 24);

/// Reported sizes are clamped to this
pub const MAX_SIZE: (u16, u16) = (500, 200);

/// Longest subnegotiation payload kept; NAWS needs five bytes
const MAX_SUB_LEN: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Data,
    Iac,
    Option(u8),
    Sub,
    SubIac,
}

/// Incremental decoder for the client-to-server byte stream
#[derive(Debug)]
pub struct TelnetDecoder {
    state: State,
    data: Vec<u8>,
    sub: Vec<u8>,
}

impl Default for TelnetDecoder {
    fn default() -> Self {
        Self {
            state: State::Data,
            data: Vec::new(),
            sub: Vec::new(),
        }
    }
}

impl TelnetDecoder {
    /// Decode one chunk read from the socket
    ///
    /// Escape sequences are expected to arrive within one chunk; a lone ESC
    /// at the end of a chunk is reported as the Esc key.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<Event> {
        let mut out = Vec::new();
        for &byte in bytes {
            self.state = match self.state {
                State::Data if byte == IAC => {
                    self.flush_keys(&mut out);
                    State::Iac
                }
                State::Data => {
                    self.data.push(byte);
                    State::Data
                }
                State::Iac => match byte {
                    IAC => {
                        self.data.push(IAC);
                        State::Data
                    }
                    SB => {
                        self.sub.clear();
                        State::Sub
                    }
                    WILL | WONT | DO | DONT => State::Option(byte),
                    _ => State::Data,
                },
                State::Option(command) => {
                    if command == WONT && byte == NAWS {
                        out.push(Event::Resize(DEFAULT_SIZE.0, DEFAULT_SIZE.1));
                    }
                    State::Data
                }
                State::Sub if byte == IAC => State::SubIac,
                State::Sub => {
                    self.push_sub(byte);
                    State::Sub
                }
                State::SubIac => match byte {
                    SE => {
                        if let Some((width, height)) = parse_window_size(&self.sub) {
                            out.push(Event::Resize(width, height));
                        }
                        self.sub.clear();
                        State::Data
                    }
                    IAC => {
                        self.push_sub(IAC);
                        State::Sub
                    }
                    _ => {
                        self.sub.clear();
                        State::Data
                    }
                },
            };
        }
        self.flush_keys(&mut out);
        out
    }

    /// Oversized payloads are truncated and then fail to parse
    fn push_sub(&mut self, byte: u8) {
        if self.sub.len() < MAX_SUB_LEN {
            self.sub.push(byte);
        }
    }

    fn flush_keys(&mut self, out: &mut Vec<Event>) {
        let bytes = std::mem::take(&mut self.data);
        let mut i = 0;
        while i < bytes.len() {
            let byte = bytes[i];
            let (key, used) = match byte {
                ESC => {
                    let (key, used) = escape_sequence(&bytes[i + 1..]);
                    (Some(key), used + 1)
                }
                b'\r' => {
                    let used = if matches!(bytes.get(i + 1).copied(), Some(b'\n') | Some(0)) { 2 } else { 1 };
                    (Some(plain(KeyCode::Enter)), used)
                }
                b'\n' => (Some(plain(KeyCode::Enter)), 1),
                b'\t' => (Some(plain(KeyCode::Tab)), 1),
                0x08 | 0x7f => (Some(plain(KeyCode::Backspace)), 1),
                0x01..=0x1a => {
                    let letter = char::from(byte - 1 + b'a');
                    (Some(KeyEvent::new(KeyCode::Char(letter), KeyModifiers::CONTROL)), 1)
                }
                0x20..=0x7e => (Some(plain(KeyCode::Char(char::from(byte)))), 1),
                0x80..=0xff => {
                    let len = utf8_len(byte);
                    if i + len > bytes.len() {
                        // keep the partial character for the next chunk
                        self.data = bytes[i..].to_vec();
                        return;
                    }
                    let key = std::str::from_utf8(&bytes[i..i + len])
                        .ok()
                        .and_then(|s| s.chars().next())
                        .map(|c| plain(KeyCode::Char(c)));
                    (key, if key.is_some() { len } else { 1 })
                }
                _ => (None, 1),
            };
            if let Some(key) = key {
                out.push(Event::Key(key));
            }
            i += used;
        }
    }
}

fn plain(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

/// Decode what follows an ESC; returns the key and the bytes consumed after the ESC
fn escape_sequence(rest: &[u8]) -> (KeyEvent, usize) {
    match rest {
        [b'[' | b'O', code, ..] if code.is_ascii_uppercase() => {
            let key = match *code {
                b'A' => KeyCode::Up,
                b'B' => KeyCode::Down,
                b'C' => KeyCode::Right,
                b'D' => KeyCode::Left,
                b'H' => KeyCode::Home,
                b'F' => KeyCode::End,
                _ => return (plain(KeyCode::Esc), 0),
            };
            (plain(key), 2)
        }
        [b'[', tail @ ..] => {
            let digits = tail.iter().take_while(|b| b.is_ascii_digit()).count();
            if digits == 0 || tail.get(digits) != Some(&b'~') {
                return (plain(KeyCode::Esc), 0);
            }
            let key = match &tail[..digits] {
                b"1" | b"7" => KeyCode::Home,
                b"3" => KeyCode::Delete,
                b"4" | b"8" => KeyCode::End,
                b"5" => KeyCode::PageUp,
                b"6" => KeyCode::PageDown,
                _ => return (plain(KeyCode::Esc), 0),
            };
            (plain(key), digits + 2)
        }
        _ => (plain(KeyCode::Esc), 0),
    }
}

fn utf8_len(lead: u8) -> usize {
    match lead {
        0xc0..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf7 => 4,
        _ => 1,
    }
}

fn parse_window_size(sub: &[u8]) -> Option<(u16, u16)> {
    match sub {
        [NAWS, w_hi, w_lo, h_hi, h_lo] => {
            let width = u16::from_be_bytes([*w_hi, *w_lo]);
            let height = u16::from_be_bytes([*h_hi, *h_lo]);
            if width == 0 || height == 0 {
                return None;
            }
            Some((width.min(MAX_SIZE.0), height.min(MAX_SIZE.1)))
        }
        _ => None,
    }
}

/// `Write` sink that hands each flushed frame to the socket writer task
pub struct ChannelWriter {
    buffer: Vec<u8>,
    sink: Sender<Vec<u8>>,
}

impl ChannelWriter {
    /// `sink` should be bounded; a full queue means the client stopped reading
    pub fn new(sink: Sender<Vec<u8>>) -> Self {
        Self {
            buffer: Vec::with_capacity(8 * 1024),
            sink,
        }
    }
}

impl Write for ChannelWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    /// Frames are diffs against the previous one, so a frame that cannot be
    /// queued ends the session instead of being dropped
    fn flush(&mut self) -> io::Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        let frame = std::mem::take(&mut self.buffer);
        self.sink.try_send(frame).map_err(|e| match e {
            TrySendError::Full(_) => io::Error::new(io::ErrorKind::WouldBlock, "client is not reading output"),
            TrySendError::Closed(_) => io::Error::new(io::ErrorKind::BrokenPipe, "connection closed"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(events: &[Event]) -> Vec<KeyEvent> {
        events
            .iter()
            .filter_map(|e| match e {
                Event::Key(k) => Some(*k),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_printable_and_enter() {
        let mut decoder = TelnetDecoder::default();
        let events = decoder.feed(b"j/\r\n");
        assert_eq!(
            keys(&events),
            vec![plain(KeyCode::Char('j')), plain(KeyCode::Char('/')), plain(KeyCode::Enter)]
        );
    }

    #[test]
    fn test_cr_nul_is_one_enter() {
        let mut decoder = TelnetDecoder::default();
        assert_eq!(decoder.feed(b"\r\0").len(), 1);
    }

    #[test]
    fn test_ctrl_c() {
        let mut decoder = TelnetDecoder::default();
        let events = decoder.feed(&[0x03]);
        assert_eq!(keys(&events), vec![KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)]);
    }

    #[test]
    fn test_arrow_and_paging_sequences() {
        let mut decoder = TelnetDecoder::default();
        let events = decoder.feed(b"\x1b[A\x1bOB\x1b[5~\x1b[6~\x1b[H\x1b[4~");
        assert_eq!(
            keys(&events),
            vec![
                plain(KeyCode::Up),
                plain(KeyCode::Down),
                plain(KeyCode::PageUp),
                plain(KeyCode::PageDown),
                plain(KeyCode::Home),
                plain(KeyCode::End),
            ]
        );
    }

    #[test]
    fn test_lone_escape() {
        let mut decoder = TelnetDecoder::default();
        assert_eq!(keys(&decoder.feed(&[ESC])), vec![plain(KeyCode::Esc)]);
    }

    #[test]
    fn test_window_size_subnegotiation() {
        let mut decoder = TelnetDecoder::default();
        let events = decoder.feed(&[IAC, SB, NAWS, 0, 120, 0, 40, IAC, SE]);
        assert!(matches!(events.as_slice(), [Event::Resize(120, 40)]));
    }

    #[test]
    fn test_unterminated_subnegotiation_stays_bounded() {
        let mut decoder = TelnetDecoder::default();
        decoder.feed(&[IAC, SB, NAWS]);
        let chunk = vec![b'x'; 64 * 1024];
        for _ in 0..16 {
            assert!(decoder.feed(&chunk).is_empty());
        }
        assert!(decoder.sub.len() <= MAX_SUB_LEN);

        // the oversized payload is discarded and the stream recovers
        let events = decoder.feed(&[IAC, SE]);
        assert!(events.is_empty());
        let events = decoder.feed(&[IAC, SB, NAWS, 0, 100, 0, 30, IAC, SE, b'j']);
        assert!(matches!(events.as_slice(), [Event::Resize(100, 30), Event::Key(_)]));
    }

    #[test]
    fn test_window_size_is_clamped() {
        let mut decoder = TelnetDecoder::default();
        let events = decoder.feed(&[IAC, SB, NAWS, 0xff, 0xff, 0xff, 0xff, IAC, SE]);
        // 0xff inside a subnegotiation must be doubled, so this one is malformed
        assert!(events.is_empty());

        let events = decoder.feed(&[IAC, SB, NAWS, 0x27, 0x10, 0x03, 0xe8, IAC, SE]);
        assert!(matches!(events.as_slice(), [Event::Resize(500, 200)]));
    }

    #[test]
    fn test_refused_window_size_falls_back() {
        let mut decoder = TelnetDecoder::default();
        let events = decoder.feed(&[IAC, WONT, NAWS]);
        assert!(matches!(events.as_slice(), [Event::Resize(80, 24)]));
    }

    #[test]
    fn test_negotiation_replies_are_ignored() {
        let mut decoder = TelnetDecoder::default();
        let events = decoder.feed(&[IAC, DO, ECHO, IAC, DO, SGA, IAC, WILL, NAWS, b'q']);
        assert_eq!(keys(&events), vec![plain(KeyCode::Char('q'))]);
    }

    #[test]
    fn test_utf8_split_across_chunks() {
        let mut decoder = TelnetDecoder::default();
        let bytes = "é".as_bytes();
        assert!(decoder.feed(&bytes[..1]).is_empty());
        assert_eq!(keys(&decoder.feed(&bytes[1..])), vec![plain(KeyCode::Char('é'))]);
    }

    #[test]
    fn test_channel_writer_sends_on_flush() {
        let (tx, mut rx) = tokio::sync::mpsc::channel(4);
        let mut writer = ChannelWriter::new(tx);
        writer.write_all(b"abc").unwrap();
        assert!(rx.try_recv().is_err());
        writer.flush().unwrap();
        assert_eq!(rx.try_recv().unwrap(), b"abc".to_vec());
    }

    #[test]
    fn test_channel_writer_fails_when_queue_is_full() {
        let (tx, mut rx) = tokio::sync::mpsc::channel(2);
        let mut writer = ChannelWriter::new(tx);
        for frame in [b"one", b"two"] {
            writer.write_all(frame).unwrap();
            writer.flush().unwrap();
        }

        writer.write_all(b"three").unwrap();
        let err = writer.flush().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::WouldBlock);

        // nothing beyond the capacity was queued
        assert_eq!(rx.try_recv().unwrap(), b"one".to_vec());
        assert_eq!(rx.try_recv().unwrap(), b"two".to_vec());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_channel_writer_fails_when_closed() {
        let (tx, rx) = tokio::sync::mpsc::channel(2);
        drop(rx);
        let mut writer = ChannelWriter::new(tx);
        writer.write_all(b"abc").unwrap();
        assert_eq!(writer.flush().unwrap_err().kind(), io::ErrorKind::BrokenPipe);
    }
}
