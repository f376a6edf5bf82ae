//! Clipboard sinks for copied cell selections
//!
//! The system clipboard is tried first. Terminals without one (SSH sessions,
//! headless hosts) get an OSC 52 escape sequence instead, which asks the
//! terminal emulator to set its clipboard.

use std::io::{self, Write};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::commands::Cmd;
use crate::config::{ClipboardFallback, EditorConfig};

/// Cap on the OSC 52 payload; many terminals reject larger sequences
pub const MAX_OSC52_BYTES: usize = 100 * 1024;

/// Where copied text goes
pub trait ClipboardSink {
    /// Write `text`, returning the name of the backend that took it
    fn write_text(&mut self, text: &str) -> io::Result<&'static str>;
}

/// arboard first, then the configured fallback
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard {
    fallback: ClipboardFallback,
}

impl SystemClipboard {
    pub fn new(fallback: ClipboardFallback) -> Self {
        Self { fallback }
    }

    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(config.clipboard_fallback)
    }

    pub fn fallback(&self) -> ClipboardFallback {
        self.fallback
    }
}

impl ClipboardSink for SystemClipboard {
    fn write_text(&mut self, text: &str) -> io::Result<&'static str> {
        match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(text.to_string())) {
            Ok(()) => return Ok("system"),
            Err(e) => tracing::debug!("System clipboard unavailable: {}", e),
        }

        match self.fallback {
            ClipboardFallback::Osc52 => {
                let mut out = io::stdout();
                write_osc52(&mut out, text)?;
                Ok("osc52")
            }
            ClipboardFallback::None => Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "no system clipboard and fallback disabled",
            )),
        }
    }
}

/// Records writes; used by tests and `replay --clipboard memory`
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    pub writes: Vec<String>,
}

impl MemoryClipboard {
    pub fn last(&self) -> Option<&str> {
        self.writes.last().map(String::as_str)
    }
}

impl ClipboardSink for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> io::Result<&'static str> {
        self.writes.push(text.to_string());
        Ok("memory")
    }
}

/// `ESC ] 52 ; c ; <base64> BEL`, payload truncated at a char boundary
pub fn osc52_sequence(text: &str) -> String {
    let mut end = text.len().min(MAX_OSC52_BYTES);
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    if end < text.len() {
        tracing::warn!(
            original = text.len(),
            truncated = end,
            "OSC 52 payload over {} bytes, copying a truncated selection",
            MAX_OSC52_BYTES
        );
    }
    let encoded = STANDARD.encode(&text.as_bytes()[..end]);
    format!("\x1b]52;c;{}\x07", encoded)
}

pub fn write_osc52(out: &mut impl Write, text: &str) -> io::Result<()> {
    out.write_all(osc52_sequence(text).as_bytes())?;
    out.flush()
}

/// Perform every clipboard write in `cmd`
///
/// Failures are logged and skipped; a failed copy never affects the buffer.
pub fn run_clipboard_writes(sink: &mut impl ClipboardSink, cmd: &Cmd) {
    for text in cmd.clipboard_writes() {
        match sink.write_text(text) {
            Ok(backend) => tracing::debug!(backend, bytes = text.len(), "Copied selection"),
            Err(e) => tracing::warn!("Failed to copy selection: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_osc52_sequence() {
        assert_eq!(osc52_sequence("a\tb"), "\x1b]52;c;YQli\x07");
    }

    #[test]
    fn test_osc52_truncates_on_char_boundary() {
        let text = "é".repeat(MAX_OSC52_BYTES);
        let seq = osc52_sequence(&text);
        let payload = &seq["\x1b]52;c;".len()..seq.len() - 1];
        let decoded = STANDARD.decode(payload).unwrap();
        assert_eq!(decoded.len(), MAX_OSC52_BYTES);
        assert!(String::from_utf8(decoded).is_ok());
    }

    #[derive(Clone, Default)]
    struct LogCapture(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl Write for LogCapture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_osc52_truncation_is_logged() {
        let capture = LogCapture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            osc52_sequence("short");
            assert!(capture.0.lock().unwrap().is_empty());
            osc52_sequence(&"x".repeat(MAX_OSC52_BYTES + 10));
        });

        let logged = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
        assert!(logged.contains("WARN"), "{}", logged);
        assert!(logged.contains(&format!("original={}", MAX_OSC52_BYTES + 10)));
        assert!(logged.contains(&format!("truncated={}", MAX_OSC52_BYTES)));
    }

    #[test]
    fn test_system_clipboard_takes_configured_fallback() {
        let config = EditorConfig {
            clipboard_fallback: ClipboardFallback::None,
            ..EditorConfig::default()
        };
        assert_eq!(
            SystemClipboard::from_config(&config).fallback(),
            ClipboardFallback::None
        );
        assert_eq!(
            SystemClipboard::from_config(&EditorConfig::default()).fallback(),
            ClipboardFallback::Osc52
        );
    }

    #[test]
    fn test_write_osc52_to_buffer() {
        let mut out = Vec::new();
        write_osc52(&mut out, "x").unwrap();
        assert_eq!(out, b"\x1b]52;c;eA==\x07");
    }

    #[test]
    fn test_memory_sink_runs_batched_writes() {
        let mut sink = MemoryClipboard::default();
        let cmd = Cmd::batch(vec![
            Cmd::Redraw,
            Cmd::WriteClipboard("1\t2".into()),
            Cmd::WriteClipboard("3\t4".into()),
        ]);
        run_clipboard_writes(&mut sink, &cmd);
        assert_eq!(sink.writes, vec!["1\t2", "3\t4"]);
        assert_eq!(sink.last(), Some("3\t4"));
    }
}
