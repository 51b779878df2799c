//! Bridge from `tracing` output to the TUI activity log.
//!
//! While the terminal is in raw mode nothing may be written to stderr, so
//! the subscriber's formatted lines are sent over the message channel
//! instead and land in the activity panel.

use std::io;

use crossbeam_channel::Sender;
use tracing_subscriber::fmt::MakeWriter;

use crate::messages::TuiMessage;

/// `MakeWriter` that forwards each formatted event as a [`TuiMessage::Log`].
#[derive(Debug, Clone)]
pub struct LogBridge {
    tx: Sender<TuiMessage>,
}

impl LogBridge {
    #[must_use]
    pub fn new(tx: Sender<TuiMessage>) -> Self {
        Self { tx }
    }
}

impl<'a> MakeWriter<'a> for LogBridge {
    type Writer = LogLineWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogLineWriter {
            tx: self.tx.clone(),
            buf: Vec::new(),
        }
    }
}

/// Buffers one event's output and sends it line by line on flush or drop.
pub struct LogLineWriter {
    tx: Sender<TuiMessage>,
    buf: Vec<u8>,
}

impl io::Write for LogLineWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        let text = String::from_utf8_lossy(&self.buf);
        for line in text.lines().map(str::trim_end).filter(|l| !l.is_empty()) {
            // A closed channel means the TUI is gone; the line is dropped.
            let _ = self.tx.try_send(TuiMessage::Log(line.to_string()));
        }
        self.buf.clear();
        Ok(())
    }
}

impl Drop for LogLineWriter {
    fn drop(&mut self) {
        let _ = io::Write::flush(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;
    use std::io::Write;

    #[test]
    fn lines_arrive_on_drop() {
        let (tx, rx) = unbounded();
        let bridge = LogBridge::new(tx);
        {
            let mut writer = bridge.make_writer();
            writer.write_all(b"first line\nsecond").unwrap();
            assert!(rx.try_recv().is_err());
        }
        assert_eq!(rx.try_recv().unwrap(), TuiMessage::Log("first line".into()));
        assert_eq!(rx.try_recv().unwrap(), TuiMessage::Log("second".into()));
    }

    #[test]
    fn blank_lines_are_skipped() {
        let (tx, rx) = unbounded();
        let mut writer = LogBridge::new(tx).make_writer();
        writer.write_all(b"\n  \nonly\n").unwrap();
        writer.flush().unwrap();
        assert_eq!(rx.try_iter().count(), 1);
    }

    #[test]
    fn closed_channel_is_ignored() {
        let (tx, rx) = unbounded();
        drop(rx);
        let mut writer = LogBridge::new(tx).make_writer();
        writer.write_all(b"nobody listens\n").unwrap();
        assert!(writer.flush().is_ok());
    }

    #[test]
    fn works_as_subscriber_writer() {
        let (tx, rx) = unbounded();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(LogBridge::new(tx))
            .with_ansi(false)
            .without_time()
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!("bridge check");
        });
        let line = match rx.try_recv().unwrap() {
            TuiMessage::Log(line) => line,
            other => panic!("unexpected message {other:?}"),
        };
        assert!(line.contains("WARN"));
        assert!(line.contains("bridge check"));
    }
}
