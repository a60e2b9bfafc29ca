use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use tracing::Level;

/// Where formatted log lines end up.
///
/// While the TUI owns the terminal, anything written to stdout or stderr
/// would tear the rendered frame, so logs go to a file or nowhere.
pub struct DelegatingWriter {
    inner: DelegatingInner,
}

enum DelegatingInner {
    File(Arc<Mutex<File>>),
    Sink(io::Sink),
}

impl Write for DelegatingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.inner {
            DelegatingInner::File(file) => {
                let mut file = file.lock().unwrap_or_else(|e| e.into_inner());
                file.write(buf)
            }
            DelegatingInner::Sink(s) => s.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.inner {
            DelegatingInner::File(file) => {
                let mut file = file.lock().unwrap_or_else(|e| e.into_inner());
                file.flush()
            }
            DelegatingInner::Sink(s) => s.flush(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct SubscriberMakeWriter {
    file: Option<Arc<Mutex<File>>>,
}

impl SubscriberMakeWriter {
    /// Append to `path`, creating it if needed.
    pub fn append_to(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Some(Arc::new(Mutex::new(file))),
        })
    }

    pub fn sink() -> Self {
        Self::default()
    }

    pub fn is_sink(&self) -> bool {
        self.file.is_none()
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for SubscriberMakeWriter {
    type Writer = DelegatingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        let inner = match &self.file {
            Some(file) => DelegatingInner::File(Arc::clone(file)),
            None => DelegatingInner::Sink(io::sink()),
        };
        DelegatingWriter { inner }
    }
}

/// Install the global subscriber. With no `log_file`, events are formatted
/// into a sink. Safe to call more than once; only the first call installs.
pub fn init(log_file: Option<&Path>) -> io::Result<()> {
    let writer = match log_file {
        Some(path) => SubscriberMakeWriter::append_to(path)?,
        None => SubscriberMakeWriter::sink(),
    };
    let level = if writer.is_sink() {
        Level::WARN
    } else {
        Level::DEBUG
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .with_thread_names(false)
        .try_init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::fmt::MakeWriter;

    #[test]
    fn file_writer_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("call.log");
        let make = SubscriberMakeWriter::append_to(&path).unwrap();
        assert!(!make.is_sink());
        make.make_writer().write_all(b"opened\n").unwrap();
        let mut w = make.make_writer();
        w.write_all(b"ended\n").unwrap();
        w.flush().unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "opened\nended\n");
    }

    #[test]
    fn scoped_subscriber_writes_events_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scoped.log");
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_writer(SubscriberMakeWriter::append_to(&path).unwrap())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(kind = "video", "call opened");
        });
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("call opened"), "{text}");
        assert!(text.contains("video"), "{text}");
    }

    #[test]
    fn sink_swallows_output() {
        let make = SubscriberMakeWriter::sink();
        assert!(make.is_sink());
        assert_eq!(make.make_writer().write(b"dropped").unwrap(), 7);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("call.log");
        assert!(SubscriberMakeWriter::append_to(&path).is_err());
    }
}
