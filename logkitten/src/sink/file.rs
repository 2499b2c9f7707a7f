use std::fs::{File, OpenOptions};
use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::SinkError;

/// An append-only log file.
///
/// Every line is flushed as soon as it is written, nothing is buffered across calls. Once
/// [`close`](Self::close)d the sink stays closed and writes fail with [`SinkError::NotOpen`].
#[derive(Debug)]
pub struct FileSink {
    path: Utf8PathBuf,
    file: Option<File>,
}

impl FileSink {
    /// Opens `path` for appending, creating the file if it does not exist.
    ///
    /// The parent directory must already exist.
    pub fn open(path: impl Into<Utf8PathBuf>) -> Result<Self, SinkError> {
        let path = path.into();
        match OpenOptions::new().create(true).append(true).open(&path) {
            Ok(file) => {
                tracing::debug!(%path, "opened log file");
                Ok(Self {
                    path,
                    file: Some(file),
                })
            }
            Err(source) => Err(SinkError::Open { path, source }),
        }
    }

    /// Creates a sink for `path` that is already closed, used when opening failed.
    pub fn closed(path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: None,
        }
    }

    /// Returns the path of the log file.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Returns whether lines can currently be written.
    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    /// Appends `line` verbatim and flushes it.
    pub fn write_line(&mut self, line: &str) -> Result<(), SinkError> {
        let file = self.file.as_mut().ok_or(SinkError::NotOpen)?;
        file.write_all(line.as_bytes()).map_err(SinkError::Write)?;
        file.flush().map_err(SinkError::Flush)
    }

    /// Flushes and releases the file.
    ///
    /// Closing an already closed sink does nothing. The file is released even if the final flush
    /// fails.
    pub fn close(&mut self) -> Result<(), SinkError> {
        let Some(mut file) = self.file.take() else {
            return Ok(());
        };
        tracing::debug!(path = %self.path, "closing log file");
        file.flush().map_err(SinkError::Close)
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        if let Err(error) = self.close() {
            tracing::warn!(path = %self.path, %error, "failed to close log file");
        }
    }
}

#[cfg(test)]
mod tests {
    use camino::Utf8PathBuf;

    use super::FileSink;
    use crate::error::SinkError;

    fn temp_path(dir: &tempfile::TempDir, name: &str) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().join(name)).unwrap()
    }

    #[test]
    fn appends_to_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_path(&dir, "Auto.log");
        std::fs::write(&path, "earlier run \n").unwrap();

        let mut sink = FileSink::open(&path).unwrap();
        sink.write_line("this run \n").unwrap();

        // Visible before close since every write is flushed.
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "earlier run \nthis run \n"
        );
    }

    #[test]
    fn close_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FileSink::open(temp_path(&dir, "Auto.log")).unwrap();

        assert!(sink.is_open());
        sink.close().unwrap();
        assert!(!sink.is_open());
        sink.close().unwrap();
    }

    #[test]
    fn write_after_close_is_not_open() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FileSink::open(temp_path(&dir, "Auto.log")).unwrap();
        sink.close().unwrap();

        assert!(matches!(sink.write_line("late \n"), Err(SinkError::NotOpen)));
    }

    #[test]
    fn missing_directory_fails_to_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_path(&dir, "missing/Auto.log");

        match FileSink::open(&path) {
            Err(SinkError::Open { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected open failure, got {other:?}"),
        }
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn write_failure_is_reported() {
        let mut sink = FileSink::open("/dev/full").unwrap();
        assert!(matches!(
            sink.write_line("no space \n"),
            Err(SinkError::Write(_) | SinkError::Flush(_))
        ));
    }
}
