//! Stream-based command feed.
//!
//! Reads newline-delimited JSON commands from an async byte stream, such as
//! a TCP connection to a bedside gateway.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use ecmo_core::Command;

use super::CommandFeed;

/// A feed backed by a background task reading JSON lines.
///
/// Each non-empty line is parsed as one [`Command`]. Lines that fail to
/// parse are skipped and reported through [`CommandFeed::error`].
///
/// ```
/// use std::io::Cursor;
/// use ecmo_watch::StreamFeed;
///
/// # tokio_test::block_on(async {
/// let line = r#"{"request_id":"67e55044-10b1-426f-9247-bb680e5fe0c8","domain":"pressure","pre_oxygenator":200,"post_oxygenator":180}"#;
/// let feed = StreamFeed::spawn(Cursor::new(format!("{}\n", line)), "example");
/// # });
/// ```
#[derive(Debug)]
pub struct StreamFeed {
    receiver: mpsc::Receiver<Command>,
    description: String,
    last_error: Arc<Mutex<Option<String>>>,
}

impl StreamFeed {
    /// Spawn a background task that reads from the given async reader.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<R>(reader: R, description: &str) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(64);
        let last_error = Arc::new(Mutex::new(None));
        let error_handle = last_error.clone();
        let desc = description.to_string();

        tokio::spawn(async move {
            let mut reader = BufReader::new(reader);
            let mut line = String::new();

            loop {
                line.clear();
                match reader.read_line(&mut line).await {
                    Ok(0) => {
                        debug!(feed = %desc, "command stream closed");
                        *error_handle.lock() = Some("Connection closed".to_string());
                        break;
                    }
                    Ok(_) => {
                        let trimmed = line.trim();
                        if trimmed.is_empty() {
                            continue;
                        }
                        match serde_json::from_str::<Command>(trimmed) {
                            Ok(command) => {
                                *error_handle.lock() = None;
                                if tx.send(command).await.is_err() {
                                    // Receiver dropped
                                    break;
                                }
                            }
                            Err(e) => {
                                warn!(feed = %desc, error = %e, "unparsable command skipped");
                                *error_handle.lock() = Some(format!("Parse error: {}", e));
                            }
                        }
                    }
                    Err(e) => {
                        warn!(feed = %desc, error = %e, "command stream read failed");
                        *error_handle.lock() = Some(format!("Read error: {}", e));
                        break;
                    }
                }
            }
        });

        Self {
            receiver: rx,
            description: format!("stream: {}", description),
            last_error,
        }
    }
}

impl CommandFeed for StreamFeed {
    fn poll(&mut self) -> Option<Command> {
        match self.receiver.try_recv() {
            Ok(command) => Some(command),
            Err(mpsc::error::TryRecvError::Empty) => None,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                let mut error = self.last_error.lock();
                if error.is_none() {
                    *error = Some("Stream disconnected".to_string());
                }
                None
            }
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<String> {
        self.last_error.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecmo_core::{Domain, ObservationInput};
    use std::io::Cursor;

    const PRESSURE: &str = r#"{"request_id":"67e55044-10b1-426f-9247-bb680e5fe0c8","action_count":1,"domain":"pressure","pre_oxygenator":200,"post_oxygenator":180}"#;
    const FLUID: &str = r#"{"request_id":"9a0b7c8e-3f51-4b6d-8c2a-1e4f5d6a7b8c","domain":"fluid_balance","input":500,"output":300,"goal":1000,"diuretic_dose":20}"#;

    #[tokio::test]
    async fn test_stream_feed_parses_commands() {
        let data = format!("{}\n\n{}\n", PRESSURE, FLUID);
        let mut feed = StreamFeed::spawn(Cursor::new(data), "test");

        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;

        let first = feed.poll().unwrap();
        assert_eq!(first.input.domain(), Domain::Pressure);
        let second = feed.poll().unwrap();
        let ObservationInput::FluidBalance(fluid) = second.input else {
            panic!("expected fluid balance");
        };
        assert_eq!(fluid.output, Some(300.0));
        assert!(feed.poll().is_none());
    }

    #[tokio::test]
    async fn test_stream_feed_skips_invalid_lines() {
        let data = format!("not json\n{}\n", PRESSURE);
        let mut feed = StreamFeed::spawn(Cursor::new(data), "test");

        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;

        // The bad line is skipped, the good one still arrives
        assert!(feed.poll().is_some());
        assert!(feed.poll().is_none());
    }

    #[tokio::test]
    async fn test_stream_feed_reports_closed_connection() {
        let mut feed = StreamFeed::spawn(Cursor::new(""), "test");

        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;

        assert!(feed.poll().is_none());
        assert_eq!(feed.error().as_deref(), Some("Connection closed"));
    }

    #[tokio::test]
    async fn test_stream_feed_description() {
        let feed = StreamFeed::spawn(Cursor::new(""), "tcp://gateway:7070");
        assert_eq!(feed.description(), "stream: tcp://gateway:7070");
    }
}
