//! Channel-based command feed.
//!
//! Receives commands through a tokio mpsc channel. Useful when the dashboard
//! is embedded in a larger process that already has the measurements.

use tokio::sync::mpsc;

use ecmo_core::Command;

use super::CommandFeed;

/// A feed that receives commands from an in-process sender.
///
/// # Example
///
/// ```
/// use ecmo_core::{Command, PressureInput, RequestId};
/// use ecmo_watch::{ChannelFeed, CommandFeed};
///
/// let (tx, mut feed) = ChannelFeed::create("pump-controller", 16);
/// let input = PressureInput { pre_oxygenator: Some(200.0), post_oxygenator: Some(180.0) };
/// tx.try_send(Command::new(RequestId::new(), 1, input)).unwrap();
/// assert!(feed.poll().is_some());
/// ```
#[derive(Debug)]
pub struct ChannelFeed {
    receiver: mpsc::Receiver<Command>,
    description: String,
    closed: bool,
}

impl ChannelFeed {
    /// Wrap the receiving end of a channel.
    pub fn new(receiver: mpsc::Receiver<Command>, source_description: &str) -> Self {
        Self {
            receiver,
            description: format!("channel: {}", source_description),
            closed: false,
        }
    }

    /// Create a channel pair with room for `capacity` pending commands.
    pub fn create(source_description: &str, capacity: usize) -> (mpsc::Sender<Command>, Self) {
        let (tx, rx) = mpsc::channel(capacity);
        (tx, Self::new(rx, source_description))
    }
}

impl CommandFeed for ChannelFeed {
    fn poll(&mut self) -> Option<Command> {
        match self.receiver.try_recv() {
            Ok(command) => Some(command),
            Err(mpsc::error::TryRecvError::Empty) => None,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                self.closed = true;
                None
            }
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<String> {
        self.closed.then(|| "Channel closed".to_string())
    }
}
