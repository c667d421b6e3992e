use std::io;

use russh::server::Handle;
use russh::{ChannelId, CryptoVec};
use tokio::sync::mpsc::{UnboundedSender, unbounded_channel};

enum Out {
    Data(Vec<u8>),
    Close { exit_status: u32 },
}

/// `io::Write` sink that forwards flushed frames to an SSH channel. Output
/// and the final close travel through one queue so they stay ordered.
pub(crate) struct TerminalHandle {
    sender: UnboundedSender<Out>,
    sink: Vec<u8>,
}

/// Closes the channel behind a [`TerminalHandle`] after queued output.
#[derive(Clone)]
pub(crate) struct ChannelCloser {
    sender: UnboundedSender<Out>,
}

impl ChannelCloser {
    pub(crate) fn close(&self, exit_status: u32) {
        let _ = self.sender.send(Out::Close { exit_status });
    }
}

impl TerminalHandle {
    pub(crate) fn start(handle: Handle, channel: ChannelId) -> Self {
        let (sender, mut receiver) = unbounded_channel::<Out>();
        tokio::spawn(async move {
            while let Some(out) = receiver.recv().await {
                match out {
                    Out::Data(bytes) => {
                        if handle.data(channel, CryptoVec::from(bytes)).await.is_err() {
                            tracing::debug!(?channel, "channel gone; dropping output");
                            break;
                        }
                    }
                    Out::Close { exit_status } => {
                        let _ = handle.exit_status_request(channel, exit_status).await;
                        let _ = handle.eof(channel).await;
                        let _ = handle.close(channel).await;
                        break;
                    }
                }
            }
        });
        Self {
            sender,
            sink: Vec::new(),
        }
    }

    pub(crate) fn closer(&self) -> ChannelCloser {
        ChannelCloser {
            sender: self.sender.clone(),
        }
    }
}

impl io::Write for TerminalHandle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.sink.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.sink.is_empty() {
            return Ok(());
        }
        self.sender
            .send(Out::Data(std::mem::take(&mut self.sink)))
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "ssh channel closed"))
    }
}
