//! User controls: start and stop triggers read from stdin.

use std::str::FromStr;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Start,
    Stop,
    Shutdown,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown command '{0}' (expected start, stop or quit)")]
pub struct UnknownControl(pub String);

impl FromStr for Control {
    type Err = UnknownControl;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "start" => Ok(Control::Start),
            "stop" => Ok(Control::Stop),
            "quit" | "exit" => Ok(Control::Shutdown),
            other => Err(UnknownControl(other.to_string())),
        }
    }
}

/// Forward commands read line by line from `input`.
///
/// Blank lines are skipped and unknown words are logged. End of input sends
/// [`Control::Shutdown`].
pub async fn forward_controls<R>(input: R, tx: mpsc::Sender<Control>)
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(input).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::error!("Failed to read controls: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<Control>() {
            Ok(control) => {
                let shutdown = control == Control::Shutdown;
                if tx.send(control).await.is_err() || shutdown {
                    return;
                }
            }
            Err(e) => tracing::warn!("{}", e),
        }
    }
    let _ = tx.send(Control::Shutdown).await;
}

/// Read controls from the process's stdin in the background.
pub fn spawn_stdin_controls(tx: mpsc::Sender<Control>) -> JoinHandle<()> {
    tokio::spawn(forward_controls(tokio::io::stdin(), tx))
}
