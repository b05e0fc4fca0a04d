use std::io::{self, Write};

use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc,
};

pub fn prompt(text: &str) {
    print!("{text}");
    if let Err(error) = io::stdout().flush() {
        tracing::warn!(%error, "failed to flush stdout");
    }
}

/// Forward stdin line by line. The channel closes at end of input.
pub fn spawn_line_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(error) => {
                    tracing::error!(%error, "failed to read stdin");
                    break;
                }
            }
        }
    });
    rx
}

/// Parse a 1-based position as typed by the user into an index.
pub fn parse_position(text: &str) -> Option<usize> {
    text.trim().parse::<usize>().ok()?.checked_sub(1)
}
