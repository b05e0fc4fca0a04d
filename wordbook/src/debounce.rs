use tokio::{
    select,
    sync::mpsc,
    task::JoinHandle,
    time::{sleep, Duration},
};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(700);

/// Spawn a trailing-edge debouncer.
///
/// Every value received on `input_rx` restarts the quiet period; once `delay`
/// passes without new input the latest value is sent on `commit_tx`. If the
/// input side closes while a value is pending, that value is still committed.
/// Empty values are committed like any other, it is up to the receiver to
/// treat them as "clear".
pub fn spawn_debouncer(
    mut input_rx: mpsc::UnboundedReceiver<String>,
    commit_tx: mpsc::UnboundedSender<String>,
    delay: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let Some(mut latest) = input_rx.recv().await else {
                break;
            };
            loop {
                select! {
                    Some(value) = input_rx.recv() => { latest = value; }
                    () = sleep(delay) => { break; }
                }
            }
            tracing::debug!(term = %latest, "committing search term");
            if commit_tx.send(latest).is_err() {
                break;
            }
        }
    })
}
