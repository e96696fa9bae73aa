//! Debounce for search-as-you-type input.

use std::time::Duration;

use tokio::sync::mpsc;

/// Quiet period before the search box fires a query.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(300);

/// Input side of a debouncer. Dropping it flushes the pending value.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    input: mpsc::UnboundedSender<T>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Spawn a debouncer. Values pushed within `quiet` of each other
    /// collapse into the last one, which is delivered on the returned
    /// receiver once input has been quiet for `quiet`.
    pub fn spawn(quiet: Duration) -> (Self, mpsc::Receiver<T>) {
        let (in_tx, mut in_rx) = mpsc::unbounded_channel::<T>();
        let (out_tx, out_rx) = mpsc::channel(16);

        tokio::spawn(async move {
            let mut pending: Option<T> = None;

            loop {
                let Some(value) = pending.take() else {
                    match in_rx.recv().await {
                        Some(v) => pending = Some(v),
                        None => break,
                    }
                    continue;
                };

                tokio::select! {
                    next = in_rx.recv() => match next {
                        Some(v) => pending = Some(v),
                        None => {
                            let _ = out_tx.send(value).await;
                            break;
                        }
                    },
                    () = tokio::time::sleep(quiet) => {
                        if out_tx.send(value).await.is_err() {
                            break;
                        }
                    }
                }
            }
        });

        (Self { input: in_tx }, out_rx)
    }

    /// Push a new value. Returns `false` once the debouncer has shut down.
    pub fn push(&self, value: T) -> bool {
        self.input.send(value).is_ok()
    }
}
