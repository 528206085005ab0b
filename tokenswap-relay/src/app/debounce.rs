use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::sleep;

/// Delays propagation of a rapidly-changing value until it has been stable
/// for the full delay. Every push restarts the timer and discards the
/// pending value; only the most recent value after quiescence is ever
/// emitted. Dropping the debouncer cancels any pending propagation.
pub struct Debouncer<T> {
    input: watch::Sender<T>,
    output: watch::Receiver<T>,
    task: JoinHandle<()>,
}

impl<T> Debouncer<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    pub fn new(initial: T, delay: Duration) -> Self {
        let (input_tx, mut input_rx) = watch::channel(initial.clone());
        let (output_tx, output_rx) = watch::channel(initial);

        let task = tokio::spawn(async move {
            loop {
                if input_rx.changed().await.is_err() {
                    break;
                }
                // A value is pending. Wait for quiescence, restarting the
                // timer whenever a newer value supersedes it.
                loop {
                    let pending = input_rx.borrow_and_update().clone();
                    tokio::select! {
                        changed = input_rx.changed() => {
                            if changed.is_err() {
                                return;
                            }
                        }
                        _ = sleep(delay) => {
                            let _ = output_tx.send(pending);
                            break;
                        }
                    }
                }
            }
        });

        Self {
            input: input_tx,
            output: output_rx,
            task,
        }
    }

    pub fn push(&self, value: T) {
        let _ = self.input.send(value);
    }

    /// Receiver for the debounced value stream.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.output.clone()
    }

    pub fn current(&self) -> T {
        self.output.borrow().clone()
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}
