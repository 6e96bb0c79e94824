//! Debounce Task
//!
//! Delays a rapidly changing value until it has been stable for a quiescence window.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::trace;

// == Debouncer ==
/// Debounced view of a value.
///
/// `set` feeds the raw input; subscribers of `subscribe()` only see a value
/// once it has stayed unchanged for the whole window. Every change inside
/// the window restarts the wait. Dropping or cancelling the debouncer
/// discards a pending value without emitting it.
///
/// # Example
/// ```ignore
/// let debouncer = Debouncer::new(String::new(), Duration::from_millis(350));
/// let mut settled = debouncer.subscribe();
/// debouncer.set("pik".to_string());
/// settled.changed().await?;
/// ```
#[derive(Debug)]
pub struct Debouncer<T> {
    input: watch::Sender<T>,
    output: watch::Receiver<T>,
    task: JoinHandle<()>,
}

impl<T> Debouncer<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    // == Constructor ==
    /// Spawns the debounce task. Both sides start at `initial`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(initial: T, window: Duration) -> Self {
        let (input, input_rx) = watch::channel(initial.clone());
        let (output_tx, output) = watch::channel(initial);

        let task = tokio::spawn(run(input_rx, output_tx, window));

        Self {
            input,
            output,
            task,
        }
    }

    // == Set ==
    /// Feeds a new raw value. Setting the current value again is not a change.
    pub fn set(&self, value: T) {
        self.input.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        });
    }

    /// Latest raw (not yet debounced) value.
    pub fn current(&self) -> T {
        self.input.borrow().clone()
    }

    /// Receiver tracking the raw input, changes included before they settle.
    pub fn watch_input(&self) -> watch::Receiver<T> {
        self.input.subscribe()
    }

    /// Latest debounced value.
    pub fn settled(&self) -> T {
        self.output.borrow().clone()
    }

    /// Receiver notified each time a debounced value is emitted.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.output.clone()
    }

    // == Cancel ==
    /// Stops the task; a pending value is dropped.
    pub fn cancel(&self) {
        self.task.abort();
    }

    pub fn is_cancelled(&self) -> bool {
        self.task.is_finished()
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run<T>(mut input: watch::Receiver<T>, output: watch::Sender<T>, window: Duration)
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    loop {
        // Idle until the first change of a burst
        if input.changed().await.is_err() {
            return;
        }

        // Restart the window on every further change
        loop {
            tokio::select! {
                _ = tokio::time::sleep(window) => break,
                changed = input.changed() => {
                    if changed.is_err() {
                        return;
                    }
                    trace!("debounce window restarted");
                }
            }
        }

        // Notify even when equal to the previous emission
        let settled = input.borrow_and_update().clone();
        output.send_replace(settled);
    }
}
