//! Timers and debounced inputs.

use std::cell::Cell;
use std::rc::Rc;

use dioxus::prelude::*;

/// Platform sleep: `gloo-timers` in the browser, tokio elsewhere.
pub async fn sleep(ms: u32) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::TimeoutFuture::new(ms).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(std::time::Duration::from_millis(u64::from(ms))).await;
}

/// Tracks the latest input; older waits see they were superseded.
#[derive(Debug, Clone, Default)]
pub struct Debouncer {
    generation: Rc<Cell<u64>>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait `ms` and report whether no newer call arrived meanwhile.
    pub async fn settle(&self, ms: u32) -> bool {
        let mine = self.generation.get() + 1;
        self.generation.set(mine);
        sleep(ms).await;
        self.generation.get() == mine
    }
}

/// A copy of `source` that only follows it after `ms` of quiet.
pub fn use_debounced(source: Signal<String>, ms: u32) -> Signal<String> {
    let mut debounced = use_signal(|| source.peek().clone());
    let debouncer = use_hook(Debouncer::new);

    use_effect(move || {
        let value = source();
        let debouncer = debouncer.clone();
        spawn(async move {
            if debouncer.settle(ms).await && *debounced.peek() != value {
                debounced.set(value);
            }
        });
    });

    debounced
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_only_last_call_settles() {
        let debouncer = Debouncer::new();
        let first = debouncer.settle(30);
        let second = async {
            sleep(5).await;
            debouncer.settle(30).await
        };
        let (first, second) = tokio::join!(first, second);
        assert!(!first);
        assert!(second);
    }

    #[tokio::test]
    async fn test_single_call_settles() {
        assert!(Debouncer::new().settle(1).await);
    }
}
