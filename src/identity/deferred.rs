use tokio::sync::watch;

/// Single-assignment cell observed by any number of independent waiters.
///
/// The first `resolve`/`reject` wins; later settlements are ignored and
/// reported back as `false`. Every waiter sees the same settled value.
#[derive(Debug)]
pub struct Deferred<T, E> {
    slot: watch::Sender<Option<Result<T, E>>>,
}

impl<T, E> Default for Deferred<T, E>
where
    T: Clone,
    E: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> Deferred<T, E>
where
    T: Clone,
    E: Clone,
{
    pub fn new() -> Self {
        let (slot, _) = watch::channel(None);
        Self { slot }
    }

    pub fn resolve(&self, value: T) -> bool {
        self.settle(Ok(value))
    }

    pub fn reject(&self, err: E) -> bool {
        self.settle(Err(err))
    }

    /// Store the outcome unless one is already stored.
    pub fn settle(&self, outcome: Result<T, E>) -> bool {
        self.slot.send_if_modified(|slot| {
            if slot.is_some() {
                return false;
            }
            *slot = Some(outcome);
            true
        })
    }

    pub fn is_settled(&self) -> bool {
        self.slot.borrow().is_some()
    }

    /// Current outcome without waiting.
    pub fn peek(&self) -> Option<Result<T, E>> {
        self.slot.borrow().clone()
    }

    /// Wait until settled. Never returns if nobody ever settles the cell.
    pub async fn wait(&self) -> Result<T, E> {
        let mut rx = self.slot.subscribe();
        loop {
            let settled = rx.borrow_and_update().clone();
            if let Some(outcome) = settled {
                return outcome;
            }
            // the sender lives in `self`, so the channel cannot close while we wait
            if rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::Deferred;

    #[tokio::test]
    async fn first_settlement_wins() {
        let deferred: Deferred<u32, String> = Deferred::new();
        assert!(!deferred.is_settled());
        assert!(deferred.resolve(1));
        assert!(!deferred.resolve(2));
        assert!(!deferred.reject("late".into()));
        assert_eq!(deferred.peek(), Some(Ok(1)));
        assert_eq!(deferred.wait().await, Ok(1));
    }

    #[tokio::test]
    async fn all_waiters_observe_the_same_outcome() {
        let deferred: Arc<Deferred<String, String>> = Arc::new(Deferred::new());

        let waiters: Vec<_> = (0..3)
            .map(|_| {
                let deferred = deferred.clone();
                tokio::spawn(async move { deferred.wait().await })
            })
            .collect();

        tokio::time::sleep(Duration::from_millis(20)).await;
        deferred.reject("boom".into());

        for waiter in waiters {
            assert_eq!(waiter.await.unwrap(), Err("boom".to_string()));
        }
    }

    #[tokio::test]
    async fn unsettled_cell_keeps_waiting() {
        let deferred: Deferred<u32, String> = Deferred::new();
        let waited = tokio::time::timeout(Duration::from_millis(50), deferred.wait()).await;
        assert!(waited.is_err());
        assert_eq!(deferred.peek(), None);
    }
}
