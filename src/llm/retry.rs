use std::future::Future;
use std::time::Duration;

use tracing::debug;

/// Bounded retries with exponential, equal-jitter delays.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Backoff {
    /// Total attempts, including the first.
    pub attempts: u32,
    pub base: Duration,
}

impl Backoff {
    /// Delay before retry number `retry` (0-based): half of `base * 2^retry`, plus up to
    /// the other half at random.
    fn delay(&self, retry: u32) -> Duration {
        let full = self.base.as_millis() as u64 * 2u64.saturating_pow(retry);
        let half = full / 2;
        Duration::from_millis(half + fastrand::u64(..half.max(1)))
    }

    /// Run `op` until it succeeds, fails with an error `transient` rejects, or attempts run
    /// out. The last error is returned.
    pub(crate) async fn run<T, E, F, Fut>(
        &self,
        transient: impl Fn(&E) -> bool,
        mut op: F,
    ) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut retry = 0;
        loop {
            match op().await {
                Err(e) if retry + 1 < self.attempts && transient(&e) => {
                    let delay = self.delay(retry);
                    retry += 1;
                    debug!(attempt = retry, delay_ms = delay.as_millis() as u64, "retrying");
                    tokio::time::sleep(delay).await;
                }
                result => return result,
            }
        }
    }
}
