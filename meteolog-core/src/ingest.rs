use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use tokio::time::MissedTickBehavior;

/// Cancellable polling driver for the ingestion branch.
///
/// Runs `cycle` immediately, then once per `period`, until `shutdown`
/// resolves. Cancellation wins over a due tick, so a caller can always stop
/// the loop cleanly and close its resources afterwards. A failed cycle ends
/// the loop with its error; nothing is retried.
pub async fn run_until<C>(
    period: Duration,
    shutdown: impl Future<Output = ()>,
    mut cycle: C,
) -> Result<()>
where
    C: AsyncFnMut() -> Result<()>,
{
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            biased;
            () = &mut shutdown => return Ok(()),
            _ = ticker.tick() => cycle().await?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn a_ready_shutdown_wins_over_a_due_tick() {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);

        run_until(Duration::from_secs(60), std::future::ready(()), move || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        })
        .await
        .expect("shutdown path must be clean");

        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn the_first_cycle_runs_immediately() {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();

        let handle = tokio::spawn(run_until(
            Duration::from_secs(3600),
            async move {
                let _ = rx.await;
            },
            move || {
                let c = Arc::clone(&c);
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }
            },
        ));

        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        assert_eq!(count.load(Ordering::SeqCst), 1);

        tx.send(()).expect("loop must still be listening");
        handle.await.expect("join").expect("clean shutdown");
    }

    #[tokio::test]
    async fn a_failed_cycle_ends_the_loop_with_its_error() {
        let err = run_until(Duration::from_secs(60), std::future::pending(), || async {
            anyhow::bail!("provider down")
        })
        .await
        .unwrap_err();

        assert!(err.to_string().contains("provider down"));
    }
}
