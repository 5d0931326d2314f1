use crate::core::animation::{AnimationHandle, Animator, MAX_PERIOD};
use crate::core::fetch::fetch_lists_enriched;
use crate::core::{AnimationOutcome, ConfigProvider, CountSource, DisplaySink};
use std::future::Future;
use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior};

/// Fetches the enriched-lists count and counts the display up to it.
pub struct CounterWidget<S: CountSource, D: DisplaySink> {
    source: S,
    animator: Animator<D>,
}

impl<S: CountSource, D: DisplaySink> CounterWidget<S, D> {
    pub fn new(source: S, display: D) -> Self {
        Self {
            source,
            animator: Animator::new(display),
        }
    }

    pub fn from_config<C: ConfigProvider>(source: S, display: D, config: &C) -> Self {
        Self {
            source,
            animator: Animator::new(display)
                .with_timing(config.animation_duration(), config.tick_interval()),
        }
    }

    pub fn with_timing(mut self, duration: Duration, tick: Duration) -> Self {
        self.animator = self.animator.with_timing(duration, tick);
        self
    }

    pub fn animator(&self) -> &Animator<D> {
        &self.animator
    }

    pub fn display(&self) -> &D {
        self.animator.display()
    }

    /// 取得一次計數，數值有變才啟動動畫；畫面已是該值時回傳 `None`
    pub async fn update(&self) -> Option<AnimationHandle> {
        let data = fetch_lists_enriched(&self.source).await;
        let target = data.lists_enriched;
        let current = self.animator.current();

        if current == target && self.animator.is_synced() && !self.animator.is_animating() {
            tracing::debug!("Counter already at {}, nothing to animate", target);
            return None;
        }

        tracing::info!("Updating counter from {} to {}", current, target);
        Some(self.animator.animate(target))
    }

    /// Like [`update`](Self::update) but waits for the animation to settle and
    /// returns the value left on the display.
    pub async fn update_and_wait(&self) -> u64 {
        if let Some(handle) = self.update().await {
            log_outcome(handle.wait().await);
        }
        self.animator.current()
    }

    /// Initial update, then one update per `refresh` period (if any) until
    /// `shutdown` resolves. Without a refresh period this returns once the
    /// first animation settles.
    pub async fn run<F>(&self, refresh: Option<Duration>, shutdown: F) -> u64
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        let first = self.update().await;

        let Some(period) = refresh else {
            // 沒有定期更新：等第一段動畫結束或收到關閉訊號
            if let Some(handle) = first {
                tokio::select! {
                    outcome = handle.wait() => log_outcome(outcome),
                    _ = &mut shutdown => {
                        tracing::info!("Shutdown requested, stopping animation");
                        self.animator.cancel();
                    }
                }
            }
            return self.animator.current();
        };

        let period = period.clamp(Duration::from_millis(1), MAX_PERIOD);
        tracing::info!("Refreshing counter every {:?}", period);
        let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("Shutdown requested, stopping refresh");
                    break;
                }
                _ = ticker.tick() => {
                    self.update().await;
                }
            }
        }

        self.animator.cancel();
        self.animator.current()
    }
}

fn log_outcome(outcome: AnimationOutcome) {
    match outcome {
        AnimationOutcome::Completed { value, ticks } => {
            tracing::debug!("Counter settled at {} after {} ticks", value, ticks);
        }
        AnimationOutcome::Cancelled => tracing::debug!("Counter animation cancelled"),
        AnimationOutcome::Failed { message } => {
            tracing::warn!("Counter animation failed: {}", message);
        }
    }
}
