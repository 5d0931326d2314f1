use crate::core::{AnimationOutcome, DisplaySink, DisplayState};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::{AbortHandle, JoinHandle};
use tokio::time::{Instant, MissedTickBehavior};

pub const DEFAULT_DURATION: Duration = Duration::from_millis(1000);
pub const DEFAULT_TICK: Duration = Duration::from_millis(10);
const MIN_TICK: Duration = Duration::from_millis(1);
/// 計時器週期上限 (一年)，避免 `Instant + period` 溢位
pub(crate) const MAX_PERIOD: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Start, end and timing of one count-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationPlan {
    pub start: u64,
    pub end: u64,
    pub duration: Duration,
    pub tick: Duration,
}

impl AnimationPlan {
    pub fn new(start: u64, end: u64) -> Self {
        Self {
            start,
            end,
            duration: DEFAULT_DURATION,
            tick: DEFAULT_TICK,
        }
    }

    pub fn with_timing(mut self, duration: Duration, tick: Duration) -> Self {
        self.duration = duration;
        self.tick = tick;
        self
    }

    /// Number of ticks that fit in the duration, never less than one.
    pub fn steps(&self) -> u32 {
        let tick = self.tick.as_nanos().max(1);
        (self.duration.as_nanos() / tick).clamp(1, u32::MAX as u128) as u32
    }

    pub fn increment(&self) -> f64 {
        (self.end as f64 - self.start as f64) / self.steps() as f64
    }

    pub fn frames(&self) -> CountAnimation {
        CountAnimation {
            start: self.start,
            end: self.end,
            accumulator: self.start as f64,
            increment: self.increment(),
            steps: self.steps(),
            ticks: 0,
            done: false,
        }
    }
}

/// The values shown on each tick. The last frame is always exactly `end`,
/// whatever rounding the accumulator picked up on the way.
#[derive(Debug, Clone)]
pub struct CountAnimation {
    start: u64,
    end: u64,
    accumulator: f64,
    increment: f64,
    steps: u32,
    ticks: u32,
    done: bool,
}

impl CountAnimation {
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn is_done(&self) -> bool {
        self.done
    }
}

impl Iterator for CountAnimation {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.done {
            return None;
        }

        self.ticks += 1;
        self.accumulator += self.increment;

        let rising = self.end >= self.start;
        let reached = if rising {
            self.accumulator >= self.end as f64
        } else {
            self.accumulator <= self.end as f64
        };

        if reached || self.ticks >= self.steps {
            self.done = true;
            return Some(self.end);
        }

        let value = if rising {
            self.accumulator.floor()
        } else {
            self.accumulator.ceil()
        };
        let (low, high) = if rising {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        };
        Some((value.max(0.0) as u64).clamp(low, high))
    }
}

#[derive(Debug, Default)]
struct AnimatorState {
    display: DisplayState,
    // 每次 animate 遞增；世代過期的任務不再寫入
    generation: u64,
    // 畫面是否正好顯示 display.value
    synced: bool,
}

/// Owns the displayed value for one element and drives count-ups on it.
/// At most one animation runs per animator; starting another cancels the
/// previous one, and the new one begins wherever the old one stopped.
pub struct Animator<D: DisplaySink> {
    display: Arc<D>,
    state: Arc<Mutex<AnimatorState>>,
    in_flight: Mutex<Option<AbortHandle>>,
    duration: Duration,
    tick: Duration,
}

impl<D: DisplaySink> Animator<D> {
    /// 以元素目前的文字作為初始顯示值
    pub fn new(sink: D) -> Self {
        let text = sink.read_text();
        let seeded = text.as_deref().map(DisplayState::parse).unwrap_or_default();
        let synced = text.as_deref() == Some(seeded.value.to_string().as_str());

        tracing::debug!(
            "Seeded #{} with {} (text: {:?})",
            sink.element_id(),
            seeded.value,
            text
        );

        Self {
            display: Arc::new(sink),
            state: Arc::new(Mutex::new(AnimatorState {
                display: seeded,
                generation: 0,
                synced,
            })),
            in_flight: Mutex::new(None),
            duration: DEFAULT_DURATION,
            tick: DEFAULT_TICK,
        }
    }

    pub fn with_timing(mut self, duration: Duration, tick: Duration) -> Self {
        self.duration = duration;
        self.tick = tick;
        self
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn current(&self) -> u64 {
        lock(&self.state).display.value
    }

    pub fn is_synced(&self) -> bool {
        lock(&self.state).synced
    }

    /// Starts counting from the current value to `end`. Must be called from
    /// inside a tokio runtime.
    pub fn animate(&self, end: u64) -> AnimationHandle {
        let mut slot = lock_slot(&self.in_flight);
        if let Some(previous) = slot.take() {
            previous.abort();
        }

        let (plan, generation) = {
            let mut state = lock(&self.state);
            state.generation += 1;
            let plan = AnimationPlan::new(state.display.value, end)
                .with_timing(self.duration, self.tick);
            (plan, state.generation)
        };

        tracing::debug!(
            "Animating #{} from {} to {} in {} steps",
            self.display.element_id(),
            plan.start,
            plan.end,
            plan.steps()
        );

        let task = tokio::spawn(run_animation(
            plan,
            Arc::clone(&self.display),
            Arc::clone(&self.state),
            generation,
        ));
        *slot = Some(task.abort_handle());

        AnimationHandle { plan, task }
    }

    /// 停止進行中的動畫，畫面停在最後一個畫格
    pub fn cancel(&self) {
        if let Some(previous) = lock_slot(&self.in_flight).take() {
            previous.abort();
        }
        lock(&self.state).generation += 1;
    }

    pub fn is_animating(&self) -> bool {
        lock_slot(&self.in_flight)
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }
}

impl<D: DisplaySink> Drop for Animator<D> {
    fn drop(&mut self) {
        if let Some(task) = lock_slot(&self.in_flight).take() {
            task.abort();
        }
    }
}

async fn run_animation<D: DisplaySink>(
    plan: AnimationPlan,
    sink: Arc<D>,
    state: Arc<Mutex<AnimatorState>>,
    generation: u64,
) -> AnimationOutcome {
    // 第一個畫格在開始後一個 tick 才寫入
    let period = plan.tick.clamp(MIN_TICK, MAX_PERIOD);
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut frames = plan.frames();
    for value in frames.by_ref() {
        interval.tick().await;

        let mut guard = lock(&state);
        if guard.generation != generation {
            return AnimationOutcome::Cancelled;
        }
        if let Err(e) = sink.write_text(&value.to_string()) {
            tracing::error!("Stopping animation on #{}: {}", sink.element_id(), e);
            return AnimationOutcome::Failed {
                message: e.to_string(),
            };
        }
        guard.display.value = value;
        guard.synced = true;
    }

    tracing::debug!(
        "#{} settled at {} after {} ticks",
        sink.element_id(),
        plan.end,
        frames.ticks()
    );
    AnimationOutcome::Completed {
        value: plan.end,
        ticks: frames.ticks(),
    }
}

fn lock(state: &Mutex<AnimatorState>) -> MutexGuard<'_, AnimatorState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn lock_slot(slot: &Mutex<Option<AbortHandle>>) -> MutexGuard<'_, Option<AbortHandle>> {
    slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Handle to one running count-up.
#[derive(Debug)]
pub struct AnimationHandle {
    plan: AnimationPlan,
    task: JoinHandle<AnimationOutcome>,
}

impl AnimationHandle {
    pub fn plan(&self) -> &AnimationPlan {
        &self.plan
    }

    pub fn cancel(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    pub async fn wait(self) -> AnimationOutcome {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(e) if e.is_cancelled() => AnimationOutcome::Cancelled,
            Err(e) => AnimationOutcome::Failed {
                message: e.to_string(),
            },
        }
    }
}
