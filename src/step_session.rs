//! Step-by-step walkthrough of one recipe with a count-up timer.
//!
//! The timer is a tokio task ticking once per second. The session owns its
//! handle and aborts it on pause, reset, step change and drop, so a ticking
//! task never outlives the session that started it.
//!
//! `abort` only lands at the task's next await point, so on a multi-thread
//! runtime a tick can still be in progress when the session stops the
//! timer. Every run gets a number, and a tick only counts if its run is
//! still the current one.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tracing::debug;

use crate::error::{KitchenError, Result};
use crate::matching::{consume, ConsumptionReport};
use crate::storage::{InventoryStore, Recipe, RecipeStep};

const TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running,
    Paused,
}

/// Elapsed seconds plus the number of the run allowed to advance them.
#[derive(Debug, Default)]
struct TimerClock {
    run: u64,
    elapsed: u64,
}

fn lock_clock(clock: &Mutex<TimerClock>) -> MutexGuard<'_, TimerClock> {
    clock.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Adds one second if `run` is still current. Returns false once the run
/// has been stopped.
fn advance(clock: &Mutex<TimerClock>, run: u64) -> bool {
    let mut clock = lock_clock(clock);
    if clock.run != run {
        return false;
    }
    clock.elapsed += 1;
    true
}

#[derive(Debug)]
struct TickTask(JoinHandle<()>);

impl Drop for TickTask {
    fn drop(&mut self) {
        self.0.abort();
    }
}

#[derive(Debug)]
pub struct StepSession {
    recipe: Recipe,
    index: usize,
    clock: Arc<Mutex<TimerClock>>,
    state: TimerState,
    ticker: Option<TickTask>,
}

impl StepSession {
    /// Opens a session at the first step with the timer idle.
    pub fn open(recipe: Recipe) -> Result<Self> {
        if recipe.steps.is_empty() {
            return Err(KitchenError::EmptyRecipe(recipe.id));
        }
        Ok(Self {
            recipe,
            index: 0,
            clock: Arc::new(Mutex::new(TimerClock::default())),
            state: TimerState::Idle,
            ticker: None,
        })
    }

    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn step_count(&self) -> usize {
        self.recipe.steps.len()
    }

    pub fn current_step(&self) -> &RecipeStep {
        &self.recipe.steps[self.index]
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == self.step_count()
    }

    /// The current step's suggested duration, if it has one.
    pub fn target_duration(&self) -> Option<Duration> {
        self.current_step().timer.map(Duration::from_secs)
    }

    pub fn timer_state(&self) -> TimerState {
        self.state
    }

    /// Whole seconds counted on the current step.
    pub fn elapsed(&self) -> u64 {
        lock_clock(&self.clock).elapsed
    }

    pub fn format_elapsed(&self) -> String {
        format_clock(self.elapsed())
    }

    /// Advances one step; no-op on the last step.
    pub fn next(&mut self) {
        if !self.is_last() {
            self.index += 1;
            self.reset();
        }
    }

    /// Goes back one step; no-op on the first step.
    pub fn previous(&mut self) {
        if !self.is_first() {
            self.index -= 1;
            self.reset();
        }
    }

    /// Starts or resumes the timer. Must be called from within a tokio
    /// runtime.
    pub fn start(&mut self) -> Result<()> {
        if self.state == TimerState::Running {
            return Ok(());
        }
        let runtime = Handle::try_current().map_err(|_| KitchenError::NoRuntime)?;

        let run = {
            let mut clock = lock_clock(&self.clock);
            clock.run += 1;
            clock.run
        };
        let clock = Arc::clone(&self.clock);
        let first_tick = Instant::now() + TICK;
        let handle = runtime.spawn(async move {
            let mut interval = time::interval_at(first_tick, TICK);
            loop {
                interval.tick().await;
                if !advance(&clock, run) {
                    break;
                }
            }
        });

        self.ticker = Some(TickTask(handle));
        self.state = TimerState::Running;
        debug!("Timer started on step {} at {}s", self.index + 1, self.elapsed());
        Ok(())
    }

    /// Holds the elapsed value; no-op unless running.
    pub fn pause(&mut self) {
        if self.state == TimerState::Running {
            self.stop_ticker();
            self.state = TimerState::Paused;
            debug!("Timer paused at {}s", self.elapsed());
        }
    }

    /// Stops the timer and zeroes it.
    pub fn reset(&mut self) {
        self.stop_ticker();
        lock_clock(&self.clock).elapsed = 0;
        self.state = TimerState::Idle;
    }

    // Retires the current run before aborting, so a tick already past its
    // await point is refused.
    fn stop_ticker(&mut self) {
        lock_clock(&self.clock).run += 1;
        self.ticker = None;
    }

    /// Deducts the recipe's ingredients from `inventory`.
    pub fn complete(&self, inventory: &mut InventoryStore) -> Result<ConsumptionReport> {
        consume(&self.recipe, inventory)
    }
}

/// `MM:SS`; minutes keep counting past an hour.
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
