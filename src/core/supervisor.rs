//! # Supervisor: runs tasks in parallel under a global timeout.
//!
//! The [`Supervisor`] owns the event bus and the subscriber fan-out. Each call
//! to [`Supervisor::run`] spawns one runner per task, polls their state,
//! enforces the timeout, mediates stop confirmation and harvests results.
//!
//! ## State machine
//! ```text
//! Running ──┬─► elapsed ≥ timeout        ──► TimedOut ──┐
//!           ├─► stop signal ─► confirm ─y─► Cancelled ──┤
//!           │                  │  n / EOF ─► Running    │
//!           │                  └ deadline ─► TimedOut ──┤
//!           ├─► OS signal (opt-in)       ──► Cancelled ─┤
//!           └─► all tasks terminal       ──► AllDone ───┤
//!                                                       ▼
//!          snapshot states ─► cancel (unless AllDone) ─► settle (≤ grace) ─► harvest
//! ```
//!
//! ## Wiring
//! ```text
//! run(x, tasks)
//!   for each task:
//!     pipe()            ──► Sink → runner,  Source → slot
//!     watch::channel    ──► Sender → runner, Receiver → slot
//!     root.child_token  ──► runner
//!     tokio::spawn(runner::run_task(..))
//!
//! runners ── publish(Event) ──► Bus ──► listener task ──► SubscriberSet ──► subscribers
//! ```
//!
//! ## Rules
//! - The loop never awaits a specific task; it only waits for the next tick,
//!   a stop request, the deadline, or an OS signal.
//! - Checks run in order: timeout, stop request, completion.
//! - After cancelling, the supervisor waits at most [`Config::grace`] and then
//!   aborts whatever is still running.
//! - Outcomes come from the task states observed when the loop ended. A task
//!   that finishes during grace is still reported as stopped.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::{CancellationToken, DropGuard};

use crate::{
    channel::{self, Source},
    control::{Confirm, StopSignal},
    core::{
        builder::SupervisorBuilder,
        config::Config,
        outcome::{Outcome, Report, RunEnd, TaskReport, combine},
        runner, shutdown,
    },
    error::RuntimeError,
    events::{Bus, Event, EventKind},
    subscribers::{Subscribe, SubscriberSet},
    tasks::{TaskRef, TaskState},
};

/// Supervisor-side view of one spawned task.
struct Slot {
    name: Arc<str>,
    state: watch::Receiver<TaskState>,
    source: Source,
    join: JoinHandle<()>,
}

impl Slot {
    fn is_terminal(&self) -> bool {
        self.state.borrow().is_terminal()
    }
}

/// Coordinates task runners, event delivery and result aggregation.
pub struct Supervisor {
    cfg: Config,
    bus: Bus,
    listener: JoinHandle<()>,
    stop_listener: DropGuard,
    pub(super) os_signals: bool,
}

impl Supervisor {
    /// Creates a supervisor with the given subscribers.
    ///
    /// Must be called within a Tokio runtime: the event listener is spawned here.
    pub fn new(cfg: Config, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        let bus = Bus::new(cfg.bus_capacity_clamped());
        let subs = SubscriberSet::new(subscribers, bus.clone());
        let rx = bus.subscribe();
        let token = CancellationToken::new();
        let listener = tokio::spawn(forward_events(rx, subs, token.clone()));

        Self {
            cfg,
            bus,
            listener,
            stop_listener: token.drop_guard(),
            os_signals: false,
        }
    }

    /// Returns a builder.
    pub fn builder(cfg: Config) -> SupervisorBuilder {
        SupervisorBuilder::new(cfg)
    }

    /// Returns the configuration.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Returns `true` if runs end early on OS termination signals.
    ///
    /// Off unless enabled with [`SupervisorBuilder::with_os_signals`].
    pub fn handles_os_signals(&self) -> bool {
        self.os_signals
    }

    /// Runs the tasks listed in [`Config::tasks`] on [`Config::argument`].
    pub async fn run_configured(
        &self,
        stop: &StopSignal,
        confirm: &mut dyn Confirm,
    ) -> Result<Report, RuntimeError> {
        self.run(self.cfg.argument, self.cfg.task_refs(), stop, confirm)
            .await
    }

    /// Runs `tasks` in parallel on argument `x` until all finish, the timeout
    /// expires, or a confirmed stop request arrives.
    ///
    /// Task failures never surface as `Err` here; they are reported per task
    /// in the returned [`Report`].
    pub async fn run(
        &self,
        x: f64,
        tasks: Vec<TaskRef>,
        stop: &StopSignal,
        confirm: &mut dyn Confirm,
    ) -> Result<Report, RuntimeError> {
        if tasks.is_empty() {
            return Err(RuntimeError::NoTasks);
        }
        self.bus.publish(
            Event::new(EventKind::RunStarted)
                .with_value(x)
                .with_count(tasks.len())
                .with_timeout(self.cfg.timeout),
        );

        let started = Instant::now();
        let deadline = self.cfg.deadline_from(started);
        let root = CancellationToken::new();
        let mut slots = self.spawn_tasks(x, tasks, &root);

        let end = self.supervise(&slots, deadline, stop, confirm).await;
        let observed: Vec<TaskState> = slots.iter().map(|s| s.state.borrow().clone()).collect();
        if end != RunEnd::AllDone {
            root.cancel();
        }
        self.settle(&mut slots).await;

        let report = harvest(slots, observed, end, started.elapsed());
        let mut finished = Event::new(EventKind::RunFinished).with_reason(end.as_label());
        if let Some(result) = report.result {
            finished = finished.with_value(result);
        }
        self.bus.publish(finished);
        Ok(report)
    }

    /// Flushes pending events to every subscriber and stops their workers.
    pub async fn shutdown(self) {
        let Supervisor {
            listener,
            stop_listener,
            ..
        } = self;
        drop(stop_listener);
        let _ = listener.await;
    }

    fn spawn_tasks(&self, x: f64, tasks: Vec<TaskRef>, root: &CancellationToken) -> Vec<Slot> {
        tasks
            .into_iter()
            .map(|task| {
                let (sink, source) = channel::pipe();
                let (state_tx, state) = watch::channel(TaskState::Pending);
                let name: Arc<str> = Arc::from(task.name());
                let join = tokio::spawn(runner::run_task(
                    task,
                    x,
                    root.child_token(),
                    sink,
                    state_tx,
                    self.bus.clone(),
                ));
                Slot {
                    name,
                    state,
                    source,
                    join,
                }
            })
            .collect()
    }

    async fn supervise(
        &self,
        slots: &[Slot],
        deadline: Instant,
        stop: &StopSignal,
        confirm: &mut dyn Confirm,
    ) -> RunEnd {
        let mut tick = time::interval(self.cfg.poll_interval_clamped());
        tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let os_signals = self.os_signals;
        let terminate = async move {
            if os_signals {
                shutdown::wait_for_termination().await;
            } else {
                std::future::pending::<()>().await;
            }
        };
        tokio::pin!(terminate);

        loop {
            if Instant::now() >= deadline {
                self.publish_timeout();
                return RunEnd::TimedOut;
            }

            if stop.is_requested() {
                confirm.discard_pending();
                self.bus.publish(Event::new(EventKind::StopRequested));
                let answer = tokio::select! {
                    answer = confirm.confirm() => answer,
                    _ = time::sleep_until(deadline) => {
                        self.publish_timeout();
                        return RunEnd::TimedOut;
                    }
                    _ = &mut terminate => {
                        self.bus.publish(Event::new(EventKind::ShutdownRequested));
                        return RunEnd::Cancelled;
                    }
                };
                if answer == Some(true) {
                    self.bus.publish(Event::new(EventKind::StopConfirmed));
                    return RunEnd::Cancelled;
                }
                self.bus.publish(Event::new(EventKind::StopDeclined));
                stop.clear();
                continue;
            }

            if slots.iter().all(Slot::is_terminal) {
                self.bus.publish(Event::new(EventKind::AllDone));
                return RunEnd::AllDone;
            }

            tokio::select! {
                _ = tick.tick() => {}
                _ = stop.requested() => {}
                _ = time::sleep_until(deadline) => {}
                _ = &mut terminate => {
                    self.bus.publish(Event::new(EventKind::ShutdownRequested));
                    return RunEnd::Cancelled;
                }
            }
        }
    }

    /// Waits up to `grace` for every runner to return, then aborts the rest.
    async fn settle(&self, slots: &mut [Slot]) {
        let grace = self.cfg.grace;
        let joined = futures::future::join_all(slots.iter_mut().map(|s| &mut s.join));
        if time::timeout(grace, joined).await.is_ok() {
            return;
        }

        let stuck: Vec<&str> = slots
            .iter()
            .filter(|s| !s.is_terminal())
            .map(|s| &*s.name)
            .collect();
        self.bus.publish(
            Event::new(EventKind::GraceExceeded)
                .with_reason(stuck.join(", "))
                .with_timeout(grace),
        );
        for slot in slots.iter() {
            slot.join.abort();
        }
    }

    fn publish_timeout(&self) {
        self.bus
            .publish(Event::new(EventKind::TimeoutHit).with_timeout(self.cfg.timeout));
    }
}

/// Classifies every slot by the state it had when the run ended and
/// aggregates the combined result.
///
/// Anything a task does after that point (during grace) is ignored.
fn harvest(slots: Vec<Slot>, observed: Vec<TaskState>, end: RunEnd, elapsed: Duration) -> Report {
    let tasks: Vec<TaskReport> = slots
        .into_iter()
        .zip(observed)
        .map(|(mut slot, state)| TaskReport {
            outcome: Outcome::classify(&state, end, &mut slot.source),
            name: slot.name,
        })
        .collect();
    let result = combine(tasks.iter().map(|t| &t.outcome));

    Report {
        end,
        tasks,
        result,
        elapsed,
    }
}

/// Forwards bus events to the subscriber set until stopped, then drains the
/// backlog and shuts the subscribers down.
async fn forward_events(
    mut rx: broadcast::Receiver<Event>,
    subs: SubscriberSet,
    stop: CancellationToken,
) {
    loop {
        tokio::select! {
            biased;
            res = rx.recv() => match res {
                Ok(ev) => subs.emit(&ev),
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => break,
            },
            _ = stop.cancelled() => {
                loop {
                    match rx.try_recv() {
                        Ok(ev) => subs.emit(&ev),
                        Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
                        Err(_) => break,
                    }
                }
                break;
            }
        }
    }
    subs.shutdown().await;
}
