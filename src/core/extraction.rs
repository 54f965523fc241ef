//! Demonstration extraction workflow started when playback begins.
//!
//! Two simulated stages run back to back on interval timers: a fast
//! "Extracting" stage and a slower "Extraction" stage that reports synthetic
//! frame numbers and filter names. The simulator only emits
//! [`ExtractionEvent`]s; the UI task applies them to the task tracker through
//! [`ExtractionDriver`], keeping the tracker single-writer.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::tasks::{BackgroundTaskTracker, TaskId, TaskStatus};

const FILTER_NAMES: &[&str] = &[
    "hard braking",
    "lane departure",
    "near miss",
    "pedestrian proximity",
    "sudden acceleration",
    "cut-in",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtractionStage {
    Extracting,
    Extraction,
}

impl ExtractionStage {
    pub fn task_name(self) -> &'static str {
        match self {
            ExtractionStage::Extracting => "Extracting video frames",
            ExtractionStage::Extraction => "Extraction: critical event filtering",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionEvent {
    StageStarted(ExtractionStage),
    StageProgress {
        stage: ExtractionStage,
        progress: u8,
        details: Option<String>,
    },
    StageFinished(ExtractionStage),
}

#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    pub extracting_tick: Duration,
    pub extraction_tick: Duration,
    /// Fixed seed for reproducible progress; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            extracting_tick: Duration::from_millis(200),
            extraction_tick: Duration::from_millis(800),
            seed: None,
        }
    }
}

/// Running simulator; cancelled when dropped
#[derive(Debug)]
pub struct ExtractionHandle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl ExtractionHandle {
    /// The simulator has sent its last event or was cancelled
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for ExtractionHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Spawn the two-stage simulator on the current tokio runtime
pub fn spawn_extraction(
    config: ExtractionConfig,
    events: mpsc::UnboundedSender<ExtractionEvent>,
) -> ExtractionHandle {
    let cancel = CancellationToken::new();
    let token = cancel.clone();
    let task = tokio::spawn(async move {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let mut simulator = Simulator { rng, events };
        tokio::select! {
            _ = token.cancelled() => {
                tracing::debug!("Extraction simulator cancelled");
            }
            result = simulator.run(&config) => {
                if result.is_err() {
                    tracing::debug!("Extraction receiver dropped, simulator stopped");
                }
            }
        }
    });
    ExtractionHandle { cancel, task }
}

/// The UI side stopped listening
type Disconnected = mpsc::error::SendError<ExtractionEvent>;

struct Simulator {
    rng: StdRng,
    events: mpsc::UnboundedSender<ExtractionEvent>,
}

impl Simulator {
    async fn run(&mut self, config: &ExtractionConfig) -> Result<(), Disconnected> {
        self.extracting(config.extracting_tick).await?;
        self.extraction(config.extraction_tick).await
    }

    fn send(&self, event: ExtractionEvent) -> Result<(), Disconnected> {
        self.events.send(event)
    }

    async fn extracting(&mut self, tick: Duration) -> Result<(), Disconnected> {
        let stage = ExtractionStage::Extracting;
        self.send(ExtractionEvent::StageStarted(stage))?;

        let mut interval = tokio::time::interval(tick);
        interval.tick().await;
        let mut progress: u8 = 0;
        while progress < 100 {
            interval.tick().await;
            progress = progress.saturating_add(self.rng.random_range(5..=20)).min(100);
            self.send(ExtractionEvent::StageProgress {
                stage,
                progress,
                details: None,
            })?;
        }
        self.send(ExtractionEvent::StageFinished(stage))
    }

    async fn extraction(&mut self, tick: Duration) -> Result<(), Disconnected> {
        let stage = ExtractionStage::Extraction;
        self.send(ExtractionEvent::StageStarted(stage))?;

        let mut interval = tokio::time::interval(tick);
        interval.tick().await;
        let mut progress: u8 = 0;
        let mut frame: u32 = 0;
        while progress < 100 {
            interval.tick().await;
            progress = progress.saturating_add(self.rng.random_range(4..=12)).min(100);
            frame += self.rng.random_range(12..=60);
            let filter = FILTER_NAMES[self.rng.random_range(0..FILTER_NAMES.len())];
            self.send(ExtractionEvent::StageProgress {
                stage,
                progress,
                details: Some(format!("Frame {frame} · filter: {filter}")),
            })?;
        }
        self.send(ExtractionEvent::StageFinished(stage))
    }
}

/// Identifies one simulator run so late events from a replaced run are dropped
pub type RunId = u64;

/// Applies simulator events to the task tracker
#[derive(Debug, Default)]
pub struct ExtractionDriver {
    run: RunId,
    extracting: Option<TaskId>,
    extraction: Option<TaskId>,
}

impl ExtractionDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a new run. Stages of the previous run still in the
    /// tracker are failed and its remaining events are ignored.
    pub fn begin(&mut self, tracker: &mut BackgroundTaskTracker, now: Instant) -> RunId {
        self.abort(tracker, now);
        self.run += 1;
        self.run
    }

    fn slot(&mut self, stage: ExtractionStage) -> &mut Option<TaskId> {
        match stage {
            ExtractionStage::Extracting => &mut self.extracting,
            ExtractionStage::Extraction => &mut self.extraction,
        }
    }

    pub fn apply(
        &mut self,
        tracker: &mut BackgroundTaskTracker,
        run: RunId,
        event: ExtractionEvent,
        now: Instant,
    ) -> Option<TaskId> {
        if run != self.run {
            tracing::debug!(
                run,
                current = self.run,
                "Dropping event from replaced extraction run"
            );
            return None;
        }
        match event {
            ExtractionEvent::StageStarted(stage) => {
                let id = tracker.start(stage.task_name(), None);
                *self.slot(stage) = Some(id);
                Some(id)
            }
            ExtractionEvent::StageProgress {
                stage,
                progress,
                details,
            } => {
                let id = (*self.slot(stage))?;
                tracker.update_progress(id, progress, details);
                Some(id)
            }
            ExtractionEvent::StageFinished(stage) => {
                let id = self.slot(stage).take()?;
                tracker.complete_at(id, TaskStatus::Completed, now);
                Some(id)
            }
        }
    }

    /// Mark any running stage as failed, e.g. when playback is torn down
    pub fn abort(&mut self, tracker: &mut BackgroundTaskTracker, now: Instant) {
        for id in [self.extracting.take(), self.extraction.take()]
            .into_iter()
            .flatten()
        {
            tracker.complete_at(id, TaskStatus::Failed, now);
        }
    }

    pub fn is_running(&self) -> bool {
        self.extracting.is_some() || self.extraction.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> ExtractionConfig {
        ExtractionConfig {
            seed: Some(7),
            ..Default::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_stages_run_in_order_to_completion() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _handle = spawn_extraction(seeded(), tx);

        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            let done = event == ExtractionEvent::StageFinished(ExtractionStage::Extraction);
            events.push(event);
            if done {
                break;
            }
        }

        assert_eq!(
            events.first(),
            Some(&ExtractionEvent::StageStarted(ExtractionStage::Extracting))
        );
        let first_finished = events
            .iter()
            .position(|e| *e == ExtractionEvent::StageFinished(ExtractionStage::Extracting))
            .unwrap();
        assert_eq!(
            events[first_finished + 1],
            ExtractionEvent::StageStarted(ExtractionStage::Extraction)
        );

        let mut last = 0;
        for event in &events[..first_finished] {
            if let ExtractionEvent::StageProgress { progress, .. } = event {
                assert!(*progress >= last);
                last = *progress;
            }
        }
        assert_eq!(last, 100);

        let detail = events[first_finished..].iter().find_map(|e| match e {
            ExtractionEvent::StageProgress { details, .. } => details.clone(),
            _ => None,
        });
        assert!(detail.unwrap().starts_with("Frame "));
    }

    #[tokio::test(start_paused = true)]
    async fn test_extracting_ticks_every_200ms() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let start = tokio::time::Instant::now();
        let _handle = spawn_extraction(seeded(), tx);

        assert_eq!(
            rx.recv().await,
            Some(ExtractionEvent::StageStarted(ExtractionStage::Extracting))
        );
        assert!(matches!(
            rx.recv().await,
            Some(ExtractionEvent::StageProgress { .. })
        ));
        assert_eq!(start.elapsed(), Duration::from_millis(200));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_handle_cancels() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = spawn_extraction(seeded(), tx);
        assert!(rx.recv().await.is_some());

        drop(handle);
        tokio::time::sleep(Duration::from_secs(60)).await;

        // Drain whatever was queued before cancellation, then the channel closes
        while let Ok(event) = rx.try_recv() {
            assert_ne!(
                event,
                ExtractionEvent::StageFinished(ExtractionStage::Extraction)
            );
        }
        assert!(rx.recv().await.is_none());
    }

    #[test]
    fn test_driver_maps_events_to_tasks() {
        let mut tracker = BackgroundTaskTracker::default();
        let mut driver = ExtractionDriver::new();
        let now = Instant::now();
        let run = driver.begin(&mut tracker, now);

        let id = driver
            .apply(
                &mut tracker,
                run,
                ExtractionEvent::StageStarted(ExtractionStage::Extracting),
                now,
            )
            .unwrap();
        assert_eq!(tracker.current_id(), Some(id));
        assert_eq!(
            tracker.get(id).unwrap().name,
            ExtractionStage::Extracting.task_name()
        );

        driver.apply(
            &mut tracker,
            run,
            ExtractionEvent::StageProgress {
                stage: ExtractionStage::Extracting,
                progress: 40,
                details: None,
            },
            now,
        );
        assert_eq!(tracker.get(id).unwrap().progress, 40);

        driver.apply(
            &mut tracker,
            run,
            ExtractionEvent::StageFinished(ExtractionStage::Extracting),
            now,
        );
        assert_eq!(tracker.get(id).unwrap().status, TaskStatus::Completed);
        assert!(!driver.is_running());
    }

    #[test]
    fn test_driver_abort_fails_running_stage() {
        let mut tracker = BackgroundTaskTracker::default();
        let mut driver = ExtractionDriver::new();
        let now = Instant::now();
        let run = driver.begin(&mut tracker, now);
        let id = driver
            .apply(
                &mut tracker,
                run,
                ExtractionEvent::StageStarted(ExtractionStage::Extraction),
                now,
            )
            .unwrap();

        driver.abort(&mut tracker, now);

        assert_eq!(tracker.get(id).unwrap().status, TaskStatus::Failed);
        assert!(!driver.is_running());
    }

    #[test]
    fn test_progress_for_unknown_stage_is_ignored() {
        let mut tracker = BackgroundTaskTracker::default();
        let mut driver = ExtractionDriver::new();
        let run = driver.begin(&mut tracker, Instant::now());
        let applied = driver.apply(
            &mut tracker,
            run,
            ExtractionEvent::StageProgress {
                stage: ExtractionStage::Extraction,
                progress: 10,
                details: None,
            },
            Instant::now(),
        );
        assert!(applied.is_none());
        assert!(tracker.tasks().is_empty());
    }

    #[test]
    fn test_new_run_supersedes_previous() {
        let mut tracker = BackgroundTaskTracker::default();
        let mut driver = ExtractionDriver::new();
        let now = Instant::now();
        let first = driver.begin(&mut tracker, now);
        let stale = driver
            .apply(
                &mut tracker,
                first,
                ExtractionEvent::StageStarted(ExtractionStage::Extracting),
                now,
            )
            .unwrap();

        let second = driver.begin(&mut tracker, now);
        assert_ne!(first, second);
        assert_eq!(tracker.get(stale).unwrap().status, TaskStatus::Failed);

        // Queued events of the first run no longer reach the tracker
        let late = driver.apply(
            &mut tracker,
            first,
            ExtractionEvent::StageStarted(ExtractionStage::Extraction),
            now,
        );
        assert!(late.is_none());
        assert_eq!(tracker.tasks().len(), 1);
        assert_eq!(tracker.active_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_handle_reports_finished_run() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = spawn_extraction(seeded(), tx);
        assert!(!handle.is_finished());

        while rx.recv().await.is_some() {}
        tokio::task::yield_now().await;
        assert!(handle.is_finished());
    }
}
