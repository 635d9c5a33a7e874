//! Async scheduler
//!
//! Turns dispatcher [`Effect`]s into work on the tokio runtime. Every job
//! sends exactly one `Event::Completed` back over the crossbeam channel, and
//! every timer sends `Event::Tick` until it is stopped or replaced. Both are
//! tagged with the screen that asked for them.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::Sender;
use libtermfolio::SourceError;
use tokio::runtime::Handle;
use tokio::task::AbortHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::app::{AsyncResult, Command, Effect, Event, Job, ScreenId, TimerId};
use crate::services::Services;

pub struct Scheduler {
    handle: Handle,
    services: Arc<Services>,
    events: Sender<Event>,
    timers: HashMap<(ScreenId, TimerId), AbortHandle>,
}

impl Scheduler {
    pub fn new(handle: Handle, services: Arc<Services>, events: Sender<Event>) -> Self {
        Self {
            handle,
            services,
            events,
            timers: HashMap::new(),
        }
    }

    /// Carry out the effects of one dispatch, in order
    pub fn execute(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Run { origin, command } => self.run(origin, command),
                Effect::SaveTheme(theme) => {
                    if let Err(e) = self.services.themes.save_theme_name(theme.name()) {
                        tracing::warn!(theme = %theme, error = %e, "failed to save theme");
                    }
                }
            }
        }
    }

    /// Timers currently registered, sorted for stable comparison
    pub fn running_timers(&self) -> Vec<(ScreenId, TimerId)> {
        let mut running: Vec<_> = self
            .timers
            .iter()
            .filter(|(_, task)| !task.is_finished())
            .map(|(key, _)| *key)
            .collect();
        running.sort();
        running
    }

    pub fn is_running(&self, origin: ScreenId, timer: TimerId) -> bool {
        self.timers
            .get(&(origin, timer))
            .is_some_and(|task| !task.is_finished())
    }

    fn run(&mut self, origin: ScreenId, command: Command) {
        match command {
            Command::Fetch(job) => self.spawn_job(origin, job),
            Command::StartTimer { timer, period } => self.start_timer(origin, timer, period),
            Command::StopTimer(timer) => self.stop_timer(origin, timer),
        }
    }

    fn spawn_job(&self, origin: ScreenId, job: Job) {
        tracing::debug!(screen = %origin, job = job_name(&job), "job scheduled");
        let services = Arc::clone(&self.services);
        let events = self.events.clone();
        self.handle.spawn(async move {
            let result = perform(&services, job).await;
            if events.send(Event::Completed { origin, result }).is_err() {
                tracing::debug!(screen = %origin, "session gone, dropping job result");
            }
        });
    }

    fn start_timer(&mut self, origin: ScreenId, timer: TimerId, period: Duration) {
        if period.is_zero() {
            tracing::warn!(screen = %origin, ?timer, "refusing to start a zero-period timer");
            return;
        }
        let events = self.events.clone();
        let task = self.handle.spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                if events.send(Event::Tick { origin, timer }).is_err() {
                    break;
                }
            }
        });

        if let Some(previous) = self.timers.insert((origin, timer), task.abort_handle()) {
            previous.abort();
            tracing::debug!(screen = %origin, ?timer, ?period, "timer replaced");
        } else {
            tracing::debug!(screen = %origin, ?timer, ?period, "timer started");
        }
    }

    fn stop_timer(&mut self, origin: ScreenId, timer: TimerId) {
        if let Some(task) = self.timers.remove(&(origin, timer)) {
            task.abort();
            tracing::debug!(screen = %origin, ?timer, "timer stopped");
        }
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        for (_, task) in self.timers.drain() {
            task.abort();
        }
    }
}

/// Run one job to completion
///
/// Network jobs are bounded by `services.fetch_timeout`; running out of time
/// yields `SourceError::Timeout`. The clipboard write runs on the blocking pool.
pub async fn perform(services: &Services, job: Job) -> AsyncResult {
    let limit = services.fetch_timeout;
    let user = services.username.as_str();

    match job {
        Job::Repositories => {
            AsyncResult::Repositories(bounded(limit, services.source.fetch_repositories(user)).await)
        }
        Job::Readme(repo) => {
            let markdown = bounded(limit, services.source.fetch_readme(user, &repo.name)).await;
            AsyncResult::Readme { repo, markdown }
        }
        Job::RenderMarkdown { repo_name, markdown } => {
            let rendered = services.markdown.render(&markdown);
            AsyncResult::Markdown { repo_name, rendered }
        }
        Job::AccountStats => AsyncResult::Stats(bounded(limit, services.source.fetch_account_stats(user)).await),
        Job::CopyToClipboard { label, text } => {
            let clipboard = Arc::clone(&services.clipboard);
            let result = tokio::task::spawn_blocking(move || clipboard.write_text(&text))
                .await
                .unwrap_or_else(|e| Err(SourceError::Network(format!("clipboard task failed: {}", e))));
            AsyncResult::Copied { label, result }
        }
    }
}

async fn bounded<T>(
    limit: Duration,
    fut: impl Future<Output = Result<T, SourceError>>,
) -> Result<T, SourceError> {
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(SourceError::Timeout(limit)),
    }
}

fn job_name(job: &Job) -> &'static str {
    match job {
        Job::Repositories => "repositories",
        Job::Readme(_) => "readme",
        Job::RenderMarkdown { .. } => "render_markdown",
        Job::AccountStats => "account_stats",
        Job::CopyToClipboard { .. } => "clipboard",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libtermfolio::mock::MockSource;

    fn services(source: MockSource, timeout: Duration) -> Services {
        Services::with_source(Arc::new(source), "octocat", timeout)
    }

    #[tokio::test]
    async fn test_readme_job_carries_repository() {
        let source = MockSource::with_repositories(2);
        let repo = libtermfolio::mock::sample_repositories(2).remove(1);
        let result = perform(&services(source, Duration::from_secs(5)), Job::Readme(repo)).await;
        match result {
            AsyncResult::Readme { repo, markdown } => {
                assert_eq!(repo.name, "repo-01");
                assert!(markdown.unwrap().starts_with("# repo-01"));
            }
            other => panic!("Expected readme result, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_render_job_returns_text() {
        let services = services(MockSource::with_repositories(0), Duration::from_secs(5));
        let job = Job::RenderMarkdown {
            repo_name: "demo".to_string(),
            markdown: "# Title\n\nbody".to_string(),
        };
        match perform(&services, job).await {
            AsyncResult::Markdown { repo_name, rendered } => {
                assert_eq!(repo_name, "demo");
                assert!(!rendered.unwrap().lines.is_empty());
            }
            other => panic!("Expected markdown result, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_clipboard_unavailable_is_reported() {
        let services = services(MockSource::with_repositories(0), Duration::from_secs(5));
        let job = Job::CopyToClipboard {
            label: "Email".to_string(),
            text: "me@example.com".to_string(),
        };
        match perform(&services, job).await {
            AsyncResult::Copied { label, result } => {
                assert_eq!(label, "Email");
                assert!(result.is_err());
            }
            other => panic!("Expected copy result, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_fetch_times_out() {
        let services = services(MockSource::with_delay(Duration::from_secs(60)), Duration::from_secs(10));
        match perform(&services, Job::AccountStats).await {
            AsyncResult::Stats(Err(SourceError::Timeout(d))) => assert_eq!(d, Duration::from_secs(10)),
            other => panic!("Expected timeout, got {:?}", other),
        }
    }
}
