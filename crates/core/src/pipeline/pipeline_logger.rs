use std::time::Instant;

/// Observer for pipeline runs: stage progress, stage timings, metrics, and
/// status messages. Use cases report through it without knowing where the
/// events end up.
pub trait PipelineLogger: Send {
    /// Stage `current` of `total` finished.
    fn progress(&mut self, current: usize, total: usize);

    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Point-in-time measurement such as plan length or output size.
    fn metric(&mut self, name: &str, value: f64);

    fn info(&mut self, message: &str);

    /// Report everything recorded so far. Default: no-op.
    fn summary(&self) {}
}

/// Discards every event.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn progress(&mut self, _current: usize, _total: usize) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// Aggregate of one named series (a stage's durations or a metric's values).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SeriesStats {
    pub count: usize,
    pub total: f64,
    pub max: f64,
    pub last: f64,
}

impl SeriesStats {
    fn record(&mut self, value: f64) {
        self.count += 1;
        self.total += value;
        self.max = if self.count == 1 { value } else { self.max.max(value) };
        self.last = value;
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total / self.count as f64
        }
    }
}

/// Logger for the command line: forwards messages to the `log` facade and
/// aggregates timings and metrics for an end-of-command summary.
///
/// Series are kept in first-seen order so the summary reads in pipeline order.
pub struct StdoutPipelineLogger {
    stages: Vec<(String, SeriesStats)>,
    metrics: Vec<(String, SeriesStats)>,
    started: Instant,
    completed_runs: usize,
    messages: Vec<String>,
}

impl StdoutPipelineLogger {
    pub fn new() -> Self {
        Self {
            stages: Vec::new(),
            metrics: Vec::new(),
            started: Instant::now(),
            completed_runs: 0,
            messages: Vec::new(),
        }
    }

    pub fn stage(&self, name: &str) -> Option<&SeriesStats> {
        find(&self.stages, name)
    }

    pub fn metric_stats(&self, name: &str) -> Option<&SeriesStats> {
        find(&self.metrics, name)
    }

    pub fn completed_runs(&self) -> usize {
        self.completed_runs
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// The summary text, or `None` when nothing was timed or measured.
    pub fn summary_string(&self) -> Option<String> {
        if self.stages.is_empty() && self.metrics.is_empty() {
            return None;
        }

        let elapsed_s = self.started.elapsed().as_secs_f64();
        let mut lines = vec![format!(
            "{} run(s) completed in {elapsed_s:.2}s",
            self.completed_runs
        )];
        for (name, stats) in &self.stages {
            lines.push(format!(
                "  {name:<12} x{:<3} mean {:8.1}ms  max {:8.1}ms",
                stats.count,
                stats.mean(),
                stats.max
            ));
        }
        for (name, stats) in &self.metrics {
            lines.push(format!("  {name:<12} last {:.0}  mean {:.1}", stats.last, stats.mean()));
        }
        Some(lines.join("\n"))
    }
}

impl Default for StdoutPipelineLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineLogger for StdoutPipelineLogger {
    fn progress(&mut self, current: usize, total: usize) {
        if total == 0 {
            return;
        }
        log::debug!("Stage {current}/{total} done");
        if current == total {
            self.completed_runs += 1;
        }
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        series_mut(&mut self.stages, stage).record(duration_ms);
    }

    fn metric(&mut self, name: &str, value: f64) {
        series_mut(&mut self.metrics, name).record(value);
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
        self.messages.push(message.to_string());
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("{text}");
        }
    }
}

fn find<'a>(series: &'a [(String, SeriesStats)], name: &str) -> Option<&'a SeriesStats> {
    series.iter().find(|(n, _)| n == name).map(|(_, s)| s)
}

fn series_mut<'a>(series: &'a mut Vec<(String, SeriesStats)>, name: &str) -> &'a mut SeriesStats {
    let index = match series.iter().position(|(n, _)| n == name) {
        Some(index) => index,
        None => {
            series.push((name.to_string(), SeriesStats::default()));
            series.len() - 1
        }
    };
    &mut series[index].1
}
