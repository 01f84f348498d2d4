// src/progress.rs
/// Lightweight progress reporting for the extraction loops.
/// Frontends implement this to surface status; it carries no data the
/// extractors depend on.
pub trait Progress {
    /// Start of a batch (one programme's courses, one plan's blocks).
    fn begin(&mut self, _title: &str, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One unit recorded (a course, a study-year block).
    fn item_done(&mut self, _label: &str) {}

    /// One unit left out, with the reason.
    fn item_skipped(&mut self, _label: &str, _reason: &str) {}

    /// End of the current batch.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Collects every event as text. Handy in tests and for post-run summaries.
#[derive(Debug, Default)]
pub struct RecordingProgress {
    pub events: Vec<String>,
}

impl Progress for RecordingProgress {
    fn begin(&mut self, title: &str, total: usize) {
        self.events.push(format!("begin {title} ({total})"));
    }
    fn log(&mut self, msg: &str) {
        self.events.push(format!("log {msg}"));
    }
    fn item_done(&mut self, label: &str) {
        self.events.push(format!("done {label}"));
    }
    fn item_skipped(&mut self, label: &str, reason: &str) {
        self.events.push(format!("skipped {label}: {reason}"));
    }
    fn finish(&mut self) {
        self.events.push(s!("finish"));
    }
}
