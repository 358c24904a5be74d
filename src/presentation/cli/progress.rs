//! Progress reporting for CLI

use crate::domain::entities::ProgressEvent;
use console::style;

/// Prints progress events as lines on stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressReporter {
    quiet: bool,
}

impl ProgressReporter {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// Prints one event
    pub fn report(&self, event: &ProgressEvent) {
        if self.quiet && event.is_detail() {
            return;
        }

        match event {
            e if e.is_error() => println!("{}", style(e).yellow()),
            ProgressEvent::FileReconstructed { .. } => println!("{}", style(event).green()),
            ProgressEvent::ScanStarted { .. } => println!("{}", style(event).cyan()),
            _ => println!("{}", event),
        }
    }

    /// Gets a callback for use cases
    pub fn callback(&self) -> impl Fn(&ProgressEvent) + '_ {
        move |event: &ProgressEvent| self.report(event)
    }
}
