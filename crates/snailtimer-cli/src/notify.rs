use std::io::Write;

use snailtimer_core::Notifier;

/// Prints completion alerts to stderr, optionally ringing the bell.
pub struct TerminalNotifier {
    bell: bool,
}

impl TerminalNotifier {
    pub fn new(bell: bool) -> Self {
        Self { bell }
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, message: &str) {
        let mut err = std::io::stderr().lock();
        let bell = if self.bell { "\x07" } else { "" };
        // Best effort: a closed stderr must not take the timer down.
        let _ = writeln!(err, "{bell}{message}");
    }
}
