use std::cell::RefCell;

use tracing::{debug, info};

/// Two independent output ports a plugin reports through.
pub trait DeployLog {
    /// Detail only shown when the operator asked for verbose output.
    fn verbose(&self, message: &str);
    /// Always-on notice.
    fn notice(&self, message: &str);
}

/// Routes the verbose channel to `debug!` and notices to `info!`.
///
/// Whether verbose lines are visible is decided by the installed subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLog;

impl DeployLog for TracingLog {
    fn verbose(&self, message: &str) {
        debug!(target: "sdeploy", "{message}");
    }

    fn notice(&self, message: &str) {
        info!(target: "sdeploy", "{message}");
    }
}

/// Captures both channels in memory.
#[derive(Debug, Default)]
pub struct MemoryLog {
    verbose: RefCell<Vec<String>>,
    notice: RefCell<Vec<String>>,
}

impl MemoryLog {
    pub fn verbose_messages(&self) -> Vec<String> {
        self.verbose.borrow().clone()
    }

    pub fn notice_messages(&self) -> Vec<String> {
        self.notice.borrow().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.verbose.borrow().is_empty() && self.notice.borrow().is_empty()
    }
}

impl DeployLog for MemoryLog {
    fn verbose(&self, message: &str) {
        self.verbose.borrow_mut().push(message.to_string());
    }

    fn notice(&self, message: &str) {
        self.notice.borrow_mut().push(message.to_string());
    }
}
