use std::fmt;

/// Lifecycle of one crawl run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Done(TerminationReason),
}

/// Why a run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminationReason {
    /// No unvisited candidate URLs remain
    FrontierExhausted,

    /// The result set reached the configured article cap
    ArticleCap,

    /// The shutdown signal fired; in-flight fetches were abandoned
    Cancelled,
}

impl RunState {
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }

    /// Moves a running state to `Done`; a finished run keeps its first reason
    pub fn finish(&mut self, reason: TerminationReason) {
        if self.is_running() {
            *self = Self::Done(reason);
        }
    }

    pub fn termination_reason(&self) -> Option<TerminationReason> {
        match self {
            Self::Running => None,
            Self::Done(reason) => Some(*reason),
        }
    }
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::FrontierExhausted => "frontier exhausted",
            Self::ArticleCap => "article cap reached",
            Self::Cancelled => "cancelled",
        };
        f.write_str(text)
    }
}
