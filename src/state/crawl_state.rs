/// Crawl run state definitions
use std::fmt;

/// Represents the current state of a crawl run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlState {
    /// The pending frontier is non-empty; another step will be taken
    Running,

    /// The frontier is exhausted (or the run was capped); the index and graph
    /// are frozen
    Done,
}

impl CrawlState {
    /// Derives the state from the size of the pending frontier
    pub fn from_frontier_len(len: usize) -> Self {
        if len == 0 {
            Self::Done
        } else {
            Self::Running
        }
    }

    /// Returns true if no further steps will be taken
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Short lowercase name used in logs and summaries
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for CrawlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
