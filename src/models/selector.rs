// Snapshot query selector

use crate::labels::DEFAULT_LABEL_PREFIX;

/// Immutable query for one snapshot call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    prefixes: Vec<String>,
    include_stopped: bool,
    /// Reserved; no collector reads it yet.
    project_filter: Vec<String>,
}

impl Selector {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
            include_stopped: false,
            project_filter: Vec::new(),
        }
    }

    /// Also list containers that are not running.
    pub fn include_stopped(mut self, include_stopped: bool) -> Self {
        self.include_stopped = include_stopped;
        self
    }

    pub fn project_filter<I, S>(mut self, projects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.project_filter = projects.into_iter().map(Into::into).collect();
        self
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    pub fn stopped_included(&self) -> bool {
        self.include_stopped
    }

    pub fn projects(&self) -> &[String] {
        &self.project_filter
    }
}

impl Default for Selector {
    fn default() -> Self {
        Self::new([DEFAULT_LABEL_PREFIX])
    }
}
