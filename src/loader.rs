//! DAG loading from uploaded DOT bytes.
//!
//! ```text
//! bytes ─ UTF-8 decode ─ scoped temp file ─ dot::read_dot ─ acyclicity check
//!                                  └──────── removed on every exit path
//! ```
//!
//! Failures are reported to the host through a [`Notifier`] and the loader
//! returns `None`; a cyclic graph is reported as a warning and still
//! returned.

use std::io::Write;

use parking_lot::Mutex;
use tempfile::NamedTempFile;

use crate::config::LoaderConfig;
use crate::dot;
use crate::model::Graph;
use crate::Result;

/// Warning shown when the uploaded graph contains a cycle.
pub const NOT_A_DAG_WARNING: &str =
    "The uploaded graph is not a valid Directed Acyclic Graph (DAG). Visualization may not be accurate.";

// ============================================================================
// Notifier: the host's user-facing message channel
// ============================================================================

/// User-facing notification channel provided by the host UI.
pub trait Notifier: Send + Sync {
    fn warning(&self, message: &str);
    fn error(&self, message: &str);
}

/// Forwards notifications to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn warning(&self, message: &str) {
        tracing::warn!(target: "query_dag::notify", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "query_dag::notify", "{message}");
    }
}

/// Severity of a collected notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Warning,
    Error,
}

/// Records every notification in order.
#[derive(Debug, Default)]
pub struct CollectingNotifier {
    messages: Mutex<Vec<(Level, String)>>,
}

impl CollectingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<(Level, String)> {
        self.messages.lock().clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.of_level(Level::Warning)
    }

    pub fn errors(&self) -> Vec<String> {
        self.of_level(Level::Error)
    }

    fn of_level(&self, level: Level) -> Vec<String> {
        self.messages
            .lock()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl Notifier for CollectingNotifier {
    fn warning(&self, message: &str) {
        self.messages.lock().push((Level::Warning, message.to_string()));
    }

    fn error(&self, message: &str) {
        self.messages.lock().push((Level::Error, message.to_string()));
    }
}

// ============================================================================
// Validation
// ============================================================================

/// True iff `graph` contains no directed cycle.
pub fn is_valid_dag(graph: &Graph) -> bool {
    let is_dag = graph.is_acyclic();
    tracing::debug!(is_dag, "Graph validation result");
    is_dag
}

// ============================================================================
// DagLoader
// ============================================================================

/// Loads DOT uploads through a scoped temporary file.
#[derive(Debug, Clone, Default)]
pub struct DagLoader {
    config: LoaderConfig,
}

impl DagLoader {
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Decode and parse `bytes`, reporting problems through `notifier`.
    ///
    /// Returns `None` when the input cannot be decoded or parsed. A cyclic
    /// graph produces a warning but is still returned.
    pub fn load(&self, bytes: &[u8], notifier: &dyn Notifier) -> Option<Graph> {
        match self.try_load(bytes) {
            Ok(graph) => {
                if is_valid_dag(&graph) {
                    tracing::info!(
                        nodes = graph.node_count(),
                        edges = graph.edge_count(),
                        "Uploaded graph is a valid DAG"
                    );
                } else {
                    notifier.warning(NOT_A_DAG_WARNING);
                    tracing::warn!("Uploaded graph is not a valid DAG");
                }
                Some(graph)
            }
            Err(e) => {
                notifier.error(&format!("An error occurred while loading the DOT file: {e}"));
                tracing::error!(error = %e, "Exception occurred while loading DOT file");
                None
            }
        }
    }

    /// Decode and parse `bytes`, returning the typed error on failure.
    ///
    /// The temporary file is an RAII guard: it is removed when parsing
    /// finishes and also on any early return.
    pub fn try_load(&self, bytes: &[u8]) -> Result<Graph> {
        let content = std::str::from_utf8(bytes)?;
        tracing::debug!(bytes = bytes.len(), "Received DOT file content for parsing");

        let mut tmp = self.temp_file()?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        let path = tmp.path().to_path_buf();
        tracing::debug!(path = %path.display(), "Temporary DOT file created");

        let parsed = dot::read_dot(&path);

        // Removal failure does not change the outcome of the load.
        match tmp.close() {
            Ok(()) => tracing::debug!(path = %path.display(), "Temporary DOT file deleted"),
            Err(e) => tracing::warn!(
                path = %path.display(),
                error = %e,
                "Failed to delete temporary DOT file"
            ),
        }

        parsed
    }

    fn temp_file(&self) -> Result<NamedTempFile> {
        let mut builder = tempfile::Builder::new();
        builder.suffix(&self.config.temp_suffix);
        let file = match &self.config.temp_dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        Ok(file)
    }
}

/// Load a DOT upload with the default configuration.
pub fn load_dag_from_file(bytes: &[u8], notifier: &dyn Notifier) -> Option<Graph> {
    DagLoader::default().load(bytes, notifier)
}
