//! The list view.
//!
//! [`ListView::render`] turns one [`Snapshot`] into a [`ViewTree`]. Rendering
//! is pure: it keeps nothing between calls and never touches the provider.
//! A loading snapshot always renders [`ViewTree::Loading`] and a terminal one
//! always renders [`ViewTree::Populated`], so exactly one presentation exists
//! per snapshot.

use serde::Serialize;

use crate::config::DisplayConfig;
use crate::mount::Phase;
use crate::provider::Snapshot;
use crate::record::{Record, RecordId};

/// Count header shown above the rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    /// Number of records in the snapshot.
    pub count: usize,
    /// Header text, e.g. "Found 3 vehicles".
    pub text: String,
}

/// One rendered record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    /// Row identity. Equal to the record id and never shown to the user.
    #[serde(skip)]
    pub key: RecordId,
    /// Record name.
    pub name: String,
    /// Record make.
    pub make: String,
    /// Record model.
    pub model: String,
}

impl From<&Record> for Row {
    fn from(record: &Record) -> Self {
        Self {
            key: record.id.clone(),
            name: record.name.clone(),
            make: record.make.clone(),
            model: record.model.clone(),
        }
    }
}

/// The structured output of one render pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ViewTree {
    /// The fetch is in flight; no rows are rendered.
    Loading {
        /// Loading indicator text.
        text: String,
    },
    /// The fetch has finished.
    Populated {
        /// Count header.
        header: Header,
        /// One row per record, in provider order.
        rows: Vec<Row>,
        /// Failure message when the fetch did not succeed.
        #[serde(skip_serializing_if = "Option::is_none")]
        notice: Option<String>,
    },
}

impl ViewTree {
    /// The phase this tree presents.
    #[must_use]
    pub fn phase(&self) -> Phase {
        match self {
            Self::Loading { .. } => Phase::Loading,
            Self::Populated { .. } => Phase::Populated,
        }
    }

    /// Rendered rows; empty while loading.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        match self {
            Self::Loading { .. } => &[],
            Self::Populated { rows, .. } => rows,
        }
    }

    /// The header, if populated.
    #[must_use]
    pub fn header(&self) -> Option<&Header> {
        match self {
            Self::Loading { .. } => None,
            Self::Populated { header, .. } => Some(header),
        }
    }
}

/// Renders snapshots into view trees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    noun: String,
    loading_text: String,
}

impl Default for ListView {
    fn default() -> Self {
        Self::new("vehicles", "Loading...")
    }
}

impl ListView {
    /// Create a view with the given header noun and loading text.
    #[must_use]
    pub fn new(noun: impl Into<String>, loading_text: impl Into<String>) -> Self {
        Self {
            noun: noun.into(),
            loading_text: loading_text.into(),
        }
    }

    /// Create a view from display configuration.
    #[must_use]
    pub fn from_config(config: &DisplayConfig) -> Self {
        Self::new(config.noun.clone(), config.loading_text.clone())
    }

    /// Render one snapshot.
    #[must_use]
    pub fn render(&self, snapshot: &Snapshot) -> ViewTree {
        if snapshot.loading {
            return ViewTree::Loading {
                text: self.loading_text.clone(),
            };
        }

        let count = snapshot.records.len();
        ViewTree::Populated {
            header: Header {
                count,
                text: format!("Found {count} {}", self.noun),
            },
            rows: snapshot.records.iter().map(Row::from).collect(),
            notice: snapshot.error.clone(),
        }
    }
}
