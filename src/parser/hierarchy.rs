//! Parent/child reconstruction from depth-annotated rows.
//!
//! Rows arrive in file order. The builder keeps, for every depth, the most
//! recent node seen at that depth; a row at depth `L` takes its parent from
//! depth `L - 1` and invalidates everything deeper than `L`. Paths join the
//! names at every open depth above the row, so descendants of an orphan
//! still carry the ancestors that remain open.

use crate::models::SeriesNode;
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone)]
struct OpenNode {
    series_id: u32,
    name: String,
}

/// Per-run hierarchy state: one instance per parse, never shared
#[derive(Debug)]
pub struct HierarchyBuilder {
    separator: String,
    next_id: u32,
    open: BTreeMap<u32, OpenNode>,
}

impl HierarchyBuilder {
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
            next_id: 1,
            open: BTreeMap::new(),
        }
    }

    /// Add the next row and return its node
    ///
    /// A row that jumps more than one level deeper than anything open gets
    /// no parent and a path of just its own name. No intermediate parent is
    /// synthesised.
    pub fn push(&mut self, level: u32, name: String) -> SeriesNode {
        let parent = level
            .checked_sub(1)
            .and_then(|parent_level| self.open.get(&parent_level));

        let parent_id = parent.map(|node| node.series_id);
        let full_path = match parent_id {
            Some(_) => self
                .open
                .range(..level)
                .map(|(_, node)| node.name.as_str())
                .chain(std::iter::once(name.as_str()))
                .collect::<Vec<_>>()
                .join(self.separator.as_str()),
            None => name.clone(),
        };

        let series_id = self.next_id;
        self.next_id += 1;

        if level > 0 && parent_id.is_none() {
            debug!(
                "Series {} '{}' at level {} has no open parent",
                series_id, name, level
            );
        }

        self.open.insert(
            level,
            OpenNode {
                series_id,
                name: name.clone(),
            },
        );
        self.open.retain(|&open_level, _| open_level <= level);

        SeriesNode {
            series_id,
            level,
            name,
            parent_id,
            full_path,
        }
    }

    /// Number of ids handed out so far
    pub fn assigned(&self) -> u32 {
        self.next_id - 1
    }

    /// Depths currently holding an open node, shallowest first
    pub fn open_levels(&self) -> Vec<u32> {
        self.open.keys().copied().collect()
    }
}
