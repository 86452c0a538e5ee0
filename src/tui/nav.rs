use std::ops::Range;

use crate::model::task::{Task, TaskId, TaskStore};
use crate::ops::filter::{FilterOptions, FilterState};

use super::layout::PanelLayout;
use super::tree::TreeModel;
use super::wrap::wrap_text;

/// Owns the task store and everything derived from it for display:
/// the filter, the tree over the filtered tasks, the selection and the
/// scroll offset (in rows) of the node list.
///
/// Every operation is a no-op on an empty list; indices saturate rather
/// than error.
#[derive(Debug, Clone)]
pub struct Navigator {
    store: TaskStore,
    filter: FilterState,
    tree: TreeModel,
    selected: usize,
    offset: usize,
    layout: PanelLayout,
}

impl Navigator {
    pub fn new(store: TaskStore, options: FilterOptions, layout: PanelLayout) -> Self {
        let filter = FilterState::new(&store, options);
        let mut tree = TreeModel::new();
        tree.rebuild(&store, filter.matches());
        Navigator {
            store,
            filter,
            tree,
            selected: 0,
            offset: 0,
            layout,
        }
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
        self.reconcile();
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.tree.len() {
            self.selected += 1;
        }
        self.reconcile();
    }

    pub fn go_to_top(&mut self) {
        self.selected = 0;
        self.reconcile();
    }

    pub fn go_to_bottom(&mut self) {
        self.selected = self.tree.len().saturating_sub(1);
        self.reconcile();
    }

    /// Flip expansion of the selected task. Returns the new state, or `None`
    /// when nothing is selected.
    pub fn toggle_expand(&mut self) -> Option<bool> {
        let id = self.selected_id()?;
        let expanded = self.tree.toggle(id);
        self.reconcile();
        Some(expanded)
    }

    /// Re-filter the store. Selection and scroll go back to the top.
    pub fn apply_filter(&mut self, term: &str) {
        self.filter.apply(&self.store, term);
        self.tree.rebuild(&self.store, self.filter.matches());
        self.selected = 0;
        self.offset = 0;
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.layout = PanelLayout::compute(width, height);
        self.reconcile();
    }

    /// Clamp the selection and offset, then scroll the minimal amount that
    /// brings the selected node's rows into view. A node taller than the
    /// viewport has its header pinned to the top.
    fn reconcile(&mut self) {
        if self.tree.is_empty() {
            self.selected = 0;
            self.offset = 0;
            return;
        }
        self.selected = self.selected.min(self.tree.len() - 1);

        let vh = self.viewport_height();
        self.offset = self.offset.min(self.tree.total_rows().saturating_sub(vh));

        let start = self.tree.row_start(self.selected);
        let end = start + self.tree.row_height(self.selected);
        if start < self.offset {
            self.offset = start;
        } else if end > self.offset + vh {
            self.offset = (end - vh).min(start);
        }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn tree(&self) -> &TreeModel {
        &self.tree
    }

    pub fn layout(&self) -> PanelLayout {
        self.layout
    }

    /// Index into the flat node sequence
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// First visible row of the node list
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn viewport_height(&self) -> usize {
        self.layout.list_height as usize
    }

    /// Rows of the node list currently on screen
    pub fn visible_rows(&self) -> Range<usize> {
        let end = (self.offset + self.viewport_height()).min(self.tree.total_rows());
        self.offset.min(end)..end
    }

    pub fn selected_id(&self) -> Option<TaskId> {
        self.tree.flat().get(self.selected).map(|n| n.id)
    }

    pub fn selected_task(&self) -> Option<&Task> {
        let node = self.tree.flat().get(self.selected)?;
        self.store.at(node.task)
    }

    /// Full detail text of the selected task, empty when nothing is selected
    pub fn detail_text(&self) -> String {
        self.selected_task().map(detail_text).unwrap_or_default()
    }

    /// Detail text split into panel rows, wrapped to the panel's inner width
    /// when `wrap` is set.
    pub fn detail_lines(&self, wrap: bool) -> Vec<String> {
        let text = self.detail_text();
        if wrap {
            wrap_text(&text, self.layout.detail_inner_width())
        } else {
            text.lines().map(str::to_string).collect()
        }
    }
}

/// `Item: <description>`, a blank line, then the task's raw lines with the
/// JSON escapes Ansible prints (`\n`, `\t`, `\"`) expanded.
pub fn detail_text(task: &Task) -> String {
    format!(
        "Item: {}\n\n{}",
        task.description,
        expand_escapes(&task.raw_text)
    )
}

fn expand_escapes(s: &str) -> String {
    s.replace("\\n", "\n")
        .replace("\\t", "\t")
        .replace("\\\"", "\"")
}
