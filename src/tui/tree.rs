use std::collections::HashSet;

use crate::model::task::{Task, TaskId, TaskStore};

/// Rows an expanded node adds below its header line
/// (host, path, start time, status)
pub const DETAIL_ROWS: usize = 4;

/// A task with its display expansion state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Index into the task store
    pub task: usize,
    pub id: TaskId,
    pub is_expanded: bool,
    /// Always empty for execution logs; flattening still walks it
    pub children: Vec<Node>,
}

/// One entry of the flattened, render-ready node sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatNode {
    pub task: usize,
    pub id: TaskId,
    pub depth: usize,
    pub is_expanded: bool,
}

/// What a single rendered row of the node list shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRow {
    /// The one-line summary of the flat node at this index
    Header(usize),
    /// Line `line` (0..DETAIL_ROWS) of an expanded node's detail block
    Detail { node: usize, line: usize },
}

/// Pre-order flattening of a node forest
pub fn flatten(nodes: &[Node]) -> Vec<FlatNode> {
    let mut out = Vec::new();
    flatten_into(nodes, 0, &mut out);
    out
}

fn flatten_into(nodes: &[Node], depth: usize, out: &mut Vec<FlatNode>) {
    for node in nodes {
        out.push(FlatNode {
            task: node.task,
            id: node.id,
            depth,
            is_expanded: node.is_expanded,
        });
        flatten_into(&node.children, depth + 1, out);
    }
}

/// Nodes over the filtered tasks, their flattened sequence, and the row
/// geometry derived from it. Expansion is remembered per task ID, so it
/// survives any number of rebuilds.
#[derive(Debug, Clone, Default)]
pub struct TreeModel {
    expanded: HashSet<TaskId>,
    nodes: Vec<Node>,
    flat: Vec<FlatNode>,
    /// First row of each flat node
    row_starts: Vec<usize>,
    total_rows: usize,
    expanded_count: usize,
}

impl TreeModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build nodes for the given store indices (in order) and reflatten.
    pub fn rebuild(&mut self, store: &TaskStore, matches: &[usize]) {
        self.nodes = matches
            .iter()
            .filter_map(|&index| store.at(index).map(|task| (index, task)))
            .map(|(index, task)| Node {
                task: index,
                id: task.id,
                is_expanded: self.expanded.contains(&task.id),
                children: Vec::new(),
            })
            .collect();
        self.reflatten();
    }

    /// Flip the expansion of a task and reflatten. Returns the new state.
    pub fn toggle(&mut self, id: TaskId) -> bool {
        let now_expanded = if self.expanded.remove(&id) {
            false
        } else {
            self.expanded.insert(id);
            true
        };
        sync_expansion(&mut self.nodes, &self.expanded);
        self.reflatten();
        now_expanded
    }

    fn reflatten(&mut self) {
        self.flat = flatten(&self.nodes);

        self.row_starts = Vec::with_capacity(self.flat.len());
        let mut row = 0;
        for node in &self.flat {
            self.row_starts.push(row);
            row += node_height(node);
        }
        self.total_rows = row;

        self.expanded_count = self.flat.iter().filter(|n| n.is_expanded).count();
    }

    pub fn is_expanded(&self, id: TaskId) -> bool {
        self.expanded.contains(&id)
    }

    pub fn flat(&self) -> &[FlatNode] {
        &self.flat
    }

    pub fn len(&self) -> usize {
        self.flat.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flat.is_empty()
    }

    /// Expanded nodes in the current flat sequence (not in the whole table)
    pub fn expanded_count(&self) -> usize {
        self.expanded_count
    }

    /// Rows occupied by the whole list
    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    /// First row of flat node `index`; past the end for out-of-range
    pub fn row_start(&self, index: usize) -> usize {
        self.row_starts.get(index).copied().unwrap_or(self.total_rows)
    }

    /// Rows occupied by flat node `index`
    pub fn row_height(&self, index: usize) -> usize {
        self.flat.get(index).map_or(0, node_height)
    }

    /// Which node and line a list row shows
    pub fn row_at(&self, row: usize) -> Option<NodeRow> {
        if row >= self.total_rows {
            return None;
        }
        // row_starts is sorted; find the last start <= row
        let node = self.row_starts.partition_point(|&start| start <= row) - 1;
        let line = row - self.row_starts[node];
        Some(if line == 0 {
            NodeRow::Header(node)
        } else {
            NodeRow::Detail {
                node,
                line: line - 1,
            }
        })
    }

    /// Unstyled text of list row `row`: a header line, or an indented
    /// detail line under an expanded node
    pub fn row_text(&self, store: &TaskStore, row: usize) -> Option<String> {
        let (index, detail) = match self.row_at(row)? {
            NodeRow::Header(index) => (index, None),
            NodeRow::Detail { node, line } => (node, Some(line)),
        };
        let node = self.flat.get(index)?;
        let task = store.at(node.task)?;
        let indent = "  ".repeat(node.depth);
        Some(match detail {
            None => format!("{}{}", indent, header_line(task, node.is_expanded)),
            Some(line) => {
                let text = detail_lines(task).into_iter().nth(line)?;
                format!("{}{}{}", indent, DETAIL_INDENT, text)
            }
        })
    }

    /// Plain-text node list: one line per row, so an expanded node is
    /// followed by its indented detail block.
    pub fn render(&self, store: &TaskStore) -> String {
        (0..self.total_rows)
            .filter_map(|row| self.row_text(store, row))
            .map(|line| line + "\n")
            .collect()
    }
}

/// Indentation of detail lines under their header
const DETAIL_INDENT: &str = "    ";

fn node_height(node: &FlatNode) -> usize {
    if node.is_expanded { 1 + DETAIL_ROWS } else { 1 }
}

fn sync_expansion(nodes: &mut [Node], expanded: &HashSet<TaskId>) {
    for node in nodes {
        node.is_expanded = expanded.contains(&node.id);
        sync_expansion(&mut node.children, expanded);
    }
}

fn indicator(is_expanded: bool) -> &'static str {
    if is_expanded { "\u{25BC}" } else { "\u{25B6}" }
}

/// The pieces around a header's description: the `▶ [3] ` prefix and the
/// `[CHANGED]` badge
pub fn header_parts(task: &Task, is_expanded: bool) -> (String, String) {
    (
        format!("{} [{}] ", indicator(is_expanded), task.id),
        format!("[{}]", task.status.as_str().to_uppercase()),
    )
}

/// `▶ [3] Install nginx - [CHANGED]`
pub fn header_line(task: &Task, is_expanded: bool) -> String {
    let (prefix, badge) = header_parts(task, is_expanded);
    format!("{}{} - {}", prefix, task.description, badge)
}

/// The detail block shown under an expanded node
fn detail_lines(task: &Task) -> [String; DETAIL_ROWS] {
    [
        format!("Host: {}", task.host),
        format!("Path: {}", task.path),
        format!("Start Time: {}", task.start_time_display()),
        format!("Status: {}", task.status),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::TaskStatus;
    use crate::parse::parse_log;
    use insta::assert_snapshot;

    fn store() -> TaskStore {
        TaskStore::new(parse_log(
            "\
TASK [Install pkg] ****
ok: [hostA]
TASK [Copy file] ****
task path: /srv/site.yml:12
changed: [hostB]
TASK [Restart] ****
fatal: [hostC]: FAILED!
",
        ))
    }

    fn all(store: &TaskStore) -> Vec<usize> {
        (0..store.len()).collect()
    }

    #[test]
    fn flatten_is_preorder_with_depth() {
        let nodes = vec![
            Node {
                task: 0,
                id: 1,
                is_expanded: false,
                children: vec![Node {
                    task: 1,
                    id: 2,
                    is_expanded: true,
                    children: Vec::new(),
                }],
            },
            Node {
                task: 2,
                id: 3,
                is_expanded: false,
                children: Vec::new(),
            },
        ];
        let flat = flatten(&nodes);
        let shape: Vec<(TaskId, usize)> = flat.iter().map(|n| (n.id, n.depth)).collect();
        assert_eq!(shape, vec![(1, 0), (2, 1), (3, 0)]);
    }

    #[test]
    fn rebuild_maps_matches_one_to_one() {
        let store = store();
        let mut tree = TreeModel::new();
        tree.rebuild(&store, &[0, 2]);
        let ids: Vec<TaskId> = tree.flat().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(tree.flat().iter().all(|n| n.depth == 0));
        assert_eq!(tree.total_rows(), 2);
        assert_eq!(tree.expanded_count(), 0);
    }

    #[test]
    fn toggle_changes_height_not_membership() {
        let store = store();
        let mut tree = TreeModel::new();
        tree.rebuild(&store, &all(&store));

        assert!(tree.toggle(2));
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.expanded_count(), 1);
        assert_eq!(tree.total_rows(), 3 + DETAIL_ROWS);
        assert_eq!(tree.row_start(0), 0);
        assert_eq!(tree.row_start(1), 1);
        assert_eq!(tree.row_start(2), 2 + DETAIL_ROWS);
        assert_eq!(tree.row_height(1), 1 + DETAIL_ROWS);

        assert!(!tree.toggle(2));
        assert_eq!(tree.expanded_count(), 0);
        assert_eq!(tree.total_rows(), 3);
    }

    #[test]
    fn expansion_survives_rebuilds() {
        let store = store();
        let mut tree = TreeModel::new();
        tree.rebuild(&store, &all(&store));
        tree.toggle(3);

        tree.rebuild(&store, &[0]);
        assert_eq!(tree.expanded_count(), 0);
        assert!(tree.is_expanded(3));

        tree.rebuild(&store, &all(&store));
        assert_eq!(tree.expanded_count(), 1);
        assert!(tree.flat()[2].is_expanded);
    }

    #[test]
    fn row_lookup() {
        let store = store();
        let mut tree = TreeModel::new();
        tree.rebuild(&store, &all(&store));
        tree.toggle(1);

        assert_eq!(tree.row_at(0), Some(NodeRow::Header(0)));
        assert_eq!(tree.row_at(1), Some(NodeRow::Detail { node: 0, line: 0 }));
        assert_eq!(tree.row_at(4), Some(NodeRow::Detail { node: 0, line: 3 }));
        assert_eq!(tree.row_at(5), Some(NodeRow::Header(1)));
        assert_eq!(tree.row_at(6), Some(NodeRow::Header(2)));
        assert_eq!(tree.row_at(7), None);
    }

    #[test]
    fn empty_tree() {
        let store = store();
        let mut tree = TreeModel::new();
        tree.rebuild(&store, &[]);
        assert!(tree.is_empty());
        assert_eq!(tree.total_rows(), 0);
        assert_eq!(tree.row_at(0), None);
        assert_eq!(tree.row_height(0), 0);
        assert_eq!(tree.render(&store), "");
    }

    #[test]
    fn header_uses_uppercase_status() {
        let store = store();
        let task = store.get(3).unwrap();
        assert_eq!(task.status, TaskStatus::Fatal);
        assert_eq!(header_line(task, false), "\u{25B6} [3] Restart - [FATAL]");
    }

    #[test]
    fn row_text_follows_row_geometry() {
        let store = store();
        let mut tree = TreeModel::new();
        tree.rebuild(&store, &all(&store));
        tree.toggle(1);

        assert_eq!(
            tree.row_text(&store, 0).as_deref(),
            Some("\u{25BC} [1] Install pkg - [OK]")
        );
        assert_eq!(tree.row_text(&store, 1).as_deref(), Some("    Host: hostA"));
        assert_eq!(
            tree.row_text(&store, 4).as_deref(),
            Some("    Status: ok")
        );
        assert_eq!(
            tree.row_text(&store, 5).as_deref(),
            Some("\u{25B6} [2] Copy file - [CHANGED]")
        );
        assert_eq!(tree.row_text(&store, 7), None);
    }

    #[test]
    fn render_plain_node_list() {
        let store = store();
        let mut tree = TreeModel::new();
        tree.rebuild(&store, &all(&store));
        tree.toggle(2);
        assert_snapshot!(tree.render(&store), @r"
        ▶ [1] Install pkg - [OK]
        ▼ [2] Copy file - [CHANGED]
            Host: hostB
            Path: /srv/site.yml:12
            Start Time: unknown
            Status: changed
        ▶ [3] Restart - [FATAL]
        ");
    }
}
