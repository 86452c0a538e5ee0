use std::borrow::Cow;

use crate::model::task::{DATE_FORMAT, DATE_TIME_FORMAT, TIME_FORMAT, Task, TaskStore};

/// How a filter term is compared against task fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Case-insensitive substring
    #[default]
    Substring,
    /// Case-insensitive subsequence: every term character in order
    Fuzzy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterOptions {
    pub mode: FilterMode,
    /// Also search the diff and raw text
    pub full_content: bool,
}

/// True when every character of `pattern` appears in `text` in order,
/// ignoring case. An empty pattern matches everything.
pub fn fuzzy_match(pattern: &str, text: &str) -> bool {
    let mut haystack = text.chars().flat_map(char::to_lowercase);
    pattern
        .chars()
        .flat_map(char::to_lowercase)
        .all(|p| haystack.any(|c| c == p))
}

/// The searchable renderings of a task, in a fixed order
fn searchable_fields(task: &Task, full_content: bool) -> Vec<Cow<'_, str>> {
    let mut fields = vec![
        Cow::Borrowed(task.description.as_str()),
        Cow::Borrowed(task.status.as_str()),
        Cow::Borrowed(task.host.as_str()),
        Cow::Borrowed(task.path.as_str()),
    ];
    if let Some(t) = task.start_time {
        fields.push(Cow::Owned(t.format(DATE_TIME_FORMAT).to_string()));
        fields.push(Cow::Owned(t.format(DATE_FORMAT).to_string()));
        fields.push(Cow::Owned(t.format(TIME_FORMAT).to_string()));
    }
    if full_content {
        fields.push(Cow::Borrowed(task.diff.as_str()));
        fields.push(Cow::Borrowed(task.raw_text.as_str()));
    }
    fields
}

/// A prepared, non-blank filter term
struct Matcher {
    needle: String,
    options: FilterOptions,
}

impl Matcher {
    /// `None` for a blank term, which matches every task
    fn new(term: &str, options: FilterOptions) -> Option<Self> {
        let term = term.trim();
        if term.is_empty() {
            return None;
        }
        let needle = match options.mode {
            FilterMode::Substring => term.to_lowercase(),
            FilterMode::Fuzzy => term.to_string(),
        };
        Some(Matcher { needle, options })
    }

    fn matches(&self, task: &Task) -> bool {
        searchable_fields(task, self.options.full_content)
            .iter()
            .any(|field| match self.options.mode {
                FilterMode::Substring => field.to_lowercase().contains(&self.needle),
                FilterMode::Fuzzy => fuzzy_match(&self.needle, field),
            })
    }
}

/// Keep the tasks for which any field matches `term`, in input order.
/// Accepts its own output, so re-filtering is a no-op.
pub fn filter_tasks<'a, I>(tasks: I, term: &str, options: FilterOptions) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    match Matcher::new(term, options) {
        None => tasks.into_iter().collect(),
        Some(m) => tasks.into_iter().filter(|t| m.matches(t)).collect(),
    }
}

/// Store indices of the tasks matching `term`, ascending
pub fn filter_indices(store: &TaskStore, term: &str, options: FilterOptions) -> Vec<usize> {
    match Matcher::new(term, options) {
        None => (0..store.len()).collect(),
        Some(m) => store
            .iter()
            .enumerate()
            .filter(|(_, t)| m.matches(t))
            .map(|(i, _)| i)
            .collect(),
    }
}

/// Current search term and the subsequence of the store it selects
#[derive(Debug, Clone)]
pub struct FilterState {
    term: String,
    options: FilterOptions,
    matches: Vec<usize>,
}

impl FilterState {
    /// Unfiltered state over `store`
    pub fn new(store: &TaskStore, options: FilterOptions) -> Self {
        FilterState {
            term: String::new(),
            options,
            matches: (0..store.len()).collect(),
        }
    }

    /// Recompute the matches for a new term. The store is never modified.
    pub fn apply(&mut self, store: &TaskStore, term: &str) {
        self.term = term.to_string();
        self.matches = filter_indices(store, term, self.options);
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    /// Store indices of matching tasks, in store order
    pub fn matches(&self) -> &[usize] {
        &self.matches
    }

    /// A non-blank term is in effect
    pub fn is_active(&self) -> bool {
        !self.term.trim().is_empty()
    }
}
