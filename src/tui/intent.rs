/// What the user asked for, independent of which key produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    MoveUp,
    MoveDown,
    GoTop,
    GoBottom,
    ToggleExpand,
    EnterFilterMode,
    /// The complete new filter term, applied live
    UpdateFilterTerm(String),
    CommitFilter,
    /// Leave filter mode and clear the term; in navigate mode clears an
    /// active filter
    CancelFilter,
    ScrollDetailUp,
    ScrollDetailDown,
    /// Scroll the detail panel by its height
    PageDetailUp,
    PageDetailDown,
    Resize(u16, u16),
    Quit,
}
