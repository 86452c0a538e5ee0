/// Rows above the list: title line + separator
pub const HEADER_ROWS: u16 = 2;
/// Rows below the detail panel: status/help line
pub const STATUS_ROWS: u16 = 1;

const DETAIL_MIN: u16 = 15;
const PANEL_FLOOR: u16 = 3;

/// Vertical split of the terminal between the node list and the detail panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelLayout {
    pub width: u16,
    pub height: u16,
    /// Rows given to the node list; also the navigation viewport height
    pub list_height: u16,
    /// Rows given to the bordered detail panel
    pub detail_height: u16,
}

impl PanelLayout {
    pub fn compute(width: u16, height: u16) -> Self {
        let base = height.saturating_sub(HEADER_ROWS + STATUS_ROWS);

        let mut detail = DETAIL_MIN.max(base / 3);
        let mut list = base.saturating_sub(detail);
        if list < PANEL_FLOOR {
            list = PANEL_FLOOR;
            detail = base.saturating_sub(PANEL_FLOOR);
            if detail < PANEL_FLOOR {
                detail = PANEL_FLOOR;
                list = base.saturating_sub(PANEL_FLOOR);
            }
        }

        PanelLayout {
            width,
            height,
            list_height: list,
            detail_height: detail,
        }
    }

    /// Text columns inside the detail panel's border and padding
    pub fn detail_inner_width(&self) -> usize {
        self.width.saturating_sub(4) as usize
    }

    /// Text rows inside the detail panel's border
    pub fn detail_inner_height(&self) -> usize {
        self.detail_height.saturating_sub(2) as usize
    }
}

impl Default for PanelLayout {
    fn default() -> Self {
        PanelLayout::compute(80, 24)
    }
}
