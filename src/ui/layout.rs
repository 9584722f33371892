use ratatui::layout::{Constraint, Direction, Layout, Margin, Rect};

pub struct ThreeBox {
    pub top: Rect,
    pub middle: Rect,
    pub bottom: Rect,
    pub top_inner: Rect,
    pub middle_inner: Rect,
}

const PAGE_MARGIN: u16 = 1;
const INNER_MARGIN: u16 = 2;
const FOOTER_HEIGHT: u16 = 3;

/// Header box sized to its content (capped so the middle keeps `middle_min` rows),
/// a middle box taking the rest, and the help bar at the bottom.
pub fn three_box_layout(size: Rect, top_needed: u16, middle_min: u16) -> ThreeBox {
    let available = size.height.saturating_sub(2 * PAGE_MARGIN).saturating_sub(FOOTER_HEIGHT);

    let top_min = 3;
    let top_cap = available.saturating_sub(middle_min);
    let top_height = top_needed.min(top_cap.max(top_min));
    let middle_height = available.saturating_sub(top_height);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(PAGE_MARGIN)
        .constraints([
            Constraint::Length(top_height),
            Constraint::Length(middle_height),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(size);

    let inner = |r: Rect| r.inner(&Margin { horizontal: INNER_MARGIN, vertical: 1 });

    ThreeBox {
        top: chunks[0],
        middle: chunks[1],
        bottom: chunks[2],
        top_inner: inner(chunks[0]),
        middle_inner: inner(chunks[1]),
    }
}

/// Split off a 3-row banner at the top of `area`.
pub fn banner_split(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);
    (chunks[0], chunks[1])
}

pub fn centered_rect_abs(width: u16, height: u16, r: Rect) -> Rect {
    let w = width.min(r.width.saturating_sub(2));
    let h = height.min(r.height.saturating_sub(2));
    let x = r.x + (r.width.saturating_sub(w)) / 2;
    let y = r.y + (r.height.saturating_sub(h)) / 2;
    Rect { x, y, width: w, height: h }
}
