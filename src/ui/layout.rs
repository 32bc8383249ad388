//! Layout helpers: split the terminal into regions and map document rows
//! to screen rows.
//!
//! The renderer and the mouse handler both go through these functions so a
//! click always lands on what was drawn.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::app::page::{SectionSpan, CONTACT_BUTTON_ROW, CONTACT_FIELD_ROW, FILTERS, WORK_HEADER_ROWS};

pub const NAVBAR_HEIGHT: u16 = 3;
const MENU_BUTTON_LABEL: &str = " ☰ Menu ";

/// Primary screen layout: page viewport plus a bottom status bar.
pub struct AppLayout {
    /// Scrolling page viewport.  The navbar floats over its top rows.
    pub content_area: Rect,
    pub status_area: Rect,
    /// Navbar after its transform (may be partly or fully off-screen).
    pub navbar_area: Option<Rect>,
    pub menu_button: Option<Rect>,
}

impl AppLayout {
    /// Compute the layout for the full terminal `area`, with the navbar
    /// shifted by `navbar_shift` rows.
    pub fn from_area(area: Rect, navbar_shift: i32) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),    // page viewport
                Constraint::Length(1), // status bar
            ])
            .split(area);
        let content_area = chunks[0];

        let navbar_area = shift_rect(
            Rect::new(content_area.x, content_area.y, content_area.width, NAVBAR_HEIGHT),
            navbar_shift,
            content_area,
        );
        let menu_button = navbar_area.and_then(|nav| {
            if nav.height < NAVBAR_HEIGHT {
                return None;
            }
            let w = MENU_BUTTON_LABEL.chars().count() as u16;
            (nav.width > w + 2).then(|| Rect::new(nav.right() - w - 2, nav.y + 1, w, 1))
        });

        Self {
            content_area,
            status_area: chunks[1],
            navbar_area,
            menu_button,
        }
    }

    pub fn menu_button_label() -> &'static str {
        MENU_BUTTON_LABEL
    }

    /// Screen rows available for page content.
    pub fn viewport_rows(&self) -> u16 {
        self.content_area.height
    }
}

/// Move `rect` down by `shift` rows and clip it to `bounds`.
pub fn shift_rect(rect: Rect, shift: i32, bounds: Rect) -> Option<Rect> {
    let top = i32::from(rect.y) + shift;
    let bottom = top + i32::from(rect.height);
    let clip_top = top.max(i32::from(bounds.y));
    let clip_bottom = bottom.min(i32::from(bounds.bottom()));
    if clip_bottom <= clip_top {
        return None;
    }
    Some(Rect::new(
        rect.x,
        clip_top as u16,
        rect.width,
        (clip_bottom - clip_top) as u16,
    ))
}

/// Unclipped screen top of a document row, relative to `content`.
pub fn screen_top(content: Rect, doc_row: u16, scroll: u16) -> i32 {
    i32::from(content.y) + i32::from(doc_row) - i32::from(scroll)
}

/// Where a section currently sits on screen, clipped to the viewport.
pub fn section_rect(content: Rect, span: &SectionSpan, scroll: u16) -> Option<Rect> {
    let top = screen_top(content, span.top, scroll);
    shift_rect(
        Rect::new(content.x, content.y, content.width, span.height),
        top - i32::from(content.y),
        content,
    )
}

/// Screen row of document row `doc_row`, if it is inside the viewport.
fn screen_row(content: Rect, doc_row: u16, scroll: u16) -> Option<u16> {
    let y = screen_top(content, doc_row, scroll);
    (y >= i32::from(content.y) && y < i32::from(content.bottom())).then_some(y as u16)
}

/// Row of the filter tab strip inside the work section.
pub const FILTER_ROW: u16 = 2;
/// Width of the contact form's submit button.
pub const SUBMIT_BUTTON_WIDTH: u16 = 20;

/// Hit boxes for the filter tabs, paired with their index in [`FILTERS`].
pub fn filter_tab_rects(content: Rect, work: &SectionSpan, scroll: u16) -> Vec<(usize, Rect)> {
    let Some(y) = screen_row(content, work.top + FILTER_ROW, scroll) else {
        return Vec::new();
    };
    let mut x = content.x + 2;
    let mut tabs = Vec::new();
    for (i, name) in FILTERS.iter().enumerate() {
        let w = name.chars().count() as u16 + 2;
        if x + w > content.right() {
            break;
        }
        tabs.push((i, Rect::new(x, y, w, 1)));
        x += w + 1;
    }
    tabs
}

/// On-screen rows of the first `count` portfolio cards, paired with their
/// position in the visible list.
pub fn card_rects(content: Rect, work: &SectionSpan, scroll: u16, count: usize) -> Vec<(usize, Rect)> {
    (0..count)
        .filter_map(|i| {
            let y = screen_row(content, work.top + WORK_HEADER_ROWS + i as u16, scroll)?;
            Some((i, Rect::new(content.x + 2, y, content.width.saturating_sub(4), 1)))
        })
        .collect()
}

/// Message field of the contact form, if on screen.
pub fn contact_field_rect(content: Rect, contact: &SectionSpan, scroll: u16) -> Option<Rect> {
    let y = screen_row(content, contact.top + CONTACT_FIELD_ROW, scroll)?;
    Some(Rect::new(content.x + 2, y, content.width.saturating_sub(4), 1))
}

/// Submit button of the contact form, if on screen.
pub fn contact_button_rect(content: Rect, contact: &SectionSpan, scroll: u16) -> Option<Rect> {
    let y = screen_row(content, contact.top + CONTACT_BUTTON_ROW, scroll)?;
    Some(Rect::new(
        content.x + 2,
        y,
        SUBMIT_BUTTON_WIDTH.min(content.width.saturating_sub(2)),
        1,
    ))
}

/// Centered overlay panel of fixed size.
pub fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

/// Menu overlay panel and one hit box per link.
pub fn menu_geometry(area: Rect, items: usize) -> (Rect, Vec<Rect>) {
    let panel = centered_fixed(36, items as u16 * 2 + 4, area);
    let links = (0..items as u16)
        .map(|i| Rect::new(panel.x + 2, panel.y + 2 + i * 2, panel.width.saturating_sub(4), 1))
        .filter(|r| r.bottom() < panel.bottom())
        .collect();
    (panel, links)
}

pub fn point_in_rect(rect: Rect, x: u16, y: u16) -> bool {
    x >= rect.x && x < rect.right() && y >= rect.y && y < rect.bottom()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::page::SectionId;

    #[test]
    fn hidden_navbar_has_no_button() {
        let area = Rect::new(0, 0, 80, 24);
        let shown = AppLayout::from_area(area, 0);
        assert_eq!(shown.navbar_area, Some(Rect::new(0, 0, 80, 3)));
        assert!(shown.menu_button.is_some());
        assert_eq!(shown.viewport_rows(), 23);

        let hidden = AppLayout::from_area(area, -3);
        assert_eq!(hidden.navbar_area, None);
        assert_eq!(hidden.menu_button, None);
    }

    #[test]
    fn sections_clip_to_viewport() {
        let content = Rect::new(0, 0, 80, 20);
        let span = SectionSpan { id: SectionId::Stats, top: 30, height: 9 };
        assert_eq!(section_rect(content, &span, 0), None);
        assert_eq!(section_rect(content, &span, 15), Some(Rect::new(0, 15, 80, 5)));
        assert_eq!(section_rect(content, &span, 35), Some(Rect::new(0, 0, 80, 4)));
        assert_eq!(screen_top(content, span.top, 35), -5);
    }

    #[test]
    fn filter_tabs_follow_scroll() {
        let content = Rect::new(0, 0, 80, 20);
        let work = SectionSpan { id: SectionId::Work, top: 10, height: 12 };
        let tabs = filter_tab_rects(content, &work, 0);
        assert_eq!(tabs.len(), FILTERS.len());
        assert!(tabs.iter().all(|(_, r)| r.y == 12));
        assert!(filter_tab_rects(content, &work, 13).is_empty());
    }

    #[test]
    fn card_and_contact_boxes_clip_to_viewport() {
        let content = Rect::new(0, 0, 80, 20);
        let work = SectionSpan { id: SectionId::Work, top: 10, height: 13 };
        let cards = card_rects(content, &work, 0, 8);
        assert_eq!(cards.len(), 6);
        assert_eq!(cards[0], (0, Rect::new(2, 14, 76, 1)));

        let contact = SectionSpan { id: SectionId::Contact, top: 30, height: 14 };
        assert_eq!(contact_field_rect(content, &contact, 0), None);
        assert_eq!(contact_field_rect(content, &contact, 20), Some(Rect::new(2, 16, 76, 1)));
        assert_eq!(contact_button_rect(content, &contact, 20), Some(Rect::new(2, 18, 20, 1)));
        assert_eq!(contact_button_rect(content, &contact, 17), None);
    }

    #[test]
    fn menu_links_inside_panel() {
        let (panel, links) = menu_geometry(Rect::new(0, 0, 80, 24), 5);
        assert_eq!(links.len(), 5);
        assert!(links.iter().all(|r| r.y > panel.y && r.bottom() < panel.bottom()));
    }
}
