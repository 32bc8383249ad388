//! Curtain drawn over the page while a menu link's transition plays.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Block, Clear, Widget},
};

use super::theme::Theme;
use crate::app::transition::PageTransition;

pub struct Curtain {
    pub transition: PageTransition,
}

impl Widget for Curtain {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = (self.transition.progress() * f64::from(area.height)).ceil() as u16;
        let covered = Rect::new(area.x, area.y, area.width, rows.min(area.height));
        if covered.height == 0 {
            return;
        }
        Clear.render(covered, buf);
        Block::default().style(Theme::curtain_style()).render(covered, buf);

        let label = format!("→ {}", self.transition.target().label().to_uppercase());
        let w = label.chars().count() as u16;
        if covered.width > w {
            buf.set_string(
                covered.x + (covered.width - w) / 2,
                covered.bottom() - 1,
                label,
                Theme::curtain_style(),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::page::SectionId;
    use std::time::Duration;

    #[test]
    fn covers_rows_in_proportion_to_progress() {
        let area = Rect::new(0, 0, 40, 10);
        let mut transition = PageTransition::new(SectionId::Work);
        transition.update(Duration::from_millis(300));

        let mut buf = Buffer::empty(area);
        Curtain { transition }.render(area, &mut buf);
        let bg = Theme::curtain_style().bg;
        assert_eq!(buf.cell((0, 4)).unwrap().style().bg, bg);
        assert_ne!(buf.cell((0, 5)).unwrap().style().bg, bg);
        let row: String = (0..40).map(|x| buf.cell((x, 4)).unwrap().symbol().to_string()).collect();
        assert!(row.contains("→ WORK"), "{row}");
    }
}
