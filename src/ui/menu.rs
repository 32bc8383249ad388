//! Navigation menu overlay.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders, Clear, Widget},
};

use super::layout::menu_geometry;
use super::theme::Theme;
use crate::app::page::SectionId;

/// Full-screen menu with one link per section.
pub struct MenuOverlay {
    pub selected: usize,
}

impl Widget for MenuOverlay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (panel, links) = menu_geometry(area, SectionId::ALL.len());
        Clear.render(panel, buf);

        let block = Block::default()
            .title(" Menu ")
            .title_style(
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border_style());
        block.render(panel, buf);

        for (i, (id, rect)) in SectionId::ALL.iter().zip(&links).enumerate() {
            let (prefix, style) = if i == self.selected {
                (" ▸ ", Theme::selected_style())
            } else {
                ("   ", Style::default().fg(Color::White))
            };
            let label = format!("{prefix}{}", id.label().to_uppercase());
            let padded = format!("{label:<width$}", width = rect.width as usize);
            buf.set_span(rect.x, rect.y, &Span::styled(padded, style), rect.width);
        }

        let hint = " Enter: go  Esc: close ";
        let hint_w = hint.chars().count() as u16;
        if panel.width > hint_w + 2 && panel.height > 1 {
            buf.set_string(
                panel.x + (panel.width - hint_w) / 2,
                panel.bottom() - 1,
                hint,
                Style::default().fg(Color::DarkGray),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlights_selected_link() {
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        MenuOverlay { selected: 2 }.render(area, &mut buf);

        let (_, links) = menu_geometry(area, SectionId::ALL.len());
        let selected = links[2];
        let cell = buf.cell((selected.x + 1, selected.y)).unwrap();
        assert_eq!(cell.symbol(), "▸");
        assert_eq!(cell.style().bg, Theme::selected_style().bg);

        let other = links[0];
        assert_eq!(buf.cell((other.x + 1, other.y)).unwrap().symbol(), " ");
    }
}
