//! Renders the scrolling page: every section, the floating navbar and the
//! hero's parallax background and bulb, all read back from the stage.
//!
//! Sections are drawn into an off-screen buffer of their full height and
//! then copied into the viewport at their scrolled position, so partially
//! visible sections clip naturally.

use hero_motion::config::Action;
use hero_motion::core::effects::{BULB, HERO_IMAGE, MOUSE_ACTIVE};
use hero_motion::core::transform::Transform;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, LineGauge, Paragraph, Widget},
};

use super::bulb::BulbWidget;
use super::layout::{self, AppLayout, FILTER_ROW, SUBMIT_BUTTON_WIDTH};
use super::theme::Theme;
use crate::app::page::{
    self, SectionId, SectionSpan, CONTACT_BUTTON_ROW, CONTACT_FIELD_ROW, FILTERS, FOOTER_ROW,
    HERO_HEIGHT, ROW_PX, SERVICES, SKILLS, SKILL_FIRST_ROW, STATS, STAT_VALUE_ROW, WORK_HEADER_ROWS,
};
use crate::app::state::AppState;

const BRAND: &str = "MOXWELL MEDIA";
/// Words drawn heavier in the hero headline.
const EMPHASIS_WORDS: &[&str] = &["BROCHURES", "BOOKS", "PHARMA COLLATERALS"];
/// Words drawn underlined in the hero headline.
const UNDERLINE_WORDS: &[&str] = &["BRANDING", "EXHIBITION", "EXPERIENTIAL DESIGN", "PRINT ADS"];

pub struct PageView<'a> {
    pub state: &'a AppState,
    pub layout: &'a AppLayout,
}

impl Widget for PageView<'_> {
    fn render(self, _area: Rect, buf: &mut Buffer) {
        let content = self.layout.content_area;
        let scroll = self.state.scroll.row();

        for span in self.state.document() {
            let Some(reveal) = self.state.reveals.get(&span.id) else {
                continue;
            };
            if !reveal.is_triggered() || layout::section_rect(content, &span, scroll).is_none() {
                continue;
            }
            let mut section = Buffer::empty(Rect::new(0, 0, content.width, span.height));
            self.render_section(&span, &mut section);
            let top = layout::screen_top(content, span.top, scroll) + i32::from(reveal.row_shift());
            blit(&section, buf, content, top);
        }

        if let Some(nav) = self.layout.navbar_area {
            render_navbar(nav, self.layout.menu_button, buf);
        }
    }
}

impl PageView<'_> {
    fn render_section(&self, span: &SectionSpan, buf: &mut Buffer) {
        let area = buf.area;
        match span.id {
            SectionId::Hero => self.render_hero(area, buf),
            SectionId::Services => render_services(area, buf),
            SectionId::Work => self.render_work(area, buf),
            SectionId::Stats => self.render_stats(area, buf),
            SectionId::Contact => self.render_contact(area, buf),
        }
    }

    fn render_hero(&self, area: Rect, buf: &mut Buffer) {
        let stage = &self.state.stage;

        // Background pattern, pushed down by the parallax transform.
        let shift = stage
            .transform(HERO_IMAGE)
            .map_or(0, |t| t.row_offset(HERO_HEIGHT, ROW_PX));
        let style = Theme::hero_image_style();
        for row in 0..area.height {
            let pattern_row = i32::from(row) - shift;
            let text: String = (0..area.width)
                .map(|col| {
                    if (i32::from(col) + pattern_row * 2).rem_euclid(9) == 0 {
                        '·'
                    } else {
                        ' '
                    }
                })
                .collect();
            put(buf, area.x, area.y + row, text, style);
        }

        let text_area = Rect::new(area.x + 3, area.y + 4, area.width.saturating_sub(3) / 2, 9);
        let headline = vec![
            Line::from(Span::styled("WE DESIGN", Theme::heading_style())),
            Line::raw(""),
            headline_line(&["BRANDING", "BROCHURES", "BOOKS"]),
            headline_line(&["EXHIBITION", "EXPERIENTIAL DESIGN"]),
            headline_line(&["PRINT ADS"]),
            headline_line(&["PHARMA COLLATERALS"]),
            Line::raw(""),
            Line::from(Span::styled("scroll ↓  ·  hover the bulb", Theme::body_style())),
        ];
        Paragraph::new(headline).render(text_area, buf);

        let half = area.width / 2;
        let bulb_area = Rect::new(area.x + half, area.y + 1, area.width - half, area.height.saturating_sub(2));
        BulbWidget {
            pose: self.state.bulb.follower().pose(),
            active: stage.has_class(BULB, MOUSE_ACTIVE),
        }
        .render(bulb_area, buf);
    }

    fn render_stats(&self, area: Rect, buf: &mut Buffer) {
        heading(area, buf, "THE STUDIO");
        let col_w = area.width.saturating_sub(4) / STATS.len() as u16;
        for (i, (stat, counter)) in STATS.iter().zip(&self.state.counters).enumerate() {
            let x = area.x + 2 + col_w * i as u16;
            let cell = Rect::new(x, area.y + STAT_VALUE_ROW, col_w, 2);
            Paragraph::new(vec![
                Line::from(Span::styled(
                    counter.text(),
                    if counter.is_done() { Theme::accent_style() } else { Theme::heading_style() },
                )),
                Line::from(Span::styled(stat.label, Theme::body_style())),
            ])
            .render(cell, buf);
        }

        let bar_width = area.width.saturating_sub(10);
        for (i, (skill, bar)) in SKILLS.iter().zip(&self.state.skills).enumerate() {
            let y = area.y + SKILL_FIRST_ROW + i as u16;
            if y >= area.bottom() {
                break;
            }
            LineGauge::default()
                .ratio(bar.ratio())
                .label(format!("{:<20}", skill.label))
                .filled_style(Theme::gauge_filled_style())
                .unfilled_style(Theme::gauge_unfilled_style())
                .render(Rect::new(area.x + 2, y, bar_width, 1), buf);
            let percent = (bar.ratio() * 100.0).round() as u16;
            put(buf, area.x + 3 + bar_width, y, format!("{percent:>3}%"), Theme::body_style());
        }
    }

    fn render_work(&self, area: Rect, buf: &mut Buffer) {
        let filter_index = self.state.filter_index;
        heading(area, buf, "SELECTED WORK");
        let mut x = area.x + 2;
        for (i, name) in FILTERS.iter().enumerate() {
            let label = format!(" {name} ");
            let w = label.chars().count() as u16;
            if x + w > area.right() {
                break;
            }
            put(buf, x, area.y + FILTER_ROW, label, Theme::tab_style(i == filter_index));
            x += w + 1;
        }
        let effects = &self.state.cards;
        for (i, card) in page::visible_cards(FILTERS[filter_index]).enumerate() {
            let y = area.y + WORK_HEADER_ROWS + i as u16;
            // A pressed card shrinks in by one column.
            let (indent, marker, title_style) = if effects.is_pressed(i) {
                (1, "▪ ", Theme::card_pressed_style())
            } else if effects.is_hovered(i) {
                (0, "▲ ", Theme::card_hover_style())
            } else {
                (0, "■ ", Theme::heading_style())
            };
            put(buf, area.x + 2 + indent, y, marker, Theme::accent_style());
            put(buf, area.x + 4 + indent, y, card.title, title_style);
            put(buf, area.x + 30, y, card.category, Theme::body_style());
        }
    }

    fn render_contact(&self, area: Rect, buf: &mut Buffer) {
        let form = &self.state.contact;
        heading(area, buf, "LET'S TALK");
        put(buf, area.x + 2, area.y + 3, "hello@moxwell.media", Theme::accent_style());
        put(buf, area.x + 2, area.y + 4, "Instagram  ·  Behance  ·  LinkedIn", Theme::body_style());

        let field_width = area.width.saturating_sub(4) as usize;
        let field = if form.is_editing() {
            format!("› {}█", form.draft())
        } else if form.draft().is_empty() {
            format!("› Your message ({})", self.state.config.short_binding(Action::WriteMessage))
        } else {
            format!("› {}", form.draft())
        };
        // Keep the tail of a long draft in view.
        let skip = field.chars().count().saturating_sub(field_width);
        let field: String = field.chars().skip(skip).collect();
        put(
            buf,
            area.x + 2,
            area.y + CONTACT_FIELD_ROW,
            format!("{field:<field_width$}"),
            Theme::field_style(form.is_editing()),
        );

        let button = format!("{:^width$}", form.label(), width = SUBMIT_BUTTON_WIDTH as usize);
        put(buf, area.x + 2, area.y + CONTACT_BUTTON_ROW, button, Theme::button_style(form.phase()));

        let footer = Block::default()
            .borders(Borders::TOP)
            .border_style(Theme::border_style());
        let footer_area = Rect::new(area.x, area.y + FOOTER_ROW, area.width, 2);
        let inner = footer.inner(footer_area);
        footer.render(footer_area, buf);
        put(buf, inner.x + 2, inner.y, format!("© {BRAND}"), Theme::body_style());
    }
}

fn headline_line(words: &[&str]) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, word) in words.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" · ", Theme::body_style()));
        }
        let style = if UNDERLINE_WORDS.iter().any(|w| word.contains(w)) {
            Theme::emphasis_style()
        } else if EMPHASIS_WORDS.iter().any(|w| word.contains(w)) {
            Theme::heading_style()
        } else {
            Theme::body_style()
        };
        spans.push(Span::styled(word.to_string(), style));
    }
    Line::from(spans)
}

fn heading(area: Rect, buf: &mut Buffer, title: &str) {
    put(buf, area.x + 2, area.y + 1, title, Theme::heading_style());
}

fn render_services(area: Rect, buf: &mut Buffer) {
    heading(area, buf, "SERVICES");
    for (i, (name, blurb)) in SERVICES.iter().enumerate() {
        let y = area.y + 3 + i as u16 * 2;
        put(buf, area.x + 2, y, *name, Theme::accent_style());
        put(buf, area.x + 24, y, *blurb, Theme::body_style());
    }
}

fn render_navbar(nav: Rect, menu_button: Option<Rect>, buf: &mut Buffer) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Theme::border_style())
        .style(Theme::navbar_style());
    let inner = block.inner(nav);
    block.render(nav, buf);
    if inner.height == 0 {
        return;
    }
    put(buf, inner.x + 2, inner.y + inner.height.saturating_sub(1).min(1), BRAND, Theme::heading_style());
    if let Some(button) = menu_button {
        put(buf, button.x, button.y, AppLayout::menu_button_label(), Theme::selected_style());
    }
}

/// `set_string` that ignores positions outside the buffer.
fn put(buf: &mut Buffer, x: u16, y: u16, text: impl AsRef<str>, style: Style) {
    if x < buf.area.right() && y < buf.area.bottom() {
        buf.set_string(x, y, text, style);
    }
}

/// Copy `src` into `dst` with its first row at screen row `top`, clipped to
/// `clip`.
fn blit(src: &Buffer, dst: &mut Buffer, clip: Rect, top: i32) {
    for row in 0..src.area.height {
        let y = top + i32::from(row);
        if y < i32::from(clip.y) || y >= i32::from(clip.bottom()) {
            continue;
        }
        for col in 0..src.area.width.min(clip.width) {
            if let (Some(cell), Some(target)) =
                (src.cell((col, row)), dst.cell_mut((clip.x + col, y as u16)))
            {
                *target = cell.clone();
            }
        }
    }
}

/// Bulb transform as shown in the status bar.
pub fn bulb_transform_label(state: &AppState) -> String {
    state
        .stage
        .transform(BULB)
        .unwrap_or(Transform::Identity)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hero_motion::config::AppConfig;
    use std::time::Duration;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .filter_map(|x| buf.cell((x, y)).map(|c| c.symbol().to_string()))
            .collect()
    }

    fn rendered(state: &AppState) -> Buffer {
        let layout = state.layout();
        let mut buf = Buffer::empty(state.terminal_area);
        PageView {
            state,
            layout: &layout,
        }
        .render(state.terminal_area, &mut buf);
        buf
    }

    #[test]
    fn navbar_draws_until_hidden() {
        let mut state = AppState::new(AppConfig::default(), Rect::new(0, 0, 80, 24)).unwrap();
        state.advance(Duration::from_secs(1));
        state.run_frame();
        assert!(row_text(&rendered(&state), 1).contains(BRAND));

        state.scroll_by(12.0);
        state.advance(Duration::from_secs(1));
        state.run_frame();
        assert!(!row_text(&rendered(&state), 1).contains(BRAND));
    }

    #[test]
    fn sections_appear_at_scrolled_rows() {
        let mut state = AppState::new(AppConfig::default(), Rect::new(0, 0, 80, 24)).unwrap();
        let services = state.document()[1];
        state.scroll_by(f64::from(services.top));
        state.advance(Duration::from_secs(1));
        state.run_frame();

        let buf = rendered(&state);
        assert!(row_text(&buf, 1).contains("SERVICES"));
    }

    fn scrolled_to_bottom() -> AppState {
        let mut state = AppState::new(AppConfig::default(), Rect::new(0, 0, 80, 24)).unwrap();
        state.scroll_by(1000.0);
        state
    }

    fn screen_row_of(state: &AppState, id: SectionId, row: u16) -> u16 {
        let span = state.document().into_iter().find(|s| s.id == id).unwrap();
        layout::screen_top(state.layout().content_area, span.top + row, state.scroll.row()) as u16
    }

    #[test]
    fn contact_button_shows_submission_phase() {
        let mut state = scrolled_to_bottom();
        state.advance(Duration::from_secs(1));
        let y = screen_row_of(&state, SectionId::Contact, CONTACT_BUTTON_ROW);
        assert!(row_text(&rendered(&state), y).contains("Send Message"));

        state.submit_contact();
        assert!(row_text(&rendered(&state), y).contains("Sending..."));
        state.advance(Duration::from_millis(1500));
        assert!(row_text(&rendered(&state), y).contains("Message Sent! ✓"));
    }

    #[test]
    fn skill_bars_fill_when_on_screen() {
        let mut state = scrolled_to_bottom();
        let y = screen_row_of(&state, SectionId::Stats, SKILL_FIRST_ROW);
        state.advance(Duration::from_secs(1));
        state.advance(Duration::from_secs(1));
        let text = row_text(&rendered(&state), y);
        assert!(text.contains("Brand Identity"), "{text}");
        assert!(text.contains("95%"), "{text}");
    }

    #[test]
    fn pressed_card_is_inset() {
        let mut state = AppState::new(AppConfig::default(), Rect::new(0, 0, 80, 24)).unwrap();
        let work = state.document()[2];
        state.scroll_by(f64::from(work.top));
        state.advance(Duration::from_secs(1));
        state.cards.press(0);
        let y = screen_row_of(&state, SectionId::Work, WORK_HEADER_ROWS);
        let buf = rendered(&state);
        assert_eq!(buf.cell((3, y)).unwrap().symbol(), "▪");
        assert_eq!(buf.cell((5, y)).unwrap().style().fg, Theme::card_pressed_style().fg);
    }

    #[test]
    fn headline_styles_keywords() {
        let line = headline_line(&["BRANDING", "BOOKS"]);
        assert_eq!(line.spans[0].style, Theme::emphasis_style());
        assert_eq!(line.spans[2].style, Theme::heading_style());
    }

    #[test]
    fn blit_clips_rows_outside_viewport() {
        let mut src = Buffer::empty(Rect::new(0, 0, 4, 3));
        src.set_string(0, 0, "aaaa", Theme::body_style());
        src.set_string(0, 2, "cccc", Theme::body_style());
        let mut dst = Buffer::empty(Rect::new(0, 0, 4, 2));
        blit(&src, &mut dst, Rect::new(0, 0, 4, 2), -1);
        assert_eq!(row_text(&dst, 0), "    ");
        assert_eq!(row_text(&dst, 1), "cccc");
    }
}
