//! Input handling: maps key/mouse events to state mutations.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use hero_motion::config::Action;

use super::page::SectionId;
use super::state::AppState;
use crate::ui::layout::{filter_tab_rects, menu_geometry, point_in_rect};

/// Rows moved per mouse wheel notch.
const WHEEL_ROWS: f64 = 3.0;

/// Process a key event, dispatching on whether the menu is open.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    // Ctrl+c always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    if state.menu.open {
        handle_menu_key(state, key);
    } else if state.contact.is_editing() {
        handle_compose_key(state, key);
    } else {
        handle_page_key(state, key);
    }
}

/// Keys while the contact form's message field has focus.
fn handle_compose_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => state.contact.set_editing(false),
        KeyCode::Enter => state.submit_contact(),
        KeyCode::Backspace => state.contact.backspace(),
        KeyCode::Char(c) => state.contact.push_char(c),
        _ => {}
    }
}

fn handle_menu_key(state: &mut AppState, key: KeyEvent) {
    let links = SectionId::ALL.len();
    match key.code {
        KeyCode::Esc => state.close_menu(),
        KeyCode::Up | KeyCode::Char('k') => {
            state.menu.selected = state.menu.selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.menu.selected + 1 < links {
                state.menu.selected += 1;
            }
        }
        KeyCode::Enter => state.activate_menu_link(state.menu.selected),
        _ => match state.config.match_key(key) {
            Some(Action::ToggleMenu) => state.close_menu(),
            Some(Action::Quit) => state.should_quit = true,
            _ => {}
        },
    }
}

fn handle_page_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Home => {
            state.scroll_to_section(SectionId::Hero);
            return;
        }
        KeyCode::End => {
            state.scroll_to_section(SectionId::Contact);
            return;
        }
        KeyCode::Char(c @ '1'..='5') => {
            let index = c as usize - '1' as usize;
            if let Some(&id) = SectionId::ALL.get(index) {
                state.scroll_to_section(id);
            }
            return;
        }
        _ => {}
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };
    let page_rows = f64::from(state.layout().viewport_rows().saturating_sub(2).max(1));

    match action {
        Action::Quit => state.should_quit = true,
        Action::ScrollUp => state.scroll_by(-1.0),
        Action::ScrollDown => state.scroll_by(1.0),
        Action::PageUp => state.scroll_by(-page_rows),
        Action::PageDown => state.scroll_by(page_rows),
        Action::NextSection => {
            let next = (state.current_section() + 1).min(SectionId::ALL.len() - 1);
            state.scroll_to_section(SectionId::ALL[next]);
        }
        Action::PrevSection => {
            let doc = state.document();
            let row = state.scroll.row();
            let current = state.current_section();
            // Mid-section goes back to the section's own top first.
            let prev = if doc[current].top < row {
                current
            } else {
                current.saturating_sub(1)
            };
            state.scroll_to_section(SectionId::ALL[prev]);
        }
        Action::ToggleMenu => state.toggle_menu(),
        Action::NextFilter => state.cycle_filter(true),
        Action::PrevFilter => state.cycle_filter(false),
        Action::WriteMessage => state.compose_message(),
    }
}

/// Process a mouse event.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    let (x, y) = (mouse.column, mouse.row);

    if state.menu.open {
        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
            let (panel, links) = menu_geometry(state.terminal_area, SectionId::ALL.len());
            if let Some(i) = links.iter().position(|r| point_in_rect(*r, x, y)) {
                state.activate_menu_link(i);
            } else if !point_in_rect(panel, x, y) {
                state.close_menu();
            }
        }
        return;
    }

    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
            state.bulb.pointer_at(f64::from(x), f64::from(y));
            let card = state.card_at(x, y);
            state.cards.hover(card);
        }
        MouseEventKind::ScrollDown => state.scroll_by(WHEEL_ROWS),
        MouseEventKind::ScrollUp => state.scroll_by(-WHEEL_ROWS),
        MouseEventKind::Down(MouseButton::Left) => {
            let layout = state.layout();
            if layout.menu_button.is_some_and(|r| point_in_rect(r, x, y)) {
                state.toggle_menu();
                return;
            }
            let doc = state.document();
            let Some(work) = doc.iter().find(|s| s.id == SectionId::Work) else {
                return;
            };
            let tabs = filter_tab_rects(layout.content_area, work, state.scroll.row());
            if let Some((i, _)) = tabs.iter().find(|(_, r)| point_in_rect(*r, x, y)) {
                state.set_filter(*i);
                return;
            }
            if let Some(card) = state.card_at(x, y) {
                state.cards.press(card);
                return;
            }
            state.click_contact(x, y);
        }
        _ => {}
    }
}
