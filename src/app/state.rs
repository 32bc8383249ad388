//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).
//! The motion objects share one [`FrameQueue`]; the main loop pumps it right
//! before every draw.

use std::collections::HashMap;
use std::time::Duration;

use hero_motion::config::AppConfig;
use hero_motion::core::{
    coalescer::FrameCoalescer,
    effects::{self, BulbTracker, NavbarReveal, Region, BULB, HERO_IMAGE, NAVBAR},
    error::MotionError,
    frame::FrameQueue,
    stage::Stage,
};
use ratatui::layout::Rect;

use super::cards::CardEffects;
use super::contact::ContactForm;
use super::counter::AnimatedCounter;
use super::page::{
    self, SectionId, SectionSpan, FILTERS, ROW_PX, SKILLS, SKILL_FIRST_ROW, STATS, STAT_VALUE_ROW,
};
use super::reveal::Reveal;
use super::skill::SkillBar;
use super::transition::PageTransition;
use crate::ui::layout::{self, AppLayout};
use crate::ui::smooth_scroll::{SmoothScroll, SECTION_SCROLL_SPEED};

/// Overlay menu: open flag plus the highlighted link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuState {
    pub open: bool,
    pub selected: usize,
}

/// Top-level application state.
pub struct AppState {
    pub config: AppConfig,
    /// Repaint-aligned callbacks, run right before each draw.
    pub frames: FrameQueue,
    /// Styled elements written by the effects, read by the renderer.
    pub stage: Stage,
    /// Hero image parallax, coalesced per frame.
    pub parallax: FrameCoalescer<f64, FrameQueue>,
    /// Navbar show/hide, coalesced per frame.
    pub navbar: FrameCoalescer<f64, FrameQueue>,
    /// Pointer-follow tilt of the hero bulb.
    pub bulb: BulbTracker<FrameQueue>,
    pub scroll: SmoothScroll,
    /// Full terminal area as of the last resize.
    pub terminal_area: Rect,
    pub menu: MenuState,
    /// Index into [`FILTERS`].
    pub filter_index: usize,
    /// One per entry of [`STATS`].
    pub counters: Vec<AnimatedCounter>,
    /// One per entry of [`SKILLS`].
    pub skills: Vec<SkillBar>,
    pub reveals: HashMap<SectionId, Reveal>,
    pub cards: CardEffects,
    pub contact: ContactForm,
    /// Curtain between a menu link and its section.
    pub transition: Option<PageTransition>,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: AppConfig, terminal_area: Rect) -> Result<Self, MotionError> {
        let smoothing = config.smoothing()?;
        let parallax = config.parallax()?;

        let frames = FrameQueue::new();
        let stage = Stage::new();
        for name in [HERO_IMAGE, NAVBAR, BULB] {
            stage.register(name);
        }

        let parallax = effects::parallax_stream(frames.clone(), stage.clone(), parallax);
        let navbar = effects::navbar_stream(
            frames.clone(),
            stage.clone(),
            NavbarReveal::new(config.navbar_hide_after),
        );
        let bulb = BulbTracker::new(frames.clone(), stage.clone(), smoothing);

        let mut state = Self {
            config,
            frames,
            stage,
            parallax,
            navbar,
            bulb,
            scroll: SmoothScroll::new(SECTION_SCROLL_SPEED),
            terminal_area,
            menu: MenuState::default(),
            filter_index: 0,
            counters: STATS.iter().map(|s| AnimatedCounter::new(s.target)).collect(),
            skills: SKILLS.iter().map(|s| SkillBar::new(s.percent)).collect(),
            reveals: SectionId::ALL.iter().map(|&id| (id, Reveal::default())).collect(),
            cards: CardEffects::default(),
            contact: ContactForm::default(),
            transition: None,
            should_quit: false,
            status_message: None,
        };
        state.sync_scroll_range();
        state.sync_hero_region();
        state.bulb.start();
        Ok(state)
    }

    pub fn filter(&self) -> &'static str {
        FILTERS[self.filter_index]
    }

    pub fn document(&self) -> Vec<SectionSpan> {
        page::document(self.filter())
    }

    pub fn layout(&self) -> AppLayout {
        let navbar_shift = self
            .stage
            .transform(NAVBAR)
            .map_or(0, |t| t.row_offset(layout::NAVBAR_HEIGHT, ROW_PX));
        AppLayout::from_area(self.terminal_area, navbar_shift)
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.terminal_area = Rect::new(0, 0, width, height);
        self.sync_scroll_range();
        self.sync_hero_region();
    }

    fn sync_scroll_range(&mut self) {
        let viewport = self.layout().viewport_rows();
        let height = page::document_height(self.filter());
        self.scroll.set_max(height.saturating_sub(viewport));
    }

    /// Keep the bulb's interactive region on the hero as drawn.
    pub fn sync_hero_region(&mut self) {
        let content = self.layout().content_area;
        let hero = self.document()[0];
        let top = layout::screen_top(content, hero.top, self.scroll.row());
        self.bulb.set_region(Region::new(
            f64::from(content.x),
            f64::from(top),
            f64::from(content.width),
            f64::from(hero.height),
        ));
    }

    /// Report the current offset to the scroll-driven effects.
    fn emit_scroll(&mut self) {
        let px = self.scroll.position() * ROW_PX;
        self.parallax.on_event(px);
        self.navbar.on_event(px);
        self.sync_hero_region();
    }

    pub fn scroll_by(&mut self, rows: f64) {
        let before = self.scroll.position();
        self.scroll.jump_by(rows);
        if self.scroll.position() != before {
            self.emit_scroll();
        }
    }

    pub fn scroll_to_section(&mut self, id: SectionId) {
        let top = page::section_top(self.filter(), id);
        self.scroll.scroll_to(f64::from(top));
        tracing::debug!(section = id.label(), top, "scrolling to section");
    }

    /// Section whose top is closest above the viewport top.
    pub fn current_section(&self) -> usize {
        let row = self.scroll.row();
        self.document()
            .iter()
            .rposition(|s| s.top <= row)
            .unwrap_or(0)
    }

    pub fn set_filter(&mut self, index: usize) {
        if index >= FILTERS.len() || index == self.filter_index {
            return;
        }
        self.filter_index = index;
        self.cards.clear();
        self.status_message = Some(format!("Filter: {}", self.filter()));
        let before = self.scroll.position();
        self.sync_scroll_range();
        if self.scroll.position() != before {
            self.emit_scroll();
        }
    }

    pub fn cycle_filter(&mut self, forward: bool) {
        let n = FILTERS.len();
        let next = if forward {
            (self.filter_index + 1) % n
        } else {
            (self.filter_index + n - 1) % n
        };
        self.set_filter(next);
    }

    pub fn toggle_menu(&mut self) {
        self.menu.open = !self.menu.open;
        if self.menu.open {
            self.menu.selected = self.current_section();
        }
    }

    pub fn close_menu(&mut self) {
        self.menu.open = false;
    }

    /// Follow a menu link: close the overlay and play the page transition.
    /// The page lands on the section once the curtain has closed.
    pub fn activate_menu_link(&mut self, index: usize) {
        if let Some(&id) = SectionId::ALL.get(index) {
            self.close_menu();
            self.transition = Some(PageTransition::new(id));
        }
    }

    fn land_on_section(&mut self, id: SectionId) {
        let top = page::section_top(self.filter(), id);
        tracing::debug!(section = id.label(), top, "landed after transition");
        self.scroll.jump_to(f64::from(top));
        self.emit_scroll();
    }

    /// Scroll to the contact section and focus the message field.
    pub fn compose_message(&mut self) {
        self.scroll_to_section(SectionId::Contact);
        self.contact.set_editing(true);
    }

    fn span(&self, id: SectionId) -> Option<SectionSpan> {
        self.document().into_iter().find(|s| s.id == id)
    }

    /// Portfolio card under the pointer, as a position in the visible list.
    pub fn card_at(&self, x: u16, y: u16) -> Option<usize> {
        let work = self.span(SectionId::Work)?;
        let count = page::visible_cards(self.filter()).count();
        layout::card_rects(self.layout().content_area, &work, self.scroll.row(), count)
            .into_iter()
            .find(|(_, r)| layout::point_in_rect(*r, x, y))
            .map(|(i, _)| i)
    }

    /// Click on the contact form.  Returns whether the click hit it.
    pub fn click_contact(&mut self, x: u16, y: u16) -> bool {
        let Some(contact) = self.span(SectionId::Contact) else {
            return false;
        };
        let content = self.layout().content_area;
        let scroll = self.scroll.row();
        if layout::contact_button_rect(content, &contact, scroll)
            .is_some_and(|r| layout::point_in_rect(r, x, y))
        {
            self.submit_contact();
            return true;
        }
        let on_field = layout::contact_field_rect(content, &contact, scroll)
            .is_some_and(|r| layout::point_in_rect(r, x, y));
        self.contact.set_editing(on_field);
        on_field
    }

    /// Press the contact form's submit button.
    pub fn submit_contact(&mut self) {
        if !self.contact.submit() {
            tracing::debug!("submit ignored while the button is disabled");
        }
    }

    /// Per-frame bookkeeping that is not tied to a coalesced stream: the
    /// page transition, section glide, reveal triggers, counters, skill
    /// bars, card bounce and the contact form timers.
    pub fn advance(&mut self, elapsed: Duration) {
        if let Some(transition) = self.transition.as_mut() {
            if let Some(target) = transition.update(elapsed) {
                self.transition = None;
                self.land_on_section(target);
            }
        }
        if self.scroll.tick() {
            self.emit_scroll();
        }

        let scroll = self.scroll.row();
        let rows = self.layout().viewport_rows();
        for span in self.document() {
            if !span.intersects(scroll, rows) {
                continue;
            }
            let Some(reveal) = self.reveals.get_mut(&span.id) else {
                continue;
            };
            if reveal.trigger() {
                tracing::debug!(section = span.id.label(), "section revealed");
            }
        }
        self.start_visible_stats(scroll, rows);

        for reveal in self.reveals.values_mut() {
            reveal.update(elapsed);
        }
        for counter in &mut self.counters {
            counter.update(elapsed);
        }
        for bar in &mut self.skills {
            bar.update(elapsed);
        }
        self.cards.update(elapsed);
        self.contact.update(elapsed);
    }

    /// Counters start once their value row is on screen, each skill bar once
    /// its own row is.
    fn start_visible_stats(&mut self, scroll: u16, rows: u16) {
        let top = page::section_top(self.filter(), SectionId::Stats);
        if page::row_visible(top + STAT_VALUE_ROW, scroll, rows) {
            for counter in self.counters.iter_mut().filter(|c| !c.is_started()) {
                counter.start();
            }
        }
        for (i, bar) in self.skills.iter_mut().enumerate() {
            if !bar.is_started() && page::row_visible(top + SKILL_FIRST_ROW + i as u16, scroll, rows) {
                bar.start();
            }
        }
    }

    /// Run this frame's deferred effect updates.
    pub fn run_frame(&mut self) -> usize {
        self.frames.run_frame()
    }

    pub fn shutdown(&mut self) {
        self.bulb.stop();
        // Let the stopped tick drain so nothing stays queued.
        self.frames.run_frame();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hero_motion::core::follower::FollowState;
    use hero_motion::core::transform::Transform;

    use crate::app::contact::{SENDING_FOR, SENDING_LABEL, SENT_FOR, SENT_LABEL, SUBMIT_LABEL};

    fn state() -> AppState {
        AppState::new(AppConfig::default(), Rect::new(0, 0, 80, 24)).unwrap()
    }

    #[test]
    fn rapid_scrolls_apply_once_per_frame() {
        let mut state = state();
        for _ in 0..5 {
            state.scroll_by(1.0);
        }
        assert_eq!(state.parallax.events_seen(), 5);
        // Parallax + navbar + bulb tick.
        assert_eq!(state.run_frame(), 3);
        assert_eq!(state.parallax.updates_applied(), 1);
        assert_eq!(state.navbar.updates_applied(), 1);
        assert_eq!(
            state.stage.transform(HERO_IMAGE),
            Some(Transform::TranslateY(5.0 * ROW_PX * 0.5))
        );
    }

    #[test]
    fn navbar_hides_after_threshold_and_returns_on_scroll_up() {
        let mut state = state();
        state.scroll_by(10.0);
        state.run_frame();
        assert_eq!(state.stage.transform(NAVBAR), Some(Transform::TranslateYPercent(-100.0)));
        assert_eq!(state.layout().navbar_area, None);

        state.scroll_by(-1.0);
        state.run_frame();
        assert_eq!(state.stage.transform(NAVBAR), Some(Transform::TranslateYPercent(0.0)));
        assert!(state.layout().menu_button.is_some());
    }

    #[test]
    fn menu_link_lands_after_transition() {
        let mut state = state();
        state.toggle_menu();
        assert!(state.menu.open);
        state.activate_menu_link(2);
        assert!(!state.menu.open);
        assert!(state.transition.is_some());

        let target = page::section_top(state.filter(), SectionId::Work);
        state.advance(Duration::from_millis(599));
        state.run_frame();
        assert_eq!(state.scroll.row(), 0);
        assert_eq!(state.parallax.updates_applied(), 0);

        state.advance(Duration::from_millis(1));
        state.run_frame();
        assert!(state.transition.is_none());
        assert_eq!(state.scroll.row(), target);
        assert_eq!(state.parallax.updates_applied(), 1);
    }

    #[test]
    fn counters_wait_for_their_own_row() {
        let mut state = state();
        let top = page::section_top(state.filter(), SectionId::Stats);
        let rows = state.layout().viewport_rows();
        // Heading row is the last one on screen, the values are below it.
        state.scroll_by(f64::from(top + 1 - rows + 1));
        state.advance(Duration::from_millis(16));
        assert!(state.reveals[&SectionId::Stats].is_triggered());
        assert!(!state.counters[0].is_started());

        state.scroll_by(f64::from(STAT_VALUE_ROW - 1));
        state.advance(Duration::from_millis(16));
        assert!(state.counters.iter().all(AnimatedCounter::is_started));
        assert!(!state.skills[0].is_started());

        state.scroll_by(f64::from(SKILL_FIRST_ROW - STAT_VALUE_ROW + 1));
        state.advance(Duration::from_millis(16));
        assert!(state.skills[0].is_started() && state.skills[1].is_started());
        assert!(!state.skills[2].is_started());
    }

    #[test]
    fn contact_submit_runs_through_advance() {
        let mut state = state();
        state.compose_message();
        assert!(state.contact.is_editing());
        state.contact.push_char('h');
        state.submit_contact();
        assert_eq!(state.contact.label(), SENDING_LABEL);

        state.advance(SENDING_FOR);
        assert_eq!(state.contact.label(), SENT_LABEL);
        assert_eq!(state.contact.draft(), "");
        state.submit_contact();
        state.advance(SENT_FOR);
        assert_eq!(state.contact.label(), SUBMIT_LABEL);
    }

    #[test]
    fn stats_counters_start_when_revealed() {
        let mut state = state();
        state.advance(Duration::from_millis(16));
        assert!(state.reveals[&SectionId::Hero].is_triggered());
        assert!(!state.counters[0].is_started());

        let top = page::section_top(state.filter(), SectionId::Stats);
        state.scroll_by(f64::from(top));
        state.advance(Duration::from_millis(16));
        assert!(state.counters.iter().all(AnimatedCounter::is_started));
        state.advance(Duration::from_secs(3));
        assert_eq!(state.counters[0].text(), "250+");
    }

    #[test]
    fn filter_change_clamps_scroll() {
        let mut state = state();
        state.scroll_by(1000.0);
        let bottom_all = state.scroll.row();
        state.set_filter(FILTERS.iter().position(|f| *f == "digital").unwrap());
        assert!(state.scroll.row() < bottom_all);
        assert_eq!(state.filter(), "digital");
        state.cycle_filter(true);
        assert_eq!(state.filter_index, 0);
        state.cycle_filter(false);
        assert_eq!(state.filter(), "digital");
    }

    #[test]
    fn hero_region_moves_with_scroll() {
        let mut state = state();
        assert_eq!(state.bulb.region().top, 0.0);
        state.scroll_by(4.0);
        assert_eq!(state.bulb.region().top, -4.0);
        state.bulb.pointer_at(40.0, 2.0);
        assert_eq!(state.bulb.follower().state(), FollowState::Tracking);
    }

    #[test]
    fn shutdown_leaves_no_queued_work() {
        let mut state = state();
        state.run_frame();
        state.shutdown();
        assert!(!state.bulb.follower().is_running());
        assert_eq!(state.frames.pending(), 0);
    }
}
