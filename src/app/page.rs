//! Static page content and the vertical document model.
//!
//! The page is a stack of sections measured in terminal rows.  Section
//! heights depend only on the active portfolio filter, so the document
//! layout is a pure function of `(page, filter)`.

/// Nominal pixel height of one terminal row.  Scroll samples fed to the
/// motion effects are in pixels so their thresholds read like the web page's.
pub const ROW_PX: f64 = 16.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionId {
    Hero,
    Services,
    Work,
    Stats,
    Contact,
}

impl SectionId {
    pub const ALL: &[SectionId] = &[
        SectionId::Hero,
        SectionId::Services,
        SectionId::Work,
        SectionId::Stats,
        SectionId::Contact,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SectionId::Hero => "Home",
            SectionId::Services => "Services",
            SectionId::Work => "Work",
            SectionId::Stats => "Studio",
            SectionId::Contact => "Contact",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card {
    pub title: &'static str,
    pub category: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stat {
    pub label: &'static str,
    pub target: u32,
}

/// Filter tabs, in display order.  `all` shows every card.
pub const FILTERS: &[&str] = &["all", "branding", "print", "exhibition", "digital"];

pub const CARDS: &[Card] = &[
    Card { title: "Northwind Rebrand", category: "branding" },
    Card { title: "Annual Report 2024", category: "print" },
    Card { title: "Pharma Collaterals", category: "print" },
    Card { title: "Trade Fair Pavilion", category: "exhibition" },
    Card { title: "Coffee House Identity", category: "branding" },
    Card { title: "Campaign Microsite", category: "digital" },
    Card { title: "Coffee Table Book", category: "print" },
    Card { title: "Museum Wayfinding", category: "exhibition" },
];

pub const STATS: &[Stat] = &[
    Stat { label: "Projects", target: 250 },
    Stat { label: "Clients", target: 120 },
    Stat { label: "Awards", target: 18 },
    Stat { label: "Years", target: 12 },
];

/// Skill bar: label and the percentage it fills to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Skill {
    pub label: &'static str,
    pub percent: u16,
}

pub const SKILLS: &[Skill] = &[
    Skill { label: "Brand Identity", percent: 95 },
    Skill { label: "Editorial & Print", percent: 90 },
    Skill { label: "Exhibition Design", percent: 85 },
    Skill { label: "Digital", percent: 75 },
];

pub const SERVICES: &[(&str, &str)] = &[
    ("BRANDING", "Identity systems, naming and guidelines"),
    ("BROCHURES & BOOKS", "Editorial layout and print production"),
    ("EXHIBITION", "Stands, pavilions and experiential design"),
    ("PRINT ADS", "Press campaigns and outdoor"),
];

pub const HERO_HEIGHT: u16 = 18;
const SERVICES_HEIGHT: u16 = 4 + SERVICES.len() as u16 * 2;
/// Title, blank, tab row, blank.
pub const WORK_HEADER_ROWS: u16 = 4;
/// Row of the counter values inside the stats section.
pub const STAT_VALUE_ROW: u16 = 3;
/// First skill bar row inside the stats section.
pub const SKILL_FIRST_ROW: u16 = 6;
const STATS_HEIGHT: u16 = SKILL_FIRST_ROW + SKILLS.len() as u16 + 1;
/// Message field row inside the contact section.
pub const CONTACT_FIELD_ROW: u16 = 6;
/// Submit button row inside the contact section.
pub const CONTACT_BUTTON_ROW: u16 = 8;
/// First row of the footer rule inside the contact section.
pub const FOOTER_ROW: u16 = 11;
const CONTACT_HEIGHT: u16 = FOOTER_ROW + 3;

/// Whether `card` shows under `filter`.
pub fn card_matches(card: &Card, filter: &str) -> bool {
    filter == "all" || card.category == filter
}

pub fn visible_cards(filter: &str) -> impl Iterator<Item = &'static Card> + '_ {
    CARDS.iter().filter(move |c| card_matches(c, filter))
}

/// One section's position in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSpan {
    pub id: SectionId,
    pub top: u16,
    pub height: u16,
}

impl SectionSpan {
    pub fn bottom(&self) -> u16 {
        self.top + self.height
    }

    /// Whether any row of the section is within `[scroll, scroll + rows)`.
    pub fn intersects(&self, scroll: u16, rows: u16) -> bool {
        self.top < scroll.saturating_add(rows) && self.bottom() > scroll
    }
}

/// Stack the sections for the given filter.
pub fn document(filter: &str) -> Vec<SectionSpan> {
    let work_height = WORK_HEADER_ROWS + visible_cards(filter).count() as u16 + 1;
    let mut top = 0;
    SectionId::ALL
        .iter()
        .map(|&id| {
            let height = match id {
                SectionId::Hero => HERO_HEIGHT,
                SectionId::Services => SERVICES_HEIGHT,
                SectionId::Work => work_height,
                SectionId::Stats => STATS_HEIGHT,
                SectionId::Contact => CONTACT_HEIGHT,
            };
            let span = SectionSpan { id, top, height };
            top += height;
            span
        })
        .collect()
}

pub fn document_height(filter: &str) -> u16 {
    document(filter).last().map_or(0, |s| s.bottom())
}

/// Whether document row `row` is on screen for a viewport of `rows` rows
/// starting at `scroll`.
pub fn row_visible(row: u16, scroll: u16, rows: u16) -> bool {
    row >= scroll && row < scroll.saturating_add(rows)
}

pub fn section_top(filter: &str, id: SectionId) -> u16 {
    document(filter)
        .into_iter()
        .find(|s| s.id == id)
        .map_or(0, |s| s.top)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_matches_category_or_all() {
        assert_eq!(visible_cards("all").count(), CARDS.len());
        assert_eq!(visible_cards("print").count(), 3);
        assert!(visible_cards("print").all(|c| c.category == "print"));
        assert_eq!(visible_cards("unknown").count(), 0);
    }

    #[test]
    fn sections_stack_without_gaps() {
        let doc = document("all");
        assert_eq!(doc[0].top, 0);
        for pair in doc.windows(2) {
            assert_eq!(pair[0].bottom(), pair[1].top);
        }
        assert_eq!(document_height("all"), doc.last().unwrap().bottom());
    }

    #[test]
    fn filtering_shrinks_the_work_section() {
        let all = document_height("all");
        let digital = document_height("digital");
        assert_eq!(all - digital, (CARDS.len() - 1) as u16);
        assert_eq!(section_top("digital", SectionId::Stats) + 7, section_top("all", SectionId::Stats));
    }

    #[test]
    fn content_rows_fit_their_sections() {
        let doc = document("all");
        let stats = doc[3];
        assert_eq!(stats.id, SectionId::Stats);
        assert!(SKILL_FIRST_ROW + SKILLS.len() as u16 <= stats.height);
        let contact = doc[4];
        assert!(CONTACT_BUTTON_ROW < FOOTER_ROW && FOOTER_ROW + 2 <= contact.height);
        assert!(row_visible(10, 10, 1));
        assert!(!row_visible(11, 10, 1));
        assert!(!row_visible(9, 10, 5));
    }

    #[test]
    fn span_intersection() {
        let span = SectionSpan { id: SectionId::Stats, top: 40, height: 9 };
        assert!(span.intersects(30, 11));
        assert!(!span.intersects(30, 10));
        assert!(span.intersects(48, 5));
        assert!(!span.intersects(49, 5));
    }
}
