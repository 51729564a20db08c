//! Document geometry
//!
//! The résumé is flattened into rows once per (width, filter) pair. Rendering
//! walks these rows, and scroll-spy, navigation and visibility effects use the
//! section regions, so both always agree on where a section is.

use super::filter::ProjectFilter;
use super::resume::{Resume, SectionBody};
use super::visibility::Region;

/// Rows reserved for a portrait, loaded or not
pub const PORTRAIT_ROWS: u16 = 8;

/// What a single document row shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowKind {
    Title,
    Blank,
    Text { text: String, indent: u16 },
    EntryHeader { entry: usize },
    Bullet { text: String, first: bool },
    FilterBar,
    ProjectName { item: usize },
    NoProjects,
    Skill { skill: usize },
    Stats,
    Portrait { line: usize },
    Email,
    ContactHint,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocRow {
    /// Index of the owning section
    pub section: usize,
    pub kind: RowKind,
}

/// Vertical extent of a section in document rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionRegion {
    pub id: String,
    pub top: u16,
    pub height: u16,
}

impl SectionRegion {
    pub fn region(&self) -> Region {
        Region::new(self.top, self.height)
    }
}

/// Flattened résumé rows plus per-section regions
#[derive(Debug, Clone, Default)]
pub struct DocumentLayout {
    pub rows: Vec<DocRow>,
    pub regions: Vec<SectionRegion>,
    pub width: u16,
}

impl DocumentLayout {
    pub fn build(resume: &Resume, filter: &ProjectFilter, width: u16) -> Self {
        let text_width = usize::from(width.max(10));
        let mut rows = Vec::new();
        let mut regions = Vec::with_capacity(resume.sections.len());

        for (index, section) in resume.sections.iter().enumerate() {
            let top = rows.len();
            let mut push = |kind: RowKind| rows.push(DocRow {
                section: index,
                kind,
            });

            push(RowKind::Title);
            push(RowKind::Blank);

            match &section.body {
                SectionBody::About {
                    paragraphs,
                    portrait,
                } => {
                    for (i, paragraph) in paragraphs.iter().enumerate() {
                        if i > 0 {
                            push(RowKind::Blank);
                        }
                        for line in wrap_text(paragraph, text_width) {
                            push(RowKind::Text {
                                text: line,
                                indent: 0,
                            });
                        }
                    }
                    if portrait.is_some() {
                        push(RowKind::Blank);
                        for line in 0..usize::from(PORTRAIT_ROWS) {
                            push(RowKind::Portrait { line });
                        }
                    }
                }
                SectionBody::Experience { entries } => {
                    for (i, entry) in entries.iter().enumerate() {
                        if i > 0 {
                            push(RowKind::Blank);
                        }
                        push(RowKind::EntryHeader { entry: i });
                        for highlight in &entry.highlights {
                            let wrapped = wrap_text(highlight, text_width.saturating_sub(4).max(1));
                            for (j, line) in wrapped.into_iter().enumerate() {
                                push(RowKind::Bullet {
                                    text: line,
                                    first: j == 0,
                                });
                            }
                        }
                    }
                }
                SectionBody::Projects { items } => {
                    push(RowKind::FilterBar);
                    push(RowKind::Blank);
                    let visible: Vec<usize> = items
                        .iter()
                        .enumerate()
                        .filter(|(_, item)| filter.matches(&item.category))
                        .map(|(i, _)| i)
                        .collect();
                    if visible.is_empty() {
                        push(RowKind::NoProjects);
                    }
                    for (n, &i) in visible.iter().enumerate() {
                        if n > 0 {
                            push(RowKind::Blank);
                        }
                        push(RowKind::ProjectName { item: i });
                        let description = &items[i].description;
                        if !description.is_empty() {
                            let wrap_width = text_width.saturating_sub(2).max(1);
                            for line in wrap_text(description, wrap_width) {
                                push(RowKind::Text {
                                    text: line,
                                    indent: 2,
                                });
                            }
                        }
                    }
                }
                SectionBody::Skills { skills } => {
                    for skill in 0..skills.len() {
                        push(RowKind::Skill { skill });
                    }
                }
                SectionBody::Stats { .. } => push(RowKind::Stats),
                SectionBody::Contact { blurb } => {
                    if !blurb.is_empty() {
                        for line in wrap_text(blurb, text_width) {
                            push(RowKind::Text {
                                text: line,
                                indent: 0,
                            });
                        }
                        push(RowKind::Blank);
                    }
                    push(RowKind::Email);
                    push(RowKind::ContactHint);
                }
            }

            push(RowKind::Blank);
            regions.push(SectionRegion {
                id: section.id.clone(),
                top: to_row(top),
                height: to_row(rows.len() - top),
            });
        }

        Self {
            rows,
            regions,
            width,
        }
    }

    pub fn find(&self, id: &str) -> Option<&SectionRegion> {
        self.regions.iter().find(|r| r.id == id)
    }

    pub fn total_height(&self) -> u16 {
        to_row(self.rows.len())
    }

    /// Largest offset that still fills the viewport
    pub fn max_scroll(&self, viewport_height: u16) -> u16 {
        self.total_height().saturating_sub(viewport_height)
    }

    /// Row index and kind of every row, for registering row-level effects
    pub fn indexed_rows(&self) -> impl Iterator<Item = (u16, &DocRow)> {
        self.rows.iter().enumerate().map(|(i, row)| (to_row(i), row))
    }
}

fn to_row(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

/// Word-wrap text to `max_width` columns. Words longer than the width get
/// their own line.
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        if paragraph.trim().is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current_line = String::new();
        let mut current_width = 0;
        for word in paragraph.split_whitespace() {
            let word_width = word.chars().count();
            if current_width + word_width + 1 > max_width && !current_line.is_empty() {
                lines.push(std::mem::take(&mut current_line));
                current_width = 0;
            }
            if !current_line.is_empty() {
                current_line.push(' ');
                current_width += 1;
            }
            current_line.push_str(word);
            current_width += word_width;
        }
        if !current_line.is_empty() {
            lines.push(current_line);
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resume() -> Resume {
        Resume::builtin().unwrap()
    }

    mod wrap {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_wraps_on_word_boundaries() {
            assert_eq!(
                wrap_text("one two three four", 9),
                vec!["one two", "three", "four"]
            );
        }

        #[test]
        fn test_long_word_gets_own_line() {
            assert_eq!(wrap_text("a extraordinarily b", 5), vec!["a", "extraordinarily", "b"]);
        }

        #[test]
        fn test_empty_text_is_one_blank_line() {
            assert_eq!(wrap_text("", 10), vec![String::new()]);
        }

        #[test]
        fn test_counts_characters_not_bytes() {
            assert_eq!(wrap_text("ññññ ññññ", 9), vec!["ññññ ññññ"]);
        }
    }

    mod layout {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_regions_are_contiguous_and_cover_all_rows() {
            let layout = DocumentLayout::build(&resume(), &ProjectFilter::All, 60);
            let mut expected_top = 0;
            for region in &layout.regions {
                assert_eq!(region.top, expected_top, "{}", region.id);
                assert!(region.height >= 3);
                expected_top += region.height;
            }
            assert_eq!(expected_top, layout.total_height());
        }

        #[test]
        fn test_every_section_starts_with_title() {
            let layout = DocumentLayout::build(&resume(), &ProjectFilter::All, 60);
            for (i, region) in layout.regions.iter().enumerate() {
                let row = &layout.rows[usize::from(region.top)];
                assert_eq!(row.kind, RowKind::Title);
                assert_eq!(row.section, i);
            }
        }

        #[test]
        fn test_filter_hides_projects() {
            let resume = resume();
            let all = DocumentLayout::build(&resume, &ProjectFilter::All, 60);
            let web = DocumentLayout::build(
                &resume,
                &ProjectFilter::Category("web".to_string()),
                60,
            );

            let names = |layout: &DocumentLayout| {
                layout
                    .rows
                    .iter()
                    .filter(|r| matches!(r.kind, RowKind::ProjectName { .. }))
                    .count()
            };
            assert_eq!(names(&all), 4);
            assert_eq!(names(&web), 1);
            assert!(web.find("projects").unwrap().height < all.find("projects").unwrap().height);
            assert!(web.find("contact").unwrap().top < all.find("contact").unwrap().top);
        }

        #[test]
        fn test_unknown_category_shows_placeholder() {
            let layout = DocumentLayout::build(
                &resume(),
                &ProjectFilter::Category("none".to_string()),
                60,
            );
            assert!(layout.rows.iter().any(|r| r.kind == RowKind::NoProjects));
        }

        #[test]
        fn test_narrow_width_adds_rows() {
            let resume = resume();
            let wide = DocumentLayout::build(&resume, &ProjectFilter::All, 120);
            let narrow = DocumentLayout::build(&resume, &ProjectFilter::All, 30);
            assert!(narrow.total_height() > wide.total_height());
        }

        #[test]
        fn test_portrait_reserves_rows() {
            let layout = DocumentLayout::build(&resume(), &ProjectFilter::All, 60);
            let portrait_rows = layout
                .rows
                .iter()
                .filter(|r| matches!(r.kind, RowKind::Portrait { .. }))
                .count();
            assert_eq!(portrait_rows, usize::from(PORTRAIT_ROWS));
        }

        #[test]
        fn test_max_scroll() {
            let layout = DocumentLayout::build(&resume(), &ProjectFilter::All, 60);
            let total = layout.total_height();
            assert_eq!(layout.max_scroll(10), total - 10);
            assert_eq!(layout.max_scroll(total + 5), 0);
        }

        #[test]
        fn test_find_unknown_section() {
            let layout = DocumentLayout::build(&resume(), &ProjectFilter::All, 60);
            assert!(layout.find("missing").is_none());
        }
    }
}
