use crate::calendar::{ActivityIndex, CalendarDate, Locale};

pub const DEFAULT_FILE_STEM: &str = "activities_calendar";

/// Page geometry in millimetres, measured from the top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub page_width: f32,
    pub page_height: f32,
    pub left_margin: f32,
    pub top_margin: f32,
    /// A header is moved to a new page once the cursor has passed this line.
    pub bottom_threshold: f32,
    pub header_advance: f32,
    pub body_advance: f32,
    pub header_font_size: f32,
    pub body_font_size: f32,
    /// Longest body line in characters before wrapping between activities.
    pub max_body_chars: usize,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            page_width: 210.0,
            page_height: 297.0,
            left_margin: 20.0,
            top_margin: 20.0,
            bottom_threshold: 280.0,
            header_advance: 10.0,
            body_advance: 10.0,
            header_font_size: 16.0,
            body_font_size: 12.0,
            max_body_chars: 80,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Header,
    Body,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub kind: LineKind,
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Page {
    pub lines: Vec<PlacedLine>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub layout: PageLayout,
    pub pages: Vec<Page>,
    pub file_stem: String,
}

impl Document {
    pub fn file_name(&self) -> String {
        format!("{}.pdf", self.file_stem)
    }

    pub fn lines(&self) -> impl Iterator<Item = &PlacedLine> {
        self.pages.iter().flat_map(|page| page.lines.iter())
    }
}

#[derive(Debug, Clone)]
pub struct ExportPaginator {
    layout: PageLayout,
    locale: Locale,
    file_stem: String,
}

impl Default for ExportPaginator {
    fn default() -> Self {
        Self::new(Locale::default())
    }
}

impl ExportPaginator {
    pub fn new(locale: Locale) -> Self {
        Self {
            layout: PageLayout::default(),
            locale,
            file_stem: DEFAULT_FILE_STEM.to_string(),
        }
    }

    pub fn with_layout(mut self, layout: PageLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_file_stem(mut self, file_stem: impl Into<String>) -> Self {
        self.file_stem = file_stem.into();
        self
    }

    /// Lays the index out day by day in chronological order: a month header,
    /// then the day's activities joined with `", "`.
    pub fn export(&self, index: &ActivityIndex) -> Document {
        let layout = &self.layout;
        let mut cursor = PageCursor::new(layout);

        for (date, activities) in index.iter() {
            cursor.break_if_full();
            cursor.place(LineKind::Header, self.header(date));

            let body = body_lines(&self.body_prefix(date), activities, layout.max_body_chars);
            for (n, text) in body.into_iter().enumerate() {
                // The first body line always fits below its header.
                if n > 0 {
                    cursor.break_if_full();
                }
                cursor.place(LineKind::Body, text);
            }
        }

        Document {
            layout: layout.clone(),
            pages: cursor.pages,
            file_stem: self.file_stem.clone(),
        }
    }

    fn header(&self, date: CalendarDate) -> String {
        format!("{} {}", self.locale.month_name(date.month()), date.year())
    }

    fn body_prefix(&self, date: CalendarDate) -> String {
        format!("{} {}: ", self.locale.weekday_label(date.weekday_index()), date.day())
    }
}

struct PageCursor<'a> {
    layout: &'a PageLayout,
    pages: Vec<Page>,
    y: f32,
}

impl<'a> PageCursor<'a> {
    fn new(layout: &'a PageLayout) -> Self {
        Self {
            layout,
            pages: vec![Page::default()],
            y: layout.top_margin,
        }
    }

    fn break_if_full(&mut self) {
        if self.y > self.layout.bottom_threshold {
            self.pages.push(Page::default());
            self.y = self.layout.top_margin;
        }
    }

    fn place(&mut self, kind: LineKind, text: String) {
        let (font_size, advance) = match kind {
            LineKind::Header => (self.layout.header_font_size, self.layout.header_advance),
            LineKind::Body => (self.layout.body_font_size, self.layout.body_advance),
        };

        let line = PlacedLine {
            kind,
            text,
            x: self.layout.left_margin,
            y: self.y,
            font_size,
        };

        if let Some(page) = self.pages.last_mut() {
            page.lines.push(line);
        }
        self.y += advance;
    }
}

/// Splits `prefix` + activities into lines of at most `max_chars`, breaking
/// only between activities. A single activity longer than the limit keeps its
/// own line.
fn body_lines(prefix: &str, activities: &[String], max_chars: usize) -> Vec<String> {
    const SEPARATOR: &str = ", ";
    const CONTINUATION: &str = "    ";

    let mut lines = Vec::new();
    let mut current = prefix.to_string();
    let mut has_activity = false;

    for activity in activities {
        let candidate_len = current.chars().count()
            + if has_activity { SEPARATOR.len() } else { 0 }
            + activity.chars().count();

        if has_activity && candidate_len > max_chars {
            current.push(',');
            lines.push(std::mem::replace(&mut current, CONTINUATION.to_string()));
            has_activity = false;
        }

        if has_activity {
            current.push_str(SEPARATOR);
        }
        current.push_str(activity);
        has_activity = true;
    }

    lines.push(current);
    lines
}
