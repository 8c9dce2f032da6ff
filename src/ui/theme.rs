use ratatui::style::Color;

const TEAL: Color = Color::Rgb(0x4D, 0xB6, 0xAC);
const TEAL_DEEP: Color = Color::Rgb(0x26, 0xA6, 0x9A);
const TEAL_INK: Color = Color::Rgb(0x00, 0x79, 0x6B);
const MINT: Color = Color::Rgb(0xE0, 0xF2, 0xF1);
const ORANGE: Color = Color::Rgb(0xFF, 0x98, 0x00);

pub const THEME_NAMES: [&str; 2] = ["teal", "contrast"];

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub title: Color,
    pub weekday_header: Color,
    pub selected_bg: Color,
    pub selected_fg: Color,
    pub today: Color,
    /// Days holding at least one activity.
    pub activity_marker: Color,
    pub blank_cell: Color,
    pub status_bar: Color,
    pub input: Color,
    pub pending: Color,
    pub error: Color,
    pub success: Color,
    pub help_title: Color,
    pub help_section: Color,
}

impl Theme {
    pub fn teal() -> Self {
        Self {
            name: "teal",
            title: TEAL,
            weekday_header: TEAL_DEEP,
            selected_bg: TEAL_INK,
            selected_fg: MINT,
            today: Color::White,
            activity_marker: ORANGE,
            blank_cell: TEAL_INK,
            status_bar: MINT,
            input: Color::White,
            pending: ORANGE,
            error: Color::LightRed,
            success: TEAL,
            help_title: TEAL,
            help_section: ORANGE,
        }
    }

    /// The sixteen ANSI colours only, for terminals without true colour.
    pub fn contrast() -> Self {
        Self {
            name: "contrast",
            title: Color::Cyan,
            weekday_header: Color::Yellow,
            selected_bg: Color::White,
            selected_fg: Color::Black,
            today: Color::Green,
            activity_marker: Color::Magenta,
            blank_cell: Color::DarkGray,
            status_bar: Color::Reset,
            input: Color::Reset,
            pending: Color::Yellow,
            error: Color::Red,
            success: Color::Green,
            help_title: Color::Cyan,
            help_section: Color::Yellow,
        }
    }

    /// `"default"` is kept as an alias so older config files still resolve.
    pub fn named(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "teal" | "default" => Some(Self::teal()),
            "contrast" => Some(Self::contrast()),
            _ => None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::teal()
    }
}
