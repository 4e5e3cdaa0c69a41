//! ANSI formatting helpers for console diagnostics.

/// A divider for framing console output.
pub const DIVIDER: &str = "================================================================";

const RESET: &str = "\u{1b}[0m";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    /// The terminal's own color.
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Foreground,
    Background,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Faint,
    Blinking,
    Inverse,
    Invisible,
}

impl Color {
    fn ansi(self) -> Option<colored::Color> {
        match self {
            Color::Black => Some(colored::Color::Black),
            Color::Red => Some(colored::Color::Red),
            Color::Green => Some(colored::Color::Green),
            Color::Yellow => Some(colored::Color::Yellow),
            Color::Blue => Some(colored::Color::Blue),
            Color::Magenta => Some(colored::Color::Magenta),
            Color::Cyan => Some(colored::Color::Cyan),
            Color::White => Some(colored::Color::White),
            Color::Default => None,
        }
    }

    /// SGR parameter selecting this color on `layer`.
    fn code(self, layer: Layer) -> String {
        match (self.ansi(), layer) {
            (Some(c), Layer::Foreground) => c.to_fg_str().to_string(),
            (Some(c), Layer::Background) => c.to_bg_str().to_string(),
            (None, Layer::Foreground) => "39".to_string(),
            (None, Layer::Background) => "49".to_string(),
        }
    }
}

impl Format {
    fn code(self) -> &'static str {
        match self {
            Format::Bold => "1",
            Format::Faint => "2",
            Format::Italic => "3",
            Format::Underline => "4",
            Format::Blinking => "5",
            Format::Inverse => "7",
            Format::Invisible => "8",
            Format::Strikethrough => "9",
        }
    }
}

/// Terminal styling for anything string-like. Every painted string ends with a reset.
///
/// Escape sequences are always emitted, whether or not stdout is a terminal.
pub trait Paint {
    fn paint_on(&self, color: Color, layer: Layer) -> String;

    fn paint(&self, color: Color) -> String {
        self.paint_on(color, Layer::Foreground)
    }

    fn styled(&self, formats: &[Format]) -> String;

    fn reset_prefix(&self) -> String;
}

impl Paint for str {
    fn paint_on(&self, color: Color, layer: Layer) -> String {
        format!("\u{1b}[{}m{self}{RESET}", color.code(layer))
    }

    fn styled(&self, formats: &[Format]) -> String {
        if formats.is_empty() {
            return format!("{self}{RESET}");
        }
        let codes: Vec<&str> = formats.iter().map(|f| f.code()).collect();
        format!("\u{1b}[{}m{self}{RESET}", codes.join(";"))
    }

    fn reset_prefix(&self) -> String {
        format!("{RESET}{self}")
    }
}
