// Format-neutral presentational attributes
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDecoration {
    #[default]
    None,
    Underline,
}

/// The 16 basic HTML colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NamedColor {
    Black,
    Silver,
    Gray,
    White,
    Maroon,
    Red,
    Purple,
    Fuchsia,
    Green,
    Lime,
    Olive,
    Yellow,
    Navy,
    Blue,
    Teal,
    Aqua,
}

const COLOR_TABLE: &[(NamedColor, [u8; 3])] = &[
    (NamedColor::Black, [0x00, 0x00, 0x00]),
    (NamedColor::Silver, [0xc0, 0xc0, 0xc0]),
    (NamedColor::Gray, [0x80, 0x80, 0x80]),
    (NamedColor::White, [0xff, 0xff, 0xff]),
    (NamedColor::Maroon, [0x80, 0x00, 0x00]),
    (NamedColor::Red, [0xff, 0x00, 0x00]),
    (NamedColor::Purple, [0x80, 0x00, 0x80]),
    (NamedColor::Fuchsia, [0xff, 0x00, 0xff]),
    (NamedColor::Green, [0x00, 0x80, 0x00]),
    (NamedColor::Lime, [0x00, 0xff, 0x00]),
    (NamedColor::Olive, [0x80, 0x80, 0x00]),
    (NamedColor::Yellow, [0xff, 0xff, 0x00]),
    (NamedColor::Navy, [0x00, 0x00, 0x80]),
    (NamedColor::Blue, [0x00, 0x00, 0xff]),
    (NamedColor::Teal, [0x00, 0x80, 0x80]),
    (NamedColor::Aqua, [0x00, 0xff, 0xff]),
];

impl NamedColor {
    /// Nearest named color to `#rgb` or `#rrggbb`, by squared RGB distance.
    pub fn from_hex(code: &str) -> Option<NamedColor> {
        let rgb = parse_hex(code)?;
        COLOR_TABLE
            .iter()
            .min_by_key(|(_, candidate)| {
                candidate
                    .iter()
                    .zip(rgb.iter())
                    .map(|(&a, &b)| {
                        let d = a as i32 - b as i32;
                        d * d
                    })
                    .sum::<i32>()
            })
            .map(|(color, _)| *color)
    }

    pub fn rgb(&self) -> [u8; 3] {
        COLOR_TABLE
            .iter()
            .find(|(color, _)| color == self)
            .map(|(_, rgb)| *rgb)
            .unwrap_or([0, 0, 0])
    }

    pub fn hex(&self) -> String {
        let [r, g, b] = self.rgb();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    pub fn name(&self) -> &'static str {
        match self {
            NamedColor::Black => "black",
            NamedColor::Silver => "silver",
            NamedColor::Gray => "gray",
            NamedColor::White => "white",
            NamedColor::Maroon => "maroon",
            NamedColor::Red => "red",
            NamedColor::Purple => "purple",
            NamedColor::Fuchsia => "fuchsia",
            NamedColor::Green => "green",
            NamedColor::Lime => "lime",
            NamedColor::Olive => "olive",
            NamedColor::Yellow => "yellow",
            NamedColor::Navy => "navy",
            NamedColor::Blue => "blue",
            NamedColor::Teal => "teal",
            NamedColor::Aqua => "aqua",
        }
    }
}

impl fmt::Display for NamedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn parse_hex(code: &str) -> Option<[u8; 3]> {
    let digits = code.strip_prefix('#')?;
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    match digits.len() {
        3 => {
            let mut rgb = [0u8; 3];
            for (i, c) in digits.chars().enumerate() {
                let v = c.to_digit(16)? as u8;
                rgb[i] = v * 16 + v;
            }
            Some(rgb)
        }
        6 => {
            let mut rgb = [0u8; 3];
            for (i, slot) in rgb.iter_mut().enumerate() {
                *slot = u8::from_str_radix(&digits[i * 2..i * 2 + 2], 16).ok()?;
            }
            Some(rgb)
        }
        _ => None,
    }
}

/// Independent presentational attributes of one text span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Style {
    pub font_style: FontStyle,
    pub font_weight: FontWeight,
    pub text_decoration: TextDecoration,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<NamedColor>,
}

impl Style {
    pub fn has_properties(&self) -> bool {
        self.font_style != FontStyle::Normal
            || self.font_weight != FontWeight::Normal
            || self.text_decoration != TextDecoration::None
            || self.color.is_some()
    }

    pub fn is_italic(&self) -> bool {
        self.font_style == FontStyle::Italic
    }

    pub fn is_bold(&self) -> bool {
        self.font_weight == FontWeight::Bold
    }

    pub fn is_underline(&self) -> bool {
        self.text_decoration == TextDecoration::Underline
    }
}
