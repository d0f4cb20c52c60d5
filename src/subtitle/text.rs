use super::style::Style;
use serde::Serialize;

/// A run of text, either unstyled or carrying a [`Style`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TextSpan {
    Plain { text: String },
    Styled { text: String, style: Style },
}

impl TextSpan {
    pub fn plain(text: impl Into<String>) -> Self {
        TextSpan::Plain { text: text.into() }
    }

    pub fn styled(text: impl Into<String>, style: Style) -> Self {
        TextSpan::Styled {
            text: text.into(),
            style,
        }
    }

    /// Plain when `style` carries nothing.
    pub fn with_style(text: impl Into<String>, style: Style) -> Self {
        if style.has_properties() {
            Self::styled(text, style)
        } else {
            Self::plain(text)
        }
    }

    pub fn text(&self) -> &str {
        match self {
            TextSpan::Plain { text } | TextSpan::Styled { text, .. } => text,
        }
    }

    pub fn style(&self) -> Option<&Style> {
        match self {
            TextSpan::Plain { .. } => None,
            TextSpan::Styled { style, .. } => Some(style),
        }
    }

    pub fn is_styled(&self) -> bool {
        matches!(self, TextSpan::Styled { .. })
    }
}

/// One visible line of a cue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TextLine {
    spans: Vec<TextSpan>,
}

impl TextLine {
    pub fn from_spans(spans: Vec<TextSpan>) -> Self {
        Self { spans }
    }

    pub fn spans(&self) -> &[TextSpan] {
        &self.spans
    }

    pub fn is_empty(&self) -> bool {
        self.spans.iter().all(|s| s.text().is_empty())
    }

    /// The visible text with markup removed.
    pub fn text(&self) -> String {
        self.spans.iter().map(TextSpan::text).collect()
    }
}
