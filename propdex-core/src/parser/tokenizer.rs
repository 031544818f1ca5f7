//! Splits bare filenames into ordered tokens.
//!
//! `apcsf_9x4.7_static_kt0925` becomes `["apcsf", "9x4.7", "static", "kt0925"]`;
//! token 1 is further split once on the size delimiter into `("9", Some("4.7"))`.

use crate::settings::ParserSettings;

/// Primary field separator and secondary size separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiters {
    pub field: char,
    pub size: char,
}

impl Default for Delimiters {
    fn default() -> Self {
        Self::from(&ParserSettings::default())
    }
}

impl From<&ParserSettings> for Delimiters {
    fn from(settings: &ParserSettings) -> Self {
        Self {
            field: settings.field_delimiter,
            size: settings.size_delimiter,
        }
    }
}

/// The size token split into its diameter and optional pitch parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeToken<'a> {
    pub raw: &'a str,
    pub diameter: &'a str,
    pub pitch: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizedName<'a> {
    tokens: Vec<&'a str>,
    size_delimiter: char,
}

impl<'a> TokenizedName<'a> {
    /// Returns `None` for an empty name or one with an empty manufacturer.
    pub fn tokenize(name: &'a str, delimiters: Delimiters) -> Option<Self> {
        let tokens: Vec<&'a str> = name.split(delimiters.field).collect();
        if tokens.first().is_none_or(|first| first.is_empty()) {
            return None;
        }
        Some(Self {
            tokens,
            size_delimiter: delimiters.size,
        })
    }

    pub fn manufacturer(&self) -> &'a str {
        self.tokens[0]
    }

    pub fn tokens(&self) -> &[&'a str] {
        &self.tokens
    }

    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.tokens.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Exactly two tokens: manufacturer plus a bare role keyword.
    pub fn is_short_form(&self) -> bool {
        self.tokens.len() == 2
    }

    pub fn size(&self) -> Option<SizeToken<'a>> {
        self.get(1).map(|raw| split_size(raw, self.size_delimiter))
    }

    /// Cursor positioned at the first token after the size token.
    pub fn cursor_after_size(&self) -> TokenCursor<'_, 'a> {
        TokenCursor {
            tokens: &self.tokens,
            pos: 2.min(self.tokens.len()),
        }
    }

    /// Drop the last token, returning it with the remaining prefix.
    pub fn split_last(mut self) -> Option<(&'a str, Self)> {
        if self.tokens.len() < 2 {
            return None;
        }
        let last = self.tokens.pop()?;
        Some((last, self))
    }
}

pub fn split_size(raw: &str, size_delimiter: char) -> SizeToken<'_> {
    match raw.split_once(size_delimiter) {
        Some((diameter, pitch)) => SizeToken {
            raw,
            diameter,
            pitch: Some(pitch),
        },
        None => SizeToken {
            raw,
            diameter: raw,
            pitch: None,
        },
    }
}

/// Left-to-right consumption over the tokens of one name.
#[derive(Debug, Clone)]
pub struct TokenCursor<'t, 'a> {
    tokens: &'t [&'a str],
    pos: usize,
}

impl<'t, 'a> TokenCursor<'t, 'a> {
    pub fn peek(&self) -> Option<&'a str> {
        self.tokens.get(self.pos).copied()
    }

    pub fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    /// Return the current token and move past it.
    pub fn take(&mut self) -> Option<&'a str> {
        let token = self.peek()?;
        self.pos += 1;
        Some(token)
    }

    pub fn remaining(&self) -> &'t [&'a str] {
        &self.tokens[self.pos..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_splits_on_field_delimiter() {
        let name = TokenizedName::tokenize("apcsf_9x4.7_static_kt0925", Delimiters::default())
            .unwrap();
        assert_eq!(name.tokens(), &["apcsf", "9x4.7", "static", "kt0925"]);
        assert_eq!(name.manufacturer(), "apcsf");
        assert!(!name.is_short_form());

        let size = name.size().unwrap();
        assert_eq!(size.diameter, "9");
        assert_eq!(size.pitch, Some("4.7"));
    }

    #[test]
    fn size_without_delimiter_has_no_pitch() {
        let size = split_size("12p1", 'x');
        assert_eq!(size.diameter, "12p1");
        assert_eq!(size.pitch, None);

        // only the first delimiter splits
        let size = split_size("9x4x3", 'x');
        assert_eq!(size.diameter, "9");
        assert_eq!(size.pitch, Some("4x3"));
    }

    #[test]
    fn empty_names_are_rejected() {
        assert!(TokenizedName::tokenize("", Delimiters::default()).is_none());
        assert!(TokenizedName::tokenize("_9x6_geom", Delimiters::default()).is_none());
    }

    #[test]
    fn short_form_and_cursor() {
        let name = TokenizedName::tokenize("nr640_geom", Delimiters::default()).unwrap();
        assert!(name.is_short_form());

        let long = TokenizedName::tokenize("apc_9x6_3b_t1_4000", Delimiters::default()).unwrap();
        let mut cursor = long.cursor_after_size();
        assert_eq!(cursor.peek(), Some("3b"));
        cursor.advance();
        assert_eq!(cursor.take(), Some("t1"));
        assert_eq!(cursor.remaining(), &["4000"]);
        assert_eq!(cursor.take(), Some("4000"));
        assert_eq!(cursor.take(), None);
        cursor.advance();
        assert!(cursor.remaining().is_empty());
    }

    #[test]
    fn split_last_separates_view_segment() {
        let name = TokenizedName::tokenize("apc_9x6_front", Delimiters::default()).unwrap();
        let (last, prefix) = name.split_last().unwrap();
        assert_eq!(last, "front");
        assert_eq!(prefix.tokens(), &["apc", "9x6"]);

        let single = TokenizedName::tokenize("apc", Delimiters::default()).unwrap();
        assert!(single.split_last().is_none());
    }

    #[test]
    fn custom_delimiters() {
        let delimiters = Delimiters {
            field: '-',
            size: '*',
        };
        let name = TokenizedName::tokenize("apc-9*6-geom", delimiters).unwrap();
        assert_eq!(name.size().unwrap().pitch, Some("6"));
    }
}
