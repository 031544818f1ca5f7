//! Named matcher rules of the filename grammar.
//!
//! Each table is ordered; the extractor walks them front to back and a rule
//! only ever sees the token the previous rule left under the cursor.

use once_cell::sync::Lazy;
use regex::Regex;

use propdex_model::{FileRole, Orientation, PropellerTraits, RoleKind, ViewDirection};

/// Parse a plain finite decimal number (`9`, `4.7`, `.5`).
pub fn parse_number(token: &str) -> Option<f64> {
    token
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Parse a non-negative integer count (`3`, `0042`).
pub fn parse_count(token: &str) -> Option<u32> {
    token.parse::<u32>().ok()
}

/// Compact size labels that carry orientation and specimen instead of pitch,
/// e.g. `12p1` (pusher, specimen 1) or `10t2` (tractor, specimen 2).
#[derive(Debug)]
pub struct CompactSizeRule {
    pub name: &'static str,
    pattern: Regex,
    orientation: Orientation,
}

impl CompactSizeRule {
    /// Fill diameter, specimen and orientation from `label` when it matches.
    pub fn apply(&self, label: &str, traits: &mut PropellerTraits) -> bool {
        let Some(captures) = self.pattern.captures(label) else {
            return false;
        };
        traits.diameter_in = parse_number(&captures[1]);
        traits.specimen = parse_count(&captures[2]);
        traits.tractor_pusher = Some(self.orientation);
        true
    }
}

static COMPACT_SIZE_RULES: Lazy<Vec<CompactSizeRule>> = Lazy::new(|| {
    vec![
        CompactSizeRule {
            name: "pusher",
            pattern: Regex::new(r"^(\d+)p(\d+)$").expect("pusher regex should compile"),
            orientation: Orientation::Pusher,
        },
        CompactSizeRule {
            name: "tractor",
            pattern: Regex::new(r"^(\d+)t(\d+)$").expect("tractor regex should compile"),
            orientation: Orientation::Tractor,
        },
    ]
});

pub fn compact_size_rules() -> &'static [CompactSizeRule] {
    &COMPACT_SIZE_RULES
}

/// Optional modifier between the size token and the role token.
#[derive(Debug)]
pub struct ModifierRule {
    pub name: &'static str,
    pattern: Regex,
    assign: fn(&str, &mut PropellerTraits),
}

impl ModifierRule {
    pub fn matches(&self, token: &str) -> bool {
        self.pattern.is_match(token)
    }

    /// Assign the field when the token matches. A matching token is consumed
    /// even if its numeric part does not parse; the field then stays absent.
    pub fn apply(&self, token: &str, traits: &mut PropellerTraits) -> bool {
        let Some(captures) = self.pattern.captures(token) else {
            return false;
        };
        let value = captures.get(1).map_or("", |m| m.as_str());
        (self.assign)(value, traits);
        true
    }
}

// Order matters: a degree value like `5deg` must never reach the blade rule.
static MODIFIER_RULES: Lazy<Vec<ModifierRule>> = Lazy::new(|| {
    vec![
        ModifierRule {
            name: "degree",
            pattern: Regex::new(r"^(.*)deg$").expect("degree regex should compile"),
            assign: |value, traits| traits.degree = parse_number(value),
        },
        ModifierRule {
            name: "blade_count",
            pattern: Regex::new(r"^(.)b$").expect("blade regex should compile"),
            assign: |value, traits| traits.blade_count = parse_count(value),
        },
        ModifierRule {
            name: "specimen",
            pattern: Regex::new(r"spec(.*)$").expect("specimen regex should compile"),
            assign: |value, traits| traits.specimen = parse_count(value),
        },
    ]
});

pub fn modifier_rules() -> &'static [ModifierRule] {
    &MODIFIER_RULES
}

/// Literal keyword that names the role of a long-form data file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleKeyword {
    Geometry,
    /// The token after the keyword is the static test label.
    Static,
}

pub const ROLE_KEYWORDS: &[(&str, RoleKeyword)] = &[
    ("geom", RoleKeyword::Geometry),
    ("static", RoleKeyword::Static),
];

/// Keywords accepted as the second token of a two-token name.
pub const SHORT_FORM_KEYWORDS: &[(&str, RoleKind)] = &[
    ("geom", RoleKind::Geometry),
    ("thick", RoleKind::Thickness),
];

pub fn role_keyword(token: &str) -> Option<RoleKeyword> {
    ROLE_KEYWORDS
        .iter()
        .find(|(keyword, _)| *keyword == token)
        .map(|(_, role)| *role)
}

pub fn short_form_role(token: &str) -> Option<FileRole> {
    SHORT_FORM_KEYWORDS
        .iter()
        .find(|(keyword, _)| *keyword == token)
        .and_then(|(_, kind)| match kind {
            RoleKind::Geometry => Some(FileRole::Geometry),
            RoleKind::Thickness => Some(FileRole::Thickness),
            RoleKind::Performance | RoleKind::Static => None,
        })
}

pub fn view_direction(segment: &str) -> ViewDirection {
    if segment.contains("front") {
        ViewDirection::Front
    } else {
        ViewDirection::Side
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn modifier(name: &str) -> &'static ModifierRule {
        modifier_rules()
            .iter()
            .find(|rule| rule.name == name)
            .unwrap()
    }

    #[test]
    fn parse_number_accepts_plain_decimals_only() {
        assert_eq!(parse_number("9"), Some(9.0));
        assert_eq!(parse_number("4.7"), Some(4.7));
        assert_eq!(parse_number("12p1"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number(""), None);
    }

    #[test]
    fn compact_rules_derive_orientation_and_specimen() {
        let mut traits = PropellerTraits::new("apc");
        let pusher = &compact_size_rules()[0];
        assert!(pusher.apply("12p1", &mut traits));
        assert_eq!(traits.diameter_in, Some(12.0));
        assert_eq!(traits.specimen, Some(1));
        assert_eq!(traits.tractor_pusher, Some(Orientation::Pusher));

        let mut traits = PropellerTraits::new("apc");
        let tractor = &compact_size_rules()[1];
        assert!(!tractor.apply("12p1", &mut traits));
        assert!(tractor.apply("10t2", &mut traits));
        assert_eq!(traits.tractor_pusher, Some(Orientation::Tractor));
        assert!(!tractor.apply("sf10t2", &mut traits));
    }

    #[test]
    fn modifier_order_is_degree_blade_specimen() {
        let names: Vec<_> = modifier_rules().iter().map(|rule| rule.name).collect();
        assert_eq!(names, vec!["degree", "blade_count", "specimen"]);
    }

    #[test]
    fn degree_rule_reads_numeric_prefix() {
        let mut traits = PropellerTraits::new("mit");
        assert!(modifier("degree").apply("22.5deg", &mut traits));
        assert_eq!(traits.degree, Some(22.5));
        assert!(!modifier("degree").matches("deg5"));
    }

    #[test]
    fn blade_rule_needs_exactly_two_characters() {
        let mut traits = PropellerTraits::new("apc");
        assert!(modifier("blade_count").apply("3b", &mut traits));
        assert_eq!(traits.blade_count, Some(3));
        assert!(!modifier("blade_count").matches("10b"));
        assert!(!modifier("blade_count").matches("b"));
        // non-numeric prefix: consumed, field left absent
        let mut traits = PropellerTraits::new("apc");
        assert!(modifier("blade_count").apply("xb", &mut traits));
        assert_eq!(traits.blade_count, None);
    }

    #[test]
    fn specimen_rule_reads_suffix() {
        let mut traits = PropellerTraits::new("apc");
        assert!(modifier("specimen").apply("spec2", &mut traits));
        assert_eq!(traits.specimen, Some(2));
        assert!(modifier("specimen").apply("myspec7", &mut traits));
        assert_eq!(traits.specimen, Some(7));
        assert!(!modifier("specimen").matches("sp2"));
    }

    #[test]
    fn keywords_are_literal() {
        assert_eq!(role_keyword("geom"), Some(RoleKeyword::Geometry));
        assert_eq!(role_keyword("static"), Some(RoleKeyword::Static));
        assert_eq!(role_keyword("Geom"), None);
        assert_eq!(role_keyword("kt0925"), None);

        assert_eq!(short_form_role("geom"), Some(FileRole::Geometry));
        assert_eq!(short_form_role("thick"), Some(FileRole::Thickness));
        assert_eq!(short_form_role("static"), None);
    }

    #[test]
    fn view_direction_defaults_to_side() {
        assert_eq!(view_direction("front"), ViewDirection::Front);
        assert_eq!(view_direction("front2"), ViewDirection::Front);
        assert_eq!(view_direction("side"), ViewDirection::Side);
        assert_eq!(view_direction("top"), ViewDirection::Side);
    }
}
