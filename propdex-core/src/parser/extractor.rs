use tracing::debug;

use propdex_model::{DropReason, FileKind, FileRole, FlatFileRecord, PropellerTraits, ViewDirection};

use super::rules::{
    RoleKeyword, compact_size_rules, modifier_rules, parse_count, parse_number, role_keyword,
    short_form_role, view_direction,
};
use super::tokenizer::{Delimiters, SizeToken, TokenCursor, TokenizedName};
use super::units::UnitNormalizer;
use crate::scanner::{ScannedFile, Volume};
use crate::settings::{ParserSettings, default_image_file_extensions_vec};

/// Decodes propeller metadata out of dataset filenames.
///
/// Data names follow `<maker>_<size>[_<deg>][_<blades>][_<spec>]_<role...>`;
/// photo names share the same prefix and end in a view segment.
#[derive(Debug, Clone)]
pub struct FilenameParser {
    delimiters: Delimiters,
    units: UnitNormalizer,
    /// Suffixes [`FilenameParser::parse_image_name`] strips before tokenizing.
    image_extensions: Vec<String>,
}

impl Default for FilenameParser {
    fn default() -> Self {
        Self::with_settings(&ParserSettings::default())
    }
}

impl FilenameParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: &ParserSettings) -> Self {
        Self {
            delimiters: Delimiters::from(settings),
            units: UnitNormalizer::from(settings),
            image_extensions: default_image_file_extensions_vec(),
        }
    }

    /// Replace the photo extensions recognised in raw names. An empty list
    /// keeps the defaults.
    pub fn with_image_extensions(mut self, extensions: &[String]) -> Self {
        if !extensions.is_empty() {
            self.image_extensions = extensions.to_vec();
        }
        self
    }

    pub fn delimiters(&self) -> Delimiters {
        self.delimiters
    }

    /// Parse an extension-stripped data filename.
    pub fn parse_data_name(&self, name: &str) -> Result<(PropellerTraits, FileRole), DropReason> {
        let tokens =
            TokenizedName::tokenize(name, self.delimiters).ok_or(DropReason::EmptyFilename)?;
        let mut traits = PropellerTraits::new(tokens.manufacturer());

        if tokens.is_short_form() {
            let keyword = tokens.get(1).unwrap_or_default();
            let role = short_form_role(keyword).ok_or_else(|| DropReason::UnrecognizedRole {
                token: keyword.to_string(),
            })?;
            return Ok((traits, role));
        }

        if let Some(size) = tokens.size() {
            self.decode_size(size, &mut traits);
        }

        let mut cursor = tokens.cursor_after_size();
        consume_modifiers(&mut cursor, &mut traits);
        let role = decode_role(&mut cursor)?;

        if !cursor.remaining().is_empty() {
            debug!(name, ignored = ?cursor.remaining(), "trailing tokens after role");
        }
        Ok((traits, role))
    }

    /// Parse a photo filename (extension optional).
    ///
    /// Only a known image extension is stripped, so `apcsf_9x4.7_front`
    /// keeps its dotted pitch.
    pub fn parse_image_name(
        &self,
        name: &str,
    ) -> Result<(PropellerTraits, ViewDirection), DropReason> {
        let stem = match name.rsplit_once('.') {
            Some((stem, ext))
                if self
                    .image_extensions
                    .iter()
                    .any(|known| known.eq_ignore_ascii_case(ext)) =>
            {
                stem
            }
            _ => name,
        };
        self.parse_image_stem(name, stem)
    }

    fn parse_image_stem(
        &self,
        name: &str,
        stem: &str,
    ) -> Result<(PropellerTraits, ViewDirection), DropReason> {
        let tokens =
            TokenizedName::tokenize(stem, self.delimiters).ok_or(DropReason::EmptyFilename)?;
        let (segment, prefix) = tokens.split_last().ok_or(DropReason::MissingRole)?;

        let mut traits = PropellerTraits::new(prefix.manufacturer());
        if let Some(size) = prefix.size() {
            self.decode_size(size, &mut traits);
        }
        let mut cursor = prefix.cursor_after_size();
        consume_modifiers(&mut cursor, &mut traits);

        if !cursor.remaining().is_empty() {
            debug!(name, ignored = ?cursor.remaining(), "unused photo prefix tokens");
        }
        Ok((traits, view_direction(segment)))
    }

    pub fn parse_data_file(
        &self,
        volume: &Volume,
        file: &ScannedFile,
    ) -> Result<FlatFileRecord, DropReason> {
        let (traits, role) = self.parse_data_name(&file.filename)?;
        Ok(FlatFileRecord {
            volume: volume.name.clone(),
            volume_number: volume.number,
            filename: file.filename.clone(),
            extension: file.extension.clone(),
            traits,
            kind: FileKind::Data(role),
        })
    }

    pub fn parse_image_file(
        &self,
        volume: &Volume,
        file: &ScannedFile,
    ) -> Result<FlatFileRecord, DropReason> {
        // the scanner already matched the extension against its allow-list
        let stem = file
            .extension
            .as_deref()
            .and_then(|ext| file.filename.strip_suffix(ext))
            .and_then(|rest| rest.strip_suffix('.'))
            .unwrap_or(&file.filename);
        let (traits, view) = self.parse_image_stem(&file.filename, stem)?;
        Ok(FlatFileRecord {
            volume: volume.name.clone(),
            volume_number: volume.number,
            filename: file.filename.clone(),
            extension: file.extension.clone(),
            traits,
            kind: FileKind::Image(view),
        })
    }

    /// Steps 1-3 of the cascade: diameter or model label, pitch, then units.
    fn decode_size(&self, size: SizeToken<'_>, traits: &mut PropellerTraits) {
        match parse_number(size.diameter) {
            Some(diameter) => {
                traits.diameter_in = Some(diameter);
                traits.pitch_in = size.pitch.and_then(parse_number);
            }
            None => {
                traits.model = Some(size.diameter.to_string());
                if let Some(rule) = compact_size_rules()
                    .iter()
                    .find(|rule| rule.apply(size.diameter, traits))
                {
                    debug!(label = size.diameter, rule = rule.name, "compact size label");
                }
            }
        }

        let (diameter, pitch) =
            self.units
                .normalize(&traits.manufacturer, traits.diameter_in, traits.pitch_in);
        traits.diameter_in = diameter;
        traits.pitch_in = pitch;
    }
}

/// Try each modifier rule once, in table order, advancing past every match.
fn consume_modifiers(cursor: &mut TokenCursor<'_, '_>, traits: &mut PropellerTraits) {
    for rule in modifier_rules() {
        let Some(token) = cursor.peek() else {
            break;
        };
        if rule.apply(token, traits) {
            cursor.advance();
        }
    }
}

fn decode_role(cursor: &mut TokenCursor<'_, '_>) -> Result<FileRole, DropReason> {
    let token = cursor.take().ok_or(DropReason::MissingRole)?;
    let role = match role_keyword(token) {
        Some(RoleKeyword::Geometry) => FileRole::Geometry,
        Some(RoleKeyword::Static) => FileRole::Static {
            test_label: cursor.take().map(str::to_string),
        },
        // `x_10x5_4000`: a bare numeric label with nothing after it is the rpm
        None => {
            let rpm = match cursor.take() {
                Some(next) => parse_count(next),
                None => parse_count(token),
            };
            FileRole::Performance {
                test_label: token.to_string(),
                rpm,
            }
        }
    };
    Ok(role)
}
