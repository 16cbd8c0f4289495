use std::collections::BTreeMap;
use std::path::Path;

use ab_glyph::FontArc;

use crate::error::{PaintError, PaintResult};

/// Proportional family, always available.
pub const DEFAULT_FAMILY: &str = "Ubuntu";
/// Monospace family, always available.
pub const MONOSPACE_FAMILY: &str = "Hack";

/// Fonts available to the text tool, keyed by family name.
///
/// Starts with the two faces egui embeds; more can be registered from
/// font files.
#[derive(Clone)]
pub struct FontBook {
    fonts: BTreeMap<String, FontArc>,
}

impl std::fmt::Debug for FontBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontBook")
            .field("families", &self.fonts.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Default for FontBook {
    fn default() -> Self {
        Self::new()
    }
}

impl FontBook {
    pub fn new() -> Self {
        let mut book = Self { fonts: BTreeMap::new() };
        let builtins: [(&str, &'static [u8]); 2] = [
            (DEFAULT_FAMILY, epaint_default_fonts::UBUNTU_LIGHT),
            (MONOSPACE_FAMILY, epaint_default_fonts::HACK_REGULAR),
        ];
        for (family, data) in builtins {
            match FontArc::try_from_slice(data) {
                Ok(font) => {
                    book.fonts.insert(family.to_owned(), font);
                }
                Err(err) => log::error!("Built-in font {family} failed to load: {err}"),
            }
        }
        book
    }

    /// Registers (or replaces) a family from raw TTF/OTF bytes.
    pub fn register_bytes(&mut self, family: &str, data: Vec<u8>) -> PaintResult<()> {
        let font = FontArc::try_from_vec(data).map_err(|err| PaintError::InvalidFont(format!("{family}: {err}")))?;
        self.fonts.insert(family.to_owned(), font);
        log::info!("Registered font family {family}");
        Ok(())
    }

    pub fn register_file(&mut self, family: &str, path: &Path) -> PaintResult<()> {
        let data = std::fs::read(path)?;
        self.register_bytes(family, data)
    }

    pub fn contains(&self, family: &str) -> bool {
        self.fonts.contains_key(family)
    }

    /// Looks up `family`, falling back to the default family.
    pub fn resolve(&self, family: &str) -> PaintResult<&FontArc> {
        if let Some(font) = self.fonts.get(family) {
            return Ok(font);
        }
        log::warn!("Font family {family} not found, using {DEFAULT_FAMILY}");
        self.fonts
            .get(DEFAULT_FAMILY)
            .or_else(|| self.fonts.values().next())
            .ok_or_else(|| PaintError::UnknownFont(family.to_owned()))
    }

    pub fn families(&self) -> impl Iterator<Item = &str> {
        self.fonts.keys().map(String::as_str)
    }
}
