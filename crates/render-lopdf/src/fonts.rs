//! Font registration and metrics for the PDF canvas.
//!
//! Two kinds of fonts are supported:
//! - the standard-14 Helvetica family, always available, measured with the
//!   built-in AFM advance widths and never embedded;
//! - TrueType faces registered from files or bytes, measured with
//!   `ttf-parser` and embedded as `/FontFile2` when used.

use crate::encoding;
use crate::error::RenderError;
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

pub const HELVETICA: &str = "Helvetica";
pub const HELVETICA_BOLD: &str = "Helvetica-Bold";
pub const HELVETICA_OBLIQUE: &str = "Helvetica-Oblique";

/// Helvetica advance widths for ASCII 0x20..=0x7E, in 1/1000 em.
const HELVETICA_ASCII_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

fn helvetica_advance(c: char) -> u16 {
    match c {
        ' '..='~' => HELVETICA_ASCII_WIDTHS[(c as usize) - 0x20],
        '\u{2022}' => 350,
        '\u{2013}' => 556,
        '\u{2014}' => 1000,
        '\u{2018}' | '\u{2019}' => 222,
        '\u{201C}' | '\u{201D}' => 333,
        _ => 556,
    }
}

/// Metrics and raw bytes of a parsed TrueType face.
#[derive(Debug, Clone)]
pub struct TrueTypeFace {
    postscript_name: String,
    data: Arc<Vec<u8>>,
    units_per_em: u16,
    ascent: i16,
    descent: i16,
    cap_height: i16,
    bbox: [i16; 4],
    italic: bool,
}

impl TrueTypeFace {
    pub fn parse(name: &str, data: Vec<u8>) -> Result<Self, RenderError> {
        let face = ttf_parser::Face::parse(&data, 0).map_err(|e| RenderError::FontParse {
            name: name.to_string(),
            message: e.to_string(),
        })?;

        let postscript_name = face
            .names()
            .into_iter()
            .find(|n| n.name_id == ttf_parser::name_id::POST_SCRIPT_NAME)
            .and_then(|n| n.to_string())
            .unwrap_or_else(|| name.replace(' ', ""));
        let bbox = face.global_bounding_box();
        let units_per_em = face.units_per_em();
        let ascent = face.ascender();
        let descent = face.descender();
        let cap_height = face.capital_height().unwrap_or(ascent);
        let italic = face.is_italic();

        Ok(Self {
            postscript_name,
            data: Arc::new(data),
            units_per_em,
            ascent,
            descent,
            cap_height,
            bbox: [bbox.x_min, bbox.y_min, bbox.x_max, bbox.y_max],
            italic,
        })
    }

    pub fn postscript_name(&self) -> &str {
        &self.postscript_name
    }

    fn scale(&self, value: i32) -> i64 {
        (i64::from(value) * 1000) / i64::from(self.units_per_em.max(1))
    }

    /// Advance widths of `chars` in font units; unmapped characters use glyph 0.
    fn advances(&self, chars: impl Iterator<Item = Option<char>>) -> Vec<u16> {
        // The bytes were accepted by `parse`, so re-parsing cannot fail.
        let Ok(face) = ttf_parser::Face::parse(&self.data, 0) else {
            return Vec::new();
        };
        chars
            .map(|c| {
                let Some(c) = c else { return 0 };
                let glyph = face.glyph_index(c).unwrap_or(ttf_parser::GlyphId(0));
                face.glyph_hor_advance(glyph).unwrap_or(0)
            })
            .collect()
    }

    fn text_width(&self, text: &str, size: f32) -> f32 {
        let units: u32 = self.advances(text.chars().map(Some)).iter().map(|&a| u32::from(a)).sum();
        units as f32 * size / f32::from(self.units_per_em.max(1))
    }

    fn embed(&self, doc: &mut Document) -> ObjectId {
        let name = Object::Name(self.postscript_name.as_bytes().to_vec());

        let file = Stream::new(
            dictionary! { "Length1" => self.data.len() as i64 },
            self.data.as_ref().clone(),
        );
        let file_id = doc.add_object(file);

        let [x_min, y_min, x_max, y_max] = self.bbox;
        let italic_angle: i64 = if self.italic { -12 } else { 0 };
        let descriptor = dictionary! {
            "Type" => "FontDescriptor",
            "FontName" => name.clone(),
            "Flags" => 32_i64,
            "FontBBox" => vec![
                self.scale(x_min.into()).into(),
                self.scale(y_min.into()).into(),
                self.scale(x_max.into()).into(),
                self.scale(y_max.into()).into(),
            ],
            "ItalicAngle" => italic_angle,
            "Ascent" => self.scale(self.ascent.into()),
            "Descent" => self.scale(self.descent.into()),
            "CapHeight" => self.scale(self.cap_height.into()),
            "StemV" => 80_i64,
            "FontFile2" => file_id,
        };
        let descriptor_id = doc.add_object(descriptor);

        let widths: Vec<Object> = self
            .advances((32u8..=255).map(encoding::decode_byte))
            .into_iter()
            .map(|a| Object::Integer(self.scale(a.into())))
            .collect();

        doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "TrueType",
            "BaseFont" => name,
            "FirstChar" => 32_i64,
            "LastChar" => 255_i64,
            "Widths" => widths,
            "Encoding" => "WinAnsiEncoding",
            "FontDescriptor" => descriptor_id,
        })
    }
}

#[derive(Debug, Clone)]
enum FontFace {
    /// A standard-14 font, identified by its base font name.
    Standard(&'static str),
    TrueType(TrueTypeFace),
}

/// The set of fonts a canvas may draw with, keyed by variant name
/// (e.g. `TrebuchetMS-Bold`).
#[derive(Clone)]
pub struct FontLibrary {
    faces: HashMap<String, FontFace>,
    #[cfg(feature = "system-fonts")]
    system_db: Option<Arc<fontdb::Database>>,
}

impl std::fmt::Debug for FontLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontLibrary")
            .field("faces", &self.names())
            .finish()
    }
}

impl Default for FontLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl FontLibrary {
    /// Creates a library holding only the built-in Helvetica family.
    pub fn new() -> Self {
        let faces = [HELVETICA, HELVETICA_BOLD, HELVETICA_OBLIQUE]
            .into_iter()
            .map(|name| (name.to_string(), FontFace::Standard(name)))
            .collect();
        Self {
            faces,
            #[cfg(feature = "system-fonts")]
            system_db: None,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.faces.contains_key(name)
    }

    /// Registered variant names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.faces.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn register_bytes(&mut self, name: &str, data: Vec<u8>) -> Result<(), RenderError> {
        let face = TrueTypeFace::parse(name, data)?;
        log::debug!("Registered font {} ({})", name, face.postscript_name());
        self.faces.insert(name.to_string(), FontFace::TrueType(face));
        Ok(())
    }

    pub fn register_file<P: AsRef<Path>>(&mut self, name: &str, path: P) -> Result<(), RenderError> {
        let data = std::fs::read(path.as_ref())?;
        self.register_bytes(name, data)
    }

    /// Registers every `variant name → file name` entry found under `dir`.
    ///
    /// Missing or unparsable files are logged and skipped. Returns the number
    /// of fonts registered.
    pub fn load_assets(&mut self, dir: &Path, files: &BTreeMap<String, String>) -> usize {
        let mut loaded = 0;
        for (name, file) in files {
            let path = dir.join(file);
            if !path.exists() {
                log::warn!("Font file not found: {}", path.display());
                continue;
            }
            match self.register_file(name, &path) {
                Ok(()) => loaded += 1,
                Err(e) => log::warn!("Error loading font {}: {}", name, e),
            }
        }
        if loaded == 0 && !files.is_empty() {
            log::warn!("No custom fonts loaded from {}; text will use fallback fonts", dir.display());
        } else {
            log::info!("{} fonts loaded from {}", loaded, dir.display());
        }
        loaded
    }

    /// Looks `family` up among installed system fonts and registers it as `name`.
    ///
    /// Font collections (face index > 0) are skipped since they cannot be
    /// embedded as a single TrueType program.
    #[cfg(feature = "system-fonts")]
    pub fn register_system(&mut self, name: &str, family: &str, bold: bool, italic: bool) -> bool {
        let db = self
            .system_db
            .get_or_insert_with(|| {
                let mut db = fontdb::Database::new();
                db.load_system_fonts();
                Arc::new(db)
            })
            .clone();

        let query = fontdb::Query {
            families: &[fontdb::Family::Name(family)],
            weight: if bold { fontdb::Weight::BOLD } else { fontdb::Weight::NORMAL },
            style: if italic { fontdb::Style::Italic } else { fontdb::Style::Normal },
            ..fontdb::Query::default()
        };
        let Some(id) = db.query(&query) else {
            return false;
        };
        let data = db.with_face_data(id, |data, index| (index == 0).then(|| data.to_vec()));
        match data.flatten() {
            Some(bytes) => match self.register_bytes(name, bytes) {
                Ok(()) => {
                    log::info!("Using system font for {}", name);
                    true
                }
                Err(e) => {
                    log::warn!("System font for {} is unusable: {}", name, e);
                    false
                }
            },
            None => false,
        }
    }

    /// Width of `text` set in font `name` at `size` points.
    pub fn string_width(&self, name: &str, text: &str, size: f32) -> Result<f32, RenderError> {
        match self.faces.get(name) {
            Some(FontFace::Standard(_)) => {
                let units: u32 = text.chars().map(|c| u32::from(helvetica_advance(c))).sum();
                Ok(units as f32 * size / 1000.0)
            }
            Some(FontFace::TrueType(face)) => Ok(face.text_width(text, size)),
            None => Err(RenderError::UnknownFont(name.to_string())),
        }
    }

    /// Writes the font dictionary (and, for TrueType, its program) into `doc`.
    pub(crate) fn embed(&self, name: &str, doc: &mut Document) -> Result<ObjectId, RenderError> {
        match self.faces.get(name) {
            Some(FontFace::Standard(base)) => Ok(doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => Object::Name(base.as_bytes().to_vec()),
                "Encoding" => "WinAnsiEncoding",
            })),
            Some(FontFace::TrueType(face)) => Ok(face.embed(doc)),
            None => Err(RenderError::UnknownFont(name.to_string())),
        }
    }
}
