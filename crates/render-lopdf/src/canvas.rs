// src/canvas.rs
use crate::encoding;
use crate::error::RenderError;
use crate::fonts::FontLibrary;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, StringFormat, Stream};
use std::collections::BTreeMap;
use std::io::Write;
use vitae_types::{Rect, Rgb};

/// Outline stroke applied on top of filled text (text render mode 2).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Rgb,
    pub width: f32,
}

/// A single line of text to draw, positioned at its baseline in PDF space.
#[derive(Debug, Clone, Copy)]
pub struct TextRun<'a> {
    pub text: &'a str,
    pub x: f32,
    pub y: f32,
    pub font: &'a str,
    pub size: f32,
    pub fill: Rgb,
    pub stroke: Option<Stroke>,
}

/// A clickable region opening an external URI.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkAnnotation {
    pub uri: String,
    pub rect: Rect,
}

/// Entries for the PDF `/Info` dictionary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentInfo {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub producer: Option<String>,
}

impl DocumentInfo {
    fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.subject.is_none() && self.producer.is_none()
    }

    fn to_dictionary(&self) -> Dictionary {
        let mut dict = Dictionary::new();
        let entries = [
            ("Title", &self.title),
            ("Author", &self.author),
            ("Subject", &self.subject),
            ("Producer", &self.producer),
        ];
        for (key, value) in entries {
            if let Some(v) = value {
                dict.set(key, Object::String(to_win_ansi_lossy(v), StringFormat::Literal));
            }
        }
        dict
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
struct PageState {
    font: Option<(String, f32)>,
    fill: Option<Rgb>,
}

/// A single-page PDF drawing surface backed by `lopdf`.
///
/// Drawing calls append content-stream operations; [`PdfCanvas::finish`]
/// assembles the object graph (fonts actually used, the page, its link
/// annotations, the catalog) and writes it out.
#[derive(Debug)]
pub struct PdfCanvas {
    page_width: f32,
    page_height: f32,
    fonts: FontLibrary,
    /// Font variant name -> resource key (`F1`, `F2`, ...), in order of first use.
    font_resources: BTreeMap<String, String>,
    operations: Vec<Operation>,
    state: PageState,
    links: Vec<LinkAnnotation>,
    info: DocumentInfo,
}

impl PdfCanvas {
    pub fn new(page_width: f32, page_height: f32, fonts: FontLibrary) -> Self {
        Self {
            page_width,
            page_height,
            fonts,
            font_resources: BTreeMap::new(),
            operations: Vec::new(),
            state: PageState::default(),
            links: Vec::new(),
            info: DocumentInfo::default(),
        }
    }

    pub fn set_info(&mut self, info: DocumentInfo) {
        self.info = info;
    }

    pub fn fonts(&self) -> &FontLibrary {
        &self.fonts
    }

    pub fn links(&self) -> &[LinkAnnotation] {
        &self.links
    }

    /// Names of the font variants referenced by drawn text.
    pub fn used_fonts(&self) -> impl Iterator<Item = &str> {
        self.font_resources.keys().map(String::as_str)
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Rgb) -> Result<(), RenderError> {
        if !rect.is_finite() {
            return Err(RenderError::NonFiniteCoordinates { x: rect.x, y: rect.y });
        }
        if self.state.fill != Some(color) {
            self.operations.push(fill_color_op("rg", color));
            self.state.fill = Some(color);
        }
        self.operations.push(Operation::new(
            "re",
            vec![rect.x.into(), rect.y.into(), rect.width.into(), rect.height.into()],
        ));
        self.operations.push(Operation::new("f", vec![]));
        Ok(())
    }

    /// Draws one text run.
    ///
    /// The call is atomic: if it fails, nothing is appended to the page.
    pub fn draw_string(&mut self, run: &TextRun<'_>) -> Result<(), RenderError> {
        if !run.size.is_finite() || run.size <= 0.0 {
            return Err(RenderError::InvalidFontSize(run.size));
        }
        if !run.x.is_finite() || !run.y.is_finite() {
            return Err(RenderError::NonFiniteCoordinates { x: run.x, y: run.y });
        }
        if !self.fonts.contains(run.font) {
            return Err(RenderError::UnknownFont(run.font.to_string()));
        }
        let encoded = encoding::encode(run.text).map_err(|character| RenderError::Unencodable {
            text: run.text.to_string(),
            character,
        })?;

        let next_key = format!("F{}", self.font_resources.len() + 1);
        let resource_key = self
            .font_resources
            .get(run.font)
            .cloned()
            .unwrap_or(next_key);

        let mut ops = Vec::new();
        let mut state = self.state.clone();
        if run.stroke.is_some() {
            ops.push(Operation::new("q", vec![]));
        }
        ops.push(Operation::new("BT", vec![]));
        if state.font.as_ref() != Some(&(run.font.to_string(), run.size)) {
            ops.push(Operation::new(
                "Tf",
                vec![Object::Name(resource_key.as_bytes().to_vec()), run.size.into()],
            ));
            state.font = Some((run.font.to_string(), run.size));
        }
        if state.fill != Some(run.fill) {
            ops.push(fill_color_op("rg", run.fill));
            state.fill = Some(run.fill);
        }
        if let Some(stroke) = run.stroke {
            ops.push(Operation::new("Tr", vec![2.into()]));
            ops.push(fill_color_op("RG", stroke.color));
            ops.push(Operation::new("w", vec![stroke.width.into()]));
        }
        ops.push(Operation::new("Td", vec![run.x.into(), run.y.into()]));
        ops.push(Operation::new("Tj", vec![Object::String(encoded, StringFormat::Literal)]));
        ops.push(Operation::new("ET", vec![]));
        if run.stroke.is_some() {
            // Q restores the text state saved by q.
            ops.push(Operation::new("Q", vec![]));
            state = self.state.clone();
        }

        self.operations.extend(ops);
        self.state = state;
        self.font_resources
            .entry(run.font.to_string())
            .or_insert(resource_key);
        Ok(())
    }

    pub fn string_width(&self, text: &str, font: &str, size: f32) -> Result<f32, RenderError> {
        self.fonts.string_width(font, text, size)
    }

    /// Registers a borderless link annotation over `rect`.
    pub fn link_url(&mut self, uri: &str, rect: Rect) {
        self.links.push(LinkAnnotation { uri: uri.to_string(), rect });
    }

    /// Assembles the document and writes it to `writer`.
    pub fn finish<W: Write>(self, writer: &mut W) -> Result<(), RenderError> {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();

        let mut font_dict = Dictionary::new();
        for (name, key) in &self.font_resources {
            let font_id = self.fonts.embed(name, &mut doc)?;
            font_dict.set(key.as_bytes(), font_id);
        }
        let resources_id = doc.add_object(dictionary! { "Font" => font_dict });

        let content = Content { operations: self.operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

        let annotations: Vec<Object> = self
            .links
            .iter()
            .map(|link| {
                let action = dictionary! {
                    "Type" => "Action",
                    "S" => "URI",
                    "URI" => Object::String(link.uri.as_bytes().to_vec(), StringFormat::Literal),
                };
                let [left, bottom, right, top] = link.rect.edges();
                let annot = dictionary! {
                    "Type" => "Annot",
                    "Subtype" => "Link",
                    "Rect" => vec![left.into(), bottom.into(), right.into(), top.into()],
                    "Border" => vec![0.into(), 0.into(), 0.into()],
                    "A" => action,
                };
                Object::Reference(doc.add_object(annot))
            })
            .collect();

        let mut page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), self.page_width.into(), self.page_height.into()],
            "Contents" => content_id,
            "Resources" => resources_id,
        };
        if !annotations.is_empty() {
            page_dict.set("Annots", Object::Array(annotations));
        }
        let page_id = doc.add_object(page_dict);

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
            }),
        );
        let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
        doc.trailer.set("Root", catalog_id);

        if !self.info.is_empty() {
            let info_id = doc.add_object(self.info.to_dictionary());
            doc.trailer.set("Info", info_id);
        }

        doc.save_to(writer)?;
        Ok(())
    }
}

fn fill_color_op(operator: &str, color: Rgb) -> Operation {
    Operation::new(operator, vec![color.r.into(), color.g.into(), color.b.into()])
}

fn to_win_ansi_lossy(s: &str) -> Vec<u8> {
    s.chars().map(|c| encoding::encode_char(c).unwrap_or(b'?')).collect()
}
