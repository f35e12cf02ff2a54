//! The render orchestrator.
//!
//! A [`DocumentAssembler`] walks one render through its stages in order:
//!
//! ```text
//! Created -> DataLoaded -> Validated -> ShapesRendered -> TextRendered -> Finalized
//! ```
//!
//! A validation failure moves it to `Aborted` instead; from there every call
//! fails. Nothing is written to the output before `finalize`, so an aborted
//! run leaves no partial document behind.

use crate::config::LayoutConfig;
use crate::corrections::PrecisionCorrector;
use crate::error::PipelineError;
use crate::fonts::{load_font_library, FontResolver};
use crate::render::{RenderContext, ShapeOutcome, ShapeRenderer, TextRenderer};
use crate::validation::{Collection, DataValidator};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use vitae_render_lopdf::FontLibrary;
use vitae_types::{ShapeElement, TextElement};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Created,
    DataLoaded,
    Validated,
    ShapesRendered,
    TextRendered,
    Finalized,
    Aborted,
}

/// A text element that could not be drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct TextFailure {
    pub index: usize,
    pub text: String,
    pub reason: String,
}

/// Outcome counts of a render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderReport {
    pub shapes_drawn: usize,
    pub shapes_filtered: usize,
    pub shapes_unsupported: usize,
    pub shapes_failed: usize,
    pub text_drawn: usize,
    pub text_failed: Vec<TextFailure>,
    pub links: usize,
    pub width_cache_hits: u64,
    pub width_cache_misses: u64,
}

impl fmt::Display for RenderReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} shapes drawn ({} filtered, {} unsupported, {} failed), {} text elements drawn ({} failed), {} links",
            self.shapes_drawn,
            self.shapes_filtered,
            self.shapes_unsupported,
            self.shapes_failed,
            self.text_drawn,
            self.text_failed.len(),
            self.links
        )
    }
}

pub struct DocumentAssembler<'a> {
    config: &'a LayoutConfig,
    stage: Stage,
    raw_text: Vec<Value>,
    raw_shapes: Vec<Value>,
    text: Vec<TextElement>,
    shapes: Vec<ShapeElement>,
    context: Option<RenderContext>,
    corrector: PrecisionCorrector,
    report: RenderReport,
}

impl<'a> DocumentAssembler<'a> {
    pub fn new(config: &'a LayoutConfig, fonts: FontLibrary) -> Self {
        Self {
            config,
            stage: Stage::Created,
            raw_text: Vec::new(),
            raw_shapes: Vec::new(),
            text: Vec::new(),
            shapes: Vec::new(),
            context: Some(RenderContext::new(config, fonts)),
            corrector: PrecisionCorrector::standard(config),
            report: RenderReport::default(),
        }
    }

    /// Replaces the standard date and bullet corrections applied to text.
    pub fn with_corrector(mut self, corrector: PrecisionCorrector) -> Self {
        self.corrector = corrector;
        self
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn report(&self) -> &RenderReport {
        &self.report
    }

    fn require(&self, expected: Stage) -> Result<(), PipelineError> {
        match self.stage {
            Stage::Aborted => Err(PipelineError::Aborted),
            found if found == expected => Ok(()),
            found => Err(PipelineError::Stage { expected, found }),
        }
    }

    /// Takes the raw element collections, in draw order.
    pub fn load(&mut self, text: Vec<Value>, shapes: Vec<Value>) -> Result<(), PipelineError> {
        self.require(Stage::Created)?;
        log::info!("Loaded {} text elements and {} shapes", text.len(), shapes.len());
        self.raw_text = text;
        self.raw_shapes = shapes;
        self.stage = Stage::DataLoaded;
        Ok(())
    }

    pub fn load_files(&mut self, text_path: &Path, shapes_path: &Path) -> Result<(), PipelineError> {
        self.require(Stage::Created)?;
        let text = read_json_array(text_path)?;
        let shapes = read_json_array(shapes_path)?;
        self.load(text, shapes)
    }

    /// Validates both collections and decodes them. Any failure aborts the run.
    pub fn validate(&mut self) -> Result<(), PipelineError> {
        self.require(Stage::DataLoaded)?;
        let checked = DataValidator::validate_text(&self.raw_text)
            .and_then(|()| DataValidator::validate_shapes(&self.raw_shapes))
            .map_err(PipelineError::from)
            .and_then(|()| {
                let text: Vec<TextElement> = decode(Collection::Text, &self.raw_text)?;
                let shapes: Vec<ShapeElement> = decode(Collection::Shapes, &self.raw_shapes)?;
                Ok((text, shapes))
            });

        match checked {
            Ok((text, shapes)) => {
                self.text = text;
                self.shapes = shapes;
                self.raw_text.clear();
                self.raw_shapes.clear();
                self.stage = Stage::Validated;
                Ok(())
            }
            Err(e) => {
                log::error!("Aborting render: {}", e);
                self.stage = Stage::Aborted;
                self.context = None;
                Err(e)
            }
        }
    }

    /// Draws every shape so text lands on top of them.
    pub fn render_shapes(&mut self) -> Result<(), PipelineError> {
        self.require(Stage::Validated)?;
        let ctx = self.context.as_mut().ok_or(PipelineError::Aborted)?;
        let renderer = ShapeRenderer::new(self.config);

        for (index, shape) in self.shapes.iter().enumerate() {
            match renderer.draw(ctx, shape) {
                Ok(ShapeOutcome::Drawn) => self.report.shapes_drawn += 1,
                Ok(ShapeOutcome::Filtered) => self.report.shapes_filtered += 1,
                Ok(ShapeOutcome::Unsupported) => self.report.shapes_unsupported += 1,
                Err(e) => {
                    log::warn!("Skipping shape {}: {}", index, e);
                    self.report.shapes_failed += 1;
                }
            }
        }

        log::info!(
            "Drew {} of {} shapes ({} filtered by color)",
            self.report.shapes_drawn,
            self.shapes.len(),
            self.report.shapes_filtered
        );
        self.stage = Stage::ShapesRendered;
        Ok(())
    }

    /// Draws every text element. A failing element is logged and skipped.
    pub fn render_text(&mut self) -> Result<(), PipelineError> {
        self.require(Stage::ShapesRendered)?;
        let ctx = self.context.as_mut().ok_or(PipelineError::Aborted)?;
        let resolver = FontResolver::new(&self.config.fonts, ctx.canvas().fonts());
        let corrector = std::mem::take(&mut self.corrector);
        let mut renderer = TextRenderer::new(self.config, resolver).with_corrector(corrector);

        for (index, element) in self.text.iter().enumerate() {
            match renderer.draw(ctx, element) {
                Ok(_) => self.report.text_drawn += 1,
                Err(e) => {
                    log::warn!("Skipping text element {} ({:?}): {}", index, element.text, e);
                    self.report.text_failed.push(TextFailure {
                        index,
                        text: element.text.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        self.report.links = ctx.canvas().links().len();
        let stats = ctx.width_stats();
        self.report.width_cache_hits = stats.hits;
        self.report.width_cache_misses = stats.misses;

        log::info!(
            "Drew {} of {} text elements, {} links",
            self.report.text_drawn,
            self.text.len(),
            self.report.links
        );
        self.stage = Stage::TextRendered;
        Ok(())
    }

    /// Writes the finished page to `writer`.
    pub fn finalize<W: Write>(&mut self, writer: &mut W) -> Result<RenderReport, PipelineError> {
        self.require(Stage::TextRendered)?;
        let ctx = self.context.take().ok_or(PipelineError::Aborted)?;
        ctx.finish(writer)?;
        self.stage = Stage::Finalized;
        Ok(self.report.clone())
    }
}

fn read_json_array(path: &Path) -> Result<Vec<Value>, PipelineError> {
    let raw = std::fs::read_to_string(path).map_err(|source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_str(&raw).map_err(|source| PipelineError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    match value {
        Value::Array(items) => Ok(items),
        _ => Err(PipelineError::NotAnArray { path: path.to_path_buf() }),
    }
}

fn decode<T: DeserializeOwned>(collection: Collection, values: &[Value]) -> Result<Vec<T>, PipelineError> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            T::deserialize(value).map_err(|source| PipelineError::Decode { collection, index, source })
        })
        .collect()
}

/// Input and output locations for a file-based render.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPaths {
    pub text: PathBuf,
    pub shapes: PathBuf,
    pub output: PathBuf,
    pub assets: PathBuf,
}

impl Default for RenderPaths {
    fn default() -> Self {
        Self {
            text: PathBuf::from("data/coordinates.json"),
            shapes: PathBuf::from("data/shapes.json"),
            output: PathBuf::from("outputs/cv.pdf"),
            assets: PathBuf::from("data/assets"),
        }
    }
}

/// Runs the whole pipeline from files on disk.
///
/// The output file is only created once both inputs have loaded and
/// validated.
pub fn render_to_file(config: &LayoutConfig, paths: &RenderPaths) -> Result<RenderReport, PipelineError> {
    let fonts = load_font_library(&config.fonts, &paths.assets);
    let mut assembler = DocumentAssembler::new(config, fonts);
    assembler.load_files(&paths.text, &paths.shapes)?;
    assembler.validate()?;
    assembler.render_shapes()?;
    assembler.render_text()?;

    let io_err = |source| PipelineError::Io { path: paths.output.clone(), source };
    if let Some(dir) = paths.output.parent()
        && !dir.as_os_str().is_empty()
    {
        std::fs::create_dir_all(dir).map_err(io_err)?;
    }
    let mut writer = BufWriter::new(File::create(&paths.output).map_err(io_err)?);
    let report = assembler.finalize(&mut writer)?;
    writer.flush().map_err(io_err)?;

    log::info!("Wrote {}", paths.output.display());
    Ok(report)
}
