use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF generation error: {0}")]
    Pdf(String),
    #[error("Font '{0}' is not registered")]
    UnknownFont(String),
    #[error("Failed to parse font '{name}': {message}")]
    FontParse { name: String, message: String },
    #[error("Character {character:?} in {text:?} cannot be encoded with WinAnsiEncoding")]
    Unencodable { text: String, character: char },
    #[error("Invalid font size {0}")]
    InvalidFontSize(f32),
    #[error("Non-finite coordinates ({x}, {y})")]
    NonFiniteCoordinates { x: f32, y: f32 },
}

impl From<lopdf::Error> for RenderError {
    fn from(err: lopdf::Error) -> Self {
        RenderError::Pdf(err.to_string())
    }
}
