//! Raster image encoding for embedded images
//!
//! The drawing surface looks up an [`ImageWriter`] by MIME type whenever it
//! embeds a raster image. Each session owns its own registry; PNG support is
//! registered when the session is created.

use std::io::Write;

use base64::Engine;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};

use crate::error::EncodingError;

pub const PNG_MIME_TYPE: &str = "image/png";

/// Encodes raster images into a byte stream of one MIME type
pub trait ImageWriter {
    fn write_image(&self, image: &RgbaImage, sink: &mut dyn Write) -> Result<(), EncodingError>;

    fn mime_type(&self) -> &str;
}

/// PNG encoding via the `image` crate
#[derive(Debug, Default, Clone, Copy)]
pub struct PngImageWriter;

impl ImageWriter for PngImageWriter {
    fn write_image(&self, image: &RgbaImage, sink: &mut dyn Write) -> Result<(), EncodingError> {
        let encoder = PngEncoder::new(sink);
        encoder.write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgba8,
        )?;
        Ok(())
    }

    fn mime_type(&self) -> &str {
        PNG_MIME_TYPE
    }
}

/// Image writers available to one session, keyed by MIME type
#[derive(Default)]
pub struct ImageWriterRegistry {
    writers: Vec<Box<dyn ImageWriter + Send>>,
}

impl ImageWriterRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the PNG writer installed
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_if_absent(PngImageWriter);
        registry
    }

    /// Register a writer, replacing any writer for the same MIME type
    pub fn register(&mut self, writer: impl ImageWriter + Send + 'static) {
        self.writers.retain(|w| w.mime_type() != writer.mime_type());
        self.writers.push(Box::new(writer));
    }

    /// Register a writer unless one already handles its MIME type.
    ///
    /// Returns whether the writer was added.
    pub fn register_if_absent(&mut self, writer: impl ImageWriter + Send + 'static) -> bool {
        if self.writer_for(writer.mime_type()).is_some() {
            return false;
        }
        self.writers.push(Box::new(writer));
        true
    }

    pub fn writer_for(&self, mime_type: &str) -> Option<&(dyn ImageWriter + Send)> {
        self.writers
            .iter()
            .find(|w| w.mime_type() == mime_type)
            .map(|w| w.as_ref())
    }

    /// Encode an image as a `data:` URI
    pub fn encode_data_uri(
        &self,
        image: &RgbaImage,
        mime_type: &str,
    ) -> Result<String, EncodingError> {
        let writer = self
            .writer_for(mime_type)
            .ok_or_else(|| EncodingError::UnsupportedMimeType(mime_type.to_string()))?;

        let mut bytes = Vec::new();
        writer.write_image(image, &mut bytes)?;

        let preamble = format!("data:{};base64,", writer.mime_type());
        let mut uri = String::with_capacity(preamble.len() + bytes.len() * 4 / 3 + 4);
        uri.push_str(&preamble);
        base64::engine::general_purpose::STANDARD.encode_string(&bytes, &mut uri);
        Ok(uri)
    }
}

impl std::fmt::Debug for ImageWriterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.writers.iter().map(|w| w.mime_type()))
            .finish()
    }
}
