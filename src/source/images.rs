use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::SourceError;
use crate::models::{Stream, Subject};

/// Image metadata as fetched from the image registry.
#[derive(Debug, Deserialize)]
struct ImageDetails {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    full_description: Option<String>,
}

/// Reads `image_details.json`: a map from image identifier (`nginx:1.20`) to
/// its [`ImageDetails`].
///
/// Classification text is `"<name>. <description>. <full_description>"`,
/// keyed by the image identifier. Absent descriptions are treated as empty.
#[derive(Debug, Default)]
pub struct ImageReader;

impl ImageReader {
    pub fn new() -> Self {
        Self
    }
}

impl super::SourceReader for ImageReader {
    fn stream(&self) -> Stream {
        Stream::Images
    }

    fn read(&self, path: &Path) -> Result<Vec<Subject>, SourceError> {
        let images: BTreeMap<String, ImageDetails> = super::read_json(Stream::Images, path)?;

        let subjects = images
            .into_iter()
            .map(|(image, details)| {
                let text = format!(
                    "{}. {}. {}",
                    details.name,
                    details.description.unwrap_or_default(),
                    details.full_description.unwrap_or_default()
                );
                Subject::new(Stream::Images, image, text)
            })
            .collect();

        Ok(subjects)
    }
}
