use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// A search hit, represented only by the url of the full size image.
// providers hand back dimensions and thumbnails too, none of it is kept
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageResult {
    pub url: String,
}

impl ImageResult {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl Display for ImageResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}
