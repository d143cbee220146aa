//! Ingestion sources and the content extracted from them

use crate::ClassificationInput;
use serde::{Deserialize, Serialize};

/// Where an article comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// A web address
    Url(String),
    /// An uploaded document, identified by file name
    File {
        /// File name including extension
        name: String,
    },
}

impl Source {
    /// Short label for reports
    pub fn label(&self) -> &'static str {
        match self {
            Source::Url(_) => "URL",
            Source::File { .. } => "File",
        }
    }

    /// Lower-cased extension of a file source
    pub fn extension(&self) -> Option<String> {
        match self {
            Source::File { name } => name
                .rsplit_once('.')
                .map(|(_, ext)| ext.to_lowercase())
                .filter(|ext| !ext.is_empty()),
            Source::Url(_) => None,
        }
    }
}

/// Title and abstract pulled out of a source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedContent {
    /// Extracted title
    pub title: String,
    /// Extracted abstract
    pub r#abstract: String,
}

impl From<ExtractedContent> for ClassificationInput {
    fn from(content: ExtractedContent) -> Self {
        ClassificationInput::new(content.title, content.r#abstract)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_extension() {
        let src = Source::File { name: "Paper.Final.PDF".to_string() };
        assert_eq!(src.extension().as_deref(), Some("pdf"));
        let none = Source::File { name: "README".to_string() };
        assert!(none.extension().is_none());
        assert!(Source::Url("https://x".to_string()).extension().is_none());
    }
}
