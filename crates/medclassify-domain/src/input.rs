//! Request records handed to the scoring core

use serde::{Deserialize, Serialize};

/// Title and abstract of one article
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationInput {
    /// Article title
    #[serde(default)]
    pub title: String,
    /// Article abstract
    #[serde(default)]
    pub r#abstract: String,
}

impl ClassificationInput {
    /// Create a new input
    pub fn new(title: impl Into<String>, r#abstract: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            r#abstract: r#abstract.into(),
        }
    }
}

/// Bibliographic metadata. Every field is optional and blank-tolerant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataInput {
    /// Journal name
    #[serde(default)]
    pub journal: String,
    /// Author list as typed by the user (comma or semicolon separated)
    #[serde(default)]
    pub authors: String,
    /// Institution name
    #[serde(default)]
    pub institution: String,
    /// Publication year, kept as text and parsed leniently
    #[serde(default)]
    pub publication_year: String,
    /// Digital Object Identifier
    #[serde(default)]
    pub doi: String,
}

impl MetadataInput {
    /// True when no field carries any text
    pub fn is_blank(&self) -> bool {
        [
            &self.journal,
            &self.authors,
            &self.institution,
            &self.publication_year,
            &self.doi,
        ]
        .iter()
        .all(|f| f.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_blank() {
        assert!(MetadataInput::default().is_blank());
        let meta = MetadataInput {
            doi: "10.1000/x".to_string(),
            ..Default::default()
        };
        assert!(!meta.is_blank());
    }

    #[test]
    fn test_metadata_missing_fields_deserialize_empty() {
        let meta: MetadataInput = serde_json::from_str(r#"{"journal":"Cell"}"#).unwrap();
        assert_eq!(meta.journal, "Cell");
        assert!(meta.publication_year.is_empty());
    }
}
