//! Extractive summaries built from sentences that mention study concepts

use serde::{Deserialize, Serialize};

/// Lower-cased stems that mark a sentence as worth keeping
pub const CONCEPT_STEMS: [&str; 20] = [
    "metodología",
    "resultados",
    "conclusiones",
    "pacientes",
    "tratamiento",
    "diagnóstico",
    "síntomas",
    "efectividad",
    "estudio",
    "análisis",
    "method",
    "result",
    "conclusion",
    "patient",
    "treatment",
    "diagnos",
    "symptom",
    "effective",
    "study",
    "analysis",
];

/// Sentences must be longer than this (in characters, after trimming)
pub const MIN_SENTENCE_CHARS: usize = 20;

/// Sentences kept in a summary
pub const MAX_KEY_POINTS: usize = 3;

/// Source label used when text is summarized directly
pub const DIRECT_TEXT_SOURCE: &str = "Direct text";

const KEY_FINDINGS: [&str; 3] = [
    "Robust methodology with statistical validation",
    "Clinically significant results",
    "Implications for medical practice",
];

const RELATED_STUDIES: [&str; 3] = [
    "Cardiovascular Risk Assessment in Clinical Practice - Nature Medicine 2024",
    "Advanced Biomarkers for Heart Disease - The Lancet 2024",
    "Machine Learning in Cardiology - NEJM 2024",
];

/// Output of the summarizer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResult {
    /// Up to three key sentences
    pub summary: String,
    /// Fixed findings
    pub key_findings: Vec<String>,
    /// Fixed related studies
    pub related_studies: Vec<String>,
    /// Where the text came from
    pub source: String,
}

fn sentences(text: &str) -> impl Iterator<Item = &str> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| s.chars().count() > MIN_SENTENCE_CHARS)
}

/// Sentences mentioning any concept stem, in text order
pub fn key_points(text: &str) -> Vec<&str> {
    sentences(text)
        .filter(|s| {
            let lower = s.to_lowercase();
            CONCEPT_STEMS.iter().any(|stem| lower.contains(stem))
        })
        .take(MAX_KEY_POINTS)
        .collect()
}

/// Summarize `text` without any delay.
///
/// Falls back to the first long sentences, then to the whole text, when no
/// sentence mentions a concept.
pub fn summarize_text(text: &str, source: &str) -> SummaryResult {
    let mut points = key_points(text);
    if points.is_empty() {
        points = sentences(text).take(MAX_KEY_POINTS).collect();
    }
    let summary = if points.is_empty() {
        text.trim().to_string()
    } else {
        format!("{}.", points.join(". "))
    };

    SummaryResult {
        summary,
        key_findings: KEY_FINDINGS.iter().map(|s| s.to_string()).collect(),
        related_studies: RELATED_STUDIES.iter().map(|s| s.to_string()).collect(),
        source: source.to_string(),
    }
}

/// Stand-in text for an article "fetched" from `url`
pub fn url_content(url: &str) -> String {
    format!(
        "Content extracted from {url}. This is a medical article containing relevant information \
         about research methodology, clinical results, statistical analysis and important \
         conclusions for current medical practice."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_concept_sentences() {
        let text = "Short one. The patients responded well to the new treatment! \
                    Weather was pleasant during the whole conference week. \
                    Our analysis shows a strong effect? Conclusions follow from the data presented.";
        let points = key_points(text);
        assert_eq!(
            points,
            vec![
                "The patients responded well to the new treatment",
                "Our analysis shows a strong effect",
                "Conclusions follow from the data presented",
            ]
        );
        let summary = summarize_text(text, DIRECT_TEXT_SOURCE);
        assert_eq!(
            summary.summary,
            "The patients responded well to the new treatment. Our analysis shows a strong effect. Conclusions follow from the data presented."
        );
        assert_eq!(summary.key_findings.len(), 3);
        assert_eq!(summary.related_studies.len(), 3);
        assert_eq!(summary.source, "Direct text");
    }

    #[test]
    fn test_spanish_stems() {
        let text = "Los pacientes mostraron mejoría clínica notable. Fin.";
        assert_eq!(key_points(text), vec!["Los pacientes mostraron mejoría clínica notable"]);
    }

    #[test]
    fn test_at_most_three_points() {
        let text = "This study has one sentence here. This study has two sentences here. \
                    This study has three sentences here. This study has four sentences here.";
        assert_eq!(key_points(text).len(), 3);
    }

    #[test]
    fn test_fallbacks() {
        let no_concepts = "The weather was pleasant during the whole week.";
        assert_eq!(
            summarize_text(no_concepts, "x").summary,
            "The weather was pleasant during the whole week."
        );
        assert_eq!(summarize_text("  tiny  ", "x").summary, "tiny");
    }

    #[test]
    fn test_url_content_summarizes() {
        let text = url_content("https://example.org/article");
        let summary = summarize_text(&text, "https://example.org/article");
        assert!(summary.summary.contains("research methodology"));
    }
}
