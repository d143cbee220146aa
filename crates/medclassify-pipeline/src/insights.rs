//! Interpretation of a classification for the results report

use medclassify_domain::{ClassificationInput, ClassificationResult, Domain};
use serde::{Deserialize, Serialize};

/// Score above which a non-primary domain is listed as secondary
pub const SECONDARY_THRESHOLD: f64 = 0.3;

/// Key terms reported at most
pub const MAX_KEY_TERMS: usize = 5;

/// Terms looked for, in reporting order
pub const KEY_TERM_CANDIDATES: [&str; 24] = [
    "cardiovascular",
    "cardiac",
    "heart",
    "coronary",
    "hypertension",
    "arrhythmia",
    "neurological",
    "brain",
    "neural",
    "cognitive",
    "alzheimer",
    "parkinson",
    "hepatorenal",
    "liver",
    "kidney",
    "renal",
    "hepatic",
    "dialysis",
    "oncological",
    "cancer",
    "tumor",
    "malignant",
    "chemotherapy",
    "radiation",
];

/// Strength of the study design as read from the abstract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodologyAssessment {
    /// Meta-analysis or systematic review
    MetaAnalysis,
    /// Randomized controlled trial
    RandomizedControlled,
    /// Controlled study
    Controlled,
    /// Nothing recognizable
    Unknown,
}

impl MethodologyAssessment {
    /// Classify the design mentioned in `text`
    pub fn assess(text: &str) -> Self {
        let lower = text.to_lowercase();
        let randomized = lower.contains("randomized") || lower.contains("rct");
        let controlled = lower.contains("control");
        if lower.contains("meta-analysis") || lower.contains("systematic") {
            MethodologyAssessment::MetaAnalysis
        } else if randomized && controlled {
            MethodologyAssessment::RandomizedControlled
        } else if controlled {
            MethodologyAssessment::Controlled
        } else {
            MethodologyAssessment::Unknown
        }
    }

    /// Reader-facing description
    pub fn description(&self) -> &'static str {
        match self {
            MethodologyAssessment::MetaAnalysis => {
                "Meta-analysis or systematic review - High-level evidence"
            }
            MethodologyAssessment::RandomizedControlled => {
                "Randomized controlled trial - Robust evidence"
            }
            MethodologyAssessment::Controlled => "Controlled study - Moderate evidence",
            MethodologyAssessment::Unknown => "Methodology to be assessed - Review study design",
        }
    }
}

/// A suggested further reading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyRecommendation {
    /// Study or guideline title
    pub title: String,
    /// Journal
    pub journal: String,
    /// Why it is relevant
    pub relevance: String,
    /// Journal home page
    pub url: String,
    /// Impact rating
    pub impact: String,
}

impl StudyRecommendation {
    fn new(title: &str, journal: &str, relevance: &str, url: &str, impact: &str) -> Self {
        Self {
            title: title.to_string(),
            journal: journal.to_string(),
            relevance: relevance.to_string(),
            url: url.to_string(),
            impact: impact.to_string(),
        }
    }

    /// Three recommendations for `domain`
    pub fn for_domain(domain: Domain) -> Vec<Self> {
        match domain {
            Domain::Cardiovascular => vec![
                Self::new(
                    "ASCVD Risk Calculator Validation Studies",
                    "Circulation",
                    "Cardiovascular risk assessment tools",
                    "https://www.ahajournals.org/journal/circ",
                    "High",
                ),
                Self::new(
                    "Heart Failure Guidelines - ESC/AHA",
                    "European Heart Journal",
                    "Updated clinical guidelines in cardiology",
                    "https://academic.oup.com/eurheartj",
                    "Very High",
                ),
                Self::new(
                    "Precision Medicine in Cardiology",
                    "Nature Reviews Cardiology",
                    "Personalized cardiovascular medicine",
                    "https://www.nature.com/nrcardio/",
                    "High",
                ),
            ],
            Domain::Neurological => vec![
                Self::new(
                    "Alzheimer Disease Biomarkers",
                    "Nature Reviews Neurology",
                    "Biomarkers in neurodegenerative disease",
                    "https://www.nature.com/nrneurol/",
                    "Very High",
                ),
                Self::new(
                    "Stroke Prevention Guidelines",
                    "The Lancet Neurology",
                    "Stroke prevention and treatment",
                    "https://www.thelancet.com/journals/laneur",
                    "High",
                ),
                Self::new(
                    "Neuroplasticity and Rehabilitation",
                    "Brain",
                    "Evidence-based neurological rehabilitation",
                    "https://academic.oup.com/brain",
                    "High",
                ),
            ],
            Domain::Hepatorenal => vec![
                Self::new(
                    "Chronic Kidney Disease Guidelines",
                    "Kidney International",
                    "Comprehensive management of chronic kidney disease",
                    "https://www.kidney-international.org/",
                    "Very High",
                ),
                Self::new(
                    "NASH Treatment Advances",
                    "Hepatology",
                    "Emerging treatments in hepatology",
                    "https://aasldpubs.onlinelibrary.wiley.com/journal/15273350",
                    "High",
                ),
                Self::new(
                    "Liver Transplantation Outcomes",
                    "Liver Transplantation",
                    "Outcomes in liver transplantation",
                    "https://aasldpubs.onlinelibrary.wiley.com/journal/15276473",
                    "High",
                ),
            ],
            Domain::Oncological => vec![
                Self::new(
                    "Immunotherapy Advances",
                    "Nature Cancer",
                    "Immunotherapy across cancer types",
                    "https://www.nature.com/natcancer/",
                    "Very High",
                ),
                Self::new(
                    "Precision Oncology Trials",
                    "Journal of Clinical Oncology",
                    "Precision medicine in oncology",
                    "https://ascopubs.org/journal/jco",
                    "Very High",
                ),
                Self::new(
                    "Cancer Survivorship Care",
                    "The Lancet Oncology",
                    "Survivorship care in cancer",
                    "https://www.thelancet.com/journals/lanonc",
                    "High",
                ),
            ],
        }
    }
}

/// Specialties that benefit from articles in `domain`
pub fn clinical_relevance(domain: Domain) -> &'static str {
    match domain {
        Domain::Cardiovascular => "High impact on cardiology practice and preventive medicine",
        Domain::Neurological => "Relevant to neurology, psychiatry and geriatric medicine",
        Domain::Hepatorenal => "Applicable to nephrology, hepatology and internal medicine",
        Domain::Oncological => "Critical for oncology, hematology and palliative care",
    }
}

/// Candidate terms occurring in `text`, at most five
pub fn key_terms(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    KEY_TERM_CANDIDATES
        .iter()
        .filter(|term| lower.contains(*term))
        .take(MAX_KEY_TERMS)
        .map(|term| term.to_string())
        .collect()
}

/// Everything the results report says about a classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insights {
    /// Highest-scoring domain
    pub primary_domain: Domain,
    /// Score of the primary domain
    pub primary_score: f64,
    /// Other domains scoring above the secondary threshold
    pub secondary_domains: Vec<Domain>,
    /// Two-sentence overview
    pub executive_summary: String,
    /// Bullet points for the report
    pub key_findings: Vec<String>,
    /// Terms found in the title and abstract
    pub key_terms: Vec<String>,
    /// Specialties concerned
    pub clinical_relevance: String,
    /// Study design
    pub methodology: MethodologyAssessment,
    /// Further reading for the primary domain
    pub related_studies: Vec<StudyRecommendation>,
}

impl Insights {
    /// Derive insights for a classified article
    pub fn derive(input: &ClassificationInput, result: &ClassificationResult) -> Self {
        let (primary, primary_score) = result.scores.primary();
        let secondary_domains = result
            .scores
            .entries()
            .iter()
            .filter(|&&(domain, score)| domain != primary && score > SECONDARY_THRESHOLD)
            .map(|&(domain, _)| domain)
            .collect();
        let key_terms = key_terms(&format!("{} {}", input.title, input.r#abstract));
        let pct = primary_score * 100.0;

        let executive_summary = format!(
            "This article is classified primarily in the {} domain with {:.1}% confidence. \
             The analysis identifies key elements related to {}.",
            primary.display_name().to_lowercase(),
            pct,
            primary.description().to_lowercase()
        );

        let key_findings = vec![
            format!("Primary domain: {} ({:.1}% confidence)", primary, pct),
            format!("Source reliability: {}", result.reliability.level),
            format!(
                "Key terms identified: {}",
                key_terms.iter().take(3).cloned().collect::<Vec<_>>().join(", ")
            ),
            format!("Processing time: {}s", result.processing_time),
        ];

        Self {
            primary_domain: primary,
            primary_score,
            secondary_domains,
            executive_summary,
            key_findings,
            key_terms,
            clinical_relevance: clinical_relevance(primary).to_string(),
            methodology: MethodologyAssessment::assess(&input.r#abstract),
            related_studies: StudyRecommendation::for_domain(primary),
        }
    }
}
