//! Keyword scoring and the dominance decision rule
//!
//! Scoring runs in two stages:
//! 1. Raw scores: each domain is scored independently from whole-word term
//!    matches in the title and in title + abstract
//! 2. Decision rule: the strong neurological override, else winner
//!    amplification, else a plain clamp

use crate::{DomainLexicon, Lexicon, ScorerError};
use medclassify_domain::{ClassificationInput, Domain, DomainScores};
use regex::{Regex, RegexBuilder};

/// Weight of the normalized title score in the raw score
pub const TITLE_WEIGHT: f64 = 0.7;

/// Weight of the normalized abstract score in the raw score
pub const ABSTRACT_WEIGHT: f64 = 0.3;

/// Minimum raw neurological score for the override to apply
pub const OVERRIDE_MIN_NEUROLOGICAL: f64 = 0.1;

/// Floor of the neurological score after an override
pub const OVERRIDE_NEUROLOGICAL_FLOOR: f64 = 0.75;

/// Ratio the winner must exceed the runner-up by to be amplified
pub const AMPLIFY_RATIO: f64 = 1.5;

/// Bounds of the plain clamp used when scores are close together
pub const CLAMP_RANGE: (f64, f64) = (0.05, 0.85);

/// Which branch of the decision rule produced the final scores
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionBranch {
    /// A strong neurological indicator forced neurological dominance
    NeurologicalOverride,

    /// The winner was well clear of the runner-up and got amplified
    Amplified {
        /// Domain that was amplified
        winner: Domain,
    },

    /// Scores were close together and were clamped independently
    Clamped,
}

/// Intermediate values for one domain's raw score
#[derive(Debug, Clone, PartialEq)]
pub struct DomainBreakdown {
    /// Domain scored
    pub domain: Domain,
    /// Sum of title matches times the title multiplier
    pub title_score: f64,
    /// Sum of title + abstract matches times the abstract multiplier
    pub abstract_score: f64,
    /// Distinct terms matched anywhere, in list order
    pub matched_terms: Vec<String>,
    /// Length of the term list, duplicates included
    pub total_terms: usize,
    /// `min(matched / total, cap)`
    pub diversity_bonus: f64,
    /// Title score per title word
    pub normalized_title_score: f64,
    /// Abstract score per title + abstract word
    pub normalized_abstract_score: f64,
    /// Raw score in [0, 1]
    pub raw_score: f64,
}

/// Full scoring trace for one input
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreReport {
    /// Scores before the decision rule
    pub raw: DomainScores,
    /// Scores after the decision rule
    pub scores: DomainScores,
    /// Branch taken by the decision rule
    pub branch: DecisionBranch,
    /// Whether any strong neurological indicator appeared
    pub strong_indicator: bool,
    /// Per-domain intermediate values in declaration order
    pub breakdown: Vec<DomainBreakdown>,
}

struct CompiledDomain {
    domain: Domain,
    terms: Vec<(String, Regex)>,
    title_multiplier: f64,
    abstract_multiplier: f64,
    diversity_cap: f64,
}

impl CompiledDomain {
    fn compile(domain: Domain, lexicon: &DomainLexicon) -> Result<Self, ScorerError> {
        let terms = lexicon
            .terms
            .iter()
            .map(|term| {
                let term = term.to_lowercase();
                RegexBuilder::new(&format!(r"\b{}\b", regex::escape(&term)))
                    .case_insensitive(true)
                    .build()
                    .map(|re| (term.clone(), re))
                    .map_err(|source| ScorerError::InvalidTerm { term, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            domain,
            terms,
            title_multiplier: lexicon.title_multiplier,
            abstract_multiplier: lexicon.abstract_multiplier,
            diversity_cap: lexicon.diversity_cap,
        })
    }

    fn score(&self, title: &str, text: &str) -> DomainBreakdown {
        let mut title_score = 0.0;
        let mut abstract_score = 0.0;
        let mut matched_terms: Vec<String> = Vec::new();

        for (term, re) in &self.terms {
            let title_matches = re.find_iter(title).count();
            let text_matches = re.find_iter(text).count();

            if title_matches > 0 {
                title_score += title_matches as f64 * self.title_multiplier;
            }
            if text_matches > 0 {
                abstract_score += text_matches as f64 * self.abstract_multiplier;
            }
            if (title_matches > 0 || text_matches > 0) && !matched_terms.contains(term) {
                matched_terms.push(term.clone());
            }
        }

        let total_terms = self.terms.len();
        let diversity_bonus =
            (matched_terms.len() as f64 / total_terms as f64).min(self.diversity_cap);

        let normalized_title_score = title_score / word_count(title).max(1) as f64;
        let normalized_abstract_score = abstract_score / word_count(text).max(1) as f64;

        let raw_score = (normalized_title_score * TITLE_WEIGHT
            + normalized_abstract_score * ABSTRACT_WEIGHT
            + diversity_bonus)
            .min(1.0);

        DomainBreakdown {
            domain: self.domain,
            title_score,
            abstract_score,
            matched_terms,
            total_terms,
            diversity_bonus,
            normalized_title_score,
            normalized_abstract_score,
            raw_score,
        }
    }
}

/// Maps a title and abstract to a four-domain confidence vector.
///
/// Term matchers are compiled once at construction; scoring itself holds no
/// state and is deterministic.
pub struct DomainScorer {
    lexicon: Lexicon,
    domains: Vec<CompiledDomain>,
    strong_indicators: Vec<String>,
}

impl DomainScorer {
    /// Compile a scorer from a lexicon
    pub fn new(lexicon: Lexicon) -> Result<Self, ScorerError> {
        lexicon.validate()?;

        let domains = Domain::ALL
            .iter()
            .map(|&d| CompiledDomain::compile(d, lexicon.domain(d)))
            .collect::<Result<Vec<_>, _>>()?;

        let strong_indicators = lexicon
            .strong_neurological_indicators
            .iter()
            .map(|t| t.to_lowercase())
            .collect();

        Ok(Self {
            lexicon,
            domains,
            strong_indicators,
        })
    }

    /// Compile a scorer from the built-in vocabulary
    pub fn with_default_lexicon() -> Result<Self, ScorerError> {
        Self::new(Lexicon::default())
    }

    /// The lexicon this scorer was built from
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Final per-domain scores
    pub fn score(&self, input: &ClassificationInput) -> DomainScores {
        self.report(input).scores
    }

    /// Raw per-domain scores, before the decision rule
    pub fn raw_scores(&self, input: &ClassificationInput) -> DomainScores {
        let (title, text) = prepare(input);
        DomainScores::from_fn(|d| self.domains[index(d)].score(&title, &text).raw_score)
    }

    /// Scores together with every intermediate value
    pub fn report(&self, input: &ClassificationInput) -> ScoreReport {
        let (title, text) = prepare(input);

        let breakdown: Vec<DomainBreakdown> =
            self.domains.iter().map(|d| d.score(&title, &text)).collect();
        let raw = DomainScores::from_fn(|d| breakdown[index(d)].raw_score);

        let strong_indicator = self
            .strong_indicators
            .iter()
            .any(|t| text.contains(t.as_str()) || title.contains(t.as_str()));

        let (scores, branch) = decide(&raw, strong_indicator);

        ScoreReport {
            raw,
            scores,
            branch,
            strong_indicator,
            breakdown,
        }
    }
}

impl std::fmt::Debug for DomainScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DomainScorer")
            .field("terms", &self.domains.iter().map(|d| d.terms.len()).collect::<Vec<_>>())
            .field("strong_indicators", &self.strong_indicators.len())
            .finish()
    }
}

/// Apply the decision rule to raw scores.
///
/// Precedence: neurological override, then amplification, then clamp.
pub(crate) fn decide(raw: &DomainScores, strong_indicator: bool) -> (DomainScores, DecisionBranch) {
    let ranked = raw.ranked();
    let (top_domain, top_score) = ranked[0];
    let (_, second_score) = ranked[1];

    if strong_indicator
        && top_domain != Domain::Neurological
        && raw.neurological > OVERRIDE_MIN_NEUROLOGICAL
    {
        let scores = DomainScores {
            // Scores stay in [0, 1] even when the raw neurological score exceeds 0.5
            neurological: (raw.neurological * 2.0).max(OVERRIDE_NEUROLOGICAL_FLOOR).min(1.0),
            cardiovascular: (raw.cardiovascular * 0.3).min(0.15),
            hepatorenal: (raw.hepatorenal * 0.5).min(0.08),
            oncological: (raw.oncological * 0.5).min(0.07),
        };
        return (scores, DecisionBranch::NeurologicalOverride);
    }

    if top_score > second_score * AMPLIFY_RATIO {
        let scores = raw.map(|d, s| {
            if d == top_domain {
                (s * 1.3).min(0.95)
            } else {
                (s * 0.6).max(0.05)
            }
        });
        return (scores, DecisionBranch::Amplified { winner: top_domain });
    }

    let (lo, hi) = CLAMP_RANGE;
    (raw.map(|_, s| s.clamp(lo, hi)), DecisionBranch::Clamped)
}

/// Lower-cased title, and lower-cased title + abstract
fn prepare(input: &ClassificationInput) -> (String, String) {
    let title = input.title.to_lowercase();
    let text = format!("{} {}", input.title, input.r#abstract).to_lowercase();
    (title, text)
}

/// Number of single-space separated fields, empty ones included
fn word_count(s: &str) -> usize {
    s.split(' ').count()
}

fn index(domain: Domain) -> usize {
    match domain {
        Domain::Cardiovascular => 0,
        Domain::Neurological => 1,
        Domain::Hepatorenal => 2,
        Domain::Oncological => 3,
    }
}
