//! Medical domains and the per-domain score vector

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One of the four fixed classification categories.
///
/// Declaration order is significant: it is the tie-break order whenever two
/// domains carry exactly the same score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    /// Heart and circulatory system
    Cardiovascular,

    /// Nervous system, cognition and sleep
    Neurological,

    /// Liver and kidney
    Hepatorenal,

    /// Cancer and tumours
    Oncological,
}

impl Domain {
    /// All domains in declaration order
    pub const ALL: [Domain; 4] = [
        Domain::Cardiovascular,
        Domain::Neurological,
        Domain::Hepatorenal,
        Domain::Oncological,
    ];

    /// Stable lower-case key used in serialized records
    pub fn key(&self) -> &'static str {
        match self {
            Domain::Cardiovascular => "cardiovascular",
            Domain::Neurological => "neurological",
            Domain::Hepatorenal => "hepatorenal",
            Domain::Oncological => "oncological",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            Domain::Cardiovascular => "Cardiovascular",
            Domain::Neurological => "Neurological",
            Domain::Hepatorenal => "Hepatorenal",
            Domain::Oncological => "Oncological",
        }
    }

    /// Short description of what the domain covers
    pub fn description(&self) -> &'static str {
        match self {
            Domain::Cardiovascular => "Diseases of the heart and circulatory system",
            Domain::Neurological => "Disorders of the nervous system",
            Domain::Hepatorenal => "Liver and kidney diseases",
            Domain::Oncological => "Cancer and malignant tumours",
        }
    }

    /// Parse a domain from its key or display name (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "cardiovascular" => Some(Domain::Cardiovascular),
            "neurological" | "neurologico" | "neurológico" => Some(Domain::Neurological),
            "hepatorenal" | "hepatorrenal" => Some(Domain::Hepatorenal),
            "oncological" | "oncologico" | "oncológico" => Some(Domain::Oncological),
            _ => None,
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl std::str::FromStr for Domain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid domain: {}", s))
    }
}

/// Confidence for every domain.
///
/// One field per domain, so no key can be omitted and no extra key can
/// appear. Values are independent confidences, they do not sum to one.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DomainScores {
    /// Cardiovascular confidence
    pub cardiovascular: f64,
    /// Neurological confidence
    pub neurological: f64,
    /// Hepatorenal confidence
    pub hepatorenal: f64,
    /// Oncological confidence
    pub oncological: f64,
}

impl DomainScores {
    /// Build a score vector from a function of the domain
    pub fn from_fn(mut f: impl FnMut(Domain) -> f64) -> Self {
        Self {
            cardiovascular: f(Domain::Cardiovascular),
            neurological: f(Domain::Neurological),
            hepatorenal: f(Domain::Hepatorenal),
            oncological: f(Domain::Oncological),
        }
    }

    /// Score of a single domain
    pub fn get(&self, domain: Domain) -> f64 {
        match domain {
            Domain::Cardiovascular => self.cardiovascular,
            Domain::Neurological => self.neurological,
            Domain::Hepatorenal => self.hepatorenal,
            Domain::Oncological => self.oncological,
        }
    }

    /// Apply `f` to every score
    pub fn map(&self, mut f: impl FnMut(Domain, f64) -> f64) -> Self {
        Self::from_fn(|d| f(d, self.get(d)))
    }

    /// `(domain, score)` pairs in declaration order
    pub fn entries(&self) -> [(Domain, f64); 4] {
        Domain::ALL.map(|d| (d, self.get(d)))
    }

    /// Entries sorted by descending score.
    ///
    /// The sort is stable, so equal scores keep declaration order. This is
    /// the order the scorer uses to pick the domain it amplifies.
    pub fn ranked(&self) -> Vec<(Domain, f64)> {
        let mut entries = self.entries().to_vec();
        entries.sort_by(|(_, a), (_, b)| b.partial_cmp(a).unwrap_or(Ordering::Equal));
        entries
    }

    /// Domain reported as primary in results and exports.
    ///
    /// Walks the domains in declaration order and keeps the running best
    /// unless the next one scores at least as high, so on ties the last
    /// tied domain wins. This differs from `ranked()[0]`.
    pub fn primary(&self) -> (Domain, f64) {
        let entries = self.entries();
        entries[1..]
            .iter()
            .fold(entries[0], |best, &next| if best.1 > next.1 { best } else { next })
    }

    /// Arithmetic mean of the four scores
    pub fn mean(&self) -> f64 {
        self.entries().iter().map(|(_, s)| s).sum::<f64>() / Domain::ALL.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_parse() {
        assert_eq!(Domain::parse("Cardiovascular"), Some(Domain::Cardiovascular));
        assert_eq!(Domain::parse("neurológico"), Some(Domain::Neurological));
        assert_eq!(Domain::parse("HEPATORRENAL"), Some(Domain::Hepatorenal));
        assert!(Domain::parse("dermatological").is_none());
    }

    #[test]
    fn test_ranked_is_stable_on_ties() {
        let scores = DomainScores {
            cardiovascular: 0.2,
            neurological: 0.5,
            hepatorenal: 0.5,
            oncological: 0.1,
        };
        let ranked = scores.ranked();
        assert_eq!(ranked[0].0, Domain::Neurological);
        assert_eq!(ranked[1].0, Domain::Hepatorenal);
        assert_eq!(ranked[3].0, Domain::Oncological);
    }

    #[test]
    fn test_primary_takes_last_tied_domain() {
        let scores = DomainScores::from_fn(|_| 0.05);
        assert_eq!(scores.primary(), (Domain::Oncological, 0.05));
        assert_eq!(scores.ranked()[0].0, Domain::Cardiovascular);

        let scores = DomainScores {
            cardiovascular: 0.2,
            neurological: 0.5,
            hepatorenal: 0.5,
            oncological: 0.1,
        };
        assert_eq!(scores.primary().0, Domain::Hepatorenal);
    }

    #[test]
    fn test_primary_clear_winner() {
        let scores = DomainScores {
            cardiovascular: 0.9,
            neurological: 0.05,
            hepatorenal: 0.4,
            oncological: 0.05,
        };
        assert_eq!(scores.primary(), (Domain::Cardiovascular, 0.9));
    }

    #[test]
    fn test_mean() {
        let scores = DomainScores {
            cardiovascular: 0.4,
            neurological: 0.2,
            hepatorenal: 0.1,
            oncological: 0.1,
        };
        assert!((scores.mean() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_serialized_keys() {
        let json = serde_json::to_value(DomainScores::default()).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 4);
        for domain in Domain::ALL {
            assert!(obj.contains_key(domain.key()));
        }
    }
}
