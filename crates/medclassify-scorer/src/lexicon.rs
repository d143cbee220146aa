//! Domain vocabularies and per-domain weighting

use crate::ScorerError;
use medclassify_domain::Domain;
use serde::{Deserialize, Serialize};

/// Title match multiplier for domains without a dedicated profile
pub const DEFAULT_TITLE_MULTIPLIER: f64 = 5.0;

/// Abstract match multiplier for domains without a dedicated profile
pub const DEFAULT_ABSTRACT_MULTIPLIER: f64 = 2.0;

/// Diversity bonus ceiling for domains without a dedicated profile
pub const DEFAULT_DIVERSITY_CAP: f64 = 0.3;

/// Term list and weights for one domain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainLexicon {
    /// Whole-word terms, matched case-insensitively.
    ///
    /// Duplicates are kept: a term listed twice scores twice and counts twice
    /// toward the list length used by the diversity bonus.
    pub terms: Vec<String>,

    /// Points per match in the title
    pub title_multiplier: f64,

    /// Points per match anywhere in title + abstract
    pub abstract_multiplier: f64,

    /// Ceiling for `distinct matched terms / list length`
    pub diversity_cap: f64,
}

impl DomainLexicon {
    /// Lexicon with the default weights
    pub fn new(terms: &[&str]) -> Self {
        Self {
            terms: terms.iter().map(|t| t.to_string()).collect(),
            title_multiplier: DEFAULT_TITLE_MULTIPLIER,
            abstract_multiplier: DEFAULT_ABSTRACT_MULTIPLIER,
            diversity_cap: DEFAULT_DIVERSITY_CAP,
        }
    }

    /// Override all three weights
    pub fn with_weights(mut self, title: f64, r#abstract: f64, diversity_cap: f64) -> Self {
        self.title_multiplier = title;
        self.abstract_multiplier = r#abstract;
        self.diversity_cap = diversity_cap;
        self
    }
}

/// Vocabulary for all four domains plus the strong neurological indicators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lexicon {
    /// Plain substrings (not whole words) that trigger the neurological override
    pub strong_neurological_indicators: Vec<String>,
    /// Cardiovascular vocabulary
    pub cardiovascular: DomainLexicon,
    /// Neurological vocabulary
    pub neurological: DomainLexicon,
    /// Hepatorenal vocabulary
    pub hepatorenal: DomainLexicon,
    /// Oncological vocabulary
    pub oncological: DomainLexicon,
}

impl Lexicon {
    /// Vocabulary of one domain
    pub fn domain(&self, domain: Domain) -> &DomainLexicon {
        match domain {
            Domain::Cardiovascular => &self.cardiovascular,
            Domain::Neurological => &self.neurological,
            Domain::Hepatorenal => &self.hepatorenal,
            Domain::Oncological => &self.oncological,
        }
    }

    /// Check that every domain has terms, no term is blank and every weight
    /// is a finite non-negative number
    pub fn validate(&self) -> Result<(), ScorerError> {
        for domain in Domain::ALL {
            let lexicon = self.domain(domain);
            if lexicon.terms.is_empty() {
                return Err(ScorerError::EmptyLexicon(domain.key().to_string()));
            }
            let weights = [
                ("title_multiplier", lexicon.title_multiplier),
                ("abstract_multiplier", lexicon.abstract_multiplier),
                ("diversity_cap", lexicon.diversity_cap),
            ];
            for (name, value) in weights {
                if !value.is_finite() || value < 0.0 {
                    return Err(ScorerError::Lexicon(format!(
                        "domain '{}' has invalid {}: {}",
                        domain.key(),
                        name,
                        value
                    )));
                }
            }
            if lexicon.terms.iter().any(|t| t.trim().is_empty()) {
                return Err(ScorerError::Lexicon(format!(
                    "domain '{}' contains a blank term",
                    domain.key()
                )));
            }
        }
        if self.strong_neurological_indicators.iter().any(|t| t.is_empty()) {
            return Err(ScorerError::Lexicon(
                "strong neurological indicators contain a blank entry".to_string(),
            ));
        }
        Ok(())
    }

    /// Load a lexicon from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ScorerError> {
        let lexicon: Lexicon = toml::from_str(toml_str)?;
        lexicon.validate()?;
        Ok(lexicon)
    }
}

impl Default for Lexicon {
    /// Curated bilingual (English/Spanish) medical vocabulary.
    ///
    /// The neurological list is weighted more heavily than the others.
    fn default() -> Self {
        Self {
            strong_neurological_indicators: STRONG_NEUROLOGICAL_INDICATORS
                .iter()
                .map(|t| t.to_string())
                .collect(),
            cardiovascular: DomainLexicon::new(CARDIOVASCULAR_TERMS),
            neurological: DomainLexicon::new(NEUROLOGICAL_TERMS).with_weights(8.0, 4.0, 0.5),
            hepatorenal: DomainLexicon::new(HEPATORENAL_TERMS),
            oncological: DomainLexicon::new(ONCOLOGICAL_TERMS),
        }
    }
}

/// Heart and circulatory system vocabulary
const CARDIOVASCULAR_TERMS: &[&str] = &[
    "cardiovascular", "cardiac", "heart", "coronary", "myocardial", "artery", "arterial",
    "hypertension", "atherosclerosis", "angina", "infarction", "thrombosis", "embolism",
    "angioplasty", "bypass", "pacemaker", "arrhythmia", "tachycardia", "bradycardia",
    "fibrillation", "valve", "aortic", "mitral", "tricuspid", "pulmonary", "ecg",
    "electrocardiogram", "echocardiogram", "catheterization", "stent", "ace inhibitor",
    "beta blocker", "anticoagulant", "statin", "cholesterol", "lipid", "blood pressure",
    "systolic", "diastolic", "endothelial", "vascular", "circulation", "cardiology",
];

/// Neurology, cognition and sleep science vocabulary (English and Spanish)
const NEUROLOGICAL_TERMS: &[&str] = &[
    "neurological", "neurology", "neural", "brain", "cerebral", "cerebro", "neuronal",
    "neuron", "synapse", "synaptic", "neurobiología", "neurobiologia", "neurobiology",
    "sueño", "sleep", "vigilia", "consciousness", "conciencia", "coma", "somnolencia",
    "insomnio", "insomnia", "rem", "mor", "electroencefalograma", "eeg",
    "electroencephalogram", "corteza", "cortex", "hipocampo", "hippocampus", "amígdala",
    "amygdala", "tálamo", "thalamus", "hipotálamo", "hypothalamus", "cerebelo",
    "cerebellum", "tronco cerebral", "brainstem", "médula espinal", "spinal cord", "lóbulo",
    "lobe", "frontal", "parietal", "temporal", "occipital", "neurotransmisor",
    "neurotransmitter", "dopamina", "dopamine", "serotonina", "serotonin", "acetilcolina",
    "acetylcholine", "gaba", "noradrenalina", "norepinephrine", "glutamato", "glutamate",
    "endorfina", "endorphin", "alzheimer", "parkinson", "demencia", "dementia", "epilepsia",
    "epilepsy", "convulsión", "seizure", "esclerosis múltiple", "multiple sclerosis",
    "huntington", "als", "amyotrophic lateral sclerosis", "neuropatía", "neuropathy",
    "neuritis", "meningitis", "encefalitis", "encephalitis", "migraña", "migraine",
    "cefalea", "headache", "cognitivo", "cognitive", "memoria", "memory", "aprendizaje",
    "learning", "atención", "attention", "concentración", "concentration", "percepción",
    "perception", "lenguaje", "language", "habla", "speech", "afasia", "aphasia", "apraxia",
    "agnosia", "motor", "sensorial", "sensory", "parálisis", "paralysis", "hemiplejia",
    "hemiplegia", "paraplejia", "paraplegia", "tetraplejia", "tetraplegia", "temblor",
    "tremor", "discinesia", "dyskinesia", "ataxia", "espasticidad", "spasticity",
    "resonancia magnética", "mri", "tomografía", "ct scan", "pet scan", "punción lumbar",
    "lumbar puncture", "líquido cefalorraquídeo", "cerebrospinal fluid", "csf",
    "potenciales evocados", "evoked potentials", "neuroimagen", "neuroimaging", "axón",
    "axon", "dendrita", "dendrite", "mielina", "myelin", "glía", "glia", "astrocito",
    "astrocyte", "oligodendrocito", "oligodendrocyte", "microglia", "neuroplasticidad",
    "neuroplasticity", "neurogénesis", "neurogenesis", "sinapsis", "ciclo circadiano",
    "circadian", "ritmo circadiano", "melatonina", "melatonin", "fase rem", "rem phase",
    "ondas lentas", "slow waves", "husos de sueño", "sleep spindles", "privación de sueño",
    "sleep deprivation", "trastornos del sueño", "sleep disorders", "apnea del sueño",
    "sleep apnea", "narcolepsia", "narcolepsy", "parasomnias", "higiene del sueño",
    "sleep hygiene",
];

/// Liver and kidney vocabulary. `renal` is listed twice and counts twice.
const HEPATORENAL_TERMS: &[&str] = &[
    "hepatic", "liver", "hepatitis", "cirrhosis", "fibrosis", "jaundice", "bilirubin",
    "renal", "kidney", "nephritis", "nephropathy", "dialysis", "transplant", "creatinine",
    "urea", "glomerular", "tubular", "proteinuria", "hematuria", "azotemia", "uremia",
    "hepatocellular", "cholestatic", "portal hypertension", "ascites", "varices",
    "chronic kidney disease", "ckd", "acute kidney injury", "aki",
    "end stage renal disease", "esrd", "hemodialysis", "peritoneal dialysis",
    "kidney stone", "nephrolithiasis", "glomerulonephritis", "pyelonephritis",
    "polycystic kidney", "hepatomegaly", "splenomegaly", "alt", "ast",
    "alkaline phosphatase", "ggt", "albumin", "prothrombin time", "inr", "hígado", "riñón",
    "renal", "hepático",
];

/// Oncology vocabulary. `tumor` is listed twice and counts twice.
const ONCOLOGICAL_TERMS: &[&str] = &[
    "cancer", "tumor", "tumour", "oncology", "oncological", "malignant", "benign",
    "carcinoma", "sarcoma", "lymphoma", "leukemia", "melanoma", "adenocarcinoma",
    "squamous cell", "basal cell", "metastasis", "metastatic", "chemotherapy", "radiation",
    "radiotherapy", "immunotherapy", "targeted therapy", "biopsy", "histology", "cytology",
    "staging", "grading", "tnm", "neoplasm", "neoplastic", "proliferation", "apoptosis",
    "angiogenesis", "invasion", "progression", "remission", "relapse", "recurrence",
    "oncogene", "tumor suppressor", "p53", "brca", "her2", "egfr", "kras", "mutation",
    "biomarker", "cea", "psa", "ca125", "ca199", "afp", "ldh", "survival", "prognosis",
    "cáncer", "tumor", "maligno", "quimioterapia",
];

/// Substrings that force neurological dominance when present
const STRONG_NEUROLOGICAL_INDICATORS: &[&str] = &[
    "neurobiología", "neurobiologia", "neurobiology", "sueño", "sleep", "cerebral",
    "cerebro", "corteza", "cortex", "hipocampo", "electroencefalograma", "eeg",
    "neurotransmisor", "dopamina", "serotonina", "rem", "mor", "vigilia", "consciousness",
    "conciencia",
];
