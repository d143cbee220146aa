//! Canned content extraction for URLs and uploaded files
//!
//! Nothing is fetched or parsed. A URL is matched against a few publisher
//! patterns and a file is looked up by extension; each hit returns a fixed
//! article.

use crate::PipelineError;
use medclassify_domain::{ContentExtractor, ExtractedContent, Source};
use regex::{Regex, RegexBuilder};

/// File extensions accepted for upload
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["csv", "pdf", "txt", "docx"];

/// Named steps reported while a URL is processed
pub const URL_STEPS: [&str; 9] = [
    "Connecting to URL",
    "Extracting HTML content",
    "Identifying medical articles",
    "Analyzing document structure",
    "Extracting titles and abstracts",
    "Classifying with medical AI",
    "Assessing source reliability",
    "Generating recommendations",
    "Finalizing analysis",
];

/// Named steps reported while a file is processed
pub const FILE_STEPS: [&str; 10] = [
    "Reading file",
    "Extracting document text",
    "Identifying medical structure",
    "Segmenting articles",
    "Analyzing medical terminology",
    "Classifying with specialized AI",
    "Assessing methodological quality",
    "Generating reliability analysis",
    "Creating recommendations",
    "Finalizing processing",
];

struct Article {
    title: &'static str,
    r#abstract: &'static str,
}

impl Article {
    fn to_content(&self) -> ExtractedContent {
        ExtractedContent {
            title: self.title.to_string(),
            r#abstract: self.r#abstract.to_string(),
        }
    }
}

static URL_ARTICLES: [(&str, Article); 3] = [
    (
        "pubmed|ncbi",
        Article {
            title: "Cardiovascular Risk Assessment in Diabetic Patients: A Comprehensive Meta-Analysis",
            r#abstract: "Background: Cardiovascular disease remains the leading cause of mortality in diabetic patients. This meta-analysis evaluates current risk assessment tools and their predictive accuracy. Methods: We systematically reviewed 45 studies involving 125,000 diabetic patients across multiple healthcare systems. Results: Traditional risk calculators showed moderate predictive value (AUC 0.72-0.78), while machine learning approaches demonstrated superior performance (AUC 0.84-0.89). Conclusions: Integration of novel biomarkers and AI-driven assessment tools significantly improves cardiovascular risk prediction in diabetic populations.",
        },
    ),
    (
        "nature|science|cell",
        Article {
            title: "Novel Therapeutic Targets in Alzheimer's Disease: Neuroinflammation and Synaptic Plasticity",
            r#abstract: "Alzheimer's disease (AD) pathogenesis involves complex interactions between amyloid-β plaques, tau tangles, and neuroinflammation. Recent advances in single-cell RNA sequencing have identified microglial activation patterns associated with disease progression. This study presents evidence for targeting specific inflammatory pathways while preserving neuroprotective microglial functions. Our findings suggest that modulating TREM2 signaling and complement cascade activation may offer therapeutic benefits in early-stage AD patients.",
        },
    ),
    (
        "cancer|oncology|tumor",
        Article {
            title: "Immunotherapy Resistance Mechanisms in Advanced Hepatocellular Carcinoma",
            r#abstract: "Hepatocellular carcinoma (HCC) represents a major global health challenge with limited therapeutic options. While immune checkpoint inhibitors have shown promise, resistance mechanisms remain poorly understood. This comprehensive analysis of 200 HCC patients reveals that tumor microenvironment heterogeneity and metabolic reprogramming contribute to immunotherapy resistance. We identify potential biomarkers for patient stratification and combination therapy approaches that may overcome resistance mechanisms.",
        },
    ),
];

const FALLBACK_URL_ARTICLE: Article = Article {
    title: "Clinical Efficacy of Novel Hepatorenal Syndrome Treatment Protocol",
    r#abstract: "Hepatorenal syndrome (HRS) is a severe complication of advanced liver disease with high mortality rates. This multicenter study evaluates a novel treatment protocol combining terlipressin, albumin, and targeted fluid management. Results from 180 patients demonstrate significant improvement in renal function and 30-day survival rates compared to standard care. The protocol shows particular efficacy in Type-1 HRS patients with preserved cardiac function.",
};

fn file_article(extension: &str) -> Option<Article> {
    let article = match extension {
        "pdf" => Article {
            title: "Systematic Review: Precision Medicine Approaches in Cardiovascular Disease Management",
            r#abstract: "This systematic review examines the current state of precision medicine in cardiovascular care, analyzing genomic, proteomic, and metabolomic approaches to personalized treatment. We reviewed 78 studies encompassing 50,000 patients with various cardiovascular conditions. Findings indicate that genetic risk scores combined with traditional risk factors improve prediction accuracy by 15-20%. Pharmacogenomic testing for antiplatelet therapy shows clinical utility in specific populations. Future directions include integration of multi-omics data and artificial intelligence for enhanced clinical decision-making.",
        },
        "docx" => Article {
            title: "Neuroplasticity-Based Rehabilitation Strategies for Post-Stroke Recovery",
            r#abstract: "Stroke remains a leading cause of long-term disability worldwide. This comprehensive review explores evidence-based neuroplasticity principles in stroke rehabilitation. We analyzed 120 clinical trials involving 15,000 stroke survivors, examining motor recovery, cognitive rehabilitation, and speech therapy outcomes. Results demonstrate that intensive, task-specific training combined with neuromodulation techniques significantly enhances functional recovery. Virtual reality and brain-computer interfaces show promising results in chronic stroke patients.",
        },
        "txt" => Article {
            title: "Emerging Biomarkers in Early Detection of Pancreatic Cancer",
            r#abstract: "Pancreatic ductal adenocarcinoma (PDAC) has a 5-year survival rate below 10%, largely due to late-stage diagnosis. This study investigates novel circulating biomarkers for early detection. We analyzed blood samples from 500 patients including early-stage PDAC, chronic pancreatitis, and healthy controls. A panel combining CA 19-9, circulating tumor DNA, and specific microRNA signatures achieved 85% sensitivity and 92% specificity for early-stage detection. These findings support the development of screening protocols for high-risk populations.",
        },
        "csv" => Article {
            title: "Multi-Center Analysis of Treatment Outcomes in Acute Myeloid Leukemia",
            r#abstract: "This large-scale retrospective analysis examines treatment outcomes in 2,500 acute myeloid leukemia (AML) patients across 15 medical centers. We evaluated the impact of cytogenetic risk stratification, age, performance status, and treatment protocols on overall survival and disease-free survival. Results show significant improvements in outcomes with targeted therapies in specific genetic subgroups. Older patients (>65 years) benefit from hypomethylating agents combined with venetoclax. The study provides evidence for personalized treatment approaches based on molecular profiling.",
        },
        _ => return None,
    };
    Some(article)
}

/// Check that a source can be ingested before any work starts
pub fn validate_source(source: &Source) -> Result<(), PipelineError> {
    match source {
        Source::Url(url) if url.trim().is_empty() => Err(PipelineError::UrlRequired),
        Source::Url(_) => Ok(()),
        Source::File { name } => match source.extension() {
            Some(ext) if SUPPORTED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
            _ => Err(PipelineError::UnsupportedFile(name.clone())),
        },
    }
}

/// Extractor that returns canned articles
pub struct MockExtractor {
    url_patterns: Vec<(Regex, &'static Article)>,
}

impl MockExtractor {
    /// Compile the publisher patterns
    pub fn new() -> Result<Self, PipelineError> {
        let url_patterns = URL_ARTICLES
            .iter()
            .map(|(pattern, article)| -> Result<_, PipelineError> {
                let re = RegexBuilder::new(pattern).case_insensitive(true).build()?;
                Ok((re, article))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { url_patterns })
    }

    fn from_url(&self, url: &str) -> ExtractedContent {
        self.url_patterns
            .iter()
            .find(|(re, _)| re.is_match(url))
            .map(|(_, article)| article.to_content())
            .unwrap_or_else(|| FALLBACK_URL_ARTICLE.to_content())
    }
}

impl std::fmt::Debug for MockExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockExtractor")
            .field("url_patterns", &self.url_patterns.len())
            .finish()
    }
}

impl ContentExtractor for MockExtractor {
    type Error = PipelineError;

    fn extract(&self, source: &Source) -> Result<ExtractedContent, Self::Error> {
        validate_source(source)?;
        match source {
            Source::Url(url) => Ok(self.from_url(url.trim())),
            Source::File { name } => source
                .extension()
                .and_then(|ext| file_article(&ext))
                .map(|article| article.to_content())
                .ok_or_else(|| PipelineError::UnsupportedFile(name.clone())),
        }
    }
}
