//! Question Catalog
//!
//! Static in-memory question bank plus lookup helpers. Pure lookup with no
//! side effects; a fresh random subset is drawn on every call.

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Number of questions served per interview
pub const DEFAULT_QUESTION_COUNT: usize = 3;

/// An interview question. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub domain: String,
    pub category: String,
    pub text: String,
}

struct CatalogEntry {
    id: &'static str,
    domain: &'static str,
    category: &'static str,
    text: &'static str,
}

const CATALOG: &[CatalogEntry] = &[
    // AI/ML
    CatalogEntry {
        id: "aiml_t_1",
        domain: "aiml",
        category: "technical",
        text: "Explain the difference between supervised and unsupervised learning.",
    },
    CatalogEntry {
        id: "aiml_t_2",
        domain: "aiml",
        category: "technical",
        text: "How do you handle overfitting in a deep learning model?",
    },
    CatalogEntry {
        id: "aiml_h_1",
        domain: "aiml",
        category: "hr",
        text: "Why did you choose to specialize in AI/ML?",
    },
    CatalogEntry {
        id: "aiml_b_1",
        domain: "aiml",
        category: "behavioral",
        text: "Tell me about a time your model underperformed in production.",
    },
    CatalogEntry {
        id: "aiml_s_1",
        domain: "aiml",
        category: "situational",
        text: "If you have a highly imbalanced dataset, how would you approach building a classifier?",
    },
    // Web Developer
    CatalogEntry {
        id: "web_t_1",
        domain: "web_developer",
        category: "technical",
        text: "Explain the difference between SQL and NoSQL databases.",
    },
    CatalogEntry {
        id: "web_t_2",
        domain: "web_developer",
        category: "technical",
        text: "What are the core principles of RESTful APIs?",
    },
    // Frontend
    CatalogEntry {
        id: "fe_t_1",
        domain: "frontend",
        category: "technical",
        text: "How does the Virtual DOM work in React?",
    },
    CatalogEntry {
        id: "fe_s_1",
        domain: "frontend",
        category: "situational",
        text: "A user reports that your web app is completely unresponsive. What steps do you take to debug?",
    },
    // Backend
    CatalogEntry {
        id: "be_t_1",
        domain: "backend",
        category: "technical",
        text: "How do you ensure a distributed system handles high concurrency?",
    },
    CatalogEntry {
        id: "be_b_1",
        domain: "backend",
        category: "behavioral",
        text: "Tell me about a time you optimized a slow and complex database query. What was your approach?",
    },
];

/// Return up to `count` questions matching the exact domain+category pair.
///
/// The subset is sampled uniformly at random without replacement; order is
/// not reproducible between calls. An empty result means the caller should
/// substitute [`fallback_questions`].
pub fn get_questions(domain: &str, category: &str, count: usize) -> Vec<Question> {
    let mut filtered: Vec<Question> = CATALOG
        .iter()
        .filter(|q| q.domain == domain && q.category == category)
        .map(|q| Question {
            id: q.id.to_string(),
            domain: q.domain.to_string(),
            category: q.category.to_string(),
            text: q.text.to_string(),
        })
        .collect();

    filtered.shuffle(&mut rand::thread_rng());
    filtered.truncate(count);
    filtered
}

/// Exactly two synthetic questions templated with the given domain and
/// category, used when the catalog yields nothing for the pair.
pub fn fallback_questions(domain: &str, category: &str) -> Vec<Question> {
    vec![
        Question {
            id: format!("{domain}_{category}_fallback_1"),
            domain: domain.to_string(),
            category: category.to_string(),
            text: format!("Tell me about your experience related to {domain}?"),
        },
        Question {
            id: format!("{domain}_{category}_fallback_2"),
            domain: domain.to_string(),
            category: category.to_string(),
            text: format!("How do you handle difficult challenges in {category} situations?"),
        },
    ]
}
