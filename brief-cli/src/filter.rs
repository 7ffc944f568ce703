//! Keyword filter and domain quota.
//!
//! The filter decides whether an article is relevant at all; the classifier assigns it to
//! the first configured domain whose keywords it mentions, and the quota keeps any one
//! domain from crowding the digest.

use crate::error::{PipelineError, Result};
use crate::feed::Article;
use brief_config::{DomainConfig, KeywordMode};
use regex::{Regex, RegexBuilder};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Domain assigned to articles that match no configured domain. It is never capped.
pub const OTHER_DOMAIN: &str = "other";

/// Keywords from `path` (one per line, `#` comments), or `fallback` when the file is
/// missing or lists nothing.
pub fn load_keywords(path: Option<&Path>, fallback: &[String]) -> Result<Vec<String>> {
    let Some(path) = path.filter(|p| p.exists()) else {
        return Ok(fallback.to_vec());
    };
    let content = fs::read_to_string(path).map_err(|e| PipelineError::io(path, e))?;
    let keywords: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect();
    if keywords.is_empty() {
        Ok(fallback.to_vec())
    } else {
        Ok(keywords)
    }
}

fn is_plain_token(keyword: &str) -> bool {
    keyword
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '+' | '_' | '/' | '.'))
}

/// Case-insensitive matcher for one keyword. Plain ASCII tokens must stand as whole words
/// so that `BCI` does not fire inside `BCIS`.
pub fn keyword_pattern(keyword: &str) -> Result<Regex> {
    let escaped = regex::escape(keyword);
    let pattern = if is_plain_token(keyword) {
        format!(r"\b{escaped}\b")
    } else {
        escaped
    };
    Ok(RegexBuilder::new(&pattern).case_insensitive(true).build()?)
}

#[derive(Debug, Clone)]
pub struct KeywordFilter {
    keywords: Vec<(String, Regex)>,
    mode: KeywordMode,
    enabled: bool,
}

impl KeywordFilter {
    pub fn new(keywords: &[String], mode: KeywordMode) -> Result<Self> {
        let keywords = keywords
            .iter()
            .filter(|k| !k.trim().is_empty())
            .map(|k| -> Result<(String, Regex)> { Ok((k.clone(), keyword_pattern(k)?)) })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            keywords,
            mode,
            enabled: true,
        })
    }

    /// A filter that accepts every article.
    pub fn disabled() -> Self {
        Self {
            keywords: Vec::new(),
            mode: KeywordMode::Any,
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Keywords found in `text`, in configured order.
    pub fn hits(&self, text: &str) -> Vec<String> {
        self.keywords
            .iter()
            .filter(|(_, pattern)| pattern.is_match(text))
            .map(|(keyword, _)| keyword.clone())
            .collect()
    }

    /// Accept decision and the keywords that matched.
    pub fn matches(&self, article: &Article) -> (bool, Vec<String>) {
        if !self.enabled || self.keywords.is_empty() {
            return (true, Vec::new());
        }
        let hits = self.hits(&article.haystack());
        let accepted = match self.mode {
            KeywordMode::Any => !hits.is_empty(),
            KeywordMode::All => hits.len() == self.keywords.len(),
        };
        (accepted, hits)
    }
}

/// Ordered `(domain, keywords)` table; the first domain with a hit wins.
#[derive(Debug, Clone, Default)]
pub struct DomainClassifier {
    domains: Vec<(String, Vec<String>)>,
}

impl DomainClassifier {
    pub fn new(domains: &[DomainConfig]) -> Self {
        Self {
            domains: domains
                .iter()
                .map(|d| {
                    let keywords = d.keywords.iter().map(|k| k.to_lowercase()).collect();
                    (d.name.clone(), keywords)
                })
                .collect(),
        }
    }

    pub fn classify(&self, text: &str) -> &str {
        let lowered = text.to_lowercase();
        self.domains
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k.as_str())))
            .map(|(name, _)| name.as_str())
            .unwrap_or(OTHER_DOMAIN)
    }

    pub fn domain_names(&self) -> impl Iterator<Item = &str> {
        self.domains.iter().map(|(name, _)| name.as_str())
    }
}

/// Per-domain count of accepted articles.
#[derive(Debug, Clone)]
pub struct DomainQuota {
    max_per_domain: usize,
    capped: Vec<String>,
    counts: HashMap<String, usize>,
}

impl DomainQuota {
    pub fn new(max_per_domain: usize, classifier: &DomainClassifier) -> Self {
        Self {
            max_per_domain,
            capped: classifier.domain_names().map(String::from).collect(),
            counts: HashMap::new(),
        }
    }

    pub fn has_room(&self, domain: &str) -> bool {
        if !self.capped.iter().any(|d| d == domain) {
            return true;
        }
        self.count(domain) < self.max_per_domain
    }

    /// Count an accepted article against its domain.
    pub fn record(&mut self, domain: &str) {
        *self.counts.entry(domain.to_string()).or_insert(0) += 1;
    }

    pub fn count(&self, domain: &str) -> usize {
        self.counts.get(domain).copied().unwrap_or(0)
    }
}
