use serde::{Deserialize, Serialize};

/// Section cues recognized by the heading normalizer and the segmenter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRules {
    /// Section names that are promoted to level-2 headings when a line starts with them
    pub level2_sections: Vec<String>,

    /// Heading label that opens a learning-path section (`## <label>`)
    pub learning_path_label: String,
}

impl SectionRules {
    pub fn new(level2_sections: Vec<String>, learning_path_label: impl Into<String>) -> Self {
        Self {
            level2_sections,
            learning_path_label: learning_path_label.into(),
        }
    }

    /// Returns the configured section name that `text` starts with, if any.
    pub fn matching_section(&self, text: &str) -> Option<&str> {
        self.level2_sections
            .iter()
            .map(String::as_str)
            .find(|name| !name.is_empty() && text.starts_with(name))
    }

    /// Whether `line` is the learning-path heading cue (`## <label>...`).
    pub fn is_learning_path_heading(&self, line: &str) -> bool {
        line.strip_prefix("## ")
            .is_some_and(|rest| rest.starts_with(self.learning_path_label.as_str()))
    }
}

impl Default for SectionRules {
    fn default() -> Self {
        Self {
            level2_sections: ["摘要", "導讀", "學習路徑", "原文連結"]
                .into_iter()
                .map(String::from)
                .collect(),
            learning_path_label: "學習路徑".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules() {
        let rules = SectionRules::default();
        assert_eq!(rules.level2_sections.len(), 4);
        assert_eq!(rules.learning_path_label, "學習路徑");
    }

    #[test]
    fn test_matching_section_is_prefix_and_case_sensitive() {
        let rules = SectionRules::new(vec!["Summary".to_string()], "Path");
        assert_eq!(rules.matching_section("Summary of findings"), Some("Summary"));
        assert_eq!(rules.matching_section("summary"), None);
        assert_eq!(rules.matching_section("The Summary"), None);
    }

    #[test]
    fn test_learning_path_heading_requires_level_two_prefix() {
        let rules = SectionRules::default();
        assert!(rules.is_learning_path_heading("## 學習路徑"));
        assert!(rules.is_learning_path_heading("## 學習路徑（知識地圖）"));
        assert!(!rules.is_learning_path_heading("# 學習路徑"));
        assert!(!rules.is_learning_path_heading("學習路徑"));
    }
}
