/// Free-text tool filter.
///
/// A query matches a tool when its lowercased form is a substring of the
/// lowercased name, description, or any single tag. No tokenization, no fuzzy
/// matching: "qr generator" does not match "QR Code Generator" tagged "qr" and
/// "generator".
use crate::model::ToolRecord;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    /// Trimmed user input, as displayed back in headings.
    text: String,
    needle: String,
}

impl SearchQuery {
    pub fn new(raw: &str) -> Self {
        let text = raw.trim().to_string();
        let needle = text.to_lowercase();
        Self { text, needle }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_active(&self) -> bool {
        !self.needle.is_empty()
    }

    /// An inactive query matches every tool.
    pub fn matches(&self, tool: &ToolRecord) -> bool {
        if !self.is_active() {
            return true;
        }
        contains(&tool.name, &self.needle)
            || contains(&tool.description, &self.needle)
            || tool.tags.iter().any(|tag| contains(tag, &self.needle))
    }
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tool(name: &str, description: &str, tags: &[&str]) -> ToolRecord {
        ToolRecord {
            id: 1,
            name: name.to_string(),
            description: description.to_string(),
            category: "utility".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            icon: "T".to_string(),
            url: "./tools/t/".to_string(),
            is_local: true,
            is_original: false,
            is_migrated: false,
            popular: false,
            priority: None,
            complexity: None,
        }
    }

    #[test]
    fn query_is_trimmed_and_case_insensitive() {
        let query = SearchQuery::new("  json ");
        assert_eq!(query.as_str(), "json");
        assert!(query.matches(&tool("JSON格式化", "美化", &[])));
        assert!(query.matches(&tool("格式化", "美化", &["JSON"])));
        assert!(!query.matches(&tool("颜色选择器", "调色板", &["颜色"])));
    }

    #[test]
    fn any_field_is_enough() {
        let query = SearchQuery::new("generator");
        assert!(query.matches(&tool("QR", "", &["qr", "generator"])));
        assert!(query.matches(&tool("QR", "A code generator", &[])));
        assert!(query.matches(&tool("Password Generator", "", &[])));
    }

    #[test]
    fn no_tokenization() {
        let query = SearchQuery::new("qr generator");
        assert!(!query.matches(&tool("QR Code Generator", "", &["qr", "generator"])));
    }

    #[test]
    fn blank_query_is_inactive_and_matches_everything() {
        let query = SearchQuery::new("   ");
        assert!(!query.is_active());
        assert!(query.matches(&tool("anything", "", &[])));
    }
}
