use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Reserved category id that matches every tool.
pub const ALL_CATEGORY: &str = "all";

/// One cataloged mini-tool (a standalone page opened in a new browsing context).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolRecord {
    /// Unique positive id, the only key used for rendering and open dispatch.
    pub id: u32,
    pub name: String,
    pub description: String,
    /// Category id, e.g. "utility", "games".
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Single glyph shown as the card badge.
    pub icon: String,
    /// Relative or absolute address of the tool page.
    pub url: String,
    #[serde(default)]
    pub is_local: bool,
    #[serde(default)]
    pub is_original: bool,
    #[serde(default)]
    pub is_migrated: bool,
    /// Consumed only by `SortMode::Popular`.
    #[serde(default)]
    pub popular: bool,
    /// Offline analysis score in [1, 10].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    /// Offline analysis score in [1, 10].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity: Option<u8>,
}

/// One filter bucket in the sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub id: String,
    pub name: String,
    /// Icon name resolved by `render::category_icon`.
    pub icon: String,
    /// Number of tools in this category at load time (total for "all").
    pub count: usize,
}

/// Display label for a category, as declared in the catalog file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryLabel {
    pub id: String,
    pub name: String,
    #[serde(default = "default_icon")]
    pub icon: String,
}

/// On-disk catalog layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default = "default_all_label")]
    pub all_label: String,
    #[serde(default)]
    pub categories: Vec<CategoryLabel>,
    pub tools: Vec<ToolRecord>,
}

pub fn default_icon() -> String {
    "grid".to_string()
}

pub fn default_all_label() -> String {
    "All tools".to_string()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Catalog insertion order.
    #[default]
    Default,
    Name,
    Category,
    Popular,
}

impl SortMode {
    pub const ALL: [SortMode; 4] = [
        SortMode::Default,
        SortMode::Name,
        SortMode::Category,
        SortMode::Popular,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortMode::Default => "default",
            SortMode::Name => "name",
            SortMode::Category => "category",
            SortMode::Popular => "popular",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        SortMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                format!("unknown sort mode: '{wanted}'. Valid modes: default, name, category, popular")
            })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Grid => "grid",
            ViewMode::List => "list",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "grid" => Ok(ViewMode::Grid),
            "list" => Ok(ViewMode::List),
            other => Err(format!("unknown view: '{other}'. Valid views: grid, list")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_record_reads_camel_case_flags() {
        let json = r#"{
            "id": 16,
            "name": "JSON格式化",
            "description": "JSON美化、压缩、验证工具",
            "category": "utility",
            "tags": ["JSON", "格式化"],
            "icon": "J",
            "url": "./tools/json-formatter/",
            "isLocal": true,
            "isOriginal": true
        }"#;
        let tool: ToolRecord = serde_json::from_str(json).expect("valid record");
        assert_eq!(tool.id, 16);
        assert!(tool.is_local);
        assert!(tool.is_original);
        assert!(!tool.is_migrated);
        assert!(!tool.popular);
        assert_eq!(tool.priority, None);
    }

    #[test]
    fn sort_mode_parses_case_insensitively() {
        assert_eq!("name".parse::<SortMode>(), Ok(SortMode::Name));
        assert_eq!(" Popular ".parse::<SortMode>(), Ok(SortMode::Popular));
        assert!("newest".parse::<SortMode>().is_err());
        assert_eq!(SortMode::default(), SortMode::Default);
    }

    #[test]
    fn view_mode_parses() {
        assert_eq!("LIST".parse::<ViewMode>(), Ok(ViewMode::List));
        assert!("table".parse::<ViewMode>().is_err());
        assert_eq!(ViewMode::default().to_string(), "grid");
    }
}
