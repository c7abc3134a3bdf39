use std::collections::{HashMap, HashSet};

use sha2::{Digest, Sha256};
use tracing::{info, warn};

use crate::config::CatalogSource;
use crate::error::AppError;
use crate::model::{
    default_all_label, default_icon, CatalogFile, CategoryLabel, CategoryRecord, ToolRecord,
    ALL_CATEGORY,
};

const BUNDLED_CATALOG: &str = include_str!("../data/catalog.json");
const SCORE_RANGE: std::ops::RangeInclusive<u8> = 1..=10;

/// The loaded, read-only catalog: tools in insertion order plus derived categories.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub tools: Vec<ToolRecord>,
    /// `all` first, then one record per distinct tool category.
    pub categories: Vec<CategoryRecord>,
    /// Hex SHA-256 of the raw catalog bytes; empty for the fallback catalog.
    pub fingerprint: String,
}

impl Catalog {
    /// Zero tools and a single `all` bucket with count 0.
    pub fn empty() -> Self {
        Self {
            tools: Vec::new(),
            categories: derive_categories(&[], &[], &default_all_label()),
            fingerprint: String::new(),
        }
    }

    pub fn load(source: &CatalogSource) -> Result<Self, AppError> {
        match source {
            CatalogSource::Bundled => Self::parse(BUNDLED_CATALOG),
            CatalogSource::File(path) => {
                let content = std::fs::read_to_string(path).map_err(|source| AppError::Load {
                    path: path.display().to_string(),
                    source,
                })?;
                Self::parse(&content)
            }
        }
    }

    /// Load the catalog, substituting the empty catalog on any failure so callers
    /// always get a renderable state.
    pub fn load_or_empty(source: &CatalogSource) -> Self {
        match Self::load(source) {
            Ok(catalog) => {
                info!(
                    source = %source.describe(),
                    tools = catalog.tools.len(),
                    categories = catalog.categories.len(),
                    "catalog loaded"
                );
                catalog
            }
            Err(e) => {
                warn!(error = %e, source = %source.describe(), "catalog load failed, using empty catalog");
                Self::empty()
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self, AppError> {
        let file: CatalogFile = serde_json::from_str(content)?;
        validate_tools(&file.tools)?;
        let categories = derive_categories(&file.tools, &file.categories, &file.all_label);
        Ok(Self {
            tools: file.tools,
            categories,
            fingerprint: fingerprint(content.as_bytes()),
        })
    }

    #[cfg(test)]
    pub fn from_tools(tools: Vec<ToolRecord>) -> Result<Self, AppError> {
        validate_tools(&tools)?;
        let categories = derive_categories(&tools, &[], &default_all_label());
        Ok(Self {
            tools,
            categories,
            fingerprint: String::new(),
        })
    }

    pub fn category(&self, id: &str) -> Option<&CategoryRecord> {
        self.categories.iter().find(|c| c.id == id)
    }
}

/// Count tools per category and prepend `all`.
///
/// Labeled categories follow the label table order; unlabeled ones come after,
/// in order of first appearance, showing their id and the default icon. Labels
/// for categories without tools are dropped.
pub fn derive_categories(
    tools: &[ToolRecord],
    labels: &[CategoryLabel],
    all_label: &str,
) -> Vec<CategoryRecord> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut unlabeled: Vec<&str> = Vec::new();
    for tool in tools {
        let category = tool.category.as_str();
        let count = counts.entry(category).or_insert(0);
        if *count == 0 && !labels.iter().any(|l| l.id == category) {
            unlabeled.push(category);
        }
        *count += 1;
    }

    let mut categories = vec![CategoryRecord {
        id: ALL_CATEGORY.to_string(),
        name: all_label.to_string(),
        icon: default_icon(),
        count: tools.len(),
    }];

    let mut seen = HashSet::new();
    for label in labels {
        let Some(&count) = counts.get(label.id.as_str()) else {
            continue;
        };
        if !seen.insert(label.id.as_str()) {
            continue;
        }
        categories.push(CategoryRecord {
            id: label.id.clone(),
            name: label.name.clone(),
            icon: label.icon.clone(),
            count,
        });
    }
    categories.extend(unlabeled.into_iter().map(|id| CategoryRecord {
        id: id.to_string(),
        name: id.to_string(),
        icon: default_icon(),
        count: counts[id],
    }));

    categories
}

fn validate_tools(tools: &[ToolRecord]) -> Result<(), AppError> {
    let mut seen = HashSet::with_capacity(tools.len());
    for tool in tools {
        if tool.id == 0 {
            return Err(AppError::InvalidRecord {
                id: tool.id,
                message: "id must be positive".to_string(),
            });
        }
        if !seen.insert(tool.id) {
            return Err(AppError::DuplicateId(tool.id));
        }
        if tool.category == ALL_CATEGORY {
            return Err(AppError::InvalidRecord {
                id: tool.id,
                message: format!("category '{ALL_CATEGORY}' is reserved"),
            });
        }
        for (field, score) in [("priority", tool.priority), ("complexity", tool.complexity)] {
            if let Some(value) = score.filter(|v| !SCORE_RANGE.contains(v)) {
                return Err(AppError::InvalidRecord {
                    id: tool.id,
                    message: format!("{field} {value} outside 1..=10"),
                });
            }
        }
    }
    Ok(())
}

pub fn fingerprint(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog_json(tools: &str) -> String {
        format!(
            r#"{{
                "all_label": "全部工具",
                "categories": [
                    {{ "id": "utility", "name": "实用工具", "icon": "tool" }},
                    {{ "id": "games", "name": "游戏娱乐", "icon": "gamepad" }},
                    {{ "id": "pdf", "name": "PDF工具", "icon": "file-text" }}
                ],
                "tools": [{tools}]
            }}"#
        )
    }

    fn tool_json(id: u32, category: &str) -> String {
        format!(
            r#"{{ "id": {id}, "name": "tool {id}", "description": "d", "category": "{category}",
                 "tags": [], "icon": "T", "url": "./tools/t{id}/" }}"#
        )
    }

    #[test]
    fn parse_orders_categories_by_label_table() {
        let tools = [
            tool_json(1, "games"),
            tool_json(2, "utility"),
            tool_json(3, "games"),
            tool_json(4, "misc"),
        ]
        .join(",");
        let catalog = Catalog::parse(&catalog_json(&tools)).expect("parse should succeed");

        let ids: Vec<&str> = catalog.categories.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["all", "utility", "games", "misc"]);

        let all = catalog.category("all").expect("all present");
        assert_eq!(all.count, 4);
        assert_eq!(all.name, "全部工具");

        let games = catalog.category("games").expect("games present");
        assert_eq!(games.count, 2);
        assert_eq!(games.name, "游戏娱乐");
        assert_eq!(games.icon, "gamepad");

        let misc = catalog.category("misc").expect("unlabeled category present");
        assert_eq!(misc.name, "misc");
        assert_eq!(misc.icon, "grid");

        assert!(catalog.category("pdf").is_none(), "labels without tools are dropped");
        assert_eq!(catalog.fingerprint.len(), 64);
    }

    #[test]
    fn unlabeled_categories_keep_first_appearance_order() {
        let tools = [
            tool_json(1, "zeta"),
            tool_json(2, "pdf"),
            tool_json(3, "alpha"),
            tool_json(4, "zeta"),
        ]
        .join(",");
        let catalog = Catalog::parse(&catalog_json(&tools)).expect("parse should succeed");

        let ids: Vec<&str> = catalog.categories.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["all", "pdf", "zeta", "alpha"]);
        assert_eq!(catalog.category("zeta").map(|c| c.count), Some(2));
    }

    #[test]
    fn bundled_sidebar_follows_label_order() {
        let file: CatalogFile = serde_json::from_str(BUNDLED_CATALOG).expect("bundled json");
        let catalog = Catalog::load(&CatalogSource::Bundled).expect("bundled catalog parses");

        let labeled: Vec<&str> = file
            .categories
            .iter()
            .map(|l| l.id.as_str())
            .filter(|id| catalog.category(id).is_some())
            .collect();
        let derived: Vec<&str> = catalog.categories[1..=labeled.len()]
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(derived, labeled);
        assert_eq!(catalog.categories.last().map(|c| c.id.as_str()), Some("others"));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let tools = [tool_json(7, "games"), tool_json(7, "utility")].join(",");
        let err = Catalog::parse(&catalog_json(&tools)).unwrap_err();
        assert!(matches!(err, AppError::DuplicateId(7)));
    }

    #[test]
    fn scores_outside_range_are_rejected() {
        let tools = r#"{ "id": 9, "name": "n", "description": "d", "category": "games",
                         "icon": "T", "url": "u", "priority": 11 }"#;
        let err = Catalog::parse(&catalog_json(tools)).unwrap_err();
        assert!(matches!(err, AppError::InvalidRecord { id: 9, .. }));
    }

    #[test]
    fn reserved_category_is_rejected() {
        let err = Catalog::parse(&catalog_json(&tool_json(3, "all"))).unwrap_err();
        assert!(matches!(err, AppError::InvalidRecord { id: 3, .. }));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(Catalog::parse("{ not json"), Err(AppError::Json(_))));
    }

    #[test]
    fn load_failure_falls_back_to_empty_catalog() {
        let source = CatalogSource::File("/nonexistent/catalog.json".into());
        let catalog = Catalog::load_or_empty(&source);
        assert!(catalog.tools.is_empty());
        assert_eq!(catalog.categories.len(), 1);
        assert_eq!(catalog.categories[0].id, ALL_CATEGORY);
        assert_eq!(catalog.categories[0].count, 0);
    }

    #[test]
    fn bundled_catalog_is_consistent() {
        let catalog = Catalog::load(&CatalogSource::Bundled).expect("bundled catalog parses");
        assert!(catalog.tools.len() > 20);

        let mut ids = HashSet::new();
        for tool in &catalog.tools {
            assert!(ids.insert(tool.id), "duplicate id {}", tool.id);
        }

        for category in &catalog.categories {
            let expected = if category.id == ALL_CATEGORY {
                catalog.tools.len()
            } else {
                catalog.tools.iter().filter(|t| t.category == category.id).count()
            };
            assert_eq!(category.count, expected, "count for {}", category.id);
        }
    }

    #[test]
    fn fingerprint_is_stable() {
        assert_eq!(fingerprint(b"abc"), fingerprint(b"abc"));
        assert_ne!(fingerprint(b"abc"), fingerprint(b"abd"));
    }
}
