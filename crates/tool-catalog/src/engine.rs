/// Catalog engine: single-owner UI state plus the pure view derivations over it.
///
/// Every setter replaces one field of `UiState`; every getter recomputes from
/// the catalog and the current state. Adapters (HTML renderer, MCP server)
/// read `visible_tools` / `visible_category_counts` and never touch the
/// catalog directly.
use std::cmp::Ordering;
use std::collections::BTreeMap;

use icu_collator::options::CollatorOptions;
use icu_collator::{Collator, CollatorBorrowed};
use tracing::{debug, info, warn};

use crate::model::{CategoryRecord, SortMode, ToolRecord, ViewMode, ALL_CATEGORY};
use crate::parser::Catalog;
use crate::search::SearchQuery;

const ALL_TAGLINE: &str = "Discover the latest handy tools";
const OPEN_TARGET: &str = "_blank";
const OPEN_FEATURES: &str = "noopener,noreferrer";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    pub current_category: String,
    pub search: SearchQuery,
    pub sort_by: SortMode,
    pub current_view: ViewMode,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            current_category: ALL_CATEGORY.to_string(),
            search: SearchQuery::default(),
            sort_by: SortMode::Default,
            current_view: ViewMode::Grid,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub title: String,
    pub subtitle: String,
}

/// How to open a tool page: a fresh browsing context with no opener reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenTarget {
    pub id: u32,
    pub url: String,
    pub target: &'static str,
    pub features: &'static str,
}

#[derive(Debug, Clone)]
pub struct CatalogEngine {
    catalog: Catalog,
    state: UiState,
}

impl CatalogEngine {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            state: UiState::default(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn categories(&self) -> &[CategoryRecord] {
        &self.catalog.categories
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    /// Not validated: an unknown id simply yields an empty view.
    pub fn set_category(&mut self, id: &str) {
        debug!(category = id, "category selected");
        self.state.current_category = id.to_string();
    }

    pub fn set_search_query(&mut self, raw: &str) {
        self.state.search = SearchQuery::new(raw);
        debug!(query = self.state.search.as_str(), "search updated");
    }

    pub fn clear_search(&mut self) {
        self.state.search = SearchQuery::default();
    }

    pub fn set_sort_mode(&mut self, mode: SortMode) {
        self.state.sort_by = mode;
    }

    pub fn set_view(&mut self, view: ViewMode) {
        self.state.current_view = view;
    }

    /// Category filter, then search filter, then sort.
    pub fn visible_tools(&self) -> Vec<&ToolRecord> {
        let category = self.state.current_category.as_str();
        let mut tools: Vec<&ToolRecord> = self
            .catalog
            .tools
            .iter()
            .filter(|t| category == ALL_CATEGORY || t.category == category)
            .filter(|t| self.state.search.matches(t))
            .collect();
        sort_tools(&mut tools, self.state.sort_by);
        tools
    }

    pub fn is_empty_view(&self) -> bool {
        self.visible_tools().is_empty()
    }

    /// Sidebar counts for the current state.
    ///
    /// Every real category counts its tools that pass the search, ignoring the
    /// selected category. `all` counts the visible set, so it does honor the
    /// selected category.
    pub fn visible_category_counts(&self) -> BTreeMap<String, usize> {
        self.catalog
            .categories
            .iter()
            .map(|category| {
                let count = if category.id == ALL_CATEGORY {
                    self.visible_tools().len()
                } else if !self.state.search.is_active() {
                    category.count
                } else {
                    self.catalog
                        .tools
                        .iter()
                        .filter(|t| t.category == category.id && self.state.search.matches(t))
                        .count()
                };
                (category.id.clone(), count)
            })
            .collect()
    }

    pub fn heading(&self) -> Heading {
        let id = self.state.current_category.as_str();
        let category = self.catalog.category(id);
        let name = category.map(|c| c.name.as_str()).unwrap_or(id);

        if self.state.search.is_active() {
            return Heading {
                title: format!("Search results: \"{}\"", self.state.search.as_str()),
                subtitle: format!("Found {} in {name}", tool_count(self.visible_tools().len())),
            };
        }

        let subtitle = if id == ALL_CATEGORY {
            ALL_TAGLINE.to_string()
        } else {
            tool_count(category.map(|c| c.count).unwrap_or(0))
        };
        Heading {
            title: name.to_string(),
            subtitle,
        }
    }

    pub fn tool(&self, id: u32) -> Option<&ToolRecord> {
        self.catalog.tools.iter().find(|t| t.id == id)
    }

    /// Resolve how to open a tool. The page itself is never fetched.
    pub fn open_target(&self, id: u32) -> Option<OpenTarget> {
        let tool = self.tool(id)?;
        info!(tool_id = tool.id, name = %tool.name, url = %tool.url, "opening tool");
        Some(OpenTarget {
            id: tool.id,
            url: tool.url.clone(),
            target: OPEN_TARGET,
            features: OPEN_FEATURES,
        })
    }
}

fn tool_count(n: usize) -> String {
    if n == 1 {
        "1 tool".to_string()
    } else {
        format!("{n} tools")
    }
}

/// Stable sort: tools that compare equal keep their catalog order.
pub fn sort_tools(tools: &mut [&ToolRecord], mode: SortMode) {
    match mode {
        SortMode::Default => {}
        SortMode::Name => {
            let collator = name_collator();
            tools.sort_by(|a, b| compare_names(collator.as_ref(), &a.name, &b.name));
        }
        SortMode::Category => tools.sort_by(|a, b| a.category.cmp(&b.category)),
        SortMode::Popular => tools.sort_by_key(|t| !t.popular),
    }
}

/// Root-locale collator over the baked Unicode data.
fn name_collator() -> Option<CollatorBorrowed<'static>> {
    Collator::try_new(Default::default(), CollatorOptions::default())
        .inspect_err(|e| warn!(error = %e, "collator unavailable, names compare case-insensitively"))
        .ok()
}

fn compare_names(collator: Option<&CollatorBorrowed<'_>>, a: &str, b: &str) -> Ordering {
    match collator {
        Some(collator) => collator.compare(a, b),
        None => a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b)),
    }
}
