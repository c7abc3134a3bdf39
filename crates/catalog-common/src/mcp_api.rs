use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct BrowseToolsParams {
    /// Category id to filter by ("all" matches every tool). Unchanged when omitted.
    pub category: Option<String>,
    /// Case-insensitive substring matched against name, description and tags.
    /// An empty string clears the search. Unchanged when omitted.
    pub query: Option<String>,
    /// Sort mode: "default", "name", "category" or "popular". Unchanged when omitted.
    pub sort: Option<String>,
    /// Display mode: "grid" or "list". Unchanged when omitted.
    pub view: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SetCategoryParams {
    /// Category id such as "utility" or "games"; "all" removes the filter.
    pub category: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchToolsParams {
    /// The search text. Surrounding whitespace is ignored; empty clears the filter.
    pub query: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SetSortModeParams {
    /// One of "default", "name", "category", "popular".
    pub sort: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SetViewParams {
    /// One of "grid", "list".
    pub view: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ToolIdParams {
    /// Numeric tool id as shown in listings.
    pub id: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ToolSummary {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub category: String,
    pub tags: Vec<String>,
    pub icon: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ToolDetailResponse {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub category: String,
    pub tags: Vec<String>,
    pub icon: String,
    pub url: String,
    pub is_local: bool,
    pub is_original: bool,
    pub is_migrated: bool,
    pub popular: bool,
    pub priority: Option<u8>,
    pub complexity: Option<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CategoryInfo {
    pub id: String,
    pub name: String,
    pub icon: String,
    /// Count for the current search state (see `list_categories`).
    pub count: usize,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CategoryListResponse {
    pub categories: Vec<CategoryInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CatalogViewResponse {
    pub category: String,
    pub query: String,
    pub sort: String,
    pub view: String,
    pub title: String,
    pub subtitle: String,
    /// True when no tool matches; render an explicit empty state.
    pub empty: bool,
    pub tools: Vec<ToolSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct OpenToolResponse {
    pub id: u32,
    pub url: String,
    /// Browsing context to open in; always a fresh one.
    pub target: String,
    /// Window features; the opened page gets no reference back to the catalog.
    pub features: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RenderResponse {
    pub html: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ThemeResponse {
    pub theme: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CatalogInfoResponse {
    /// "bundled" or the path of the catalog file.
    pub source: String,
    /// SHA-256 of the raw catalog bytes, hex encoded. Empty when loading failed.
    pub fingerprint: String,
    pub changed_since_last_run: bool,
    pub tool_count: usize,
    pub category_count: usize,
}
