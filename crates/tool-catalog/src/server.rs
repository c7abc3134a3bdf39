/// MCP server over the tool catalog engine.
///
/// Each tool call is one UI event: it mutates the engine state (if at all)
/// and returns the freshly derived view. Calls run to completion under the
/// state lock, so two mutations never interleave.
use std::sync::Arc;

use rmcp::{
    Json, ServerHandler,
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::*,
    tool, tool_handler, tool_router,
};
use tokio::sync::RwLock;
use tracing::info;

use crate::cache::CatalogCache;
use crate::engine::CatalogEngine;
use crate::model::{SortMode, ToolRecord, ViewMode};
use crate::parser::Catalog;
use crate::render;
use crate::theme::ThemeStore;
use catalog_common::mcp_api::{
    BrowseToolsParams, CatalogInfoResponse, CatalogViewResponse, CategoryInfo,
    CategoryListResponse, OpenToolResponse, RenderResponse, SearchToolsParams, SetCategoryParams,
    SetSortModeParams, SetViewParams, ThemeResponse, ToolDetailResponse, ToolIdParams,
    ToolSummary,
};

/// Load-time facts reported by `catalog_info`.
#[derive(Debug, Clone)]
pub struct LoadInfo {
    pub source: String,
    pub changed_since_last_run: bool,
}

#[derive(Clone)]
pub struct ToolCatalogServer {
    engine: Arc<RwLock<CatalogEngine>>,
    theme: Arc<ThemeStore>,
    load_info: LoadInfo,
    tool_router: ToolRouter<ToolCatalogServer>,
}

impl ToolCatalogServer {
    pub fn new(catalog: Catalog, cache: Arc<CatalogCache>, load_info: LoadInfo) -> Self {
        Self {
            engine: Arc::new(RwLock::new(CatalogEngine::new(catalog))),
            theme: Arc::new(ThemeStore::new(cache)),
            load_info,
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_router]
impl ToolCatalogServer {
    #[tool(description = "List tool categories with counts for the current search. The 'all' count reflects the selected category and search; every other count reflects the search only.")]
    async fn list_categories(&self) -> Result<Json<CategoryListResponse>, String> {
        let engine = self.engine.read().await;
        let counts = engine.visible_category_counts();
        let current = engine.state().current_category.as_str();

        let categories = engine
            .categories()
            .iter()
            .map(|c| CategoryInfo {
                id: c.id.clone(),
                name: c.name.clone(),
                icon: c.icon.clone(),
                count: counts.get(&c.id).copied().unwrap_or(0),
                active: c.id == current,
            })
            .collect();

        Ok(Json(CategoryListResponse { categories }))
    }

    #[tool(description = "Browse the tool catalog. Optionally set category, search query, sort mode and view in one call, then return the visible tools.")]
    async fn browse_tools(
        &self,
        Parameters(params): Parameters<BrowseToolsParams>,
    ) -> Result<Json<CatalogViewResponse>, String> {
        // Parse everything first so a bad value leaves the state untouched.
        let sort = params.sort.as_deref().map(str::parse::<SortMode>).transpose()?;
        let view = params.view.as_deref().map(str::parse::<ViewMode>).transpose()?;

        let mut engine = self.engine.write().await;
        if let Some(category) = params.category.as_deref() {
            engine.set_category(category.trim());
        }
        if let Some(query) = params.query.as_deref() {
            engine.set_search_query(query);
        }
        if let Some(sort) = sort {
            engine.set_sort_mode(sort);
        }
        if let Some(view) = view {
            engine.set_view(view);
        }
        Ok(Json(to_view_response(&engine)))
    }

    #[tool(description = "Select a category ('all' for every tool) and return the visible tools. Unknown categories yield an empty list.")]
    async fn set_category(
        &self,
        Parameters(params): Parameters<SetCategoryParams>,
    ) -> Result<Json<CatalogViewResponse>, String> {
        let mut engine = self.engine.write().await;
        engine.set_category(params.category.trim());
        Ok(Json(to_view_response(&engine)))
    }

    #[tool(description = "Filter tools by a case-insensitive substring of name, description or any tag. An empty query clears the filter.")]
    async fn search_tools(
        &self,
        Parameters(params): Parameters<SearchToolsParams>,
    ) -> Result<Json<CatalogViewResponse>, String> {
        let mut engine = self.engine.write().await;
        engine.set_search_query(&params.query);
        Ok(Json(to_view_response(&engine)))
    }

    #[tool(description = "Clear the search filter and return the visible tools.")]
    async fn clear_search(&self) -> Result<Json<CatalogViewResponse>, String> {
        let mut engine = self.engine.write().await;
        engine.clear_search();
        Ok(Json(to_view_response(&engine)))
    }

    #[tool(description = "Set the sort mode: 'default' (catalog order), 'name', 'category' or 'popular'.")]
    async fn set_sort_mode(
        &self,
        Parameters(params): Parameters<SetSortModeParams>,
    ) -> Result<Json<CatalogViewResponse>, String> {
        let mode: SortMode = params.sort.parse()?;
        let mut engine = self.engine.write().await;
        engine.set_sort_mode(mode);
        Ok(Json(to_view_response(&engine)))
    }

    #[tool(description = "Set the display mode: 'grid' or 'list'. Does not change which tools are visible.")]
    async fn set_view(
        &self,
        Parameters(params): Parameters<SetViewParams>,
    ) -> Result<Json<CatalogViewResponse>, String> {
        let view: ViewMode = params.view.parse()?;
        let mut engine = self.engine.write().await;
        engine.set_view(view);
        Ok(Json(to_view_response(&engine)))
    }

    #[tool(description = "Get the full record of a tool by its numeric id.")]
    async fn get_tool(
        &self,
        Parameters(params): Parameters<ToolIdParams>,
    ) -> Result<Json<ToolDetailResponse>, String> {
        let engine = self.engine.read().await;
        let tool = engine
            .tool(params.id)
            .ok_or_else(|| format!("tool not found: {}", params.id))?;
        Ok(Json(to_detail(tool)))
    }

    #[tool(description = "Resolve how to open a tool page: its URL in a new browsing context with no reference back to the catalog. The page is not fetched.")]
    async fn open_tool(
        &self,
        Parameters(params): Parameters<ToolIdParams>,
    ) -> Result<Json<OpenToolResponse>, String> {
        let engine = self.engine.read().await;
        let target = engine
            .open_target(params.id)
            .ok_or_else(|| format!("tool not found: {}", params.id))?;
        Ok(Json(OpenToolResponse {
            id: target.id,
            url: target.url,
            target: target.target.to_string(),
            features: target.features.to_string(),
        }))
    }

    #[tool(description = "Render the catalog page (sidebar, heading, tool cards or empty state) as HTML for the current state and theme.")]
    async fn render_catalog(&self) -> Result<Json<RenderResponse>, String> {
        let theme = self.theme.current().await;
        let engine = self.engine.read().await;
        Ok(Json(RenderResponse {
            html: render::render_page(&engine, theme),
        }))
    }

    #[tool(description = "Toggle between the light and dark theme. The choice is persisted.")]
    async fn toggle_theme(&self) -> Result<Json<ThemeResponse>, String> {
        let theme = self.theme.toggle().await;
        info!(theme = %theme, "theme changed");
        Ok(Json(ThemeResponse {
            theme: theme.to_string(),
        }))
    }

    #[tool(description = "Report where the catalog was loaded from, its content fingerprint, and tool/category counts.")]
    async fn catalog_info(&self) -> Result<Json<CatalogInfoResponse>, String> {
        let engine = self.engine.read().await;
        let catalog = engine.catalog();
        Ok(Json(CatalogInfoResponse {
            source: self.load_info.source.clone(),
            fingerprint: catalog.fingerprint.clone(),
            changed_since_last_run: self.load_info.changed_since_last_run,
            tool_count: catalog.tools.len(),
            category_count: catalog.categories.len(),
        }))
    }
}

fn to_view_response(engine: &CatalogEngine) -> CatalogViewResponse {
    let state = engine.state();
    let heading = engine.heading();
    let tools: Vec<ToolSummary> = engine.visible_tools().into_iter().map(to_summary).collect();
    CatalogViewResponse {
        category: state.current_category.clone(),
        query: state.search.as_str().to_string(),
        sort: state.sort_by.to_string(),
        view: state.current_view.to_string(),
        title: heading.title,
        subtitle: heading.subtitle,
        empty: engine.is_empty_view(),
        tools,
    }
}

fn to_summary(tool: &ToolRecord) -> ToolSummary {
    ToolSummary {
        id: tool.id,
        name: tool.name.clone(),
        description: tool.description.clone(),
        category: tool.category.clone(),
        tags: tool.tags.clone(),
        icon: tool.icon.clone(),
        url: tool.url.clone(),
    }
}

fn to_detail(tool: &ToolRecord) -> ToolDetailResponse {
    ToolDetailResponse {
        id: tool.id,
        name: tool.name.clone(),
        description: tool.description.clone(),
        category: tool.category.clone(),
        tags: tool.tags.clone(),
        icon: tool.icon.clone(),
        url: tool.url.clone(),
        is_local: tool.is_local,
        is_original: tool.is_original,
        is_migrated: tool.is_migrated,
        popular: tool.popular,
        priority: tool.priority,
        complexity: tool.complexity,
    }
}

#[tool_handler]
impl ServerHandler for ToolCatalogServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            server_info: Implementation {
                name: "tool-catalog".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Tool catalog MCP server. Browses a catalog of standalone web mini-tools \
                 (calculators, converters, games, generators). Use list_categories to see \
                 buckets, browse_tools or set_category/search_tools/set_sort_mode to narrow \
                 the visible set, get_tool for details, open_tool for the page address, and \
                 render_catalog for the HTML view."
                    .to_string(),
            ),
        }
    }
}
