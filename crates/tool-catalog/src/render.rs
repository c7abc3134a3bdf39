/// HTML adapter over `CatalogEngine`.
///
/// Produces the sidebar, heading and tool grid fragments the catalog page is
/// assembled from. All catalog text is escaped; icons are fixed SVG markup.
use crate::engine::CatalogEngine;
use crate::model::ViewMode;
use crate::theme::Theme;

const EMPTY_TITLE: &str = "No tools found";
const EMPTY_HINT: &str = "Try another keyword or category";
const OPEN_LABEL: &str = "Open tool";

const GRID_ICON: &str = r#"<svg class="category-icon" width="20" height="20" viewBox="0 0 20 20" fill="none"><rect x="3" y="3" width="6" height="6" rx="1" stroke="currentColor" stroke-width="2"/><rect x="11" y="3" width="6" height="6" rx="1" stroke="currentColor" stroke-width="2"/><rect x="3" y="11" width="6" height="6" rx="1" stroke="currentColor" stroke-width="2"/><rect x="11" y="11" width="6" height="6" rx="1" stroke="currentColor" stroke-width="2"/></svg>"#;

/// SVG markup for a category icon name, `grid` when unknown.
pub fn category_icon(name: &str) -> &'static str {
    match name {
        "tool" => r#"<svg class="category-icon" width="20" height="20" viewBox="0 0 20 20" fill="none"><path d="M14.7 6.3a1 1 0 000 1.4l1.6 1.6a1 1 0 001.4 0l3.77-3.77a6 6 0 01-7.94 7.94l-6.91 6.91a2.12 2.12 0 01-3-3l6.91-6.91a6 6 0 017.94-7.94l-3.76 3.76z" stroke="currentColor" stroke-width="2"/></svg>"#,
        "calculator" => r#"<svg class="category-icon" width="20" height="20" viewBox="0 0 20 20" fill="none"><rect x="4" y="2" width="12" height="16" rx="2" stroke="currentColor" stroke-width="2"/><rect x="6" y="4" width="8" height="3" rx="1" stroke="currentColor" stroke-width="2"/><circle cx="7" cy="10" r="1" fill="currentColor"/><circle cx="10" cy="10" r="1" fill="currentColor"/><circle cx="13" cy="10" r="1" fill="currentColor"/><circle cx="7" cy="13" r="1" fill="currentColor"/><circle cx="10" cy="13" r="1" fill="currentColor"/><circle cx="13" cy="13" r="1" fill="currentColor"/></svg>"#,
        "palette" => r#"<svg class="category-icon" width="20" height="20" viewBox="0 0 20 20" fill="none"><path d="M12 2C6.48 2 2 6.48 2 12s4.48 10 10 10c1.54 0 3-1.46 3-3 0-.79-.31-1.53-.86-2.07-.54-.53-.86-1.26-.86-2.07 0-1.66 1.34-3 3-3h1.02C18.84 12 20 10.84 20 9.02 20 5.51 16.49 2 12 2z" stroke="currentColor" stroke-width="2"/><circle cx="6.5" cy="11.5" r="1.5" fill="currentColor"/><circle cx="9.5" cy="7.5" r="1.5" fill="currentColor"/><circle cx="14.5" cy="7.5" r="1.5" fill="currentColor"/></svg>"#,
        "code" => r#"<svg class="category-icon" width="20" height="20" viewBox="0 0 20 20" fill="none"><path d="M6 8l-4 4 4 4M14 8l4 4-4 4" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/></svg>"#,
        "gamepad" => r#"<svg class="category-icon" width="20" height="20" viewBox="0 0 20 20" fill="none"><path d="M6 10h4M8 8v4M14 9h.01M16 11h.01" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/><rect x="2" y="6" width="16" height="8" rx="4" stroke="currentColor" stroke-width="2"/></svg>"#,
        "image" => r#"<svg class="category-icon" width="20" height="20" viewBox="0 0 20 20" fill="none"><rect x="3" y="3" width="14" height="14" rx="2" stroke="currentColor" stroke-width="2"/><circle cx="8.5" cy="8.5" r="1.5" stroke="currentColor" stroke-width="2"/><path d="M17 13l-5-5L8 12" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/></svg>"#,
        "book" => r#"<svg class="category-icon" width="20" height="20" viewBox="0 0 20 20" fill="none"><path d="M2 3h6a4 4 0 014 4v9a3 3 0 00-3-3H2V3zM18 3h-6a4 4 0 00-4 4v9a3 3 0 013-3h7V3z" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/></svg>"#,
        "heart" => r#"<svg class="category-icon" width="20" height="20" viewBox="0 0 20 20" fill="none"><path d="M17.84 3.16a4.5 4.5 0 00-6.36 0L10 4.64l-1.48-1.48a4.5 4.5 0 00-6.36 6.36L10 17.36l7.84-7.84a4.5 4.5 0 000-6.36z" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/></svg>"#,
        "file-text" => r#"<svg class="category-icon" width="20" height="20" viewBox="0 0 20 20" fill="none"><path d="M14 2H6a2 2 0 00-2 2v12a2 2 0 002 2h8a2 2 0 002-2V4a2 2 0 00-2-2z" stroke="currentColor" stroke-width="2"/><path d="M9 9h6M9 13h6M9 17h3" stroke="currentColor" stroke-width="2" stroke-linecap="round"/></svg>"#,
        "zap" => r#"<svg class="category-icon" width="20" height="20" viewBox="0 0 20 20" fill="none"><polygon points="13,2 3,14 12,14 7,22 17,10 8,10" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/></svg>"#,
        "settings" => r#"<svg class="category-icon" width="20" height="20" viewBox="0 0 20 20" fill="none"><circle cx="10" cy="10" r="3" stroke="currentColor" stroke-width="2"/><path d="M19.4 15a1.65 1.65 0 00.33 1.82l.06.06a2 2 0 010 2.83 2 2 0 01-2.83 0l-.06-.06a1.65 1.65 0 00-1.82-.33 1.65 1.65 0 00-1 1.51V21a2 2 0 01-2 2 2 2 0 01-2-2v-.09A1.65 1.65 0 009 19.4a1.65 1.65 0 00-1.82.33l-.06.06a2 2 0 01-2.83 0 2 2 0 010-2.83l.06-.06a1.65 1.65 0 00.33-1.82 1.65 1.65 0 00-1.51-1H3a2 2 0 01-2-2 2 2 0 012-2h.09A1.65 1.65 0 004.6 9a1.65 1.65 0 00-.33-1.82l-.06-.06a2 2 0 010-2.83 2 2 0 012.83 0l.06.06a1.65 1.65 0 001.82.33H9a1.65 1.65 0 001-1.51V3a2 2 0 012-2 2 2 0 012 2v.09a1.65 1.65 0 001 1.51 1.65 1.65 0 001.82-.33l.06-.06a2 2 0 012.83 0 2 2 0 010 2.83l-.06.06a1.65 1.65 0 00-.33 1.82V9a1.65 1.65 0 001.51 1H21a2 2 0 012 2 2 2 0 01-2 2h-.09a1.65 1.65 0 00-1.51 1z" stroke="currentColor" stroke-width="2"/></svg>"#,
        "type" => r#"<svg class="category-icon" width="20" height="20" viewBox="0 0 20 20" fill="none"><polyline points="4,7 4,4 20,4 20,7" stroke="currentColor" stroke-width="2"/><line x1="9" y1="20" x2="15" y2="20" stroke="currentColor" stroke-width="2"/><line x1="12" y1="4" x2="12" y2="20" stroke="currentColor" stroke-width="2"/></svg>"#,
        "star" => r#"<svg class="category-icon" width="20" height="20" viewBox="0 0 20 20" fill="none"><path d="M10 1l3.09 6.26L20 8.27l-5 4.87 1.18 6.88L10 16.77l-6.18 3.25L5 13.14 0 8.27l6.91-1.01L10 1z" stroke="currentColor" stroke-width="2" stroke-linejoin="round"/></svg>"#,
        _ => GRID_ICON,
    }
}

pub fn render_categories(engine: &CatalogEngine) -> String {
    let counts = engine.visible_category_counts();
    let current = engine.state().current_category.as_str();

    let mut html = String::from("<ul class=\"category-list\">");
    for category in engine.categories() {
        let active = if category.id == current { " active" } else { "" };
        let count = counts.get(&category.id).copied().unwrap_or(0);
        html.push_str(&format!(
            "<li class=\"category-item{active}\" data-category=\"{id}\">\
             <a href=\"#\" class=\"category-link\">{icon}\
             <span class=\"category-name\">{name}</span>\
             <span class=\"category-count\" id=\"count-{id}\">{count}</span></a></li>",
            id = escape_html(&category.id),
            icon = category_icon(&category.icon),
            name = escape_html(&category.name),
            count = format_count(count),
        ));
    }
    html.push_str("</ul>");
    html
}

pub fn render_heading(engine: &CatalogEngine) -> String {
    let heading = engine.heading();
    format!(
        "<header class=\"content-header\"><h2 id=\"currentCategoryTitle\">{}</h2>\
         <p id=\"currentCategorySubtitle\">{}</p></header>",
        escape_html(&heading.title),
        escape_html(&heading.subtitle),
    )
}

/// Tool cards in visible order, or the empty-state block when nothing matches.
pub fn render_tools(engine: &CatalogEngine) -> String {
    let tools = engine.visible_tools();
    if tools.is_empty() {
        return format!(
            "<div class=\"empty-state\" id=\"emptyState\"><h3>{EMPTY_TITLE}</h3><p>{EMPTY_HINT}</p></div>"
        );
    }

    let class = match engine.state().current_view {
        ViewMode::Grid => "tools-grid",
        ViewMode::List => "tools-grid list-view",
    };
    let mut html = format!("<div class=\"{class}\" id=\"toolsGrid\">");
    for tool in tools {
        let tags: String = tool
            .tags
            .iter()
            .map(|tag| format!("<span class=\"card-tag\">{}</span>", escape_html(tag)))
            .collect();
        html.push_str(&format!(
            "<div class=\"tool-card\" data-tool-id=\"{id}\" data-url=\"{url}\">\
             <div class=\"card-icon\">{icon}</div>\
             <h3 class=\"card-title\">{name}</h3>\
             <p class=\"card-description\">{description}</p>\
             <div class=\"card-tags\">{tags}</div>\
             <button class=\"card-action\">{OPEN_LABEL}</button></div>",
            id = tool.id,
            url = escape_html(&tool.url),
            icon = escape_html(&tool.icon),
            name = escape_html(&tool.name),
            description = escape_html(&tool.description),
        ));
    }
    html.push_str("</div>");
    html
}

pub fn render_page(engine: &CatalogEngine, theme: Theme) -> String {
    format!(
        "<div class=\"catalog\" data-theme=\"{theme}\">\
         <aside class=\"sidebar\">{}</aside>\
         <main class=\"content\">{}{}</main></div>",
        render_categories(engine),
        render_heading(engine),
        render_tools(engine),
    )
}

/// Abbreviate large counts: 999, 1.2K, 3.4M.
pub fn format_count(n: usize) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
