//! Server-rendered pages mounted under `/app`.

use axum::{extract::State, response::Html, routing::get, Router};
use sqlx::PgPool;

use crate::config::AppConfig;
use crate::error::AppResult;
use crate::models::ActivityLog;
use crate::services::HobbyService;

/// Values every page header shows.
#[derive(Debug, Clone)]
pub struct PageContext {
    pub version: String,
    pub title: String,
    pub app_name: String,
}

impl PageContext {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            version: config.version.clone(),
            title: config.api_title.clone(),
            app_name: config.app_name.clone(),
        }
    }
}

#[derive(Clone)]
pub struct FrontendState {
    pub context: PageContext,
    pub hobby_service: HobbyService,
}

pub fn frontend_routes(db: PgPool, config: &AppConfig) -> Router {
    let shared_state = FrontendState {
        context: PageContext::from_config(config),
        hobby_service: HobbyService::new(db),
    };

    Router::new()
        .route("/", get(home))
        .route("/diario", get(diario))
        .with_state(shared_state)
}

pub async fn home(State(state): State<FrontendState>) -> Html<String> {
    let body = r#"<p>Track goals, health logs and hobbies.</p>
<ul>
  <li><a href="/app/diario">Diario</a></li>
  <li><a href="/docs">API docs</a></li>
</ul>"#;

    Html(render_layout(&state.context, "Home", body))
}

pub async fn diario(State(state): State<FrontendState>) -> AppResult<Html<String>> {
    let entries = state.hobby_service.get_activity_log().await?;
    let body = render_activity_table(entries);

    Ok(Html(render_layout(&state.context, "Diario", &body)))
}

pub fn render_layout(context: &PageContext, page: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <title>{app_name} | {page}</title>
</head>
<body>
  <header>
    <h1>{app_name}</h1>
    <nav><a href="/app">Home</a> | <a href="/app/diario">Diario</a></nav>
  </header>
  <main>
    <h2>{page}</h2>
{body}
  </main>
  <footer>{title} v{version}</footer>
</body>
</html>
"#,
        app_name = escape_html(&context.app_name),
        page = escape_html(page),
        title = escape_html(&context.title),
        version = escape_html(&context.version),
        body = body,
    )
}

/// Activity log as a table, oldest entry first.
pub fn render_activity_table(mut entries: Vec<ActivityLog>) -> String {
    if entries.is_empty() {
        return "<p>No activities logged yet.</p>".to_string();
    }

    entries.sort_by(|a, b| a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)));

    let rows: String = entries
        .iter()
        .map(|entry| {
            format!(
                "      <tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                entry.date.format("%Y-%m-%d"),
                escape_html(&entry.title),
                entry.category.as_str(),
                entry.rating
            )
        })
        .collect();

    format!(
        "<table>\n    <thead><tr><th>Date</th><th>Title</th><th>Category</th><th>Rating</th></tr></thead>\n    <tbody>\n{}    </tbody>\n</table>",
        rows
    )
}

pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
