use axum::response::Html;

const DASHBOARD: &str = include_str!("../dashboard.html");

/// `GET /`
pub async fn index() -> Html<&'static str> {
    Html(DASHBOARD)
}
