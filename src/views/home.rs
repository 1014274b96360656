use askama::Template;
use axum::response::Html;

use crate::error::AppError;

#[derive(Template)]
#[template(path = "base/home.html")]
struct HomeTemplate;

/// The static landing page.
pub async fn index() -> Result<Html<String>, AppError> {
    HomeTemplate
        .render()
        .map(Html)
        .map_err(|e| AppError::Internal(format!("Failed to render home page: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn renders_home_markup() {
        let Html(body) = index().await.unwrap();
        assert!(body.contains("<h1>Home</h1>"));
    }
}
