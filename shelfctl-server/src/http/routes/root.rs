//! Welcome endpoint

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

/// GET /
async fn welcome() -> Json<Value> {
    Json(json!({
        "Bienvenido": "API para el laboratorio de Cloud Computing"
    }))
}

/// Root routes
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(welcome))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn welcome_body() {
        let Json(body) = welcome().await;
        assert_eq!(
            body["Bienvenido"],
            "API para el laboratorio de Cloud Computing"
        );
    }
}
