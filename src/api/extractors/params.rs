//! Path and query extractors that keep rejections in the uniform
//! `{ "message": ... }` error body.
//!
//! Axum's default `Path`/`Query` rejections are plain-text responses;
//! these wrappers route them through `AppError` instead, the same way
//! `ValidatedJson` does for request bodies.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::errors::AppError;

/// `Path` wrapper with the application error body on rejection.
pub struct PathParam<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for PathParam<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        Ok(PathParam(value))
    }
}

/// `Query` wrapper with the application error body on rejection.
pub struct QueryParam<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for QueryParam<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        Ok(QueryParam(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        routing::get,
        Router,
    };
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::types::PageRequest;

    async fn by_id(PathParam(id): PathParam<Uuid>) -> String {
        id.to_string()
    }

    async fn paged(QueryParam(page): QueryParam<PageRequest>) -> String {
        format!("{}/{}", page.page, page.size)
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn invalid_uuid_gets_uniform_error_body() {
        let app = Router::new().route("/places/:id", get(by_id));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/places/not-a-uuid")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body.get("message").is_some());
    }

    #[tokio::test]
    async fn malformed_page_query_gets_uniform_error_body() {
        let app = Router::new().route("/places", get(paged));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/places?page=abc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body.get("message").is_some());
    }

    #[tokio::test]
    async fn well_formed_params_pass_through() {
        let app = Router::new().route("/places", get(paged));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/places?page=2&size=5")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
