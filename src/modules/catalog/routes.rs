use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use uuid::Uuid;

use vitrine_http::error::AppError;
use vitrine_http::identity::CurrentUser;

use super::models::{CreateProductRequest, Product, ProductDetail, UpdateProductRequest, VersionRow};
use super::store::{CatalogError, CatalogStore};

/// Build the catalog router backed by the given store
pub fn router(store: Arc<CatalogStore>) -> Router {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/health", get(health_check))
        .with_state(store)
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Store(e) => e.into(),
            CatalogError::ForeignVersion {
                version_id,
                product_id,
            } => AppError::validation(
                vec![json!({
                    "field": "versions",
                    "error": format!("version {version_id} does not belong to product {product_id}"),
                })],
                "version rows must belong to the product being updated",
            ),
        }
    }
}

fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    raw.parse()
        .map_err(|_| AppError::bad_request(format!("'{raw}' is not a valid product id")))
}

fn validate_product(name: &str, versions: Option<&[VersionRow]>) -> Result<(), AppError> {
    let mut details = Vec::new();

    if name.trim().is_empty() {
        details.push(json!({"field": "name", "error": "required"}));
    }
    if let Some(rows) = versions {
        for (index, row) in rows.iter().enumerate() {
            if row.name.trim().is_empty() {
                details.push(json!({
                    "field": format!("versions[{index}].name"),
                    "error": "required",
                }));
            }
            if row.number.trim().is_empty() {
                details.push(json!({
                    "field": format!("versions[{index}].number"),
                    "error": "required",
                }));
            }
        }
    }

    if details.is_empty() {
        Ok(())
    } else {
        Err(AppError::validation(
            details,
            "product submission failed validation",
        ))
    }
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "catalog module is healthy"
}

/// List all products with their versions
async fn list_products(State(store): State<Arc<CatalogStore>>) -> Json<Vec<ProductDetail>> {
    Json(store.list_products())
}

/// Create a product, stamping the owner from the caller identity
async fn create_product(
    State(store): State<Arc<CatalogStore>>,
    CurrentUser(owner): CurrentUser,
    Json(body): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductDetail>), AppError> {
    validate_product(&body.name, None)?;

    let detail = store.create_product(Product {
        id: Uuid::now_v7(),
        name: body.name,
        description: body.description,
        owner,
    });

    tracing::info!(product = %detail.product.id, owner = %owner, "product created");
    Ok((StatusCode::CREATED, Json(detail)))
}

/// Fetch a product with its versions
async fn get_product(
    State(store): State<Arc<CatalogStore>>,
    Path(raw): Path<String>,
) -> Result<Json<ProductDetail>, AppError> {
    let id = parse_id(&raw)?;
    Ok(Json(store.get_product(id)?))
}

/// Update a product and reconcile its version set
async fn update_product(
    State(store): State<Arc<CatalogStore>>,
    Path(raw): Path<String>,
    Json(body): Json<UpdateProductRequest>,
) -> Result<Json<ProductDetail>, AppError> {
    let id = parse_id(&raw)?;
    validate_product(&body.name, body.versions.as_deref())?;

    let detail = store.update_product(id, body.name, body.description, body.versions)?;

    tracing::info!(product = %id, "product updated");
    Ok(Json(detail))
}

/// Delete a product, cascading to its versions
async fn delete_product(
    State(store): State<Arc<CatalogStore>>,
    Path(raw): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&raw)?;
    store.delete_product(id)?;

    tracing::info!(product = %id, "product deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request};
    use tower::ServiceExt;
    use vitrine_http::identity::USER_ID_HEADER;

    fn test_router() -> Router {
        router(Arc::new(CatalogStore::new()))
    }

    fn json_request(
        method: &str,
        uri: &str,
        user: Option<Uuid>,
        body: serde_json::Value,
    ) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(user) = user {
            builder = builder.header(USER_ID_HEADER, user.to_string());
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn read_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        }
    }

    #[tokio::test]
    async fn create_stamps_owner_from_caller_not_body() {
        let app = test_router();
        let caller = Uuid::now_v7();
        let impostor = Uuid::now_v7();

        let response = app
            .oneshot(json_request(
                "POST",
                "/products",
                Some(caller),
                json!({"name": "pikachu", "owner": impostor}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = read_json(response).await;
        assert_eq!(body["owner"], json!(caller.to_string()));
        assert_eq!(body["name"], json!("pikachu"));
        assert_eq!(body["versions"], json!([]));
    }

    #[tokio::test]
    async fn create_without_identity_is_unauthorized() {
        let response = test_router()
            .oneshot(json_request(
                "POST",
                "/products",
                None,
                json!({"name": "pikachu"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn create_with_blank_name_fails_validation() {
        let response = test_router()
            .oneshot(json_request(
                "POST",
                "/products",
                Some(Uuid::now_v7()),
                json!({"name": "   "}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = read_json(response).await;
        assert_eq!(body["error"]["details"][0]["field"], json!("name"));
    }

    #[tokio::test]
    async fn detail_of_unknown_product_is_not_found() {
        let uri = format!("/products/{}", Uuid::now_v7());
        let response = test_router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn malformed_product_id_is_bad_request() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/products/nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn update_reconciles_versions_and_invalid_rows_block_the_save() {
        let app = test_router();
        let caller = Uuid::now_v7();

        let created = read_json(
            app.clone()
                .oneshot(json_request(
                    "POST",
                    "/products",
                    Some(caller),
                    json!({"name": "eevee"}),
                ))
                .await
                .unwrap(),
        )
        .await;
        let id = created["id"].as_str().unwrap().to_string();

        // Seed two versions.
        let seeded = read_json(
            app.clone()
                .oneshot(json_request(
                    "PUT",
                    &format!("/products/{id}"),
                    None,
                    json!({
                        "name": "eevee",
                        "versions": [
                            {"name": "red", "number": "1"},
                            {"name": "blue", "number": "2"},
                        ],
                    }),
                ))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(seeded["versions"].as_array().unwrap().len(), 2);
        let kept = seeded["versions"][0]["id"].clone();
        let omitted = seeded["versions"][1]["id"].clone();

        // A blank child row fails validation and nothing changes.
        let rejected = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/products/{id}"),
                None,
                json!({
                    "name": "renamed",
                    "versions": [{"name": "", "number": "3"}],
                }),
            ))
            .await
            .unwrap();
        assert_eq!(rejected.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let unchanged = read_json(
            app.clone()
                .oneshot(
                    Request::builder()
                        .uri(format!("/products/{id}"))
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(unchanged["name"], json!("eevee"));
        assert_eq!(unchanged["versions"].as_array().unwrap().len(), 2);

        // Resubmit one row with an edit, omit the other, add a new one.
        let updated = read_json(
            app.clone()
                .oneshot(json_request(
                    "PUT",
                    &format!("/products/{id}"),
                    None,
                    json!({
                        "name": "eevee",
                        "versions": [
                            {"id": kept, "name": "crimson", "number": "1"},
                            {"name": "yellow", "number": "3"},
                        ],
                    }),
                ))
                .await
                .unwrap(),
        )
        .await;

        let versions = updated["versions"].as_array().unwrap();
        assert_eq!(versions.len(), 2);
        assert!(versions.iter().all(|v| v["id"] != omitted));
        assert!(versions
            .iter()
            .any(|v| v["id"] == kept && v["name"] == json!("crimson")));
        assert!(versions.iter().any(|v| v["name"] == json!("yellow")));
    }

    #[tokio::test]
    async fn delete_removes_product_and_later_detail_is_not_found() {
        let app = test_router();

        let created = read_json(
            app.clone()
                .oneshot(json_request(
                    "POST",
                    "/products",
                    Some(Uuid::now_v7()),
                    json!({"name": "mew"}),
                ))
                .await
                .unwrap(),
        )
        .await;
        let id = created["id"].as_str().unwrap().to_string();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/products/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/products/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn list_returns_all_products() {
        let app = test_router();
        let caller = Uuid::now_v7();

        for name in ["one", "two", "three"] {
            let response = app
                .clone()
                .oneshot(json_request(
                    "POST",
                    "/products",
                    Some(caller),
                    json!({"name": name}),
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let body = read_json(
            app.oneshot(
                Request::builder()
                    .uri("/products")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap(),
        )
        .await;
        assert_eq!(body.as_array().unwrap().len(), 3);
    }
}
