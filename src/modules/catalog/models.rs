use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vitrine_db::Record;

/// Catalog product.
///
/// `owner` is stamped from the caller identity at creation time and never
/// changes afterwards; any owner value in a submitted body is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub owner: Uuid,
}

impl Record for Product {
    const ENTITY: &'static str = "product";

    fn id(&self) -> Uuid {
        self.id
    }
}

/// Version row owned by a product.
///
/// Versions are created, updated, and deleted only through their parent
/// product's update operation, and are removed with the parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Version {
    pub id: Uuid,
    pub product_id: Uuid,
    pub name: String,
    pub number: String,
}

impl Record for Version {
    const ENTITY: &'static str = "version";

    fn id(&self) -> Uuid {
        self.id
    }
}

/// Product together with its versions, as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub versions: Vec<Version>,
}

/// Request model for creating a product
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Request model for updating a product and its version set
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Full replacement child set. Omitting the field leaves versions untouched.
    #[serde(default)]
    pub versions: Option<Vec<VersionRow>>,
}

/// One row of the nested version editor.
///
/// Rows carrying an `id` update the existing version; rows without one create
/// a new version. Existing versions not resubmitted are deleted.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionRow {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub name: String,
    pub number: String,
}
