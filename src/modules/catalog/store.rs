use std::collections::{BTreeMap, HashSet};

use thiserror::Error;
use uuid::Uuid;
use vitrine_db::{Record, Store, StoreError};

use super::models::{Product, ProductDetail, Version, VersionRow};

/// Catalog persistence errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("version {version_id} does not belong to product {product_id}")]
    ForeignVersion {
        version_id: Uuid,
        product_id: Uuid,
    },
}

#[derive(Debug, Default)]
struct CatalogState {
    products: BTreeMap<Uuid, Product>,
    versions: BTreeMap<Uuid, Version>,
}

/// Store for products and their versions.
///
/// Both entity maps live in one [`Store`] state, so parent+children mutations
/// (the nested version reconcile, the cascade delete) happen under a single
/// write lock and never interleave with other requests.
#[derive(Debug, Default)]
pub struct CatalogStore {
    state: Store<CatalogState>,
}

impl CatalogStore {
    /// Create an empty catalog store
    pub fn new() -> Self {
        Self {
            state: Store::new(),
        }
    }

    fn detail(state: &CatalogState, id: Uuid) -> Option<ProductDetail> {
        let product = state.products.get(&id)?.clone();
        let versions = state
            .versions
            .values()
            .filter(|version| version.product_id == id)
            .cloned()
            .collect();
        Some(ProductDetail { product, versions })
    }

    /// List all products with their versions
    pub fn list_products(&self) -> Vec<ProductDetail> {
        self.state.read(|state| {
            state
                .products
                .keys()
                .filter_map(|id| Self::detail(state, *id))
                .collect()
        })
    }

    /// Fetch a product with its versions by primary key
    pub fn get_product(&self, id: Uuid) -> Result<ProductDetail, StoreError> {
        self.state.read(|state| {
            Self::detail(state, id).ok_or_else(|| StoreError::not_found(Product::ENTITY, id))
        })
    }

    /// Persist a freshly created product
    pub fn create_product(&self, product: Product) -> ProductDetail {
        let stored = product.clone();
        self.state.write(|state| {
            state.products.insert(product.id, product);
        });
        tracing::debug!(product = %stored.id, "product created");
        ProductDetail {
            product: stored,
            versions: Vec::new(),
        }
    }

    /// Update a product and, when `versions` is present, replace its full
    /// version set.
    ///
    /// Resubmitted rows (with an id) are updated in place, rows without an id
    /// are created, and previously existing versions omitted from the
    /// submission are deleted. Rows referencing versions that do not belong to
    /// this product fail the whole operation before anything is written.
    pub fn update_product(
        &self,
        id: Uuid,
        name: String,
        description: Option<String>,
        versions: Option<Vec<VersionRow>>,
    ) -> Result<ProductDetail, CatalogError> {
        self.state.write(|state| {
            if !state.products.contains_key(&id) {
                return Err(StoreError::not_found(Product::ENTITY, id).into());
            }

            // Check every resubmitted row before touching anything.
            if let Some(rows) = versions.as_deref() {
                for row in rows {
                    if let Some(version_id) = row.id {
                        let owned = state
                            .versions
                            .get(&version_id)
                            .is_some_and(|version| version.product_id == id);
                        if !owned {
                            return Err(CatalogError::ForeignVersion {
                                version_id,
                                product_id: id,
                            });
                        }
                    }
                }
            }

            if let Some(product) = state.products.get_mut(&id) {
                product.name = name;
                product.description = description;
            }

            if let Some(rows) = versions {
                let resubmitted: HashSet<Uuid> = rows.iter().filter_map(|row| row.id).collect();
                state
                    .versions
                    .retain(|_, version| version.product_id != id || resubmitted.contains(&version.id));

                for row in rows {
                    match row.id {
                        Some(version_id) => {
                            if let Some(version) = state.versions.get_mut(&version_id) {
                                version.name = row.name;
                                version.number = row.number;
                            }
                        }
                        None => {
                            let version = Version {
                                id: Uuid::now_v7(),
                                product_id: id,
                                name: row.name,
                                number: row.number,
                            };
                            state.versions.insert(version.id, version);
                        }
                    }
                }
            }

            tracing::debug!(product = %id, "product updated");
            Self::detail(state, id)
                .ok_or_else(|| StoreError::not_found(Product::ENTITY, id).into())
        })
    }

    /// Delete a product and all versions referencing it
    pub fn delete_product(&self, id: Uuid) -> Result<(), StoreError> {
        self.state.write(|state| {
            if state.products.remove(&id).is_none() {
                return Err(StoreError::not_found(Product::ENTITY, id));
            }
            let before = state.versions.len();
            state.versions.retain(|_, version| version.product_id != id);

            tracing::debug!(
                product = %id,
                cascaded = before - state.versions.len(),
                "product deleted"
            );
            Ok(())
        })
    }
}
