pub mod models;
pub mod routes;
pub mod store;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use serde_json::json;

use vitrine_kernel::{InitCtx, Module};

use store::CatalogStore;

/// Catalog module: products and their nested version records
pub struct CatalogModule {
    store: Arc<CatalogStore>,
}

impl CatalogModule {
    pub fn new() -> Self {
        Self {
            store: Arc::new(CatalogStore::new()),
        }
    }
}

impl Default for CatalogModule {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Module for CatalogModule {
    fn name(&self) -> &'static str {
        "catalog"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "catalog module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.store.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": {
                "/products": {
                    "get": {
                        "summary": "List products with their versions",
                        "tags": ["Catalog"],
                        "responses": {
                            "200": {
                                "description": "List of products",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": {
                                                "$ref": "#/components/schemas/Product"
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "post": {
                        "summary": "Create a product owned by the caller",
                        "tags": ["Catalog"],
                        "parameters": [
                            {
                                "name": "x-user-id",
                                "in": "header",
                                "required": true,
                                "schema": {"type": "string", "format": "uuid"}
                            }
                        ],
                        "requestBody": {
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "$ref": "#/components/schemas/CreateProduct"
                                    }
                                }
                            }
                        },
                        "responses": {
                            "201": {
                                "description": "Created product",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/Product"
                                        }
                                    }
                                }
                            },
                            "401": {
                                "description": "Missing caller identity",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            },
                            "422": {
                                "description": "Validation error",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
                "/products/{id}": {
                    "get": {
                        "summary": "Fetch a product",
                        "tags": ["Catalog"],
                        "parameters": [
                            {
                                "name": "id",
                                "in": "path",
                                "required": true,
                                "schema": {"type": "string", "format": "uuid"}
                            }
                        ],
                        "responses": {
                            "200": {
                                "description": "Product detail",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/Product"
                                        }
                                    }
                                }
                            },
                            "404": {
                                "description": "Product not found",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "put": {
                        "summary": "Update a product and replace its version set",
                        "tags": ["Catalog"],
                        "parameters": [
                            {
                                "name": "id",
                                "in": "path",
                                "required": true,
                                "schema": {"type": "string", "format": "uuid"}
                            }
                        ],
                        "requestBody": {
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "$ref": "#/components/schemas/UpdateProduct"
                                    }
                                }
                            }
                        },
                        "responses": {
                            "200": {
                                "description": "Updated product",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/Product"
                                        }
                                    }
                                }
                            },
                            "404": {
                                "description": "Product not found",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            },
                            "422": {
                                "description": "Validation error",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "delete": {
                        "summary": "Delete a product and its versions",
                        "tags": ["Catalog"],
                        "parameters": [
                            {
                                "name": "id",
                                "in": "path",
                                "required": true,
                                "schema": {"type": "string", "format": "uuid"}
                            }
                        ],
                        "responses": {
                            "204": {
                                "description": "Deleted"
                            },
                            "404": {
                                "description": "Product not found",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
                "/health": {
                    "get": {
                        "summary": "Catalog health check",
                        "tags": ["Catalog"],
                        "responses": {
                            "200": {
                                "description": "OK",
                                "content": {
                                    "text/plain": {
                                        "schema": {"type": "string"}
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Product": {
                        "type": "object",
                        "properties": {
                            "id": {
                                "type": "string",
                                "format": "uuid",
                                "description": "Unique identifier for the product"
                            },
                            "name": {
                                "type": "string",
                                "description": "Display name of the product"
                            },
                            "description": {
                                "type": "string",
                                "nullable": true,
                                "description": "Optional free-form description"
                            },
                            "owner": {
                                "type": "string",
                                "format": "uuid",
                                "description": "Identity of the user who created the product"
                            },
                            "versions": {
                                "type": "array",
                                "items": {
                                    "$ref": "#/components/schemas/Version"
                                }
                            }
                        },
                        "required": ["id", "name", "owner", "versions"]
                    },
                    "Version": {
                        "type": "object",
                        "properties": {
                            "id": {
                                "type": "string",
                                "format": "uuid"
                            },
                            "product_id": {
                                "type": "string",
                                "format": "uuid"
                            },
                            "name": {
                                "type": "string"
                            },
                            "number": {
                                "type": "string"
                            }
                        },
                        "required": ["id", "product_id", "name", "number"]
                    },
                    "CreateProduct": {
                        "type": "object",
                        "properties": {
                            "name": {"type": "string"},
                            "description": {"type": "string", "nullable": true}
                        },
                        "required": ["name"]
                    },
                    "UpdateProduct": {
                        "type": "object",
                        "properties": {
                            "name": {"type": "string"},
                            "description": {"type": "string", "nullable": true},
                            "versions": {
                                "type": "array",
                                "description": "Full replacement version set; omitted versions are deleted",
                                "items": {
                                    "type": "object",
                                    "properties": {
                                        "id": {"type": "string", "format": "uuid", "nullable": true},
                                        "name": {"type": "string"},
                                        "number": {"type": "string"}
                                    },
                                    "required": ["name", "number"]
                                }
                            }
                        },
                        "required": ["name"]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "catalog module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "catalog module stopped");
        Ok(())
    }
}

/// Create a new instance of the catalog module
pub fn create_module() -> Arc<dyn Module> {
    Arc::new(CatalogModule::new())
}
