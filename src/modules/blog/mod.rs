pub mod models;
pub mod routes;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use serde_json::json;

use vitrine_db::Table;
use vitrine_kernel::{InitCtx, Module};

use models::Blog;

/// Blog module: posts with publish gating and view counting
pub struct BlogModule {
    posts: Arc<Table<Blog>>,
}

impl BlogModule {
    pub fn new() -> Self {
        Self {
            posts: Arc::new(Table::new()),
        }
    }
}

impl Default for BlogModule {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Module for BlogModule {
    fn name(&self) -> &'static str {
        "blog"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "blog module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.posts.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": {
                "/posts": {
                    "get": {
                        "summary": "List published blog posts",
                        "tags": ["Blog"],
                        "responses": {
                            "200": {
                                "description": "Published posts only; drafts are excluded",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": {
                                                "$ref": "#/components/schemas/BlogPost"
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "post": {
                        "summary": "Create a blog post",
                        "tags": ["Blog"],
                        "requestBody": {
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "$ref": "#/components/schemas/CreateBlogPost"
                                    }
                                }
                            }
                        },
                        "responses": {
                            "201": {
                                "description": "Created post with derived slug",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/BlogPost"
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
                "/posts/{id}": {
                    "get": {
                        "summary": "Fetch a blog post, incrementing its view counter",
                        "tags": ["Blog"],
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
                                "description": "The post, including unpublished drafts",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/BlogPost"
                                        }
                                    }
                                }
                            },
                            "404": {
                                "description": "Post not found",
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
                        "summary": "Update a blog post's content, recomputing the slug",
                        "tags": ["Blog"],
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
                                        "$ref": "#/components/schemas/UpdateBlogPost"
                                    }
                                }
                            }
                        },
                        "responses": {
                            "200": {
                                "description": "Updated post",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/BlogPost"
                                        }
                                    }
                                }
                            },
                            "404": {
                                "description": "Post not found",
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
                        "summary": "Delete a blog post",
                        "tags": ["Blog"],
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
                                "description": "Post not found",
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
                        "summary": "Blog health check",
                        "tags": ["Blog"],
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
                    "BlogPost": {
                        "type": "object",
                        "properties": {
                            "id": {
                                "type": "string",
                                "format": "uuid"
                            },
                            "title": {
                                "type": "string"
                            },
                            "slug": {
                                "type": "string",
                                "description": "URL-safe identifier derived from the title"
                            },
                            "preview": {
                                "type": "string"
                            },
                            "body": {
                                "type": "string"
                            },
                            "is_published": {
                                "type": "boolean",
                                "description": "Gates visibility in the list view only"
                            },
                            "created_at": {
                                "type": "string",
                                "format": "date-time"
                            },
                            "views_count": {
                                "type": "integer",
                                "description": "Incremented once per detail fetch"
                            }
                        },
                        "required": ["id", "title", "slug", "is_published", "created_at", "views_count"]
                    },
                    "CreateBlogPost": {
                        "type": "object",
                        "properties": {
                            "title": {"type": "string"},
                            "preview": {"type": "string"},
                            "body": {"type": "string"},
                            "is_published": {"type": "boolean", "default": false},
                            "created_at": {"type": "string", "format": "date-time"}
                        },
                        "required": ["title"]
                    },
                    "UpdateBlogPost": {
                        "type": "object",
                        "properties": {
                            "title": {"type": "string"},
                            "preview": {"type": "string"},
                            "body": {"type": "string"}
                        },
                        "required": ["title"]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "blog module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "blog module stopped");
        Ok(())
    }
}

/// Create a new instance of the blog module
pub fn create_module() -> Arc<dyn Module> {
    Arc::new(BlogModule::new())
}
