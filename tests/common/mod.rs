#![allow(dead_code)]

pub mod schemas {
    use brrtcontract::schema::SchemaShape;
    use serde_json::json;

    /// Object schema with one required string property
    pub fn string_field(name: &str) -> SchemaShape {
        SchemaShape::object([(name, json!({"type": "string"}))]).with_required([name])
    }

    pub fn id_params() -> SchemaShape {
        string_field("id")
    }

    pub fn post() -> SchemaShape {
        SchemaShape::object([
            ("id", json!({"type": "string", "readOnly": true})),
            ("title", json!({"type": "string"})),
            ("token", json!({"type": "string", "writeOnly": true})),
        ])
        .with_required(["id", "title"])
    }
}

pub mod fixtures {
    use std::path::PathBuf;

    pub fn fixture_path(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("fixtures")
            .join(name)
    }
}

pub mod trees {
    use super::schemas::{id_params, post, string_field};
    use brrtcontract::contract::ContractNode;
    use brrtcontract::tree::RouteGroup;
    use http::Method;

    /// `posts` (prefix `/posts`, `x-api-version`) containing `comments`
    /// (prefix `/comments`, `x-request-id`), plus a top-level `health`
    pub fn blog_tree() -> RouteGroup {
        let comments = RouteGroup::new()
            .with_path_prefix("/comments")
            .with_shared_headers(string_field("x-request-id"))
            .route(
                "createOne",
                ContractNode::new(Method::POST, "/")
                    .headers(string_field("x-idempotency-key"))
                    .body(string_field("text"))
                    .response(201, string_field("id")),
            )
            .route(
                "list",
                ContractNode::new(Method::GET, "/").response(200, string_field("id")),
            );

        let posts = RouteGroup::new()
            .with_path_prefix("/posts")
            .with_shared_headers(string_field("x-api-version"))
            .route(
                "getOne",
                ContractNode::new(Method::GET, "/{id}")
                    .path_params(id_params())
                    .response(200, post())
                    .summary("Fetch one post"),
            )
            .route(
                "createOne",
                ContractNode::new(Method::POST, "/")
                    .body(post())
                    .response(201, post()),
            )
            .route("comments", comments);

        RouteGroup::new().route("posts", posts).route(
            "health",
            ContractNode::new(Method::GET, "/health").response(200, string_field("status")),
        )
    }
}
