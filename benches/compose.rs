use brrtcontract::compose::{define_router_contract, ComposeOptions};
use brrtcontract::contract::ContractNode;
use brrtcontract::schema::{ObjectSchemaMerger, SchemaShape};
use brrtcontract::tree::RouteGroup;
use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use http::Method;
use serde_json::json;
use std::hint::black_box;

fn header(name: &str) -> SchemaShape {
    SchemaShape::object([(name, json!({"type": "string"}))]).with_required([name])
}

fn resource(name: &str) -> RouteGroup {
    let id = SchemaShape::object([("id", json!({"type": "string"}))]).with_required(["id"]);
    let item = SchemaShape::object([
        ("id", json!({"type": "string", "readOnly": true})),
        ("name", json!({"type": "string"})),
    ]);
    RouteGroup::new()
        .with_path_prefix(format!("/{name}"))
        .with_shared_headers(header("x-api-version"))
        .route("list", ContractNode::new(Method::GET, "/").response(200, item.clone()))
        .route(
            "getOne",
            ContractNode::new(Method::GET, "/{id}")
                .path_params(id.clone())
                .response(200, item.clone()),
        )
        .route(
            "createOne",
            ContractNode::new(Method::POST, "/")
                .headers(header("x-idempotency-key"))
                .body(item.clone())
                .response(201, item.clone()),
        )
        .route(
            "deleteOne",
            ContractNode::new(Method::DELETE, "/{id}").path_params(id),
        )
}

// 3 levels, 4 resources per level, 4 endpoints per resource
fn example_tree() -> RouteGroup {
    let mut root = RouteGroup::new();
    for outer in ["posts", "users", "orgs", "teams"] {
        let mut group = resource(outer);
        for inner in ["comments", "tags", "members", "audits"] {
            let mut nested = resource(inner);
            for leaf in ["replies", "votes", "flags", "edits"] {
                nested.insert(leaf, resource(leaf));
            }
            group.insert(inner, nested);
        }
        root.insert(outer, group);
    }
    root
}

fn options() -> ComposeOptions {
    ComposeOptions::new()
        .path_prefix("/api/v1")
        .shared_headers(header("x-tenant-id"))
        .merger(ObjectSchemaMerger)
}

fn bench_compose(c: &mut Criterion) {
    c.bench_function("define_router_contract", |b| {
        b.iter_batched(
            example_tree,
            |tree| black_box(define_router_contract(tree, options())),
            BatchSize::SmallInput,
        )
    });

    let contract = define_router_contract(example_tree(), options()).expect("compose bench tree");
    c.bench_function("lookup_projection", |b| b.iter(|| black_box(contract.lookup())));

    let lookup = contract.lookup();
    c.bench_function("dot_path_get", |b| {
        let paths = ["posts.getOne", "users.members.createOne", "teams.audits.edits.deleteOne"];
        b.iter(|| {
            for path in paths {
                black_box(lookup.get(path).ok());
            }
        })
    });
}

criterion_group!(benches, bench_compose);
criterion_main!(benches);
