use crate::schema::StandardSchema;
use http::Method;
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::ser::{self, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::marker::PhantomData;

/// Header slot of an endpoint at the type level: [`NoHeaders`] or [`Headers<S>`]
pub trait HeaderSlot {
    /// Schema of the slot; `()` when absent
    type Schema: StandardSchema;
    /// Whether a composed runtime route must carry a header schema
    const PRESENT: bool;
}

/// No header schema, neither declared nor inherited
pub struct NoHeaders;

/// A header schema `S`
pub struct Headers<S>(PhantomData<fn() -> S>);

impl HeaderSlot for NoHeaders {
    type Schema = ();
    const PRESENT: bool = false;
}

impl<S: StandardSchema> HeaderSlot for Headers<S> {
    type Schema = S;
    const PRESENT: bool = true;
}

/// Type-level header merge: `Self` is inherited, `C` is declared locally
///
/// | inherited     | local         | result                      |
/// |---------------|---------------|-----------------------------|
/// | `NoHeaders`   | `NoHeaders`   | `NoHeaders`                 |
/// | `NoHeaders`   | `Headers<C>`  | `Headers<C>`                |
/// | `Headers<P>`  | `NoHeaders`   | `Headers<P>`                |
/// | `Headers<P>`  | `Headers<C>`  | `Headers<Merge<P, C>>`      |
pub trait MergeHeaders<C: HeaderSlot>: HeaderSlot {
    type Output: HeaderSlot;
}

/// Result of merging inherited header slot `P` with local slot `C`
pub type MergeHeadersOf<P, C> = <P as MergeHeaders<C>>::Output;

impl MergeHeaders<NoHeaders> for NoHeaders {
    type Output = NoHeaders;
}

impl<C: StandardSchema> MergeHeaders<Headers<C>> for NoHeaders {
    type Output = Headers<C>;
}

impl<P: StandardSchema> MergeHeaders<NoHeaders> for Headers<P> {
    type Output = Headers<P>;
}

impl<P: StandardSchema, C: StandardSchema> MergeHeaders<Headers<C>> for Headers<P> {
    type Output = Headers<Merge<P, C>>;
}

/// Schema type of two merged header schemas
pub struct Merge<P, C>(PhantomData<fn() -> (P, C)>);

impl<P: StandardSchema, C: StandardSchema> StandardSchema for Merge<P, C> {
    type Input = Merged<P::Input, C::Input>;
    type Output = Merged<P::Output, C::Output>;
}

/// Value of a merged header schema
///
/// Serializes as one flat object; on a key both halves produce, `local` wins.
/// Deserializing hands the whole object to `local`. `inherited` reads the same
/// object, or, when that fails, the object without the keys `local` produces:
/// a field the child redeclares with another type must therefore be optional in
/// the parent type (`Option` or `#[serde(default)]`).
#[derive(Debug, Clone, PartialEq)]
pub struct Merged<P, C> {
    pub inherited: P,
    pub local: C,
}

impl<P: Serialize, C: Serialize> Serialize for Merged<P, C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let inherited = serde_json::to_value(&self.inherited).map_err(<S::Error as ser::Error>::custom)?;
        let local = serde_json::to_value(&self.local).map_err(<S::Error as ser::Error>::custom)?;
        let mut merged = as_object::<S::Error>(inherited)?;
        merged.extend(as_object::<S::Error>(local)?);
        Value::Object(merged).serialize(serializer)
    }
}

impl<'de, P, C> Deserialize<'de> for Merged<P, C>
where
    P: DeserializeOwned,
    C: Serialize + DeserializeOwned,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let local: C = serde_json::from_value(value.clone()).map_err(<D::Error as de::Error>::custom)?;
        let inherited = match serde_json::from_value(value.clone()) {
            Ok(inherited) => inherited,
            Err(_) => {
                let claimed = serde_json::to_value(&local).map_err(<D::Error as de::Error>::custom)?;
                serde_json::from_value(without_keys(value, &claimed))
                    .map_err(<D::Error as de::Error>::custom)?
            }
        };
        Ok(Merged { inherited, local })
    }
}

fn without_keys(value: Value, claimed: &Value) -> Value {
    match (value, claimed) {
        (Value::Object(mut map), Value::Object(claimed)) => {
            map.retain(|key, _| !claimed.contains_key(key));
            Value::Object(map)
        }
        (value, _) => value,
    }
}

// `()` serializes to null and contributes no keys.
fn as_object<E: ser::Error>(value: Value) -> Result<Map<String, Value>, E> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(E::custom(format!("header values must be objects, got {other}"))),
    }
}

/// Compile-time description of one endpoint
///
/// The Rust counterpart of indexing a route map with a literal dot path: a typo
/// in an endpoint type name is a compile error, and [`RouteLookup::typed`]
/// checks the declaration against the composed runtime contract.
///
/// [`RouteLookup::typed`]: crate::lookup::RouteLookup::typed
pub trait Endpoint {
    type PathParams: StandardSchema;
    type Query: StandardSchema;
    type Body: StandardSchema;
    type Headers: HeaderSlot;
    type Response: StandardSchema;

    fn method() -> Method;

    /// Dot path relative to the group this endpoint is declared in
    fn dot_path() -> String;
}

/// Compile-time description of a route group
pub trait Group {
    /// Key of the group in its parent
    const KEY: &'static str;
    /// Shared headers the group contributes to everything below it
    type SharedHeaders: HeaderSlot;
}

/// `E` mounted inside group `G`
///
/// Nesting threads the header accumulator through the whole chain:
/// `Nested<Outer, Nested<Middle, E>>` carries `Outer ⊕ (Middle ⊕ E)`, so no level
/// is dropped however deep the tree goes.
pub struct Nested<G, E>(PhantomData<fn() -> (G, E)>);

impl<G, E> Endpoint for Nested<G, E>
where
    G: Group,
    E: Endpoint,
    G::SharedHeaders: MergeHeaders<E::Headers>,
{
    type PathParams = E::PathParams;
    type Query = E::Query;
    type Body = E::Body;
    type Headers = MergeHeadersOf<G::SharedHeaders, E::Headers>;
    type Response = E::Response;

    fn method() -> Method {
        E::method()
    }

    fn dot_path() -> String {
        format!("{}.{}", G::KEY, E::dot_path())
    }
}

/// `E` under header slot `H` with no group key
///
/// The outermost level of a contract: the shared headers passed to
/// [`ComposeOptions::shared_headers`](crate::compose::ComposeOptions::shared_headers)
/// apply to every endpoint but add no dot path segment.
/// `Scoped<Headers<Json<Tenant>>, Nested<Posts, GetOne>>` still resolves `posts.getOne`.
pub struct Scoped<H, E>(PhantomData<fn() -> (H, E)>);

impl<H, E> Endpoint for Scoped<H, E>
where
    E: Endpoint,
    H: MergeHeaders<E::Headers>,
{
    type PathParams = E::PathParams;
    type Query = E::Query;
    type Body = E::Body;
    type Headers = MergeHeadersOf<H, E::Headers>;
    type Response = E::Response;

    fn method() -> Method {
        E::method()
    }

    fn dot_path() -> String {
        E::dot_path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{InferInput, Json};
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Tenant {
        #[serde(rename = "x-tenant-id")]
        tenant: String,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Version {
        #[serde(rename = "x-api-version")]
        version: String,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Idempotency {
        #[serde(rename = "x-idempotency-key")]
        key: String,
    }

    #[test]
    fn test_merged_serializes_flat_with_local_winning() {
        let value = Merged {
            inherited: json!({"x-api-version": "1", "x-tenant-id": "t"}),
            local: Version { version: "2".into() },
        };
        assert_eq!(
            serde_json::to_value(&value).unwrap(),
            json!({"x-api-version": "2", "x-tenant-id": "t"})
        );
    }

    #[test]
    fn test_three_level_chain_keeps_middle_level() {
        struct Outer;
        impl Group for Outer {
            const KEY: &'static str = "posts";
            type SharedHeaders = Headers<Json<Tenant>>;
        }
        struct Middle;
        impl Group for Middle {
            const KEY: &'static str = "comments";
            type SharedHeaders = Headers<Json<Version>>;
        }
        struct Create;
        impl Endpoint for Create {
            type PathParams = ();
            type Query = ();
            type Body = ();
            type Headers = Headers<Json<Idempotency>>;
            type Response = ();
            fn method() -> Method {
                Method::POST
            }
            fn dot_path() -> String {
                "createOne".into()
            }
        }

        type Full = Nested<Outer, Nested<Middle, Create>>;
        type HeadersIn = InferInput<<<Full as Endpoint>::Headers as HeaderSlot>::Schema>;

        let headers: HeadersIn = Merged {
            inherited: Tenant { tenant: "acme".into() },
            local: Merged {
                inherited: Version { version: "2".into() },
                local: Idempotency { key: "k1".into() },
            },
        };
        assert_eq!(
            serde_json::to_value(&headers).unwrap(),
            json!({"x-tenant-id": "acme", "x-api-version": "2", "x-idempotency-key": "k1"})
        );
        assert_eq!(Full::dot_path(), "posts.comments.createOne");
        assert!(<<Full as Endpoint>::Headers as HeaderSlot>::PRESENT);
    }

    #[test]
    fn test_inherited_only_and_absent_slots() {
        struct Shared;
        impl Group for Shared {
            const KEY: &'static str = "api";
            type SharedHeaders = Headers<Json<Tenant>>;
        }
        struct Bare;
        impl Group for Bare {
            const KEY: &'static str = "bare";
            type SharedHeaders = NoHeaders;
        }
        struct List;
        impl Endpoint for List {
            type PathParams = ();
            type Query = ();
            type Body = ();
            type Headers = NoHeaders;
            type Response = ();
            fn method() -> Method {
                Method::GET
            }
            fn dot_path() -> String {
                "list".into()
            }
        }

        type Inherited = <Nested<Shared, List> as Endpoint>::Headers;
        let parsed: InferInput<<Inherited as HeaderSlot>::Schema> =
            serde_json::from_value(json!({"x-tenant-id": "acme"})).unwrap();
        assert_eq!(parsed, Tenant { tenant: "acme".into() });

        assert!(!<<Nested<Bare, List> as Endpoint>::Headers as HeaderSlot>::PRESENT);
    }

    #[test]
    fn test_child_field_type_wins_on_overlap() {
        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct NumericVersion {
            #[serde(rename = "x-tenant-id")]
            tenant: String,
            #[serde(rename = "x-api-version", default, skip_serializing_if = "Option::is_none")]
            version: Option<u32>,
        }

        type HeadersIn = InferInput<Merge<Json<NumericVersion>, Json<Version>>>;

        let parsed: HeadersIn =
            serde_json::from_value(json!({"x-tenant-id": "acme", "x-api-version": "2"})).unwrap();
        assert_eq!(parsed.local, Version { version: "2".into() });
        assert_eq!(
            parsed.inherited,
            NumericVersion {
                tenant: "acme".into(),
                version: None
            }
        );
        assert_eq!(
            serde_json::to_value(&parsed).unwrap(),
            json!({"x-tenant-id": "acme", "x-api-version": "2"})
        );

        // same type on both sides: the parent still sees the shared key
        let same: InferInput<Merge<Json<Version>, Json<Version>>> =
            serde_json::from_value(json!({"x-api-version": "3"})).unwrap();
        assert_eq!(same.inherited, Version { version: "3".into() });
    }

    #[test]
    fn test_overlap_with_required_parent_field_is_rejected() {
        #[derive(Debug, Serialize, Deserialize)]
        struct StrictVersion {
            #[serde(rename = "x-api-version")]
            version: u32,
        }

        let parsed: Result<InferInput<Merge<Json<StrictVersion>, Json<Version>>>, _> =
            serde_json::from_value(json!({"x-api-version": "2"}));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_scoped_adds_headers_without_a_key() {
        struct List;
        impl Endpoint for List {
            type PathParams = ();
            type Query = ();
            type Body = ();
            type Headers = NoHeaders;
            type Response = ();
            fn method() -> Method {
                Method::GET
            }
            fn dot_path() -> String {
                "list".into()
            }
        }

        type Root = Scoped<Headers<Json<Tenant>>, List>;
        assert_eq!(Root::dot_path(), "list");
        assert_eq!(Root::method(), Method::GET);
        assert!(<<Root as Endpoint>::Headers as HeaderSlot>::PRESENT);
        assert!(!<<Scoped<NoHeaders, List> as Endpoint>::Headers as HeaderSlot>::PRESENT);
    }

    #[test]
    fn test_merged_rejects_non_object_halves() {
        let value = Merged {
            inherited: json!("scalar"),
            local: (),
        };
        assert!(serde_json::to_value(&value).is_err());
    }
}
