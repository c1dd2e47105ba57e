use super::algebra::{Endpoint, HeaderSlot};
use crate::error::ContractError;
use crate::lookup::{ResolvedRoute, RouteLookup};
use crate::schema::{InferInput, InferOutput};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::marker::PhantomData;
use tracing::warn;

/// A resolved route viewed through a compile-time [`Endpoint`] declaration
///
/// Obtained from [`RouteLookup::typed`], which has already checked that the
/// declaration and the composed contract agree. Encoding serializes a typed
/// value and validates it against the route's input schema; decoding validates
/// against the output schema before deserializing.
pub struct TypedRoute<'a, E> {
    route: &'a ResolvedRoute,
    _endpoint: PhantomData<fn() -> E>,
}

impl<E> std::fmt::Debug for TypedRoute<'_, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypedRoute").field("route", &self.route).finish()
    }
}

type HeadersOf<E> = <<E as Endpoint>::Headers as HeaderSlot>::Schema;

impl<'a, E: Endpoint> TypedRoute<'a, E> {
    pub fn route(&self) -> &'a ResolvedRoute {
        self.route
    }

    pub fn encode_headers(&self, headers: &InferInput<HeadersOf<E>>) -> Result<Value, ContractError> {
        let value = self.to_json(headers)?;
        self.route.validate_headers(&value)?;
        Ok(value)
    }

    pub fn encode_path_params(&self, params: &InferInput<E::PathParams>) -> Result<Value, ContractError> {
        let value = self.to_json(params)?;
        self.route.validate_path_params(&value)?;
        Ok(value)
    }

    pub fn encode_query(&self, query: &InferInput<E::Query>) -> Result<Value, ContractError> {
        let value = self.to_json(query)?;
        self.route.validate_query(&value)?;
        Ok(value)
    }

    pub fn encode_body(&self, body: &InferInput<E::Body>) -> Result<Value, ContractError> {
        let value = self.to_json(body)?;
        self.route.validate_body(&value)?;
        Ok(value)
    }

    /// Validate a response body for `status` and parse it into the declared output type
    pub fn decode_response(
        &self,
        status: u16,
        body: Value,
    ) -> Result<InferOutput<E::Response>, ContractError> {
        self.route.validate_response(status, &body)?;
        self.from_json(body)
    }

    fn to_json<T: Serialize>(&self, value: &T) -> Result<Value, ContractError> {
        serde_json::to_value(value).map_err(|e| ContractError::Serialization {
            route: self.route.path_chain.to_string(),
            message: e.to_string(),
        })
    }

    fn from_json<T: DeserializeOwned>(&self, value: Value) -> Result<T, ContractError> {
        serde_json::from_value(value).map_err(|e| ContractError::Serialization {
            route: self.route.path_chain.to_string(),
            message: e.to_string(),
        })
    }
}

impl RouteLookup {
    /// Resolve the route declared by `E` and check it against the contract
    ///
    /// # Errors
    ///
    /// - [`ContractError::UnknownRoute`] - `E::dot_path()` names no endpoint
    /// - [`ContractError::TypeMismatch`] - the method differs, or the runtime
    ///   route's header presence disagrees with `E::Headers`
    pub fn typed<E: Endpoint>(&self) -> Result<TypedRoute<'_, E>, ContractError> {
        let path = E::dot_path();
        let route = self.get(&path)?;

        let method = E::method();
        if route.method != method {
            warn!(route = %path, declared = %method, composed = %route.method, "Typed endpoint method mismatch");
            return Err(ContractError::TypeMismatch {
                route: path,
                reason: format!("declared method {method}, contract has {}", route.method),
            });
        }

        let declared = <E::Headers as HeaderSlot>::PRESENT;
        let composed = route.headers.is_some();
        if declared != composed {
            warn!(route = %path, declared, composed, "Typed endpoint header slot mismatch");
            let reason = if declared {
                "headers declared at the type level but the composed route has none"
            } else {
                "composed route carries headers the type declaration does not account for"
            };
            return Err(ContractError::TypeMismatch {
                route: path,
                reason: reason.to_string(),
            });
        }

        Ok(TypedRoute {
            route,
            _endpoint: PhantomData,
        })
    }
}
