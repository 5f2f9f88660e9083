//! Request and response wire types

use crate::types::{JsonObject, JsonValue};
use serde::Deserialize;

/// Maximum length of a response body excerpt carried in errors.
const MAX_BODY_EXCERPT: usize = 4096;

// ============================================================================
// Request Spec
// ============================================================================

/// One logical GraphQL request: operation text, variables, and
/// per-request execution knobs.
///
/// Built by the caller, consumed by [`GraphqlExecutor::execute`],
/// discarded after the call returns.
///
/// [`GraphqlExecutor::execute`]: super::GraphqlExecutor::execute
#[derive(Debug, Clone)]
pub struct RequestSpec {
    /// GraphQL operation text
    pub query: String,
    /// Operation variables
    pub variables: JsonObject,
    /// Operation name used in diagnostics and error context
    pub operation_name: Option<String>,
    /// Override the executor's max retries for this request
    pub max_retries: Option<u32>,
    /// Emit per-attempt diagnostic logging
    pub verbose: bool,
}

impl RequestSpec {
    /// Create a spec for the given operation text.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            variables: JsonObject::new(),
            operation_name: None,
            max_retries: None,
            verbose: false,
        }
    }

    /// Replace the variables map.
    #[must_use]
    pub fn with_variables(mut self, variables: JsonObject) -> Self {
        self.variables = variables;
        self
    }

    /// Set a single variable.
    #[must_use]
    pub fn with_variable(mut self, key: impl Into<String>, value: JsonValue) -> Self {
        self.variables.insert(key.into(), value);
        self
    }

    /// Set the operation name.
    #[must_use]
    pub fn with_operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }

    /// Override max retries.
    #[must_use]
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.max_retries = Some(retries);
        self
    }

    /// Enable diagnostic logging for this request.
    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// The operation label used in errors and logs.
    pub fn operation(&self) -> &str {
        self.operation_name.as_deref().unwrap_or("graphql")
    }
}

// ============================================================================
// Response Envelope
// ============================================================================

/// A GraphQL application-level error as returned by the server.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlError {
    /// Server-provided message, carried verbatim
    pub message: String,
}

/// The GraphQL response envelope.
///
/// Both fields default when absent: a well-formed success with no
/// payload deserializes to `data: None, errors: []`.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlResponse {
    /// Response payload
    #[serde(default)]
    pub data: Option<JsonValue>,
    /// Application-level errors
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

impl GraphqlResponse {
    /// Returns `true` if the server reported no application errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// The error messages, in server order.
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.message.clone()).collect()
    }
}

/// Bound a response body excerpt for error reporting.
pub(crate) fn truncate_body(body: String) -> String {
    let mut body = body;
    if body.len() > MAX_BODY_EXCERPT {
        let mut cut = MAX_BODY_EXCERPT;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
        body.push('…');
    }
    body
}
