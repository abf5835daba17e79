//! executable operation value
//!
//! generated query/mutation builders finish by producing an
//! [`Operation<T>`]: the rendered operation text plus the metadata a
//! transport needs to execute it and deserialize the response.

use crate::value::{render_arguments, ArgumentValue};
use serde::de::DeserializeOwned;
use std::marker::PhantomData;

/// operation keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Query,
    Mutation,
}

impl OperationKind {
    /// graphql keyword for this kind
    pub fn keyword(&self) -> &'static str {
        match self {
            OperationKind::Query => "query",
            OperationKind::Mutation => "mutation",
        }
    }
}

/// a built graphql operation with its expected response type
#[derive(Debug, Clone)]
pub struct Operation<T> {
    kind: OperationKind,
    field: String,
    text: String,
    _response: PhantomData<T>,
}

impl<T: DeserializeOwned> Operation<T> {
    /// assemble an operation from a root field, its rendered arguments, and
    /// an optional selection set
    pub fn new(
        kind: OperationKind,
        field: &str,
        arguments: Vec<(String, ArgumentValue)>,
        selection: Option<String>,
    ) -> Self {
        let args = render_arguments(&arguments);
        let text = match selection {
            Some(selection) => {
                format!("{} {{ {}{} {} }}", kind.keyword(), field, args, selection)
            }
            None => format!("{} {{ {}{} }}", kind.keyword(), field, args),
        };
        Self {
            kind,
            field: field.to_string(),
            text,
            _response: PhantomData,
        }
    }

    /// operation keyword
    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    /// root field name
    pub fn field(&self) -> &str {
        &self.field
    }

    /// rendered operation text
    pub fn text(&self) -> &str {
        &self.text
    }
}
