//! Operation vocabulary: logical operations, transport verbs and the mapping
//! between them.
//!
//! A deployment runs exactly one [`Vocabulary`]. Lookups are total over the
//! supported verbs and return a tagged `Result` for everything else, so the
//! authorization pipeline never branches on a panic.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Logical operation a capability token grants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Read a complete object
    Get,
    /// Reserve (and later complete) an object in a single grant
    Create,
    /// Remove an object
    Delete,
    /// Two-step variant: reserve an object
    Initiate,
    /// Two-step variant: mark a reserved object complete
    Complete,
    /// Two-step variant: read a complete object
    Retrieve,
}

impl Operation {
    /// Every operation known to any vocabulary
    pub const ALL: [Operation; 6] = [
        Operation::Get,
        Operation::Create,
        Operation::Delete,
        Operation::Initiate,
        Operation::Complete,
        Operation::Retrieve,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Get => "get",
            Operation::Create => "create",
            Operation::Delete => "delete",
            Operation::Initiate => "initiate",
            Operation::Complete => "complete",
            Operation::Retrieve => "retrieve",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Operation::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| Error::unsupported_operation(s))
    }
}

/// Transport verb a request arrives with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Put,
    Patch,
    Delete,
}

impl Verb {
    /// Parse a transport method name, case-insensitively
    pub fn parse(method: &str) -> Result<Self> {
        match method.to_ascii_lowercase().as_str() {
            "get" => Ok(Verb::Get),
            "put" => Ok(Verb::Put),
            "patch" => Ok(Verb::Patch),
            "delete" => Ok(Verb::Delete),
            _ => Err(Error::unsupported_verb(method)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Put => "PUT",
            Verb::Patch => "PATCH",
            Verb::Delete => "DELETE",
        }
    }

    /// Store transition a verb drives once authorized
    pub fn action(&self) -> ObjectAction {
        match self {
            Verb::Get => ObjectAction::Read,
            Verb::Put => ObjectAction::Reserve,
            Verb::Patch => ObjectAction::Complete,
            Verb::Delete => ObjectAction::Remove,
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Object store transition selected by a verb
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectAction {
    Read,
    Reserve,
    Complete,
    Remove,
}

/// The verb table active for a deployment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Vocabulary {
    /// `create` covers both reservation (PUT) and completion (PATCH)
    #[default]
    Standard,
    /// Separate `initiate`/`complete`/`retrieve` grants
    TwoStep,
}

const STANDARD_OPERATIONS: &[Operation] = &[Operation::Create, Operation::Delete, Operation::Get];

const TWO_STEP_OPERATIONS: &[Operation] = &[
    Operation::Initiate,
    Operation::Complete,
    Operation::Retrieve,
    Operation::Delete,
];

const VERBS: [Verb; 4] = [Verb::Get, Verb::Put, Verb::Patch, Verb::Delete];

impl Vocabulary {
    /// Operation implied by a verb. Total over [`Verb`].
    pub fn operation_for(&self, verb: Verb) -> Operation {
        match (self, verb) {
            (Vocabulary::Standard, Verb::Put | Verb::Patch) => Operation::Create,
            (Vocabulary::Standard, Verb::Get) => Operation::Get,
            (Vocabulary::TwoStep, Verb::Put) => Operation::Initiate,
            (Vocabulary::TwoStep, Verb::Patch) => Operation::Complete,
            (Vocabulary::TwoStep, Verb::Get) => Operation::Retrieve,
            (_, Verb::Delete) => Operation::Delete,
        }
    }

    /// Operation implied by a raw transport method name
    pub fn operation_for_verb(&self, method: &str) -> Result<Operation> {
        Verb::parse(method).map(|verb| self.operation_for(verb))
    }

    /// Verbs allowed to invoke an operation; empty when the operation is not
    /// part of this vocabulary
    pub fn verbs_for(&self, operation: Operation) -> Vec<Verb> {
        VERBS
            .into_iter()
            .filter(|verb| self.operation_for(*verb) == operation)
            .collect()
    }

    /// Operations this vocabulary can grant
    pub fn operations(&self) -> &'static [Operation] {
        match self {
            Vocabulary::Standard => STANDARD_OPERATIONS,
            Vocabulary::TwoStep => TWO_STEP_OPERATIONS,
        }
    }

    pub fn supports(&self, operation: Operation) -> bool {
        self.operations().contains(&operation)
    }

    /// Parse an operation name and check it belongs to this vocabulary
    pub fn validate_operation(&self, raw: &str) -> Result<Operation> {
        let operation = Operation::from_str(raw)?;
        if self.supports(operation) {
            Ok(operation)
        } else {
            Err(Error::unsupported_operation(raw))
        }
    }
}

impl fmt::Display for Vocabulary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Vocabulary::Standard => f.write_str("standard"),
            Vocabulary::TwoStep => f.write_str("two-step"),
        }
    }
}

impl FromStr for Vocabulary {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "standard" => Ok(Vocabulary::Standard),
            "two-step" | "two_step" | "twostep" => Ok(Vocabulary::TwoStep),
            other => Err(Error::configuration(format!(
                "unknown vocabulary '{other}', expected 'standard' or 'two-step'"
            ))),
        }
    }
}
