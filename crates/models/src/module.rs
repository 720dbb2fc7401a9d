use serde::{Deserialize, Serialize};

/// A module of the curriculum that courses contribute credits toward.
/// Identified by `code`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub code: String,
    pub name: String,
    pub credits: f64,
}

impl Module {
    pub fn new(code: impl Into<String>, name: impl Into<String>, credits: f64) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            credits,
        }
    }
}
