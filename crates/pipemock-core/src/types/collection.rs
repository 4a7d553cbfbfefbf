//! Collection types.

use serde::{Deserialize, Serialize};

/// Ordered set of route references that together form one mock scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    /// Unique identifier for this collection
    pub id: String,
    /// ID of parent collection to inherit routes from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// Route references in format `route_id:preset_id:variant_id`.
    /// Order matters: earlier routes win when several match a request.
    pub routes: Vec<String>,
}

impl Collection {
    pub fn new<I, S>(id: impl Into<String>, routes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            from: None,
            routes: routes.into_iter().map(Into::into).collect(),
        }
    }

    /// Inherit routes from `parent`; own routes override the parent's.
    pub fn extending(mut self, parent: impl Into<String>) -> Self {
        self.from = Some(parent.into());
        self
    }
}
