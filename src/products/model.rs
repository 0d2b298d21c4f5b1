//! Product models and local validation

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// Optimistic-concurrency marker issued by the server and echoed on update.
/// Its content is opaque to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Version(serde_json::Value);

impl Version {
    pub fn new(value: impl Into<serde_json::Value>) -> Self {
        Self(value.into())
    }
}

impl Default for Version {
    fn default() -> Self {
        Self(serde_json::Value::Null)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            serde_json::Value::Null => f.write_str("-"),
            serde_json::Value::String(s) => f.write_str(s),
            other => write!(f, "{}", other),
        }
    }
}

/// A product as stored by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    pub description: String,
    pub qty: u32,
    pub price: f64,
    #[serde(rename = "__v", alias = "version", default)]
    pub version: Version,
}

impl Product {
    pub fn in_stock(&self) -> bool {
        self.qty > 0
    }
}

/// User-entered product fields, before the server assigns an id and version
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub qty: i64,
    pub price: f64,
}

impl ProductDraft {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        qty: i64,
        price: f64,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            qty,
            price,
        }
    }

    /// Field checks run before anything is sent. The first failing field wins.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::validation("name", "Product name is required"));
        }
        if self.description.trim().is_empty() {
            return Err(Error::validation("description", "Description is required"));
        }
        if self.qty <= 0 {
            return Err(Error::validation("qty", "Quantity must be greater than 0"));
        }
        if !self.price.is_finite() || self.price <= 0.0 {
            return Err(Error::validation("price", "Price must be greater than 0"));
        }
        Ok(())
    }
}

impl From<&Product> for ProductDraft {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            qty: i64::from(product.qty),
            price: product.price,
        }
    }
}

/// Body of `PUT /products/:id`
#[derive(Debug, Serialize)]
pub(crate) struct UpdateBody<'a> {
    #[serde(rename = "_id")]
    pub id: &'a str,
    #[serde(flatten)]
    pub draft: &'a ProductDraft,
    #[serde(rename = "__v")]
    pub version: &'a Version,
}
