//! Catalog service — property records and their dashboard ordering.
//!
//! DESIGN
//! ======
//! Properties are stored in insertion order. The dashboard never reads
//! storage directly; it reads `sorted_view()`, which is rebuilt on every
//! call and borrows the catalog, so it cannot outlive a mutation.
//!
//! ORDERING
//! ========
//! Active first, then primary, then name ascending (case-sensitive).
//! The sort is stable, so ties keep insertion order.
//!
//! INVARIANTS
//! ==========
//! - At most one property has `is_active` set.
//! - `is_primary` is per-property; any number may be primary.
//! - Failed operations leave storage untouched.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

// =============================================================================
// TYPES
// =============================================================================

/// Placeholder label shown when a property has no street view image.
pub const IMAGE_FALLBACK_LABEL: &str = "Street View Not Available";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub is_primary: bool,
    pub is_active: bool,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Property {
    /// Image URL, or the fallback label when none is set.
    #[must_use]
    pub fn image_label(&self) -> &str {
        self.image_url.as_deref().unwrap_or(IMAGE_FALLBACK_LABEL)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("{field} is required")]
    Validation { field: &'static str },
    #[error("property not found: {0}")]
    NotFound(String),
}

impl crate::event::ErrorCode for CatalogError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "E_VALIDATION",
            Self::NotFound(_) => "E_NOT_FOUND",
        }
    }
}

// =============================================================================
// CATALOG
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    properties: Vec<Property>,
}

impl Catalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Properties in insertion order.
    #[must_use]
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.id == id)
    }

    /// The currently active property, if any.
    #[must_use]
    pub fn active(&self) -> Option<&Property> {
        self.properties.iter().find(|p| p.is_active)
    }

    /// Append a new, inactive property.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if `name` or `address` is blank. `city` may be empty.
    pub fn add(&mut self, name: &str, address: &str, city: &str, is_primary: bool) -> Result<Property, CatalogError> {
        if name.trim().is_empty() {
            return Err(CatalogError::Validation { field: "name" });
        }
        if address.trim().is_empty() {
            return Err(CatalogError::Validation { field: "address" });
        }

        let property = Property {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            address: address.to_string(),
            city: city.to_string(),
            is_primary,
            is_active: false,
            image_url: None,
        };
        self.properties.push(property.clone());

        info!(id = %property.id, name = %property.name, is_primary, "catalog: property added");
        Ok(property)
    }

    /// Make `id` the single active property.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no property has `id`; no flags change.
    pub fn set_active(&mut self, id: &str) -> Result<(), CatalogError> {
        if self.get(id).is_none() {
            return Err(CatalogError::NotFound(id.to_string()));
        }
        for property in &mut self.properties {
            property.is_active = property.id == id;
        }
        info!(%id, "catalog: active property set");
        Ok(())
    }

    /// Flip the primary flag of `id` only. Returns the new value.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no property has `id`.
    pub fn toggle_primary(&mut self, id: &str) -> Result<bool, CatalogError> {
        let property = self
            .properties
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;
        property.is_primary = !property.is_primary;
        info!(%id, is_primary = property.is_primary, "catalog: primary toggled");
        Ok(property.is_primary)
    }

    /// Dashboard ordering of the current properties.
    #[must_use]
    pub fn sorted_view(&self) -> SortedView<'_> {
        let mut items: Vec<&Property> = self.properties.iter().collect();
        items.sort_by(|a, b| dashboard_order(a, b));
        SortedView { items }
    }

    pub fn reset(&mut self) {
        self.properties.clear();
        info!("catalog: reset");
    }
}

fn dashboard_order(a: &Property, b: &Property) -> Ordering {
    b.is_active
        .cmp(&a.is_active)
        .then_with(|| b.is_primary.cmp(&a.is_primary))
        .then_with(|| a.name.cmp(&b.name))
}

// =============================================================================
// SORTED VIEW
// =============================================================================

/// Read-only, re-iterable ordering over a catalog's properties.
#[derive(Debug, Clone)]
pub struct SortedView<'a> {
    items: Vec<&'a Property>,
}

impl<'a> SortedView<'a> {
    pub fn iter(&self) -> impl Iterator<Item = &'a Property> + '_ {
        self.items.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn names(&self) -> Vec<&'a str> {
        self.items.iter().map(|p| p.name.as_str()).collect()
    }
}

impl<'v, 'a> IntoIterator for &'v SortedView<'a> {
    type Item = &'a Property;
    type IntoIter = std::iter::Copied<std::slice::Iter<'v, &'a Property>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter().copied()
    }
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
