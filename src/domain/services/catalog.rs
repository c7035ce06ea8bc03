//! Outlet Catalog
//!
//! Lookup and text filters over an outlet list: name and city search,
//! and the short type-ahead list shown while the user types.

use crate::domain::entities::Outlet;

/// Number of type-ahead suggestions shown by default.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 3;

pub struct OutletCatalog;

impl OutletCatalog {
    /// Find an outlet by id.
    pub fn find(outlets: &[Outlet], id: i64) -> Option<&Outlet> {
        outlets.iter().find(|o| o.id == id)
    }

    /// Outlets whose name contains `query`, ignoring case.
    pub fn by_name(outlets: &[Outlet], query: &str) -> Vec<Outlet> {
        Self::matching(outlets, query, |o| o.name.as_str())
    }

    /// Outlets whose address contains `city`, ignoring case.
    pub fn by_city(outlets: &[Outlet], city: &str) -> Vec<Outlet> {
        Self::matching(outlets, city, |o| o.address.as_str())
    }

    /// First `limit` name matches for a partially typed query.
    ///
    /// A blank query suggests nothing.
    pub fn suggest(outlets: &[Outlet], query: &str, limit: usize) -> Vec<Outlet> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        let mut found = Self::by_name(outlets, query);
        found.truncate(limit);
        found
    }

    fn matching<F>(outlets: &[Outlet], needle: &str, field: F) -> Vec<Outlet>
    where
        F: Fn(&Outlet) -> &str,
    {
        let needle = needle.trim().to_lowercase();
        outlets
            .iter()
            .filter(|o| field(o).to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }
}
