//! Site-id compression.
//!
//! Map-level site ids are arbitrary integers; the engine works on dense
//! vertex indices. The bijection is fixed by the insertion order of the
//! site list and never changes afterwards.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{SiteId, VertexId};
use crate::protocol::Site;

/// Bijection between map site ids and dense vertex indices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteIndex {
    forward: HashMap<SiteId, VertexId>,
    backward: Vec<SiteId>,
}

impl SiteIndex {
    /// Builds the index from a site list. Duplicate ids collapse onto the
    /// vertex assigned at their first occurrence.
    pub fn build(sites: &[Site]) -> Self {
        let mut forward = HashMap::with_capacity(sites.len());
        let mut backward = Vec::with_capacity(sites.len());
        for site in sites {
            if !forward.contains_key(&site.id) {
                forward.insert(site.id, backward.len());
                backward.push(site.id);
            }
        }
        SiteIndex { forward, backward }
    }

    /// Number of distinct sites.
    pub fn len(&self) -> usize {
        self.backward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backward.is_empty()
    }

    /// Dense vertex index for a site id, if the site exists.
    pub fn to_index(&self, site: SiteId) -> Option<VertexId> {
        self.forward.get(&site).copied()
    }

    /// Original site id for a dense vertex index.
    pub fn to_site(&self, vertex: VertexId) -> SiteId {
        self.backward[vertex]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sites(ids: &[SiteId]) -> Vec<Site> {
        ids.iter().map(|&id| Site { id }).collect()
    }

    #[test]
    fn insertion_order_defines_indices() {
        let idx = SiteIndex::build(&sites(&[42, 7, 100]));
        assert_eq!(idx.len(), 3);
        assert_eq!(idx.to_index(42), Some(0));
        assert_eq!(idx.to_index(7), Some(1));
        assert_eq!(idx.to_index(100), Some(2));
    }

    #[test]
    fn roundtrip_through_both_directions() {
        let idx = SiteIndex::build(&sites(&[5, -3, 0, 999]));
        for v in 0..idx.len() {
            assert_eq!(idx.to_index(idx.to_site(v)), Some(v));
        }
    }

    #[test]
    fn duplicates_collapse_to_first_occurrence() {
        let idx = SiteIndex::build(&sites(&[1, 2, 1, 3]));
        assert_eq!(idx.len(), 3);
        assert_eq!(idx.to_index(1), Some(0));
        assert_eq!(idx.to_index(3), Some(2));
    }

    #[test]
    fn unknown_site_is_none() {
        let idx = SiteIndex::build(&sites(&[1, 2]));
        assert_eq!(idx.to_index(99), None);
    }
}
