// SPDX-License-Identifier: MPL-2.0

//! Root-to-leaf resolution over the flat catalog.

use super::catalog::{LocationCatalog, LocationId, LocationNode};
use super::level::AdminLevel;
use thiserror::Error;

/// Failure modes of the ancestry walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The id (or a parent id reached during the walk) is not in the catalog.
    #[error("location {0} is not in the catalog")]
    NotFound(LocationId),
    /// The parent chain is longer than the hierarchy allows. A well-formed
    /// catalog cannot produce this; a corrupted parent graph can.
    #[error("parent chain from location {0} exceeds the hierarchy depth; catalog has a cycle")]
    CycleDetected(LocationId),
}

/// Reconstructs the ordered root-to-leaf chain for `leaf_id`.
///
/// The walk starts at the leaf and repeatedly looks the parent id up in the
/// catalog's index until it reaches a node without a parent. The catalog
/// invariant forbids cycles, but the walk does not trust it: the chain is
/// bounded by the number of defined levels, and exceeding that bound fails
/// with [`ResolveError::CycleDetected`] instead of looping.
pub fn resolve(
    catalog: &LocationCatalog,
    leaf_id: LocationId,
) -> Result<Vec<&LocationNode>, ResolveError> {
    let mut chain = Vec::with_capacity(AdminLevel::COUNT);
    let mut current = catalog
        .by_id(leaf_id)
        .ok_or(ResolveError::NotFound(leaf_id))?;
    chain.push(current);

    while let Some(parent_id) = current.parent_id {
        if chain.len() >= AdminLevel::COUNT {
            return Err(ResolveError::CycleDetected(leaf_id));
        }
        current = catalog
            .by_id(parent_id)
            .ok_or(ResolveError::NotFound(parent_id))?;
        chain.push(current);
    }

    chain.reverse();
    Ok(chain)
}
