//! # Restaurant Collection Model
//!
//! The record shape delivered by the data source and the relation
//! vocabulary used to request it. These types are FFI-safe and serialize
//! for debugging and snapshot transfer.

use maitre_core::{OrganizationId, RestaurantId, UserId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

// ============================================================================
// Relations
// ============================================================================

/// A related projection the data source can join into a fetch.
///
/// Reference relations deliver the referenced record inline; count relations
/// deliver only an aggregate count of related rows.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Relation {
    /// Associated actor record, delivered inline
    User,
    /// Owning organization record, delivered inline
    Organization,
    /// Count-only projection of customer preferences
    CustomerPreferenceCount,
    /// Count-only projection of reservations
    ReservationCount,
    /// Count-only projection of table availability slots
    TableAvailabilityCount,
}

impl Relation {
    /// Wire name of the relation, as the data source understands it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Organization => "organization",
            Self::CustomerPreferenceCount => "customer_preference.count",
            Self::ReservationCount => "reservation.count",
            Self::TableAvailabilityCount => "table_availability.count",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An ordered set of relations to join into a fetch.
///
/// Ordered so that equal sets compare and hash equal regardless of how they
/// were built; the set participates in cache query keys.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct RelationSet(BTreeSet<Relation>);

impl RelationSet {
    /// Empty relation set (primary records only).
    pub fn none() -> Self {
        Self::default()
    }

    /// The fixed relation set of the restaurant list view: both references
    /// plus all three count projections.
    pub fn restaurant_list() -> Self {
        Self::from_iter([
            Relation::User,
            Relation::Organization,
            Relation::CustomerPreferenceCount,
            Relation::ReservationCount,
            Relation::TableAvailabilityCount,
        ])
    }

    /// Whether the set requests `relation`.
    pub fn contains(&self, relation: Relation) -> bool {
        self.0.contains(&relation)
    }

    /// Iterate the relations in stable order.
    pub fn iter(&self) -> impl Iterator<Item = Relation> + '_ {
        self.0.iter().copied()
    }

    /// Number of relations requested.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no relations are requested.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Relation> for RelationSet {
    fn from_iter<T: IntoIterator<Item = Relation>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ============================================================================
// Aggregate Counts
// ============================================================================

/// A related collection that is delivered as an aggregate count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelatedCollection {
    /// Stored dining preferences of customers
    CustomerPreference,
    /// Booked reservations
    Reservation,
    /// Table availability slots
    TableAvailability,
}

impl RelatedCollection {
    /// All count collections, in declaration order.
    pub const ALL: [RelatedCollection; 3] = [
        RelatedCollection::CustomerPreference,
        RelatedCollection::Reservation,
        RelatedCollection::TableAvailability,
    ];

    /// Entity name used for access checks and display headers.
    pub fn entity_name(&self) -> &'static str {
        match self {
            Self::CustomerPreference => "customer_preference",
            Self::Reservation => "reservation",
            Self::TableAvailability => "table_availability",
        }
    }
}

/// Aggregate counts delivered alongside a restaurant record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedCounts {
    /// Number of customer preference records
    pub customer_preferences: u64,
    /// Number of reservation records
    pub reservations: u64,
    /// Number of table availability records
    pub table_availability: u64,
}

impl RelatedCounts {
    /// Look up the count for a related collection.
    pub fn get(&self, collection: RelatedCollection) -> u64 {
        match collection {
            RelatedCollection::CustomerPreference => self.customer_preferences,
            RelatedCollection::Reservation => self.reservations,
            RelatedCollection::TableAvailability => self.table_availability,
        }
    }
}

// ============================================================================
// Records
// ============================================================================

/// Reference to the actor associated with a restaurant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    /// Actor identifier
    pub id: UserId,
    /// Display email
    pub email: String,
}

/// Reference to the organization a restaurant belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationRef {
    /// Organization identifier
    pub id: OrganizationId,
    /// Display name
    pub name: String,
}

/// The unit rendered per row of the restaurant list.
///
/// Optional references are present only when the fetch requested the
/// corresponding relation; counts default to zero when their projections
/// were not requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantRecord {
    /// Stable identifier; row key and delete target
    pub id: RestaurantId,
    /// Display name, always shown
    pub name: String,
    /// Associated actor, when requested and present
    #[serde(default)]
    pub user: Option<UserRef>,
    /// Owning organization, when requested and present
    #[serde(default)]
    pub organization: Option<OrganizationRef>,
    /// Aggregate counts of related collections
    #[serde(default)]
    pub counts: RelatedCounts,
}
