//! Per-render capability vector.
//!
//! The restaurant list needs nine access decisions: the four operations on
//! `restaurant` plus READ on each related entity. Rather than querying the
//! policy ad hoc throughout composition, [`ListCapabilities::evaluate`]
//! asks once per triple at the start of a render pass and the composer
//! consults the resulting booleans. This keeps the column set deterministic
//! within a pass (no row-level divergence) and makes visibility a pure
//! function of the vector.

use maitre_core::{AccessOperation, AccessPolicy, AccessScope};
use serde::{Deserialize, Serialize};

/// Entity names the restaurant list view checks access for.
pub mod entity {
    /// The primary resource
    pub const RESTAURANT: &str = "restaurant";
    /// Associated actor records
    pub const USER: &str = "user";
    /// Owning organizations
    pub const ORGANIZATION: &str = "organization";
    /// Customer preference records (count projection)
    pub const CUSTOMER_PREFERENCE: &str = "customer_preference";
    /// Reservation records (count projection)
    pub const RESERVATION: &str = "reservation";
    /// Table availability records (count projection)
    pub const TABLE_AVAILABILITY: &str = "table_availability";
}

/// The capability vector of one render pass of the restaurant list.
///
/// Evaluated fresh on every render; never cached across passes, so policy
/// changes take effect on the next render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ListCapabilities {
    /// READ on `restaurant`: gates the page itself and the View action
    pub view_restaurants: bool,
    /// CREATE on `restaurant`: gates the create affordance
    pub create_restaurant: bool,
    /// UPDATE on `restaurant`: gates the Edit action
    pub update_restaurant: bool,
    /// DELETE on `restaurant`: gates the Delete action
    pub delete_restaurant: bool,
    /// READ on `user`: gates the user column
    pub read_user: bool,
    /// READ on `organization`: gates the organization column
    pub read_organization: bool,
    /// READ on `customer_preference`: gates its count column
    pub read_customer_preference: bool,
    /// READ on `reservation`: gates its count column
    pub read_reservation: bool,
    /// READ on `table_availability`: gates its count column
    pub read_table_availability: bool,
}

impl ListCapabilities {
    /// Evaluate the policy once per needed triple.
    pub fn evaluate(policy: &dyn AccessPolicy, scope: AccessScope) -> Self {
        use AccessOperation::{Create, Delete, Read, Update};
        Self {
            view_restaurants: policy.can_access(entity::RESTAURANT, Read, scope),
            create_restaurant: policy.can_access(entity::RESTAURANT, Create, scope),
            update_restaurant: policy.can_access(entity::RESTAURANT, Update, scope),
            delete_restaurant: policy.can_access(entity::RESTAURANT, Delete, scope),
            read_user: policy.can_access(entity::USER, Read, scope),
            read_organization: policy.can_access(entity::ORGANIZATION, Read, scope),
            read_customer_preference: policy.can_access(entity::CUSTOMER_PREFERENCE, Read, scope),
            read_reservation: policy.can_access(entity::RESERVATION, Read, scope),
            read_table_availability: policy.can_access(entity::TABLE_AVAILABILITY, Read, scope),
        }
    }

    /// A vector with every capability granted (useful in tests and demos).
    pub fn all() -> Self {
        Self {
            view_restaurants: true,
            create_restaurant: true,
            update_restaurant: true,
            delete_restaurant: true,
            read_user: true,
            read_organization: true,
            read_customer_preference: true,
            read_reservation: true,
            read_table_availability: true,
        }
    }
}
