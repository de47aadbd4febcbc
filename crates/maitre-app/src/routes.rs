//! Navigation targets.
//!
//! The core does not route; it hands frontends opaque [`Route`] targets for
//! the create/edit/detail affordances. The path shapes are the contract with
//! whatever router the frontend uses.

use maitre_core::{OrganizationId, RestaurantId, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque navigation target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Route(String);

impl Route {
    /// The target path.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Target of the restaurant creation form.
pub fn restaurants_create() -> Route {
    Route("/restaurants/create".to_string())
}

/// Target of a restaurant's edit form.
pub fn restaurant_edit(id: RestaurantId) -> Route {
    Route(format!("/restaurants/edit/{id}"))
}

/// Target of a restaurant's detail view.
pub fn restaurant_view(id: RestaurantId) -> Route {
    Route(format!("/restaurants/view/{id}"))
}

/// Target of a user's detail view.
pub fn user_view(id: UserId) -> Route {
    Route(format!("/users/view/{id}"))
}

/// Target of an organization's detail view.
pub fn organization_view(id: OrganizationId) -> Route {
    Route(format!("/organizations/view/{id}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_shapes() {
        let id = RestaurantId::generate();
        assert_eq!(restaurants_create().as_str(), "/restaurants/create");
        assert_eq!(
            restaurant_edit(id).as_str(),
            format!("/restaurants/edit/{id}")
        );
        assert_eq!(
            restaurant_view(id).as_str(),
            format!("/restaurants/view/{id}")
        );

        let user = UserId::generate();
        assert_eq!(user_view(user).as_str(), format!("/users/view/{user}"));

        let org = OrganizationId::generate();
        assert_eq!(
            organization_view(org).as_str(),
            format!("/organizations/view/{org}")
        );
    }
}
