//! Restaurant list view composition.
//!
//! [`RestaurantListView::compose`] is a pure function of the capability
//! vector, the collection snapshot, and the delete error slot. The column
//! set it emits is identical for every row of a render pass and appears in
//! the fixed declared order of [`Column::ALL`].

use crate::authorization::ListCapabilities;
use crate::model::{RelatedCollection, RestaurantRecord};
use crate::queries::QueryState;
use crate::routes;
use crate::routes::Route;
use maitre_core::{DataError, RestaurantId};
use serde::{Deserialize, Serialize};

// ============================================================================
// Columns
// ============================================================================

/// A column of the restaurant table, in declared render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    /// Restaurant display name (always visible)
    Name,
    /// Associated actor reference
    User,
    /// Owning organization reference
    Organization,
    /// Customer preference aggregate count
    CustomerPreferenceCount,
    /// Reservation aggregate count
    ReservationCount,
    /// Table availability aggregate count
    TableAvailabilityCount,
    /// Edit navigation action
    Edit,
    /// Detail-view navigation action
    View,
    /// Delete action
    Delete,
}

impl Column {
    /// All columns, in the fixed order the table renders them.
    pub const ALL: [Column; 9] = [
        Column::Name,
        Column::User,
        Column::Organization,
        Column::CustomerPreferenceCount,
        Column::ReservationCount,
        Column::TableAvailabilityCount,
        Column::Edit,
        Column::View,
        Column::Delete,
    ];

    /// Header label shown for the column.
    pub fn header(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::User => "user",
            Self::Organization => "organization",
            Self::CustomerPreferenceCount => RelatedCollection::CustomerPreference.entity_name(),
            Self::ReservationCount => RelatedCollection::Reservation.entity_name(),
            Self::TableAvailabilityCount => RelatedCollection::TableAvailability.entity_name(),
            Self::Edit => "Edit",
            Self::View => "View",
            Self::Delete => "Delete",
        }
    }

    /// Whether the capability vector makes this column visible.
    pub fn visible(&self, caps: &ListCapabilities) -> bool {
        match self {
            Self::Name => true,
            Self::User => caps.read_user,
            Self::Organization => caps.read_organization,
            Self::CustomerPreferenceCount => caps.read_customer_preference,
            Self::ReservationCount => caps.read_reservation,
            Self::TableAvailabilityCount => caps.read_table_availability,
            Self::Edit => caps.update_restaurant,
            Self::View => caps.view_restaurants,
            Self::Delete => caps.delete_restaurant,
        }
    }
}

// ============================================================================
// Cells and Rows
// ============================================================================

/// One rendered cell of a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    /// Nothing to show (absent optional reference)
    Empty,
    /// Plain text
    Text(String),
    /// Link to a related record's detail view
    Link {
        /// Display label
        label: String,
        /// Navigation target
        target: Route,
    },
    /// Aggregate count
    Count(u64),
    /// Navigation action button
    Navigate {
        /// Button label
        label: String,
        /// Navigation target
        target: Route,
    },
    /// Delete action button; frontends feed the id back into the delete
    /// workflow
    Delete {
        /// Record to delete
        id: RestaurantId,
    },
}

/// One rendered row: the record's id plus one cell per visible column, in
/// column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// Row key
    pub id: RestaurantId,
    /// Cells aligned with the view's visible columns
    pub cells: Vec<Cell>,
}

/// Body of the list view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListContent {
    /// READ on `restaurant` is denied; nothing else is composed
    AccessDenied,
    /// The first fetch is in flight and nothing has been loaded yet; no
    /// table is rendered
    Loading,
    /// The table, empty until the first successful fetch
    Table(Vec<Row>),
}

// ============================================================================
// View
// ============================================================================

/// The composed restaurant list view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantListView {
    /// Visible columns, in fixed declared order
    pub columns: Vec<Column>,
    /// Loading indicator or table rows
    pub content: ListContent,
    /// Collection-level fetch error banner
    pub fetch_error: Option<DataError>,
    /// Delete error banner, independent of the fetch banner
    pub delete_error: Option<DataError>,
    /// Create affordance target, present iff CREATE is granted
    pub create: Option<Route>,
}

impl RestaurantListView {
    /// Compose the view from the three component states.
    ///
    /// Pure: consults only its arguments, issues no fetches, mutates
    /// nothing. Both error banners may be present at once; neither
    /// suppresses rows or actions.
    pub fn compose(
        caps: &ListCapabilities,
        snapshot: &QueryState<RestaurantRecord>,
        delete_error: Option<DataError>,
    ) -> Self {
        if !caps.view_restaurants {
            return Self {
                columns: Vec::new(),
                content: ListContent::AccessDenied,
                fetch_error: None,
                delete_error: None,
                create: None,
            };
        }

        let columns: Vec<Column> = Column::ALL
            .into_iter()
            .filter(|column| column.visible(caps))
            .collect();

        let content = if snapshot.is_loading {
            ListContent::Loading
        } else {
            let rows = snapshot
                .records()
                .iter()
                .map(|record| compose_row(record, &columns))
                .collect();
            ListContent::Table(rows)
        };

        Self {
            columns,
            content,
            fetch_error: snapshot.error.clone(),
            delete_error,
            create: caps.create_restaurant.then(routes::restaurants_create),
        }
    }
}

fn compose_row(record: &RestaurantRecord, columns: &[Column]) -> Row {
    let cells = columns
        .iter()
        .map(|column| compose_cell(record, *column))
        .collect();
    Row {
        id: record.id,
        cells,
    }
}

fn compose_cell(record: &RestaurantRecord, column: Column) -> Cell {
    match column {
        Column::Name => Cell::Text(record.name.clone()),
        Column::User => match &record.user {
            Some(user) => Cell::Link {
                label: user.email.clone(),
                target: routes::user_view(user.id),
            },
            None => Cell::Empty,
        },
        Column::Organization => match &record.organization {
            Some(org) => Cell::Link {
                label: org.name.clone(),
                target: routes::organization_view(org.id),
            },
            None => Cell::Empty,
        },
        Column::CustomerPreferenceCount => {
            Cell::Count(record.counts.get(RelatedCollection::CustomerPreference))
        }
        Column::ReservationCount => Cell::Count(record.counts.get(RelatedCollection::Reservation)),
        Column::TableAvailabilityCount => {
            Cell::Count(record.counts.get(RelatedCollection::TableAvailability))
        }
        Column::Edit => Cell::Navigate {
            label: "Edit".to_string(),
            target: routes::restaurant_edit(record.id),
        },
        Column::View => Cell::Navigate {
            label: "View".to_string(),
            target: routes::restaurant_view(record.id),
        },
        Column::Delete => Cell::Delete { id: record.id },
    }
}
