//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on the driving ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AmenitiesService, PlacesService, ReviewsService, UsersService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UsersService>,
    pub amenities: Arc<dyn AmenitiesService>,
    pub places: Arc<dyn PlacesService>,
    pub reviews: Arc<dyn ReviewsService>,
}

impl HttpState {
    /// Construct state from one port implementation per resource.
    pub fn new(
        users: Arc<dyn UsersService>,
        amenities: Arc<dyn AmenitiesService>,
        places: Arc<dyn PlacesService>,
        reviews: Arc<dyn ReviewsService>,
    ) -> Self {
        Self {
            users,
            amenities,
            places,
            reviews,
        }
    }

    /// Construct state from a single service implementing every port.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use hbnb::domain::HbnbFacade;
    /// use hbnb::inbound::http::state::HttpState;
    /// use hbnb::outbound::memory::MemoryStore;
    /// use mockable::DefaultClock;
    ///
    /// let store = Arc::new(MemoryStore::default());
    /// let facade = HbnbFacade::new(
    ///     Arc::clone(&store),
    ///     Arc::clone(&store),
    ///     Arc::clone(&store),
    ///     store,
    ///     Arc::new(DefaultClock),
    /// );
    /// let state = HttpState::from_service(Arc::new(facade));
    /// let _users = state.users.clone();
    /// ```
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: UsersService + AmenitiesService + PlacesService + ReviewsService + 'static,
    {
        Self {
            users: service.clone(),
            amenities: service.clone(),
            places: service.clone(),
            reviews: service,
        }
    }
}
