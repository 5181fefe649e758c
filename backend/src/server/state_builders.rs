//! Builders wiring the facade to a store.

use std::sync::Arc;

use mockable::DefaultClock;
use tracing::info;

use hbnb::domain::HbnbFacade;
use hbnb::inbound::http::state::HttpState;
use hbnb::outbound::memory::MemoryStore;
use hbnb::outbound::persistence::{
    DbPool, DieselAmenityRepository, DieselPlaceRepository, DieselReviewRepository,
    DieselUserRepository,
};

/// State backed by PostgreSQL through the Diesel repositories.
pub fn postgres_state(pool: &DbPool) -> HttpState {
    info!("using PostgreSQL store");
    let facade = HbnbFacade::new(
        Arc::new(DieselUserRepository::new(pool.clone())),
        Arc::new(DieselPlaceRepository::new(pool.clone())),
        Arc::new(DieselAmenityRepository::new(pool.clone())),
        Arc::new(DieselReviewRepository::new(pool.clone())),
        Arc::new(DefaultClock),
    );
    HttpState::from_service(Arc::new(facade))
}

/// State backed by a fresh in-process store. Data is lost on restart.
pub fn memory_state() -> HttpState {
    info!("no database configured; using in-memory store");
    let store = Arc::new(MemoryStore::default());
    let facade = HbnbFacade::new(
        Arc::clone(&store),
        Arc::clone(&store),
        Arc::clone(&store),
        store,
        Arc::new(DefaultClock),
    );
    HttpState::from_service(Arc::new(facade))
}
