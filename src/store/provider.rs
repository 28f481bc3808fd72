use super::city_store::CityStore;
use super::error::StateError;
use super::reducer::StoreState;
use crate::cities::{Cities, CityId, NewCity};
use crate::config::Config;
use crate::error::AppResult;
use log::*;
use std::sync::{Arc, Weak};
use tokio::sync::watch;

/// Owns a [`CityStore`] for the lifetime of a scope.
///
/// Mounting loads the city list once. Dropping the provider unmounts the
/// store: requests still in flight are abandoned and every outstanding
/// [`CitiesHandle`] starts failing with [`StateError::MissingProvider`].
///
pub struct CitiesProvider {
    store: Arc<CityStore>,
    unmount: watch::Sender<bool>,
}

impl CitiesProvider {
    /// Create the store on top of the given service and run the initial load.
    ///
    pub async fn mount(cities: Cities) -> Self {
        info!("Mounting city store...");
        let (unmount, unmounted) = watch::channel(false);
        let store = Arc::new(CityStore::new(cities, unmounted));
        store.initialize().await;
        info!("City store mounted.");
        CitiesProvider { store, unmount }
    }

    /// Build the service client from configuration and mount a store on it.
    ///
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let cities = Cities::from_config(config)?;
        Ok(CitiesProvider::mount(cities).await)
    }

    /// Returns the store owned by this provider.
    ///
    pub fn store(&self) -> &CityStore {
        &self.store
    }

    /// Returns a handle consumers can hold on to independently of the
    /// provider.
    ///
    pub fn handle(&self) -> CitiesHandle {
        CitiesHandle {
            store: Arc::downgrade(&self.store),
        }
    }

    /// Tear the scope down explicitly. Same as dropping the provider.
    ///
    pub fn unmount(self) {}
}

impl Drop for CitiesProvider {
    fn drop(&mut self) {
        info!("Unmounting city store...");
        // Fails only when no receiver is left, in which case nothing is in flight
        let _ = self.unmount.send(true);
    }
}

/// Consumer-side access to a store owned by a [`CitiesProvider`].
///
#[derive(Clone)]
pub struct CitiesHandle {
    store: Weak<CityStore>,
}

impl CitiesHandle {
    /// Returns the store, or [`StateError::MissingProvider`] once its
    /// provider has been unmounted.
    ///
    pub fn store(&self) -> Result<Arc<CityStore>, StateError> {
        match self.store.upgrade() {
            Some(store) if store.is_mounted() => Ok(store),
            _ => Err(StateError::MissingProvider),
        }
    }

    pub async fn snapshot(&self) -> Result<StoreState, StateError> {
        Ok(self.store()?.snapshot().await)
    }

    pub async fn get_city(&self, id: &CityId) -> Result<(), StateError> {
        self.store()?.get_city(id).await;
        Ok(())
    }

    pub async fn create_city(&self, new_city: &NewCity) -> Result<(), StateError> {
        self.store()?.create_city(new_city).await;
        Ok(())
    }

    pub async fn delete_city(&self, id: &CityId) -> Result<(), StateError> {
        self.store()?.delete_city(id).await;
        Ok(())
    }
}
