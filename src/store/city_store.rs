use super::action::Action;
use super::reducer::{reduce, StoreState};
use crate::cities::{Cities, CitiesError, City, CityId, NewCity};
use log::*;
use std::future::Future;
use tokio::sync::{watch, Mutex};

pub(crate) const LOAD_CITIES_FAILED: &str = "There was an error loading cities...";
pub(crate) const LOAD_CITY_FAILED: &str = "There was an error loading the city...";
pub(crate) const CREATE_CITY_FAILED: &str = "There was an error creating the city...";
pub(crate) const DELETE_CITY_FAILED: &str = "There was an error deleting the city...";

/// State container for cities kept on the remote service.
///
/// Every operation dispatches `loading`, awaits a single remote call and then
/// dispatches its success action or `rejected`. The state lock is never held
/// across the remote call, so overlapping operations apply in whatever order
/// they resolve. Once the provider is unmounted no operation starts, and one
/// caught mid-call closes with `cancelled`.
///
pub struct CityStore {
    state: Mutex<StoreState>,
    cities: Cities,
    unmounted: watch::Receiver<bool>,
}

impl CityStore {
    pub(crate) fn new(cities: Cities, unmounted: watch::Receiver<bool>) -> Self {
        CityStore {
            state: Mutex::new(StoreState::default()),
            cities,
            unmounted,
        }
    }

    /// Whether the owning provider is still mounted.
    ///
    pub(crate) fn is_mounted(&self) -> bool {
        !*self.unmounted.borrow()
    }

    /// Returns a copy of the whole state.
    ///
    pub async fn snapshot(&self) -> StoreState {
        self.state.lock().await.clone()
    }

    pub async fn cities(&self) -> Vec<City> {
        self.state.lock().await.cities.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.lock().await.is_loading
    }

    pub async fn current_city(&self) -> Option<City> {
        self.state.lock().await.current_city.clone()
    }

    pub async fn error(&self) -> String {
        self.state.lock().await.error.clone()
    }

    /// Load the full list of cities. Run once by the provider on mount.
    ///
    pub(crate) async fn initialize(&self) {
        match self.remote(self.cities.list()).await {
            Some(Ok(cities)) => self.dispatch(Action::CitiesLoaded(cities)).await,
            Some(Err(e)) => self.reject(LOAD_CITIES_FAILED, e).await,
            None => {}
        }
    }

    /// Fetch a city and make it the current one. Does nothing when `id`
    /// already names the current city.
    ///
    pub async fn get_city(&self, id: &CityId) {
        let is_current = self.state.lock().await.is_current(id);
        if is_current {
            debug!("City {} is already current, skipping request", id);
            return;
        }

        match self.remote(self.cities.city(id)).await {
            Some(Ok(city)) => self.dispatch(Action::CityLoaded(city)).await,
            Some(Err(e)) => self.reject(LOAD_CITY_FAILED, e).await,
            None => {}
        }
    }

    /// Create a city, append the server record and make it current.
    ///
    pub async fn create_city(&self, new_city: &NewCity) {
        match self.remote(self.cities.create(new_city)).await {
            Some(Ok(city)) => {
                info!("Created city {}", city.id);
                self.dispatch(Action::CityCreated(city)).await
            }
            Some(Err(e)) => self.reject(CREATE_CITY_FAILED, e).await,
            None => {}
        }
    }

    /// Delete a city and clear the current selection.
    ///
    pub async fn delete_city(&self, id: &CityId) {
        match self.remote(self.cities.delete(id)).await {
            Some(Ok(())) => {
                info!("Deleted city {}", id);
                self.dispatch(Action::CityDeleted(id.clone())).await
            }
            Some(Err(e)) => self.reject(DELETE_CITY_FAILED, e).await,
            None => {}
        }
    }

    async fn dispatch(&self, action: Action) {
        trace!("Dispatching '{}'", action.tag());
        let mut state = self.state.lock().await;
        *state = reduce(std::mem::take(&mut *state), action);
    }

    async fn reject(&self, message: &str, cause: CitiesError) {
        error!("{} ({})", message, cause);
        self.dispatch(Action::Rejected(message.to_owned())).await;
    }

    /// Dispatch `loading` and await a remote call, unless the provider is
    /// unmounted first. Returns `None` when the call was skipped or abandoned,
    /// in which case `is_loading` is already back to `false`.
    ///
    async fn remote<T>(
        &self,
        call: impl Future<Output = Result<T, CitiesError>>,
    ) -> Option<Result<T, CitiesError>> {
        let mut unmounted = self.unmounted.clone();
        let already_unmounted = *unmounted.borrow();
        if already_unmounted {
            debug!("Store unmounted, skipping request");
            return None;
        }

        self.dispatch(Action::Loading).await;
        let result = tokio::select! {
            result = call => Some(result),
            _ = unmounted.changed() => None,
        };
        if result.is_none() {
            debug!("Store unmounted, abandoning in-flight request");
            self.dispatch(Action::Cancelled).await;
        }
        result
    }
}
