use super::action::Action;
use crate::cities::{City, CityId};
use serde::Serialize;

/// Houses data representative of the city store.
///
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct StoreState {
    pub cities: Vec<City>,
    pub is_loading: bool,
    pub current_city: Option<City>,
    /// Last failure message. Successful transitions leave it in place.
    pub error: String,
}

impl StoreState {
    /// Whether `id` names the currently selected city.
    ///
    pub fn is_current(&self, id: &CityId) -> bool {
        self.current_city
            .as_ref()
            .map_or(false, |city| &city.id == id)
    }
}

/// Apply one transition and return the resulting state.
///
pub fn reduce(state: StoreState, action: Action) -> StoreState {
    match action {
        Action::Loading => StoreState {
            is_loading: true,
            ..state
        },
        Action::Cancelled => StoreState {
            is_loading: false,
            ..state
        },
        Action::CitiesLoaded(cities) => StoreState {
            is_loading: false,
            cities,
            ..state
        },
        Action::CityLoaded(city) => StoreState {
            is_loading: false,
            current_city: Some(city),
            ..state
        },
        Action::CityCreated(city) => {
            let mut cities = state.cities;
            cities.push(city.clone());
            StoreState {
                is_loading: false,
                cities,
                current_city: Some(city),
                error: state.error,
            }
        }
        Action::CityDeleted(id) => {
            let mut cities = state.cities;
            cities.retain(|city| city.id != id);
            StoreState {
                is_loading: false,
                cities,
                current_city: None,
                error: state.error,
            }
        }
        Action::Rejected(message) => StoreState {
            is_loading: false,
            error: message,
            ..state
        },
    }
}
