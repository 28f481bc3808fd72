//! Client-side store for a travel log of visited cities.
//!
//! [`store::CitiesProvider`] mounts a [`store::CityStore`] on top of the
//! remote city service ([`cities::Cities`]), loads the list once and hands
//! out [`store::CitiesHandle`]s to consumers. All state changes go through
//! [`store::reduce`].

pub mod cities;
pub mod config;
pub mod error;
pub mod logger;
pub mod position;
pub mod store;

pub use cities::{Cities, City, CityId, NewCity, Position};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use position::{url_position, UrlPosition};
pub use store::{CitiesHandle, CitiesProvider, CityStore, StoreState};
