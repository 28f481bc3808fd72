//! City store module.
//!
//! This module contains the state container for cities, including:
//! - `StoreState` and the pure `reduce` transition function
//! - The closed `Action` set and its wire form
//! - `CityStore` operations that pair transitions with remote calls
//! - `CitiesProvider`/`CitiesHandle` tying a store to its owning scope

mod action;
mod city_store;
mod error;
mod provider;
mod reducer;

pub use action::{Action, ACTION_TAGS};
pub use city_store::CityStore;
pub use error::StateError;
pub use provider::{CitiesHandle, CitiesProvider};
pub use reducer::{reduce, StoreState};
