//! Store actions.
//!
//! The transition set is closed. In Rust it is checked by the compiler, and
//! the wire form (`{"type": "...", "payload": ...}`) is checked by
//! [`Action::from_json`].

use super::error::StateError;
use crate::cities::{City, CityId};
use serde::{Deserialize, Serialize};

/// Every tag the reducer understands, in wire form.
///
pub const ACTION_TAGS: [&str; 7] = [
    "loading",
    "cancelled",
    "cities/loaded",
    "city/loaded",
    "city/created",
    "city/deleted",
    "rejected",
];

/// Specify the different state transitions.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum Action {
    #[serde(rename = "loading")]
    Loading,
    /// Closes a `loading` whose remote call was abandoned on unmount
    #[serde(rename = "cancelled")]
    Cancelled,
    #[serde(rename = "cities/loaded")]
    CitiesLoaded(Vec<City>),
    #[serde(rename = "city/loaded")]
    CityLoaded(City),
    #[serde(rename = "city/created")]
    CityCreated(City),
    #[serde(rename = "city/deleted")]
    CityDeleted(CityId),
    #[serde(rename = "rejected")]
    Rejected(String),
}

impl Action {
    /// Returns the wire tag of the action.
    ///
    pub fn tag(&self) -> &'static str {
        match self {
            Action::Loading => "loading",
            Action::Cancelled => "cancelled",
            Action::CitiesLoaded(_) => "cities/loaded",
            Action::CityLoaded(_) => "city/loaded",
            Action::CityCreated(_) => "city/created",
            Action::CityDeleted(_) => "city/deleted",
            Action::Rejected(_) => "rejected",
        }
    }

    /// Decode an action from its wire form. An unrecognised tag is reported
    /// as [`StateError::UnknownAction`].
    ///
    pub fn from_json(raw: &str) -> Result<Action, StateError> {
        let value: serde_json::Value =
            serde_json::from_str(raw).map_err(|e| StateError::MalformedAction {
                tag: String::new(),
                message: e.to_string(),
            })?;

        let tag = value
            .get("type")
            .and_then(|t| t.as_str())
            .ok_or_else(|| StateError::UnknownAction(value["type"].to_string()))?
            .to_owned();
        if !ACTION_TAGS.contains(&tag.as_str()) {
            return Err(StateError::UnknownAction(tag));
        }

        serde_json::from_value(value).map_err(|e| StateError::MalformedAction {
            tag,
            message: e.to_string(),
        })
    }
}
