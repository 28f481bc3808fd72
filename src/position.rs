//! Map position carried in a location's query string.

use crate::cities::Position;
use url::form_urlencoded;

/// Raw `lat`/`lng` query parameters. Values are passed on as written.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UrlPosition {
    pub lat: Option<String>,
    pub lng: Option<String>,
}

/// Read the `lat` and `lng` query parameters from a location, which may be a
/// full URL, a path with a query or a bare `?query`.
///
pub fn url_position(location: &str) -> UrlPosition {
    let query = match location.split_once('?') {
        Some((_, rest)) => rest,
        None => return UrlPosition::default(),
    };
    let query = query.split('#').next().unwrap_or_default();

    let mut position = UrlPosition::default();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        // First occurrence wins
        match key.as_ref() {
            "lat" if position.lat.is_none() => position.lat = Some(value.into_owned()),
            "lng" if position.lng.is_none() => position.lng = Some(value.into_owned()),
            _ => {}
        }
    }
    position
}

/// Build the query string that points the map at `position`.
///
pub fn position_query(position: &Position) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair("lat", &position.lat.to_string())
        .append_pair("lng", &position.lng.to_string())
        .finish()
}
