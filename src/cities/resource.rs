use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::convert::Infallible;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Identifier assigned to a city by the remote service.
///
/// The service may hand out numeric or string ids. A text id that reads as
/// an integer compares by its value, so `CityId::from(7)`, `"7".parse()` and
/// `CityId::Text("07")` name the same record.
///
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CityId {
    Number(i64),
    Text(String),
}

impl fmt::Display for CityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CityId::Number(n) => write!(f, "{}", n),
            CityId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Comparison key shared by `PartialEq` and `Hash`.
///
#[derive(PartialEq, Eq, Hash)]
enum IdKey<'a> {
    Number(i64),
    Text(&'a str),
}

impl CityId {
    fn key(&self) -> IdKey<'_> {
        match self {
            CityId::Number(n) => IdKey::Number(*n),
            CityId::Text(s) => match s.parse::<i64>() {
                Ok(n) => IdKey::Number(n),
                Err(_) => IdKey::Text(s),
            },
        }
    }
}

impl PartialEq for CityId {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for CityId {}

impl Hash for CityId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl FromStr for CityId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Keep the text form unless it renders back identically, so "07"
        // is still requested as "07"
        Ok(match s.parse::<i64>() {
            Ok(n) if n.to_string() == s => CityId::Number(n),
            _ => CityId::Text(s.to_owned()),
        })
    }
}

impl From<i64> for CityId {
    fn from(n: i64) -> Self {
        CityId::Number(n)
    }
}

impl From<i32> for CityId {
    fn from(n: i32) -> Self {
        CityId::Number(i64::from(n))
    }
}

impl From<&str> for CityId {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(id) => id,
            Err(never) => match never {},
        }
    }
}

/// Geographic coordinates of a city.
///
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lng: f64,
}

/// A visited city as stored by the remote service.
///
/// Everything besides `id` is kept as an opaque JSON object so unknown fields
/// survive a round trip. Accessors cover the fields the service usually
/// carries.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: CityId,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl City {
    pub fn new(id: impl Into<CityId>) -> Self {
        City {
            id: id.into(),
            details: Map::new(),
        }
    }

    /// Set a detail field, replacing any previous value.
    ///
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.details.insert(key.to_owned(), value.into());
        self
    }

    /// Returns the city name, stored as `cityName` or plain `name`.
    ///
    pub fn name(&self) -> Option<&str> {
        self.text("cityName").or_else(|| self.text("name"))
    }

    pub fn country(&self) -> Option<&str> {
        self.text("country")
    }

    pub fn emoji(&self) -> Option<&str> {
        self.text("emoji")
    }

    pub fn date(&self) -> Option<&str> {
        self.text("date")
    }

    pub fn notes(&self) -> Option<&str> {
        self.text("notes")
    }

    /// Returns the stored position when it decodes as `{lat, lng}` numbers.
    ///
    pub fn position(&self) -> Option<Position> {
        let value = self.details.get("position")?;
        serde_json::from_value(value.clone()).ok()
    }

    fn text(&self, key: &str) -> Option<&str> {
        self.details.get(key).and_then(Value::as_str)
    }
}

/// Payload for a city that has not been assigned an id yet.
///
/// Passed through to the service as-is; nothing here is validated.
///
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewCity {
    details: Map<String, Value>,
}

impl NewCity {
    pub fn new() -> Self {
        NewCity::default()
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.details.insert(key.to_owned(), value.into());
        self
    }

    pub fn details(&self) -> &Map<String, Value> {
        &self.details
    }
}

impl From<Map<String, Value>> for NewCity {
    fn from(details: Map<String, Value>) -> Self {
        NewCity { details }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_city_id_numeric_and_text_forms_match() {
        assert_eq!(CityId::from(7), CityId::from("7"));
        assert_eq!(CityId::from("abc"), CityId::Text("abc".to_string()));
        assert_ne!(CityId::from(7), CityId::from(8));
        assert_ne!(CityId::from("7a"), CityId::from(7));
    }

    #[test]
    fn test_city_id_hash_agrees_with_eq() {
        use std::collections::HashSet;
        let mut ids = HashSet::new();
        ids.insert(CityId::from(3));
        assert!(ids.contains(&CityId::Text("3".to_string())));
        assert!(ids.contains(&CityId::Text("03".to_string())));
    }

    #[test]
    fn test_city_id_text_with_leading_zero_matches_number() {
        assert_eq!(CityId::Text("07".to_string()), CityId::from(7));
        assert_eq!(CityId::from("07"), CityId::Number(7));
        // Parsing keeps the text so the service sees the id as written
        assert_eq!(CityId::from("07").to_string(), "07");
        assert_eq!(CityId::from("7").to_string(), "7");
        assert_ne!(CityId::from("07x"), CityId::from(7));
    }

    #[test]
    fn test_city_deserializes_with_details() {
        let city: City = serde_json::from_value(json!({
            "cityName": "Lisbon",
            "country": "Portugal",
            "emoji": "🇵🇹",
            "date": "2027-10-31T15:59:59.138Z",
            "notes": "My favorite city so far!",
            "position": { "lat": 38.727881642324164, "lng": -9.140900099907554 },
            "id": 73930385
        }))
        .unwrap();

        assert_eq!(city.id, CityId::from(73930385));
        assert_eq!(city.name(), Some("Lisbon"));
        assert_eq!(city.country(), Some("Portugal"));
        assert_eq!(city.emoji(), Some("🇵🇹"));
        assert_eq!(city.notes(), Some("My favorite city so far!"));
        assert!(city.date().is_some());
        let position = city.position().unwrap();
        assert!((position.lat - 38.727881642324164).abs() < f64::EPSILON);
    }

    #[test]
    fn test_city_keeps_unknown_fields() {
        let value = json!({ "id": "x1", "name": "Porto", "rating": 5 });
        let city: City = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(city.name(), Some("Porto"));
        assert_eq!(serde_json::to_value(&city).unwrap(), value);
    }

    #[test]
    fn test_city_position_missing_or_malformed() {
        let city = City::new(1).with("position", json!({ "lat": "north" }));
        assert!(city.position().is_none());
        assert!(City::new(2).position().is_none());
    }

    #[test]
    fn test_new_city_from_object() {
        let object = json!({ "cityName": "Faro", "notes": "" });
        let details = object.as_object().cloned().unwrap();
        let new_city = NewCity::from(details);
        assert_eq!(new_city.details().len(), 2);
        assert_eq!(serde_json::to_value(&new_city).unwrap(), object);
    }

    #[test]
    fn test_new_city_serializes_as_plain_object() {
        let new_city = NewCity::new().with("cityName", "Porto").with("country", "Portugal");
        assert_eq!(
            serde_json::to_value(&new_city).unwrap(),
            json!({ "cityName": "Porto", "country": "Portugal" })
        );
    }
}
