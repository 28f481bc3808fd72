mod client;
mod error;
mod resource;

pub use error::CitiesError;
pub use resource::*;

use crate::config::Config;
use client::Client;
use log::*;
use reqwest::Method;
use std::time::Duration;

/// Responsible for asynchronous interaction with the remote city service
/// including transformation of response data into explicitly-defined types.
///
pub struct Cities {
    client: Client,
}

impl Cities {
    /// Returns a new instance for the given base URL.
    ///
    pub fn new(base_url: &str, timeout: Duration) -> Result<Cities, CitiesError> {
        debug!("Initializing city service client for {}...", base_url);
        Ok(Cities {
            client: Client::new(base_url, timeout)?,
        })
    }

    /// Returns a new instance addressed and tuned by the configuration.
    ///
    pub fn from_config(config: &Config) -> Result<Cities, CitiesError> {
        Cities::new(
            &config.base_url,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Returns every city known to the service, in server order.
    ///
    pub async fn list(&self) -> Result<Vec<City>, CitiesError> {
        debug!("Requesting all cities...");
        let cities: Vec<City> = self.client.fetch(Method::GET, &["cities"], None).await?;
        debug!("Retrieved {} cities", cities.len());
        Ok(cities)
    }

    /// Returns the city with the given id.
    ///
    pub async fn city(&self, id: &CityId) -> Result<City, CitiesError> {
        debug!("Requesting city {}...", id);
        let id = id.to_string();
        self.client
            .fetch(Method::GET, &["cities", id.as_str()], None)
            .await
    }

    /// Creates a city and returns the record with its server-assigned id.
    ///
    pub async fn create(&self, new_city: &NewCity) -> Result<City, CitiesError> {
        debug!("Creating city with {} fields...", new_city.details().len());
        let body = serde_json::to_value(new_city)?;
        self.client
            .fetch(Method::POST, &["cities", ""], Some(&body))
            .await
    }

    /// Deletes the city with the given id. Any completed response counts as
    /// success.
    ///
    pub async fn delete(&self, id: &CityId) -> Result<(), CitiesError> {
        debug!("Deleting city {}...", id);
        let id = id.to_string();
        self.client
            .call(Method::DELETE, &["cities", id.as_str()], None)
            .await?;
        Ok(())
    }
}
