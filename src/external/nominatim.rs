use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::AddressLookup;
use crate::{
    config::Config,
    entities::Coordinates,
    error::{invalid_input_error, upstream_error, Error},
};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Place {
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub display_name: String,
}

impl TryFrom<&Place> for Coordinates {
    type Error = Error;

    fn try_from(place: &Place) -> Result<Self, Self::Error> {
        let latitude = place.lat.parse().map_err(|_| upstream_error())?;
        let longitude = place.lon.parse().map_err(|_| upstream_error())?;

        Coordinates::new(latitude, longitude).map_err(|_| upstream_error())
    }
}

/// OpenStreetMap's Nominatim search API.
#[derive(Clone, Debug)]
pub struct Nominatim {
    client: reqwest::Client,
    api_base: String,
}

impl Nominatim {
    pub fn new(config: &Config) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            api_base: config.nominatim_api_base.clone(),
        })
    }

    #[tracing::instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<Place>, Error> {
        let url = format!("https://{}/search", self.api_base);

        let res = self
            .client
            .get(url)
            .query(&[("format", "json")])
            .query(&[("q", query)])
            .query(&[("limit", 1)])
            .send()
            .await?;

        let status_code = res.status().as_u16();

        if (400..500).contains(&status_code) {
            return Err(invalid_input_error());
        } else if status_code != 200 {
            return Err(upstream_error());
        }

        Ok(res.json().await?)
    }
}

#[async_trait]
impl AddressLookup for Nominatim {
    async fn lookup(&self, text: &str) -> Result<Option<Coordinates>, Error> {
        let places = self.search(text).await?;

        match places.first() {
            Some(place) => {
                tracing::info!("nominatim matched {:?}", place.display_name);
                Ok(Some(place.try_into()?))
            }
            None => Ok(None),
        }
    }
}
