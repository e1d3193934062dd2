use async_trait::async_trait;

use super::{AddressLookup, GeocodingService};
use crate::{
    entities::Coordinates,
    error::{address_not_found_error, Error},
};

/// Resolves `"lat, lng"` literals locally and everything else through `L`.
#[derive(Debug)]
pub struct Geocoder<L> {
    lookup: L,
}

impl<L: AddressLookup> Geocoder<L> {
    pub fn new(lookup: L) -> Self {
        Self { lookup }
    }
}

#[async_trait]
impl<L: AddressLookup> GeocodingService for Geocoder<L> {
    #[tracing::instrument(skip(self))]
    async fn resolve(&self, text: &str) -> Result<Coordinates, Error> {
        let text = text.trim();

        if let Some(coordinates) = Coordinates::parse_literal(text) {
            return Ok(coordinates);
        }

        let coordinates = self
            .lookup
            .lookup(text)
            .await?
            .ok_or_else(|| address_not_found_error())?;

        tracing::info!("resolved {:?} to {}", text, coordinates);

        Ok(coordinates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Gazetteer {
        places: HashMap<String, Coordinates>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl AddressLookup for Gazetteer {
        async fn lookup(&self, text: &str) -> Result<Option<Coordinates>, Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.places.get(text).copied())
        }
    }

    fn geocoder() -> Geocoder<Gazetteer> {
        let mut places = HashMap::new();
        places.insert(
            "Big Ben".to_string(),
            Coordinates::new(51.5007, -0.1246).unwrap(),
        );

        Geocoder::new(Gazetteer {
            places,
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn literal_short_circuits_lookup() {
        let geocoder = geocoder();

        let coordinates = geocoder.resolve("51.5, -0.1").await.unwrap();

        assert_eq!(coordinates, Coordinates::new(51.5, -0.1).unwrap());
        assert_eq!(geocoder.lookup.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn free_text_goes_to_lookup() {
        let geocoder = geocoder();

        let coordinates = geocoder.resolve("  Big Ben ").await.unwrap();

        assert_eq!(coordinates.latitude, 51.5007);
        assert_eq!(geocoder.lookup.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unknown_address_is_not_found() {
        let geocoder = geocoder();

        let err = geocoder.resolve("Atlantis").await.unwrap_err();

        assert_eq!(err, address_not_found_error());
    }
}
