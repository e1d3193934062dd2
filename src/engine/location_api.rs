use super::Engine;

use async_trait::async_trait;

use crate::{
    api::LocationAPI,
    entities::{Coordinates, Notice, PositionFix},
    error::Error,
};

#[async_trait]
impl LocationAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn locate(&self) -> Result<PositionFix, Error> {
        let fix = self.positions.current_fix().await.map_err(|err| {
            if !err.is_position_error() {
                return self.report("unable to get your location", err);
            }

            // the reason already reads as a sentence
            tracing::warn!("{}", err);
            self.sink.notify(Notice::error(err.message.clone(), self.notice_ttl));
            err
        })?;

        tracing::info!("located at {}", fix.point);

        Ok(fix)
    }

    #[tracing::instrument(skip(self))]
    async fn geocode(&self, text: String) -> Result<Coordinates, Error> {
        self.geocoder.resolve(&text).await
    }
}
