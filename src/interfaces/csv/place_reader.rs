use crate::domain::location::Coordinates;
use crate::error::{Result, StorefrontError};
use crate::infrastructure::in_memory::InMemoryGeocoder;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq)]
struct PlaceRecord {
    lat: f64,
    lng: f64,
    address: String,
}

/// Reads known places for the offline geocoder from a CSV with the header
/// `lat,lng,address`.
pub struct PlaceReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> PlaceReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(source);
        Self { reader }
    }

    pub fn places(self) -> impl Iterator<Item = Result<(Coordinates, String)>> {
        self.reader.into_deserialize::<PlaceRecord>().map(|result| {
            let record = result.map_err(StorefrontError::from)?;
            if record.address.is_empty() {
                return Err(StorefrontError::Validation(
                    "Place has no address".to_string(),
                ));
            }
            Ok((Coordinates::new(record.lat, record.lng)?, record.address))
        })
    }

    /// Builds a geocoder from every readable row. Bad rows are handed to
    /// `on_error` and skipped.
    pub fn into_geocoder(self, mut on_error: impl FnMut(StorefrontError)) -> InMemoryGeocoder {
        self.places()
            .fold(InMemoryGeocoder::new(), |geocoder, place| match place {
                Ok((at, address)) => geocoder.with_place(at, address),
                Err(e) => {
                    on_error(e);
                    geocoder
                }
            })
    }
}
