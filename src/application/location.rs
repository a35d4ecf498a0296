use crate::application::checkout::CheckoutForm;
use crate::domain::location::Coordinates;
use crate::domain::notice::Notice;
use crate::domain::ports::{
    ADDRESS_KEY, GeocoderBox, KeyValueStoreBox, NotifierBox, USER_LOCATION_KEY,
};
use crate::error::{Result, StorefrontError};
use tracing::{debug, warn};

/// Fills the delivery address and location of the order form.
///
/// Geocoding problems never fail the form: a reverse lookup that finds
/// nothing keeps the previous address, and a failed forward lookup only
/// raises a notice.
pub struct LocationPicker {
    geocoder: GeocoderBox,
    local: KeyValueStoreBox,
    notifier: NotifierBox,
    region: Option<String>,
}

impl LocationPicker {
    pub fn new(geocoder: GeocoderBox, local: KeyValueStoreBox, notifier: NotifierBox) -> Self {
        Self {
            geocoder,
            local,
            notifier,
            region: None,
        }
    }

    /// Appends `region` to every typed address before it is geocoded.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Picks up the location saved by a previous visit, if any.
    pub async fn restore(&self, form: &mut CheckoutForm) -> Result<Option<Coordinates>> {
        let Some(saved) = self.local.get(USER_LOCATION_KEY)? else {
            return Ok(None);
        };
        let coords = match saved.parse::<Coordinates>() {
            Ok(coords) => coords,
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable saved location");
                return Ok(None);
            }
        };

        form.location = coords.to_string();
        if let Some(address) = self.local.get(ADDRESS_KEY)? {
            form.address = address;
        }
        self.resolve_address(form, coords).await?;
        Ok(Some(coords))
    }

    /// Uses a point chosen on the map or reported by the device.
    pub async fn pin(&self, form: &mut CheckoutForm, coords: Coordinates) -> Result<()> {
        let location = coords.to_string();
        self.local.set(USER_LOCATION_KEY, &location)?;
        form.location = location;
        self.resolve_address(form, coords).await
    }

    /// Geocodes an address the customer typed and adopts it on success.
    pub async fn lookup(&self, form: &mut CheckoutForm, address: &str) -> Result<Coordinates> {
        let address = address.trim();
        if address.is_empty() {
            return Err(StorefrontError::Validation(
                "Address must not be empty".to_string(),
            ));
        }
        let query = match &self.region {
            Some(region) => format!("{address}, {region}"),
            None => address.to_string(),
        };

        match self.geocoder.forward(&query).await {
            Ok(Some(coords)) => {
                let location = coords.to_string();
                self.local.set(USER_LOCATION_KEY, &location)?;
                self.local.set(ADDRESS_KEY, address)?;
                form.location = location;
                form.address = address.to_string();
                debug!(%coords, "Typed address resolved");
                Ok(coords)
            }
            Ok(None) => {
                self.notifier.notify(&Notice::LocationError {
                    message: "Could not find that address".to_string(),
                });
                Err(StorefrontError::Geocode(format!("No match for {query:?}")))
            }
            Err(e) => {
                warn!(error = %e, "Forward geocoding failed");
                self.notifier.notify(&Notice::LocationError {
                    message: "Error looking up the address".to_string(),
                });
                Err(StorefrontError::Geocode(e.to_string()))
            }
        }
    }

    async fn resolve_address(&self, form: &mut CheckoutForm, coords: Coordinates) -> Result<()> {
        match self.geocoder.reverse(coords).await {
            Ok(Some(address)) => {
                self.local.set(ADDRESS_KEY, &address)?;
                form.address = address;
            }
            Ok(None) => warn!(%coords, "No address found for coordinates"),
            Err(e) => warn!(%coords, error = %e, "Reverse geocoding failed"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::KeyValueStore;
    use crate::infrastructure::in_memory::{
        InMemoryGeocoder, InMemoryKeyValueStore, RecordingNotifier,
    };

    const PLAZA: Coordinates = Coordinates {
        lat: 4.9214,
        lng: -75.0626,
    };

    fn picker(
        geocoder: InMemoryGeocoder,
        local: &InMemoryKeyValueStore,
        notifier: &RecordingNotifier,
    ) -> LocationPicker {
        LocationPicker::new(
            Box::new(geocoder),
            Box::new(local.clone()),
            Box::new(notifier.clone()),
        )
    }

    #[tokio::test]
    async fn test_pin_resolves_and_saves() {
        let local = InMemoryKeyValueStore::new();
        let geocoder = InMemoryGeocoder::new().with_place(PLAZA, "Plaza principal");
        let picker = picker(geocoder, &local, &RecordingNotifier::new());
        let mut form = CheckoutForm::new();

        picker.pin(&mut form, PLAZA).await.unwrap();

        assert_eq!(form.location, "4.9214,-75.0626");
        assert_eq!(form.address, "Plaza principal");
        assert_eq!(
            local.get(USER_LOCATION_KEY).unwrap().as_deref(),
            Some("4.9214,-75.0626")
        );
    }

    #[tokio::test]
    async fn test_pin_without_match_keeps_address() {
        let local = InMemoryKeyValueStore::new();
        let notifier = RecordingNotifier::new();
        let picker = picker(InMemoryGeocoder::new(), &local, &notifier);
        let mut form = CheckoutForm::new();
        form.address = "Calle 10".to_string();

        picker.pin(&mut form, PLAZA).await.unwrap();

        assert_eq!(form.address, "Calle 10");
        assert_eq!(form.location, "4.9214,-75.0626");
        assert!(notifier.notices().is_empty());
    }

    #[tokio::test]
    async fn test_lookup_appends_region() {
        let local = InMemoryKeyValueStore::new();
        let geocoder = InMemoryGeocoder::new().with_place(PLAZA, "Centro, Líbano");
        let picker = picker(geocoder, &local, &RecordingNotifier::new()).with_region("Líbano");
        let mut form = CheckoutForm::new();

        let coords = picker.lookup(&mut form, " Centro ").await.unwrap();

        assert_eq!(coords, PLAZA);
        assert_eq!(form.address, "Centro");
        assert_eq!(local.get(ADDRESS_KEY).unwrap().as_deref(), Some("Centro"));
    }

    #[tokio::test]
    async fn test_lookup_miss_notifies_and_keeps_state() {
        let local = InMemoryKeyValueStore::new();
        let notifier = RecordingNotifier::new();
        let picker = picker(InMemoryGeocoder::new(), &local, &notifier);
        let mut form = CheckoutForm::new();
        form.address = "Calle 10".to_string();
        form.location = "1,1".to_string();

        let result = picker.lookup(&mut form, "Nowhere").await;

        assert!(matches!(result, Err(StorefrontError::Geocode(_))));
        assert_eq!(form.address, "Calle 10");
        assert_eq!(form.location, "1,1");
        assert!(local.get(USER_LOCATION_KEY).unwrap().is_none());
        assert_eq!(notifier.notices().len(), 1);
    }

    #[tokio::test]
    async fn test_restore_saved_location() {
        let local = InMemoryKeyValueStore::new();
        local.set(USER_LOCATION_KEY, "4.9214,-75.0626").unwrap();
        local.set(ADDRESS_KEY, "Calle vieja").unwrap();
        let geocoder = InMemoryGeocoder::new().with_place(PLAZA, "Plaza principal");
        let picker = picker(geocoder, &local, &RecordingNotifier::new());
        let mut form = CheckoutForm::new();

        let restored = picker.restore(&mut form).await.unwrap();

        assert_eq!(restored, Some(PLAZA));
        assert_eq!(form.address, "Plaza principal");
    }

    #[tokio::test]
    async fn test_restore_ignores_garbage() {
        let local = InMemoryKeyValueStore::new();
        local.set(USER_LOCATION_KEY, "somewhere").unwrap();
        let picker = picker(InMemoryGeocoder::new(), &local, &RecordingNotifier::new());
        let mut form = CheckoutForm::new();

        assert_eq!(picker.restore(&mut form).await.unwrap(), None);
        assert!(form.location.is_empty());
    }
}
