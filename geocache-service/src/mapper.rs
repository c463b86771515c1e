//! Provider response → response value mapping.

use tracing::{error, info};

use geocache_core::error::{GeocacheError, Result};
use geocache_core::types::{Address, Location, ProviderResponse};

/// Extracts the best match's coordinates.
///
/// A match without a label is treated as an unusable address.
pub fn map_to_location(response: &ProviderResponse) -> Result<Location> {
    let place = response.first().ok_or_else(|| {
        error!("No results in provider response for location mapping");
        GeocacheError::NoResults("provider returned no places".into())
    })?;

    if place.label.is_none() {
        error!("Best match has no label");
        return Err(GeocacheError::InvalidAddress(
            "invalid address data: best match has no label".into(),
        ));
    }

    info!(latitude = place.latitude, longitude = place.longitude, "Location mapped");
    Ok(Location::new(place.latitude, place.longitude))
}

/// Extracts the best match's label.
pub fn map_to_address(response: &ProviderResponse) -> Result<Address> {
    let label = response
        .first()
        .and_then(|place| place.label.as_deref())
        .ok_or_else(|| {
            error!("No labelled result in provider response for address mapping");
            GeocacheError::NoResults("provider returned no address".into())
        })?;

    info!(address = label, "Address mapped");
    Ok(Address::new(label))
}

#[cfg(test)]
mod tests {
    use super::*;
    use geocache_core::types::ProviderPlace;

    fn response(label: Option<&str>) -> ProviderResponse {
        ProviderResponse {
            data: vec![
                ProviderPlace {
                    latitude: 15.2993,
                    longitude: 74.124,
                    label: label.map(Into::into),
                },
                ProviderPlace {
                    latitude: 0.0,
                    longitude: 0.0,
                    label: Some("second best".into()),
                },
            ],
        }
    }

    #[test]
    fn test_location_uses_first_place() {
        let location = map_to_location(&response(Some("Goa, India"))).unwrap();
        assert_eq!(location, Location::new(15.2993, 74.124));
    }

    #[test]
    fn test_location_requires_label() {
        assert!(matches!(
            map_to_location(&response(None)),
            Err(GeocacheError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_address_uses_first_label() {
        let address = map_to_address(&response(Some("Goa, India"))).unwrap();
        assert_eq!(address.address, "Goa, India");
    }

    #[test]
    fn test_empty_response() {
        let empty = ProviderResponse::default();
        assert!(matches!(map_to_location(&empty), Err(GeocacheError::NoResults(_))));
        assert!(matches!(map_to_address(&empty), Err(GeocacheError::NoResults(_))));
    }
}
