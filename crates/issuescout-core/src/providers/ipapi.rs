// ipapi.co provider - bridges the API client with the IpGeolocator trait
use async_trait::async_trait;
use issuescout_api::{GeoLookup, IpApiClient};
use std::time::Duration;

use crate::{config::GeolocationConfig, location::IpGeolocator, models::Location, Result};

/// Wrapper around IpApiClient that implements IpGeolocator
pub struct IpApiProvider {
    client: IpApiClient,
}

impl IpApiProvider {
    pub fn from_config(config: &GeolocationConfig) -> Result<Self> {
        let client = IpApiClient::with_endpoint(
            config.endpoint.clone(),
            Duration::from_secs(config.timeout_secs),
        )?;
        Ok(Self { client })
    }
}

#[async_trait]
impl IpGeolocator for IpApiProvider {
    async fn locate(&self) -> Result<Location> {
        let lookup = self.client.lookup().await?;
        Ok(lookup_to_location(lookup))
    }
}

/// Convert the API answer to our internal Location model
fn lookup_to_location(lookup: GeoLookup) -> Location {
    Location {
        country: lookup.country_name,
        country_code: lookup.country_code.to_uppercase(),
        region: lookup.region,
        city: lookup.city,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_to_location() {
        let location = lookup_to_location(GeoLookup {
            country_code: "de".into(),
            country_name: "Germany".into(),
            region: Some("Bavaria".into()),
            city: None,
        });

        assert_eq!(location.country, "Germany");
        assert_eq!(location.country_code, "DE");
        assert_eq!(location.region.as_deref(), Some("Bavaria"));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_an_error() {
        let config = GeolocationConfig {
            enabled: true,
            endpoint: "http://127.0.0.1:9/json/".to_string(),
            timeout_secs: 1,
        };
        let provider = IpApiProvider::from_config(&config).unwrap();
        assert!(provider.locate().await.is_err());
    }
}
