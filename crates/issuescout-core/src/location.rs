// Best-effort user location: IP lookup first, locale second
use crate::countries::{country_name, COUNTRY_NAMES};
use crate::locale::locale_region;
use crate::models::{IssueContent, Location};
use crate::Result;
use async_trait::async_trait;
use regex::Regex;
use tracing::{debug, info, warn};

/// Trait for IP geolocation services - lets tests swap in a canned answer
///
/// Implementations make one attempt per call and report any failure as an
/// error; the resolver decides what a failure means.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IpGeolocator: Send + Sync {
    async fn locate(&self) -> Result<Location>;
}

/// Which signal a resolved location came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationSource {
    IpLookup,
    Locale,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocation {
    pub location: Location,
    pub source: LocationSource,
}

/// Country guess from a `language-REGION` locale
///
/// Unknown region codes pass through verbatim as both code and name.
pub fn location_from_locale(locale: &str) -> Option<Location> {
    let region = locale_region(locale)?;
    let name = country_name(&region).map(str::to_string).unwrap_or_else(|| region.clone());
    Some(Location::new(name, region))
}

/// Runs the fallback chain once: IP service, then locale, then nothing
pub struct LocationResolver<'a> {
    geolocator: Option<&'a dyn IpGeolocator>,
    locale: &'a str,
}

impl<'a> LocationResolver<'a> {
    pub fn new(geolocator: Option<&'a dyn IpGeolocator>, locale: &'a str) -> Self {
        Self { geolocator, locale }
    }

    /// Resolve a location, stopping at the first source that answers
    ///
    /// Never retries and never fails: an unreachable service falls through to
    /// the locale, and an unusable locale means `None`.
    pub async fn resolve(&self) -> Option<ResolvedLocation> {
        if let Some(geolocator) = self.geolocator {
            match geolocator.locate().await {
                Ok(location) if is_complete(&location) => {
                    info!(
                        "Located via IP lookup: {} ({})",
                        location.country, location.country_code
                    );
                    return Some(ResolvedLocation {
                        location,
                        source: LocationSource::IpLookup,
                    });
                }
                Ok(_) => warn!("IP lookup returned an incomplete location, falling back to locale"),
                Err(e) => warn!("Failed to detect location from IP: {}", e),
            }
        } else {
            debug!("IP geolocation disabled, using locale only");
        }

        match location_from_locale(self.locale) {
            Some(location) => {
                debug!("Located via locale {}: {}", self.locale, location.country_code);
                Some(ResolvedLocation {
                    location,
                    source: LocationSource::Locale,
                })
            }
            None => {
                debug!("Locale {} carries no region", self.locale);
                None
            }
        }
    }
    /// Just the location, without where it came from
    pub async fn resolve_location(&self) -> Option<Location> {
        self.resolve().await.map(|r| r.location)
    }
}

fn is_complete(location: &Location) -> bool {
    !location.country.trim().is_empty() && !location.country_code.trim().is_empty()
}

/// Keep items that mention a country
///
/// GitHub has no location data, so this looks for the country's name or code
/// in the repository URL, title and body. `None` or an empty code keeps
/// everything.
pub fn filter_by_location<T: IssueContent>(items: Vec<T>, country_code: Option<&str>) -> Vec<T> {
    let code = match country_code.map(str::trim) {
        Some(code) if !code.is_empty() => code.to_uppercase(),
        _ => return items,
    };

    let mut needles: Vec<String> = Vec::new();
    if let Some((_, name)) = COUNTRY_NAMES.iter().find(|(c, _)| *c == code) {
        needles.push(name.to_lowercase());
    }
    needles.extend(
        match code.as_str() {
            "US" => &["usa", "united states"][..],
            "GB" => &["uk", "united kingdom"][..],
            "CA" => &["canada"][..],
            _ => &[][..],
        }
        .iter()
        .map(|s| s.to_string()),
    );

    // Two-letter codes only count as whole words, otherwise "us" matches "use"
    let code_pattern = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(&code))).ok();

    items
        .into_iter()
        .filter(|item| {
            let text = format!(
                "{} {}",
                item.repository_url().unwrap_or(""),
                item.searchable_text()
            )
            .to_lowercase();

            needles.iter().any(|n| text.contains(n.as_str()))
                || code_pattern.as_ref().map_or(false, |re| re.is_match(&text))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use issuescout_api::{GeoError, GitHubIssue};

    fn geo_ok(location: Location) -> MockIpGeolocator {
        let mut geo = MockIpGeolocator::new();
        geo.expect_locate()
            .times(1)
            .returning(move || Ok(location.clone()));
        geo
    }

    fn geo_down() -> MockIpGeolocator {
        let mut geo = MockIpGeolocator::new();
        geo.expect_locate()
            .times(1)
            .returning(|| Err(Error::GeolocationError(GeoError::BadStatus(503))));
        geo
    }

    #[test]
    fn test_location_from_locale() {
        assert_eq!(
            location_from_locale("en-US"),
            Some(Location::new("United States", "US"))
        );
        assert_eq!(
            location_from_locale("pt_br.UTF-8"),
            Some(Location::new("Brazil", "BR"))
        );
        // Unknown codes pass through as both code and name
        assert_eq!(location_from_locale("es-AR"), Some(Location::new("AR", "AR")));
        assert_eq!(location_from_locale("en"), None);
    }

    #[tokio::test]
    async fn test_ip_lookup_wins() {
        let geo = geo_ok(Location::new("Germany", "DE"));
        let resolved = LocationResolver::new(Some(&geo), "en-US").resolve().await.unwrap();

        assert_eq!(resolved.source, LocationSource::IpLookup);
        assert_eq!(resolved.location.country_code, "DE");
    }

    #[tokio::test]
    async fn test_ip_failure_falls_back_to_locale() {
        let geo = geo_down();
        let resolved = LocationResolver::new(Some(&geo), "fr-FR").resolve().await.unwrap();

        assert_eq!(resolved.source, LocationSource::Locale);
        assert_eq!(resolved.location, Location::new("France", "FR"));
    }

    #[tokio::test]
    async fn test_incomplete_ip_answer_is_failure() {
        let geo = geo_ok(Location::new("", "DE"));
        let resolved = LocationResolver::new(Some(&geo), "ja-JP").resolve().await.unwrap();

        assert_eq!(resolved.source, LocationSource::Locale);
        assert_eq!(resolved.location.country_code, "JP");
    }

    #[tokio::test]
    async fn test_nothing_to_go_on() {
        let geo = geo_down();
        assert!(LocationResolver::new(Some(&geo), "en").resolve().await.is_none());
        assert!(LocationResolver::new(None, "C").resolve().await.is_none());
    }

    #[tokio::test]
    async fn test_resolve_location_drops_the_source() {
        let geo = geo_ok(Location::new("Japan", "JP"));
        let location = LocationResolver::new(Some(&geo), "en-US").resolve_location().await;
        assert_eq!(location, Some(Location::new("Japan", "JP")));
    }

    #[tokio::test]
    async fn test_disabled_geolocation_uses_locale() {
        let resolved = LocationResolver::new(None, "de-CH").resolve().await.unwrap();
        assert_eq!(resolved.source, LocationSource::Locale);
        assert_eq!(resolved.location.country, "Switzerland");
    }

    #[test]
    fn test_filter_by_location() {
        let items = vec![
            GitHubIssue {
                title: Some("Localize dates for Germany".into()),
                ..Default::default()
            },
            GitHubIssue {
                title: Some("Use the new API".into()),
                ..Default::default()
            },
            GitHubIssue {
                title: Some("Tax rules".into()),
                body: Some("Only applies in the USA".into()),
                ..Default::default()
            },
            GitHubIssue {
                title: Some("Support DE locale".into()),
                ..Default::default()
            },
        ];

        let german = filter_by_location(items.clone(), Some("de"));
        assert_eq!(german.len(), 2);

        let american = filter_by_location(items.clone(), Some("US"));
        assert_eq!(american.len(), 1);
        assert_eq!(american[0].title.as_deref(), Some("Tax rules"));

        assert_eq!(filter_by_location(items.clone(), None).len(), 4);
        assert_eq!(filter_by_location(items, Some("")).len(), 4);
    }
}
