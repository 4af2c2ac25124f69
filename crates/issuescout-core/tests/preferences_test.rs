use async_trait::async_trait;
use issuescout_api::{GitHubIssue, GitHubLabel};
use issuescout_core::config::GeolocationConfig;
use issuescout_core::{
    filter_by_currency, filter_by_difficulty, filter_by_location, CurrencyCode, DifficultyLevel,
    FileStorage, FixedLocale, IpApiProvider, IpGeolocator, Location, PreferenceStorage,
    PreferenceStore, Result, STORAGE_KEY,
};
use std::path::Path;
use tempfile::TempDir;

/// Answers every lookup with the same country
struct FixedGeolocator(Location);

#[async_trait]
impl IpGeolocator for FixedGeolocator {
    async fn locate(&self) -> Result<Location> {
        Ok(self.0.clone())
    }
}

/// Real client pointed at a port nothing listens on
fn unreachable_provider() -> IpApiProvider {
    IpApiProvider::from_config(&GeolocationConfig {
        enabled: true,
        endpoint: "http://127.0.0.1:9/json/".to_string(),
        timeout_secs: 2,
    })
    .unwrap()
}

fn open_store(dir: &Path, locale: &str) -> PreferenceStore {
    PreferenceStore::new(Box::new(FileStorage::new(dir)), Box::new(FixedLocale::new(locale)))
}

fn issue(title: &str, body: &str, labels: &[&str]) -> GitHubIssue {
    GitHubIssue {
        title: Some(title.to_string()),
        body: Some(body.to_string()),
        repository_url: Some("https://api.github.com/repos/acme/widgets".to_string()),
        labels: labels.iter().map(|l| GitHubLabel::new(*l)).collect(),
    }
}

#[tokio::test]
async fn test_first_run_with_unreachable_ip_service() {
    let temp_dir = TempDir::new().unwrap();
    let store = open_store(temp_dir.path(), "en-US").with_geolocator(Box::new(unreachable_provider()));

    store.initialize().await;

    let record = store.preferences();
    assert!(record.location.is_none());
    assert_eq!(record.natural_languages, vec!["en"]);
    assert_eq!(record.currency, Some(CurrencyCode::Usd));
    assert!(!store.is_detecting_location());
}

#[tokio::test]
async fn test_first_run_located_in_germany() {
    let temp_dir = TempDir::new().unwrap();
    let store = open_store(temp_dir.path(), "en-US")
        .with_geolocator(Box::new(FixedGeolocator(Location::new("Germany", "DE"))));

    store.initialize().await;

    let record = store.preferences();
    assert_eq!(record.location, Some(Location::new("Germany", "DE")));
    assert_eq!(record.currency, Some(CurrencyCode::Eur));
    assert_eq!(record.natural_languages, vec!["de"]);
}

#[tokio::test]
async fn test_preferences_survive_restart() {
    let temp_dir = TempDir::new().unwrap();

    let first = open_store(temp_dir.path(), "en-US")
        .with_geolocator(Box::new(FixedGeolocator(Location::new("Germany", "DE"))));
    first.initialize().await;
    first.update_currency(Some(CurrencyCode::Jpy));
    first.update_selected_difficulty(Some("beginner".to_string()));
    let saved = first.preferences();
    drop(first);

    // Different signals on the second run must not override anything stored
    let second = open_store(temp_dir.path(), "fr-FR")
        .with_geolocator(Box::new(FixedGeolocator(Location::new("Brazil", "BR"))));
    assert_eq!(second.preferences(), saved);
    second.initialize().await;
    assert_eq!(second.preferences(), saved);

    let raw = FileStorage::new(temp_dir.path())
        .get(STORAGE_KEY)
        .unwrap()
        .expect("preferences on disk");
    assert!(raw.contains("\"currency\":\"JPY\""));
    assert!(raw.contains("\"selectedDifficulty\":\"beginner\""));
}

#[tokio::test]
async fn test_clear_then_restart_keeps_locale_defaults() {
    let temp_dir = TempDir::new().unwrap();

    let store = open_store(temp_dir.path(), "pt-BR");
    store.update_selected_license(Some("MIT".to_string()));
    store.clear_all_preferences();
    drop(store);

    let reopened = open_store(temp_dir.path(), "pt-BR");
    let record = reopened.preferences();
    assert_eq!(record.natural_languages, vec!["pt"]);
    assert_eq!(record.currency, Some(CurrencyCode::Brl));
    assert!(record.selected_license.is_none());
    assert!(record.location.is_none());
}

#[test]
fn test_filters_compose_over_issue_listing() {
    let issues = vec![
        issue("Fix typo in README", "Bounty: $50", &["good first issue"]),
        issue("Rewrite scheduler", "Paying €800 for this", &["complex", "performance"]),
        issue("Add Polish translation", "Reward 200 zł, contributors from Poland welcome", &["beginner"]),
        issue("Docs cleanup", "No reward, just love", &["easy"]),
        issue("Port to ARM", "Bounty: 500 Canadian dollars", &["medium"]),
    ];

    let beginner = filter_by_difficulty(issues.clone(), Some(DifficultyLevel::Beginner));
    assert_eq!(beginner.len(), 3);

    let usd = filter_by_currency(beginner.clone(), Some(CurrencyCode::Usd));
    let titles: Vec<_> = usd.iter().map(|i| i.title.as_deref().unwrap()).collect();
    assert_eq!(titles, vec!["Fix typo in README", "Docs cleanup"]);

    let pln = filter_by_currency(beginner, Some(CurrencyCode::Pln));
    assert_eq!(pln.len(), 1);

    let cad = filter_by_currency(issues.clone(), Some(CurrencyCode::Cad));
    assert_eq!(cad[0].title.as_deref(), Some("Port to ARM"));
    assert!(filter_by_currency(cad, Some(CurrencyCode::Usd)).is_empty());

    let polish = filter_by_location(issues.clone(), Some("PL"));
    assert_eq!(polish.len(), 1);
    assert_eq!(filter_by_location(issues, None).len(), 5);
}
