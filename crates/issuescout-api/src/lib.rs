// API clients and wire types for the services the engine talks to
pub mod geolocation;
pub mod github;

// Re-export common types
pub use geolocation::{GeoError, GeoLookup, IpApiClient, IPAPI_ENDPOINT};
pub use github::{GitHubIssue, GitHubLabel};
