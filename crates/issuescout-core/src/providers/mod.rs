// Geolocation provider implementations
pub mod ipapi;

pub use ipapi::IpApiProvider;
