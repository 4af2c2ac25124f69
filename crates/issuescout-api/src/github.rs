// GitHub issue shapes as returned by the REST/Search API
//
// Only the fields the classifiers read are modelled; serde ignores the rest.
use serde::{Deserialize, Serialize};

/// Issue label - `{ "name": "good first issue", "color": "7057ff" }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitHubLabel {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

impl GitHubLabel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: None,
        }
    }
}

/// The slice of an issue the engine cares about
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GitHubIssue {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub repository_url: Option<String>,
    #[serde(default)]
    pub labels: Vec<GitHubLabel>,
}
