//! Back-office collections.
//!
//! Entity bodies are passed through as JSON; their shape belongs to the
//! backend and the console's forms.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;
use tracing::instrument;

use boxoffice_core::error::{Error, InvalidInputError};

use crate::client::ApiClient;
use crate::endpoints::{REPORTS, ReportRequest};

/// A CRUD collection exposed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Clusters,
    Genres,
    Movies,
    Actors,
    Rates,
    Rooms,
    ScreenTypes,
    Showtimes,
    Promotions,
    Users,
}

impl Resource {
    pub const ALL: [Resource; 10] = [
        Resource::Clusters,
        Resource::Genres,
        Resource::Movies,
        Resource::Actors,
        Resource::Rates,
        Resource::Rooms,
        Resource::ScreenTypes,
        Resource::Showtimes,
        Resource::Promotions,
        Resource::Users,
    ];

    /// Path segment of the collection.
    pub fn segment(self) -> &'static str {
        match self {
            Resource::Clusters => "clusters",
            Resource::Genres => "genres",
            Resource::Movies => "movies",
            Resource::Actors => "actors",
            Resource::Rates => "rates",
            Resource::Rooms => "rooms",
            Resource::ScreenTypes => "screen-types",
            Resource::Showtimes => "showtimes",
            Resource::Promotions => "promotions",
            Resource::Users => "users",
        }
    }

    /// Console screen that manages the collection.
    pub fn route(self) -> &'static str {
        match self {
            Resource::Promotions => "/discounts",
            Resource::Clusters => "/clusters",
            Resource::Genres => "/genres",
            Resource::Movies => "/movies",
            Resource::Actors => "/actors",
            Resource::Rates => "/rates",
            Resource::Rooms => "/rooms",
            Resource::ScreenTypes => "/screen-types",
            Resource::Showtimes => "/showtimes",
            Resource::Users => "/users",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}

impl FromStr for Resource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().trim_matches('/').to_ascii_lowercase();
        let wanted = match wanted.as_str() {
            "discounts" => "promotions",
            other => other,
        };

        Resource::ALL
            .into_iter()
            .find(|resource| resource.segment() == wanted)
            .ok_or_else(|| {
                InvalidInputError::Resource {
                    value: s.to_string(),
                }
                .into()
            })
    }
}

impl ApiClient {
    /// List every entity of a collection.
    #[instrument(skip(self))]
    pub async fn list(&self, resource: Resource) -> Result<Value, Error> {
        self.get(&[resource.segment()]).await
    }

    /// Fetch one entity.
    #[instrument(skip(self))]
    pub async fn fetch(&self, resource: Resource, id: &str) -> Result<Value, Error> {
        self.get(&[resource.segment(), id]).await
    }

    /// Create an entity.
    #[instrument(skip(self, body))]
    pub async fn create(&self, resource: Resource, body: &Value) -> Result<Value, Error> {
        self.post(&[resource.segment()], body).await
    }

    /// Replace an entity.
    #[instrument(skip(self, body))]
    pub async fn update(&self, resource: Resource, id: &str, body: &Value) -> Result<Value, Error> {
        self.put(&[resource.segment(), id], body).await
    }

    /// Delete an entity.
    #[instrument(skip(self))]
    pub async fn remove(&self, resource: Resource, id: &str) -> Result<Value, Error> {
        self.delete(&[resource.segment(), id]).await
    }

    /// Fetch the sales report of a month.
    #[instrument(skip(self))]
    pub async fn monthly_report(&self, date: &str) -> Result<Value, Error> {
        self.post(REPORTS, &ReportRequest { date }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_segments_and_aliases() {
        assert_eq!("clusters".parse::<Resource>().unwrap(), Resource::Clusters);
        assert_eq!("Screen-Types".parse::<Resource>().unwrap(), Resource::ScreenTypes);
        assert_eq!("discounts".parse::<Resource>().unwrap(), Resource::Promotions);
        assert!("popcorn".parse::<Resource>().is_err());
    }

    #[test]
    fn every_resource_maps_to_a_console_route() {
        use boxoffice_core::access::CONSOLE_ROUTES;

        for resource in Resource::ALL {
            let route = CONSOLE_ROUTES.find(resource.route());
            assert!(route.is_some(), "{resource} has no route");
            assert!(!route.unwrap().is_public());
        }
    }
}
