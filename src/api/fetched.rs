//! Live-or-demo results for the admin views.
//!
//! When the backend cannot be reached the admin views may substitute
//! illustrative data so they stay populated. That substitution is always
//! explicit: it only happens when demo fallback is enabled, and the result is
//! tagged [`Fetched::Demo`] so renderers can label it.

use chrono::{DateTime, Utc};
use std::future::Future;

use crate::errors::ApiError;

#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<T> {
    /// Real backend data and when it was fetched
    Live { data: T, fetched_at: DateTime<Utc> },
    /// Placeholder data; `reason` is the failure that triggered it
    Demo { data: T, reason: String },
}

impl<T> Fetched<T> {
    pub fn data(&self) -> &T {
        match self {
            Self::Live { data, .. } | Self::Demo { data, .. } => data,
        }
    }

    pub fn into_data(self) -> T {
        match self {
            Self::Live { data, .. } | Self::Demo { data, .. } => data,
        }
    }

    pub fn is_demo(&self) -> bool {
        matches!(self, Self::Demo { .. })
    }

    /// Fetch time of live data; demo data has none.
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Live { fetched_at, .. } => Some(*fetched_at),
            Self::Demo { .. } => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Fetched<U> {
        match self {
            Self::Live { data, fetched_at } => Fetched::Live {
                data: f(data),
                fetched_at,
            },
            Self::Demo { data, reason } => Fetched::Demo {
                data: f(data),
                reason,
            },
        }
    }
}

/// Await `fetch`; on failure, either propagate the error or, when
/// `demo_fallback` is set, return labeled demo data from `demo`.
pub async fn fetch_or_demo<T, F, D>(fetch: F, demo_fallback: bool, demo: D) -> Result<Fetched<T>, ApiError>
where
    F: Future<Output = Result<T, ApiError>>,
    D: FnOnce() -> T,
{
    match fetch.await {
        Ok(data) => Ok(Fetched::Live {
            data,
            fetched_at: Utc::now(),
        }),
        Err(error) if demo_fallback => {
            tracing::warn!("backend unavailable, showing demo data: {}", error);
            Ok(Fetched::Demo {
                data: demo(),
                reason: error.to_string(),
            })
        }
        Err(error) => Err(error),
    }
}
