use std::fmt;

use serde::Deserialize;

use crate::client::ClientError;

/// Cluster manager endpoints served on the admin port.
const ADMIN_PREFIXES: &[&str] = &[
    "/pools",
    "/nodes",
    "/settings",
    "/diag",
    "/internalSettings",
    "/indexStatus",
    "/logs",
    "/sampleBuckets",
    "/controller",
];

/// Query engine endpoints served on the query port.
const QUERY_PREFIXES: &[&str] = &["/admin", "/query"];

/// The Couchbase REST service an endpoint belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Admin,
    Query,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Service::Admin => f.write_str("admin"),
            Service::Query => f.write_str("query"),
        }
    }
}

/// Path-prefix table deciding which base URL an endpoint is sent to.
///
/// A prefix matches an endpoint when the endpoint equals it or continues
/// with `/` or `?` right after it, so `/admin` covers `/admin/vitals` but
/// not `/administrator`. When prefixes from both lists match, the longest
/// one wins. A `/` prefix therefore acts as a catch-all for its service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EndpointRoutes {
    pub admin_prefixes: Vec<String>,
    pub query_prefixes: Vec<String>,
}

impl Default for EndpointRoutes {
    fn default() -> Self {
        Self {
            admin_prefixes: ADMIN_PREFIXES.iter().map(|p| p.to_string()).collect(),
            query_prefixes: QUERY_PREFIXES.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl EndpointRoutes {
    pub fn new<A, Q>(admin_prefixes: A, query_prefixes: Q) -> Self
    where
        A: IntoIterator,
        A::Item: Into<String>,
        Q: IntoIterator,
        Q::Item: Into<String>,
    {
        Self {
            admin_prefixes: admin_prefixes.into_iter().map(Into::into).collect(),
            query_prefixes: query_prefixes.into_iter().map(Into::into).collect(),
        }
    }

    /// Classify `endpoint`, or `None` when no prefix claims it.
    pub fn resolve(&self, endpoint: &str) -> Option<Service> {
        let admin = longest_match(&self.admin_prefixes, endpoint);
        let query = longest_match(&self.query_prefixes, endpoint);
        match (admin, query) {
            (Some(a), Some(q)) if q > a => Some(Service::Query),
            (Some(_), _) => Some(Service::Admin),
            (None, Some(_)) => Some(Service::Query),
            (None, None) => None,
        }
    }

    /// Reject tables where the same prefix is claimed by both services.
    pub fn validate(&self) -> Result<(), ClientError> {
        for query in &self.query_prefixes {
            let query = normalize(query);
            if self.admin_prefixes.iter().any(|admin| normalize(admin) == query) {
                return Err(ClientError::AmbiguousRoute(query.to_string()));
            }
        }
        Ok(())
    }
}

fn normalize(prefix: &str) -> &str {
    prefix.trim_end_matches('/')
}

fn longest_match(prefixes: &[String], endpoint: &str) -> Option<usize> {
    prefixes
        .iter()
        .map(|p| normalize(p))
        .filter(|p| prefix_matches(p, endpoint))
        .map(str::len)
        .max()
}

fn prefix_matches(prefix: &str, endpoint: &str) -> bool {
    match endpoint.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_routes_cluster_endpoints_to_admin() {
        let routes = EndpointRoutes::default();
        assert_eq!(routes.resolve("/pools/default"), Some(Service::Admin));
        assert_eq!(routes.resolve("/pools"), Some(Service::Admin));
        assert_eq!(
            routes.resolve("/pools/default/buckets/beer-sample/stats"),
            Some(Service::Admin)
        );
        assert_eq!(routes.resolve("/nodes/self"), Some(Service::Admin));
    }

    #[test]
    fn default_catalog_routes_query_endpoints_to_query() {
        let routes = EndpointRoutes::default();
        assert_eq!(routes.resolve("/admin/vitals"), Some(Service::Query));
        assert_eq!(routes.resolve("/admin/settings"), Some(Service::Query));
        assert_eq!(routes.resolve("/query/service"), Some(Service::Query));
    }

    #[test]
    fn prefix_match_respects_segment_boundary() {
        let routes = EndpointRoutes::default();
        assert_eq!(routes.resolve("/administrator"), None);
        assert_eq!(routes.resolve("/poolside"), None);
        assert_eq!(routes.resolve("/admin?pretty=true"), Some(Service::Query));
    }

    #[test]
    fn unknown_endpoint_is_unrouted() {
        let routes = EndpointRoutes::default();
        assert_eq!(routes.resolve("/some/endpoint"), None);
        assert_eq!(routes.resolve(""), None);
        assert_eq!(routes.resolve("pools/default"), None);
    }

    #[test]
    fn longest_prefix_wins_across_services() {
        let routes = EndpointRoutes::new(["/admin"], ["/admin/vitals"]);
        assert_eq!(routes.resolve("/admin/vitals"), Some(Service::Query));
        assert_eq!(routes.resolve("/admin/settings"), Some(Service::Admin));
    }

    #[test]
    fn slash_prefix_is_catch_all() {
        let routes = EndpointRoutes::new(["/"], ["/admin"]);
        assert_eq!(routes.resolve("/some/endpoint"), Some(Service::Admin));
        assert_eq!(routes.resolve("/admin/endpoint"), Some(Service::Query));
    }

    #[test]
    fn trailing_slash_in_prefix_is_ignored() {
        let routes = EndpointRoutes::new(["/pools/"], Vec::<String>::new());
        assert_eq!(routes.resolve("/pools/default"), Some(Service::Admin));
        assert_eq!(routes.resolve("/pools"), Some(Service::Admin));
    }

    #[test]
    fn validate_accepts_default_catalog() {
        assert!(EndpointRoutes::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_prefix_in_both_lists() {
        let routes = EndpointRoutes::new(["/pools", "/admin/"], ["/admin"]);
        match routes.validate() {
            Err(ClientError::AmbiguousRoute(prefix)) => assert_eq!(prefix, "/admin"),
            other => panic!("expected AmbiguousRoute, got: {other:?}"),
        }
    }

    #[test]
    fn service_display() {
        assert_eq!(Service::Admin.to_string(), "admin");
        assert_eq!(Service::Query.to_string(), "query");
    }
}
