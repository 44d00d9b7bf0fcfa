//! Request assembly
//!
//! Host, query parameter and header collaborators used when a template is
//! turned into a full URL or an [`http::Request`], plus the option bundles
//! that carry them.

mod headers;
mod host;
mod query;
mod value;

pub use headers::Headers;
pub use host::Host;
pub use query::QueryParams;
pub use value::Value;

/// Extras applied by [`Template::path_from_with`](crate::Template::path_from_with)
///
/// # Examples
///
/// ```
/// use rhtmx_urit::{Host, PathFromOptions, PathVars, QueryParams, Template};
///
/// let template = Template::new("/foo/{id}").unwrap();
/// let options = PathFromOptions::new()
///     .with_host(Host::new("https://www.example.com"))
///     .with_query(QueryParams::from_pairs([("page", 2)]));
/// let url = template
///     .path_from_with(&PathVars::named(&["id", "1"]), &options)
///     .unwrap();
/// assert_eq!(url, "https://www.example.com/foo/1?page=2");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathFromOptions {
    pub host: Option<Host>,
    pub query: Option<QueryParams>,
    /// Check each supplied value against its variable's pattern
    pub regex_check: bool,
}

impl PathFromOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_host(mut self, host: Host) -> Self {
        self.host = Some(host);
        self
    }

    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = Some(query);
        self
    }

    pub fn with_regex_check(mut self) -> Self {
        self.regex_check = true;
        self
    }
}

/// Extras applied by [`Template::request_from`](crate::Template::request_from)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub path: PathFromOptions,
    pub headers: Option<Headers>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_host(mut self, host: Host) -> Self {
        self.path = self.path.with_host(host);
        self
    }

    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.path = self.path.with_query(query);
        self
    }

    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn with_regex_check(mut self) -> Self {
        self.path = self.path.with_regex_check();
        self
    }
}
