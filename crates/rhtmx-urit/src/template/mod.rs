//! Compiled URI path templates
//!
//! A [`Template`] is built once and then only read: matching, generation,
//! composition and resolution never modify it, and composition and
//! resolution return new templates.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::error::{GenerationError, ParseError, RequestError};
use crate::options::{MatchOption, MatchOptions};
use crate::part::{CompositePart, CompositePiece, PathPart, VarPart};
use crate::path::{match_path, slash_prefix, split_path};
use crate::request::{PathFromOptions, RequestOptions};
use crate::tracker::PositionsTracker;
use crate::vars::{PathVar, PathVars, VarsType};

mod parser;

use parser::{parse_template, ParseState};

/// A compiled URI path template
///
/// # Examples
///
/// ```
/// use rhtmx_urit::{PathVars, Template};
///
/// let template = Template::new("/foo/{foo}/bar/{bar:[0-9]+}").unwrap();
///
/// let vars = template.matches("/foo/fooey/bar/123").unwrap();
/// assert_eq!(vars.get("foo"), Some("fooey"));
/// assert_eq!(vars.get("bar"), Some("123"));
/// assert!(template.matches("/foo/fooey/bar/abc").is_none());
///
/// let path = template.path_from(&PathVars::named(&["foo", "a", "bar", "1"])).unwrap();
/// assert_eq!(path, "/foo/a/bar/1");
/// ```
#[derive(Debug, Clone)]
pub struct Template {
    source: String,
    parts: Vec<PathPart>,
    /// name → every variable declared under that name, in order
    named_vars: HashMap<String, Vec<VarPart>>,
    positional_count: usize,
    options: MatchOptions,
}

impl Template {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Parses template text
    pub fn new(text: &str) -> Result<Self, ParseError> {
        Self::parse(text, MatchOptions::new())
    }

    /// Parses template text, binding match options used by every match
    pub fn with_options(text: &str, options: &[MatchOption]) -> Result<Self, ParseError> {
        Self::parse(text, MatchOptions::from_options(options))
    }

    /// Parses template text that is known to be valid
    ///
    /// # Panics
    ///
    /// Panics if the text does not parse.
    pub fn must_parse(text: &str) -> Self {
        match Self::new(text) {
            Ok(template) => template,
            Err(err) => panic!("invalid template {:?}: {} (position {})", text, err, err.position()),
        }
    }

    fn parse(text: &str, options: MatchOptions) -> Result<Self, ParseError> {
        if text.trim().is_empty() {
            return Err(ParseError::empty_template());
        }
        let source = slash_prefix(text).into_owned();
        let state = parse_template(&source).map_err(|err| {
            tracing::debug!(template = %source, %err, position = err.position(), "template parse failed");
            err
        })?;
        let template = Self::from_state(source, state, options);
        tracing::debug!(
            template = %template.source,
            parts = template.parts.len(),
            vars_type = ?template.vars_type(),
            "template compiled"
        );
        Ok(template)
    }

    fn from_state(source: String, state: ParseState, options: MatchOptions) -> Self {
        Self {
            source,
            parts: state.parts,
            named_vars: state.named_vars,
            positional_count: state.positional_count,
            options,
        }
    }

    /// Folds already compiled parts into a new template
    fn rebuild<I>(source: String, parts: I, options: MatchOptions) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = PathPart>,
    {
        let state = parts
            .into_iter()
            .try_fold(ParseState::default(), ParseState::with_part)?;
        Ok(Self::from_state(source, state, options))
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// The template text as given, slash-prefixed
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Template text; canonical `{name}` / `?` forms with patterns removed when
    /// `strip_regex` is true, otherwise the source text
    ///
    /// # Examples
    ///
    /// ```
    /// use rhtmx_urit::Template;
    ///
    /// let template = Template::new("/foo/{fooA: [a-z]*}-{fooB: [a-z]*}").unwrap();
    /// assert_eq!(template.template(true), "/foo/{fooA}-{fooB}");
    /// assert_eq!(template.template(false), "/foo/{fooA: [a-z]*}-{fooB: [a-z]*}");
    /// ```
    pub fn template(&self, strip_regex: bool) -> String {
        if strip_regex {
            self.canonical(true)
        } else {
            self.source.clone()
        }
    }

    fn canonical(&self, strip_regex: bool) -> String {
        if self.parts.is_empty() {
            return "/".to_string();
        }
        self.parts
            .iter()
            .map(|part| format!("/{}", part.canonical(strip_regex)))
            .collect()
    }

    pub fn parts(&self) -> &[PathPart] {
        &self.parts
    }

    /// Positions if the template has any positional variable, otherwise Names
    pub fn vars_type(&self) -> VarsType {
        if self.positional_count > 0 {
            VarsType::Positions
        } else {
            VarsType::Names
        }
    }

    pub fn positional_count(&self) -> usize {
        self.positional_count
    }

    /// Number of named variable occurrences (a repeated name counts each time)
    pub fn named_count(&self) -> usize {
        self.named_vars.values().map(Vec::len).sum()
    }

    /// Declarations sharing a name, in template order
    pub fn named_vars(&self, name: &str) -> &[VarPart] {
        self.named_vars.get(name).map_or(&[], Vec::as_slice)
    }

    /// Every variable slot in template order, with empty values
    pub fn vars(&self) -> Vec<PathVar> {
        let mut named_positions: HashMap<&str, usize> = HashMap::new();
        self.parts
            .iter()
            .flat_map(PathPart::vars)
            .enumerate()
            .map(|(position, var)| {
                let named_position = if var.is_positional() {
                    0
                } else {
                    let np = named_positions.entry(var.name()).or_insert(0);
                    *np += 1;
                    *np - 1
                };
                PathVar {
                    name: var.name().to_string(),
                    named_position,
                    position,
                    value: String::new(),
                }
            })
            .collect()
    }

    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    // ========================================================================
    // Matching
    // ========================================================================

    /// Matches a path (or an absolute URL string) against the template
    ///
    /// Returns the extracted variables, or `None` if the path does not match.
    pub fn matches(&self, path: &str) -> Option<PathVars> {
        let path = match_path(path)?;
        self.match_segments(&path, &self.options)
    }

    /// Matches with extra options added after the template's own
    pub fn matches_with(&self, path: &str, options: &[MatchOption]) -> Option<PathVars> {
        let path = match_path(path)?;
        self.match_segments(&path, &self.options.merged(options))
    }

    pub fn matches_url(&self, url: &Url) -> Option<PathVars> {
        self.match_segments(url.path(), &self.options)
    }

    pub fn matches_url_with(&self, url: &Url, options: &[MatchOption]) -> Option<PathVars> {
        self.match_segments(url.path(), &self.options.merged(options))
    }

    /// Matches the path of an incoming request
    pub fn matches_request<B>(&self, request: &http::Request<B>) -> Option<PathVars> {
        self.match_segments(request.uri().path(), &self.options)
    }

    fn match_segments(&self, path: &str, options: &MatchOptions) -> Option<PathVars> {
        let Some(segments) = split_path(path) else {
            tracing::trace!(template = %self.source, path, "path has an empty segment");
            return None;
        };
        if segments.len() != self.parts.len() {
            tracing::trace!(
                template = %self.source,
                path,
                expected = self.parts.len(),
                found = segments.len(),
                "segment count mismatch"
            );
            return None;
        }

        let mut vars = PathVars::new(self.vars_type());
        for (i, (part, segment)) in self.parts.iter().zip(segments).enumerate() {
            if !part.matches(segment, i, &mut vars, options) {
                tracing::trace!(template = %self.source, path, part = i, "segment did not match");
                return None;
            }
        }
        Some(vars)
    }

    // ========================================================================
    // Generation
    // ========================================================================

    /// Renders a path from variable values
    ///
    /// # Examples
    ///
    /// ```
    /// use rhtmx_urit::{PathVars, Template};
    ///
    /// let template = Template::new("/foo/?/bar/?/?").unwrap();
    /// let path = template.path_from(&PathVars::positional(["fooey", "aaa", "bbb"])).unwrap();
    /// assert_eq!(path, "/foo/fooey/bar/aaa/bbb");
    ///
    /// let err = template.path_from(&PathVars::positional(["fooey", "aaa"])).unwrap_err();
    /// assert_eq!(err.to_string(), "no var for varPosition 3");
    /// ```
    pub fn path_from(&self, vars: &PathVars) -> Result<String, GenerationError> {
        self.path_from_with(vars, &PathFromOptions::default())
    }

    /// Renders a path, applying a host prefix, query string and pattern check
    pub fn path_from_with(
        &self,
        vars: &PathVars,
        options: &PathFromOptions,
    ) -> Result<String, GenerationError> {
        let mut tracker = PositionsTracker::new(vars, self.positional_count > 0)
            .with_regex_check(options.regex_check);
        let mut path = String::new();
        for part in &self.parts {
            path.push('/');
            path.push_str(&part.render(&mut tracker)?);
        }
        if path.is_empty() {
            path.push('/');
        }

        if let Some(host) = &options.host {
            path = host.prefix(&path);
        }
        if let Some(query) = &options.query {
            path.push_str(&query.query_string()?);
        }
        Ok(path)
    }

    /// Builds an HTTP request for the rendered path
    pub fn request_from(
        &self,
        method: &str,
        vars: &PathVars,
        body: Vec<u8>,
        options: &RequestOptions,
    ) -> Result<http::Request<Vec<u8>>, RequestError> {
        let uri = self.path_from_with(vars, &options.path)?;
        let method = http::Method::from_bytes(method.as_bytes())?;

        let mut builder = http::Request::builder().method(method).uri(uri);
        if let Some(headers) = &options.headers {
            for (name, value) in headers.to_map()? {
                builder = builder.header(name, value);
            }
        }
        Ok(builder.body(body)?)
    }

    // ========================================================================
    // Composition and resolution
    // ========================================================================

    /// Appends another template, parsed with this template's options
    ///
    /// # Examples
    ///
    /// ```
    /// use rhtmx_urit::Template;
    ///
    /// let template = Template::new("/foo/{foo}/").unwrap();
    /// let sub = template.sub("{bar}-{baz}/qux").unwrap();
    /// assert_eq!(sub.source(), "/foo/{foo}/{bar}-{baz}/qux");
    /// assert_eq!(sub.parts().len(), 4);
    ///
    /// assert!(template.sub("?").is_err());
    /// ```
    pub fn sub(&self, text: &str) -> Result<Template, ParseError> {
        let other = Self::parse(text, self.options.clone())?;
        let source = format!(
            "{}{}",
            self.source.strip_suffix('/').unwrap_or(&self.source),
            other.source
        );
        Self::rebuild(
            source,
            self.parts.iter().cloned().chain(other.parts),
            self.options.clone(),
        )
    }

    /// Folds supplied values into the template, leaving the rest as variables
    ///
    /// Values are pulled exactly as [`Template::path_from`] pulls them. A
    /// composite segment becomes fixed only once every variable in it resolves.
    ///
    /// # Examples
    ///
    /// ```
    /// use rhtmx_urit::{PathVars, Template};
    ///
    /// let template = Template::new("/foo/{foo:[a-z]*}/bar/--{bar: [a-zA-Z]*}-{bar: [0-9]*}--").unwrap();
    /// let resolved = template.resolve_to(&PathVars::named(&["foo", "fooey", "bar", "abc"])).unwrap();
    /// assert_eq!(resolved.source(), "/foo/fooey/bar/--abc-{bar:[0-9]*}--");
    /// assert_eq!(resolved.named_count(), 1);
    /// ```
    pub fn resolve_to(&self, vars: &PathVars) -> Result<Template, ParseError> {
        let mut tracker = PositionsTracker::new(vars, self.positional_count > 0);
        let parts: Vec<PathPart> = self
            .parts
            .iter()
            .map(|part| resolve_part(part, &mut tracker))
            .collect();

        let source = if parts.is_empty() {
            "/".to_string()
        } else {
            parts
                .iter()
                .map(|part| format!("/{}", part.canonical(false)))
                .collect()
        };
        let resolved = Self::rebuild(source, parts, self.options.clone())?;
        tracing::debug!(
            template = %self.source,
            resolved = %resolved.source,
            remaining = resolved.positional_count + resolved.named_count(),
            "template resolved"
        );
        Ok(resolved)
    }
}

/// Replaces each variable that has a value with a fixed part
fn resolve_part(part: &PathPart, tracker: &mut PositionsTracker<'_>) -> PathPart {
    match part {
        PathPart::Fixed(_) => part.clone(),
        PathPart::Var(var) => match tracker.next_value(var) {
            Ok(value) => PathPart::Fixed(value),
            Err(_) => part.clone(),
        },
        PathPart::Composite(composite) => {
            let pieces: Vec<CompositePiece> = composite
                .pieces()
                .iter()
                .map(|piece| match piece {
                    CompositePiece::Fixed(_) => piece.clone(),
                    CompositePiece::Var(var) => match tracker.next_value(var) {
                        Ok(value) => CompositePiece::Fixed(value),
                        Err(_) => piece.clone(),
                    },
                })
                .collect();

            if pieces.iter().all(|p| p.var().is_none()) {
                PathPart::Fixed(pieces.iter().filter_map(CompositePiece::fixed_value).collect())
            } else {
                PathPart::Composite(CompositePart::new(pieces))
            }
        }
    }
}

impl FromStr for Template {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
