//! # RHTMX URI Templates
//!
//! Compile URI path templates once, then use them in both directions:
//! - Match concrete paths and extract variable values
//! - Generate paths (and full URLs or HTTP requests) from variable values
//! - Compose templates by appending a sub-template
//! - Partially resolve templates by folding some values in
//!
//! ## Template Syntax
//!
//! - Fixed segments: `/users`
//! - Named variables: `/users/{id}` or the shorthand `/users/:id`
//! - Constrained variables: `/users/{id:[0-9]+}` (patterns are anchored)
//! - Positional variables: `/users/?` (values are supplied by index)
//! - Multi-variable segments: `/files/{name}.{ext:[a-z]+}`
//! - Quoted literals: `/files/"a/b"` (separators inside quotes do not split)
//!
//! A template holds either named or positional variables, never both.
//!
//! ## Functional Approach
//!
//! - **Fold-based parsing** through an accumulator that also enforces the single-kind rule
//! - **Immutable templates**: composition and resolution return new values
//! - **Zero-copy** path handling with `Cow<'_, str>` where input is already valid
//!
//! ## Example
//!
//! ```
//! use rhtmx_urit::{PathVars, Template};
//!
//! let template = Template::new("/users/{id:[0-9]+}/posts/{slug}").unwrap();
//!
//! let vars = template.matches("/users/42/posts/hello").unwrap();
//! assert_eq!(vars.get("id"), Some("42"));
//!
//! let path = template
//!     .path_from(&PathVars::named(&["id", "7", "slug", "intro"]))
//!     .unwrap();
//! assert_eq!(path, "/users/7/posts/intro");
//!
//! let resolved = template.resolve_to(&PathVars::named(&["id", "7"])).unwrap();
//! assert_eq!(resolved.source(), "/users/7/posts/{slug}");
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

mod error;
pub mod options;
pub mod part;
pub mod path;
pub mod request;
pub mod splitter;
mod template;
mod tracker;
mod vars;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{
    GenerationError, ParseCause, ParseError, ParseErrorKind, RequestError, ValueError, VarsError,
};
pub use options::{
    CaseInsensitiveFixed, FixedMatchOption, MatchOption, MatchOptions, VarCandidate, VarCheck,
    VarMatchOption,
};
pub use part::PathPart;
pub use request::{Headers, Host, PathFromOptions, QueryParams, RequestOptions, Value};
pub use template::Template;
pub use vars::{PathVar, PathVars, VarRef, VarsType};
