//! Page/limit pagination primitives shared by listing endpoints.
//!
//! Listings accept a 1-indexed `page` and a `limit`, translate them into an
//! offset window, and return their rows inside a [`Paginated`] envelope whose
//! [`PageMeta`] is derived from the same total the rows were read against.
//!
//! Malformed inputs are clamped rather than rejected: a missing, unparsable,
//! zero, or negative `page` becomes [`DEFAULT_PAGE`] and the same for `limit`
//! becomes [`DEFAULT_LIMIT`].
//!
//! # Examples
//!
//! ```
//! use pagination::{PageRequest, Paginated};
//!
//! let request = PageRequest::parse(Some("3"), Some("10"));
//! assert_eq!(request.window().offset(), 20);
//!
//! let page = Paginated::new(vec!["a", "b", "c"], request, 23);
//! assert_eq!(page.meta.last_page, 3);
//! assert!(!page.meta.has_next_page);
//! assert!(page.meta.has_prev_page);
//! ```

mod envelope;
mod request;

pub use envelope::{PageMeta, Paginated};
pub use request::{DEFAULT_LIMIT, DEFAULT_PAGE, PageRequest, PageWindow};
