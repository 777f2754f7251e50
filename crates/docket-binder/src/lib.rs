//! Docket Citation Binder
//!
//! Turns ranked candidates into report items with validated
//! (page, line-start, line-end) citations.
//!
//! A citation is accepted only when it lies inside the candidate's own
//! segment, names lines that exist in the document, and the document text
//! at that location is part of the segment text. Anything else is reported
//! as [`BinderError::CitationMismatch`].
//!
//! # Examples
//!
//! ```no_run
//! use docket_binder::CitationBinder;
//!
//! let binder = CitationBinder::new();
//! // let items = binder.bind(&document, &segments, ranked)?;
//! ```

#![warn(missing_docs)]

mod binder;
mod error;

pub use binder::CitationBinder;
pub use error::{BinderError, MismatchReason};
