//! The summary model: a [`Summary`] owns its [`Well`]s, which own their [`Perforation`]s.
//!
//! The tree is built once from a [`SummarySource`](crate::container::SummarySource) and is
//! read-only afterwards. Entities refer to each other only by position.

mod field;
mod perforation;
mod well;

pub use field::Summary;
pub use perforation::Perforation;
pub use well::{Well, INJECTOR_THRESHOLD};

#[cfg(test)]
pub(crate) use field::tests::five_spot_like;
