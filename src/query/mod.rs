//! Address-bar state: the URL codec and pagination links.
//!
//! - [`codec`]: `decode`/`encode` between query strings and descriptors
//! - [`pagination`]: paging widget entries and their hrefs

pub mod codec;
pub mod pagination;

pub use codec::{decode, encode, KIND_KEY, PAGE_KEY, TEXT_KEY};
pub use pagination::{build_page_link, page_items, PageItem};
