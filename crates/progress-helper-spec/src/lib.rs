//! # Progress Helper Spec
//!
//! Parser for the small spec language used to pick course sections and
//! items to mark as complete.
//!
//! ## Grammar
//!
//! ```text
//! spec    := token (';' token)*
//! token   := N                 all items of section N
//!          | N,M,...           sections N, M, ... (all items)
//!          | A-B               sections A..=B (all items)
//!          | N: item (',' item)*
//! item    := K | X-Y
//! ```
//!
//! Tokens that match none of the forms are dropped, as are ranges wider
//! than [`MAX_RANGE_LEN`]. Parsing never fails.
//!
//! ```rust
//! use progress_helper_spec::{parse, Directive};
//!
//! let directives = parse("1-2; 4:1,3-4");
//! assert_eq!(
//!     directives,
//!     vec![
//!         Directive::all(1),
//!         Directive::all(2),
//!         Directive::items(4, vec![1, 3, 4]),
//!     ]
//! );
//! ```

mod directive;
mod parser;

pub use directive::{canonical, Directive, ItemSelection};
pub use parser::{parse, MAX_RANGE_LEN};
