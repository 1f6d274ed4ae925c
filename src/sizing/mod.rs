//! Size chart lookup subsystem.
//!
//! # Data Flow
//! ```text
//! ConvertRequest (scale, size, gender)
//!     → chart.rs (pick men's or women's SizeChart)
//!     → matcher.rs (nearest row on the requested scale)
//!     → Return: &'static SizeRow or MatchError
//! ```
//!
//! # Design Decisions
//! - Charts are `static` arrays, immutable for the life of the process
//! - No locking: every request reads the same tables concurrently
//! - Matches are always real table rows, never interpolated
//! - Nearest match beyond the threshold is reported as no match

pub mod chart;
pub mod matcher;

pub use chart::{Gender, Scale, SizeChart, SizeRow, MENS_SIZES, WOMENS_SIZES};
pub use matcher::{find_closest, MatchError, SizeInput, MAX_DIFF};
