//! Wire protocols.
//!
//! Each protocol follows a layered structure:
//! - `layout`: byte offsets and field widths (source of truth)
//! - `reader` / `writer`: safe byte access driven by the layout
//! - per-message modules: typed records with `parse_*`, `decode_*` and
//!   `encode_*` functions
//! - `error`: explicit, actionable errors
//!
//! Nothing here performs I/O.

pub mod artnet;
pub mod channels;
pub(crate) mod common;
