//! Recovery of structured payloads from loosely formatted model replies.
//!
//! Language models frequently wrap their answers in Markdown fences or add
//! prose around them. This module recovers the payload with a small explicit
//! parser instead of ad hoc pattern matching at each call site:
//!
//! ```text
//! reply      := prose* block? prose*
//! block      := "```" tag? newline body ("```" | end-of-input)
//! payload    := preferred-tag block | first block | trim(reply)
//! json reply := payload -> JSON object -> required-field check -> typed value
//! ```
//!
//! - [`fence`] splits a reply into fenced blocks.
//! - [`ResponseExtractor`] applies the JSON grammar and injects the fixed
//!   [`CONFIDENCE`] value.
//! - [`extract_source`] applies the same fence rule for source code and
//!   returns raw text.

pub mod fence;

mod error;
mod extractor;

pub use error::{ExtractionError, ExtractionResult};
pub use extractor::{CONFIDENCE, RequiredFields, ResponseExtractor, extract_source};
