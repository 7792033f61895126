//! # actionguard
//!
//! Structural inspection of untrusted serialized payloads for
//! server-action-style endpoints.
//!
//! The crate is two pure functions in front of a handler: a JSON Guard that
//! trims, bounds, and parses a raw form field, and a Structural Scanner
//! that walks the parsed tree looking for deserialization-attack indicators
//! such as prototype-chain keys, framework reference tokens, and inline code
//! construction. The scanner is total: even cyclic or pathologically nested
//! trees come back as a well-formed verdict.
//!
//! ```rust
//! let inspection = actionguard::screen_payload(r#"{"a": {"__proto__": {"x": 1}}}"#, "0")?;
//! assert!(inspection.blocked());
//! assert_eq!(inspection.reasons(), [r#"Blocked key "__proto__" at root.a"#]);
//! # Ok::<(), actionguard::GuardError>(())
//! ```
mod error;
mod guard;
mod paths;
mod rules;
mod scanner;
mod value;

pub use error::{GuardError, GuardErrorKind};
pub use guard::{parse_payload, screen_payload, MAX_PAYLOAD_CHARS};
pub use rules::RuleSet;
pub use scanner::{inspect, inspect_with, Inspection, MAX_DEPTH};
pub use value::{Node, NodeId, Number, TreeBuilder, ValueTree};
