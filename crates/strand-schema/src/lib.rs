//! # strand-schema — Schema Construction & Validation Engine
//!
//! Parses a JSON-Schema-subset document into a compact, pointer-free
//! tree and validates candidate text values (booleans, integers, reals,
//! strings) against the constraints recorded on each node. The engine
//! drives the agent's configuration prompts and checks action and
//! telemetry parameters before they are dispatched.
//!
//! ## Shape
//!
//! The schema tree is a flat, insertion-ordered item table. Each node
//! carries its parent's index and the exclusive upper bound of its own
//! subtree; structure is index arithmetic, never owned pointers. This
//! keeps the table storable in a fixed, caller-sized region for
//! deployments that forbid heap growth ([`Capacity::Fixed`]) while the
//! same code path serves heap-backed builds ([`Capacity::Dynamic`]).
//!
//! JSON text decoding is `serde_json`'s job; the engine borrows the
//! decoded [`serde_json::Value`] document for its whole lifetime and
//! re-queries keyword values from it on demand instead of copying them
//! out.
//!
//! ## Usage
//!
//! ```
//! use strand_schema::{decode, Capacity, Schema};
//!
//! let doc = decode(
//!     r#"{
//!         "type": "object",
//!         "properties": {
//!             "port": {"type": "integer", "minimum": 1, "maximum": 65535}
//!         },
//!         "required": ["port"]
//!     }"#,
//! )?;
//! let schema = Schema::parse(&doc, Capacity::Dynamic)?;
//!
//! let (_, port) = schema.properties(schema.root()).next().expect("one property");
//! assert!(schema.is_required(port));
//! assert!(schema.validate_integer(port, "8080").is_ok());
//! assert!(schema.validate_integer(port, "70000").is_err());
//! # Ok::<(), strand_schema::SchemaError>(())
//! ```
//!
//! ## Two error channels
//!
//! [`SchemaError`] means the engine could not do its job: the document
//! failed to decode, a keyword had the wrong shape, or a fixed table
//! filled. [`Rejection`] means the engine did its job and the value did
//! not pass. A well-formed schema rejecting a bad value is not an
//! engine failure, and one rejection never poisons later validations.
//!
//! ## Unevaluated keywords
//!
//! `pattern` and `format` are shape-checked at parse time and
//! retrievable through accessors, but never evaluated. Array content
//! validation is likewise unimplemented: [`Schema::validate_array`]
//! rejects every value.

pub mod decode;
pub mod item;
pub mod iter;
pub mod keyword;
pub mod parse;
pub mod schema;
pub mod validate;

pub use decode::{decode, ValueType};
pub use item::{Capacity, ItemFlags, ItemRef};
pub use iter::Properties;
pub use keyword::Keyword;
pub use parse::SchemaError;
pub use schema::Schema;
pub use validate::Rejection;
