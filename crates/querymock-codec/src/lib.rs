//! Schema-driven decoding of Query protocol form parameters.
//!
//! Query protocol requests flatten nested structures into dotted, 1-indexed
//! form keys such as `Users.member.1.UserName`. This crate turns such a flat
//! [`ParamSpace`] back into a typed [`Value`] tree, guided by a declarative
//! [`Schema`] and the per-field [`FieldMeta`] annotations attached to it.
//!
//! # Core types
//!
//! - [`Schema`], [`Field`], and [`ScalarKind`] describe the expected shape
//! - [`FieldMeta`] carries wire naming, flattening, and requiredness
//! - [`ProtocolVariant`] selects standard Query or EC2-style naming
//! - [`Decoder`] and [`decode`] perform the conversion
//! - [`Value`], [`Record`], and [`Scalar`] hold the decoded tree
//! - [`DecodeError`] names the path at which decoding stopped
//!
//! # Example
//!
//! ```
//! use querymock_codec::{decode, Field, FieldMeta, ParamSpace, ProtocolVariant, Schema};
//!
//! let schema = Schema::record([
//!     Field::new("UserName", Schema::string()).with_meta(FieldMeta::new().required()),
//! ]);
//! let params = ParamSpace::from_form(b"Action=GetUser&UserName=alice");
//! let value = decode(&schema, ProtocolVariant::Query, &params).expect("valid form");
//! let record = value.as_record().expect("record");
//! assert_eq!(record.get_str("UserName"), Some("alice"));
//! ```

mod decoder;
mod error;
mod metadata;
mod params;
mod schema;
mod value;

pub use decoder::{Decoder, capitalise_first, coerce_scalar, decode, wire_name};
pub use error::DecodeError;
pub use metadata::{DEFAULT_MAP_KEY_NAME, DEFAULT_MAP_VALUE_NAME, FieldMeta, KindHint, ProtocolVariant};
pub use params::ParamSpace;
pub use schema::{Field, ScalarKind, Schema};
pub use value::{Record, Scalar, TIMESTAMP_FORMAT, Value};

#[cfg(test)]
mod tests;
