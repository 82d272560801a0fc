//! Declarative schema descriptors driving the decoder.
//!
//! A schema is built once per operation when it is registered. The decoder
//! walks this closed tree instead of inspecting live values, so every
//! operation shares the same decoding rules without hand-written glue.

use std::fmt;

use crate::metadata::{FieldMeta, KindHint};

/// Leaf kinds understood by the scalar coercion rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    /// UTF-8 text taken verbatim.
    String,
    /// `true` or `false`, case-sensitive.
    Bool,
    /// Signed 32-bit integer in base 10.
    Int32,
    /// Signed 64-bit integer in base 10.
    Int64,
    /// 32-bit float in decimal notation.
    Float32,
    /// 64-bit float in decimal notation.
    Float64,
    /// Standard base64 encoded bytes of any length.
    Bytes,
    /// Standard base64 encoded bytes of exactly this many bytes.
    FixedBytes(usize),
    /// UTC instant in `YYYY-MM-DDThh:mm:ssZ` form.
    Timestamp,
    /// A kind with no coercion rule; decoding it always fails.
    Other(&'static str),
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => formatter.write_str("string"),
            Self::Bool => formatter.write_str("bool"),
            Self::Int32 => formatter.write_str("int32"),
            Self::Int64 => formatter.write_str("int64"),
            Self::Float32 => formatter.write_str("float32"),
            Self::Float64 => formatter.write_str("float64"),
            Self::Bytes => formatter.write_str("bytes"),
            Self::FixedBytes(len) => write!(formatter, "bytes[{len}]"),
            Self::Timestamp => formatter.write_str("timestamp"),
            Self::Other(name) => formatter.write_str(name),
        }
    }
}

/// Structural description of a value the decoder can produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Schema {
    /// A single leaf value.
    Scalar(ScalarKind),
    /// Named fields decoded in declaration order.
    Record(Vec<Field>),
    /// Ordered elements at 1-based indices.
    Sequence(Box<Schema>),
    /// String-keyed entries; the boxed schema describes the values.
    Mapping(Box<Schema>),
}

impl Schema {
    /// Shorthand for a string scalar.
    #[must_use]
    pub const fn string() -> Self {
        Self::Scalar(ScalarKind::String)
    }

    /// Shorthand for a boolean scalar.
    #[must_use]
    pub const fn bool() -> Self {
        Self::Scalar(ScalarKind::Bool)
    }

    /// Shorthand for a 32-bit integer scalar.
    #[must_use]
    pub const fn int32() -> Self {
        Self::Scalar(ScalarKind::Int32)
    }

    /// Shorthand for a 64-bit integer scalar.
    #[must_use]
    pub const fn int64() -> Self {
        Self::Scalar(ScalarKind::Int64)
    }

    /// Shorthand for a timestamp scalar.
    #[must_use]
    pub const fn timestamp() -> Self {
        Self::Scalar(ScalarKind::Timestamp)
    }

    /// Builds a record from its fields.
    #[must_use]
    pub fn record(fields: impl IntoIterator<Item = Field>) -> Self {
        Self::Record(fields.into_iter().collect())
    }

    /// Builds a sequence of `element`.
    #[must_use]
    pub fn sequence(element: Self) -> Self {
        Self::Sequence(Box::new(element))
    }

    /// Builds a string-keyed mapping onto `value`.
    #[must_use]
    pub fn mapping(value: Self) -> Self {
        Self::Mapping(Box::new(value))
    }

    /// Structural kind inferred from the schema's shape.
    #[must_use]
    pub const fn inferred_kind(&self) -> KindHint {
        match self {
            Self::Scalar(_) => KindHint::Scalar,
            Self::Record(_) => KindHint::Record,
            Self::Sequence(_) => KindHint::Sequence,
            Self::Mapping(_) => KindHint::Mapping,
        }
    }

    /// Returns `true` for sequences and mappings.
    #[must_use]
    pub const fn is_collection(&self) -> bool {
        matches!(self, Self::Sequence(_) | Self::Mapping(_))
    }
}

/// A named member of a record schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    ident: &'static str,
    schema: Schema,
    meta: FieldMeta,
}

impl Field {
    /// Creates a field with default metadata.
    #[must_use]
    pub const fn new(ident: &'static str, schema: Schema) -> Self {
        Self {
            ident,
            schema,
            meta: FieldMeta::new(),
        }
    }

    /// Replaces the field's metadata.
    #[must_use]
    pub const fn with_meta(mut self, meta: FieldMeta) -> Self {
        self.meta = meta;
        self
    }

    /// Identifier used as the record key of the decoded value.
    #[must_use]
    pub const fn ident(&self) -> &'static str {
        self.ident
    }

    /// Schema of the field's value.
    #[must_use]
    pub const fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Field annotations.
    #[must_use]
    pub const fn meta(&self) -> &FieldMeta {
        &self.meta
    }
}
