//! Structured decoding of a flat parameter space into a typed value tree.
//!
//! Decoding walks a [`Schema`] from the root. Each node's structural kind is
//! taken from the owning field's kind hint when one is given, and otherwise
//! inferred from the schema's shape. Records resolve wire names per field,
//! sequences probe 1-based indices until one has nothing below it, and
//! mappings replay the keys of a seeded target in ascending order.

mod naming;
mod scalar;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;

pub use self::naming::{capitalise_first, wire_name};
pub use self::scalar::coerce as coerce_scalar;

use crate::error::DecodeError;
use crate::metadata::{FieldMeta, KindHint, ProtocolVariant};
use crate::params::ParamSpace;
use crate::schema::{Field, Schema};
use crate::value::{Record, Value};

const ROOT_META: FieldMeta = FieldMeta::new();

/// Decodes parameter spaces under a fixed protocol variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Decoder {
    variant: ProtocolVariant,
}

impl Decoder {
    /// Creates a decoder for `variant`.
    #[must_use]
    pub const fn new(variant: ProtocolVariant) -> Self {
        Self { variant }
    }

    /// Protocol variant applied to every decode.
    #[must_use]
    pub const fn variant(&self) -> ProtocolVariant {
        self.variant
    }

    /// Decodes `params` into a fresh value shaped by `schema`.
    ///
    /// Mappings decoded this way come out empty because a fresh target has
    /// no keys to replay; use [`Decoder::decode_into`] to seed them.
    ///
    /// # Errors
    ///
    /// Returns the first [`DecodeError`] met anywhere in the tree.
    pub fn decode(&self, schema: &Schema, params: &ParamSpace) -> Result<Value, DecodeError> {
        self.node(schema, &ROOT_META, "", params, None)
    }

    /// Decodes `params` over `target`, replacing it on success.
    ///
    /// Mapping keys already present in `target` determine which entries are
    /// read and under which keys they are stored. `target` is left untouched
    /// when decoding fails.
    ///
    /// # Errors
    ///
    /// Returns the first [`DecodeError`] met anywhere in the tree.
    pub fn decode_into(
        &self,
        schema: &Schema,
        params: &ParamSpace,
        target: &mut Value,
    ) -> Result<(), DecodeError> {
        let decoded = self.node(schema, &ROOT_META, "", params, Some(&*target))?;
        *target = decoded;
        Ok(())
    }

    fn node(
        &self,
        schema: &Schema,
        meta: &FieldMeta,
        path: &str,
        params: &ParamSpace,
        seed: Option<&Value>,
    ) -> Result<Value, DecodeError> {
        let kind = resolved_kind(schema, meta);
        match (kind, schema) {
            (KindHint::Record, Schema::Record(fields)) => {
                self.record(fields, path, params, seed.and_then(Value::as_record))
            }
            (KindHint::Sequence, Schema::Sequence(element)) => {
                self.sequence(element, meta, path, params, seed.and_then(Value::as_sequence))
            }
            (KindHint::Mapping, Schema::Mapping(value)) => {
                self.mapping(value, meta, path, params, seed.and_then(Value::as_mapping))
            }
            (KindHint::Scalar, Schema::Scalar(scalar_kind)) => {
                let raw = params.get(path).unwrap_or_default();
                scalar::coerce(*scalar_kind, path, raw).map(Value::Scalar)
            }
            (KindHint::Scalar, _) => Err(DecodeError::UnsupportedKind {
                path: path.to_owned(),
                kind: schema.inferred_kind().to_string(),
            }),
            (hint, _) => Err(DecodeError::KindMismatch {
                path: path.to_owned(),
                hint,
                actual: schema.inferred_kind(),
            }),
        }
    }

    fn record(
        &self,
        fields: &[Field],
        prefix: &str,
        params: &ParamSpace,
        seed: Option<&Record>,
    ) -> Result<Value, DecodeError> {
        let mut record = Record::new();
        for field in fields.iter().filter(|field| !field.meta().is_ignored()) {
            let name = naming::wire_name(field, self.variant);
            let path = naming::join(prefix, &name);
            if !is_present(field, &path, params) {
                if field.meta().is_required() {
                    return Err(DecodeError::MissingRequired { path });
                }
                if let Some(empty) = empty_collection(field) {
                    record.insert(field.ident(), empty);
                }
                continue;
            }
            let field_seed = seed.and_then(|existing| existing.get(field.ident()));
            let value = self.node(field.schema(), field.meta(), &path, params, field_seed)?;
            record.insert(field.ident(), value);
        }
        Ok(Value::Record(record))
    }

    fn sequence(
        &self,
        element: &Schema,
        meta: &FieldMeta,
        path: &str,
        params: &ParamSpace,
        seed: Option<&[Value]>,
    ) -> Result<Value, DecodeError> {
        let mut items = Vec::new();
        if !params.contains_subtree(path) {
            return Ok(Value::Sequence(items));
        }
        let member_prefix = if self.flattens(meta) {
            path.to_owned()
        } else {
            let segment = meta
                .member_name_override()
                .unwrap_or(naming::DEFAULT_MEMBER_SEGMENT);
            naming::join(path, segment)
        };
        for index in 1_usize.. {
            let item_path = naming::indexed(&member_prefix, index);
            if !params.contains_subtree(&item_path) {
                break;
            }
            let item_seed = seed.and_then(|existing| existing.get(index - 1));
            items.push(self.node(element, &ROOT_META, &item_path, params, item_seed)?);
        }
        Ok(Value::Sequence(items))
    }

    fn mapping(
        &self,
        value_schema: &Schema,
        meta: &FieldMeta,
        path: &str,
        params: &ParamSpace,
        seed: Option<&BTreeMap<String, Value>>,
    ) -> Result<Value, DecodeError> {
        let mut entries = BTreeMap::new();
        let Some(seeded) = seed.filter(|_| params.contains_subtree(path)) else {
            return Ok(Value::Mapping(entries));
        };
        let entry_prefix = if self.flattens(meta) {
            path.to_owned()
        } else {
            naming::join(path, naming::ENTRY_SEGMENT)
        };
        for (position, (key, existing)) in seeded.iter().enumerate() {
            let entry_path = naming::indexed(&entry_prefix, position + 1);
            let key_path = naming::join(&entry_path, meta.map_key_name());
            if !params.contains(&key_path) {
                return Err(DecodeError::MissingRequired { path: key_path });
            }
            let value_path = naming::join(&entry_path, meta.map_value_name());
            let value = self.node(value_schema, &ROOT_META, &value_path, params, Some(existing))?;
            entries.insert(key.clone(), value);
        }
        Ok(Value::Mapping(entries))
    }

    const fn flattens(&self, meta: &FieldMeta) -> bool {
        self.variant.is_ec2() || meta.is_flattened()
    }
}

/// Decodes `params` into a fresh value shaped by `schema` under `variant`.
///
/// # Errors
///
/// Returns the first [`DecodeError`] met anywhere in the tree.
pub fn decode(
    schema: &Schema,
    variant: ProtocolVariant,
    params: &ParamSpace,
) -> Result<Value, DecodeError> {
    Decoder::new(variant).decode(schema, params)
}

fn resolved_kind(schema: &Schema, meta: &FieldMeta) -> KindHint {
    meta.hint().unwrap_or_else(|| schema.inferred_kind())
}

// Scalars are present only on their exact path; anything else is present
// when some path nests below it.
fn is_present(field: &Field, path: &str, params: &ParamSpace) -> bool {
    match resolved_kind(field.schema(), field.meta()) {
        KindHint::Scalar => params.contains(path),
        KindHint::Record | KindHint::Sequence | KindHint::Mapping => params.contains_subtree(path),
    }
}

fn empty_collection(field: &Field) -> Option<Value> {
    match (resolved_kind(field.schema(), field.meta()), field.schema()) {
        (KindHint::Sequence, Schema::Sequence(_)) => Some(Value::Sequence(Vec::new())),
        (KindHint::Mapping, Schema::Mapping(_)) => Some(Value::Mapping(BTreeMap::new())),
        _ => None,
    }
}
