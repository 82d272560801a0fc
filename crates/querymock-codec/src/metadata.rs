//! Per-field annotations that steer the parameter decoder.
//!
//! Metadata is attached when a schema is defined and never changes afterwards.
//! It carries naming overrides, collection flattening, and presence rules; it
//! holds no runtime state.

use std::fmt;

/// Default element name used for the key half of a mapping entry.
pub const DEFAULT_MAP_KEY_NAME: &str = "key";

/// Default element name used for the value half of a mapping entry.
pub const DEFAULT_MAP_VALUE_NAME: &str = "value";

/// Naming and flattening convention used by a Query protocol endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ProtocolVariant {
    /// Standard Query protocol: collections carry `member`/`entry` segments
    /// unless explicitly flattened.
    #[default]
    Query,
    /// EC2-style convention: names come from the EC2 override and are
    /// capitalised, and every collection behaves as flattened.
    Ec2,
}

impl ProtocolVariant {
    /// Returns `true` for the EC2-style convention.
    #[must_use]
    pub const fn is_ec2(self) -> bool {
        matches!(self, Self::Ec2)
    }
}

/// Explicit structural kind overriding the shape inferred from a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KindHint {
    /// Decode as a record of named fields.
    Record,
    /// Decode as an indexed sequence.
    Sequence,
    /// Decode as a keyed mapping.
    Mapping,
    /// Decode as a single scalar leaf.
    Scalar,
}

impl KindHint {
    /// Returns the lowercase label used in diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Record => "structure",
            Self::Sequence => "list",
            Self::Mapping => "map",
            Self::Scalar => "scalar",
        }
    }
}

impl fmt::Display for KindHint {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Naming and behaviour annotations for a single schema field.
///
/// # Example
///
/// ```
/// use querymock_codec::FieldMeta;
///
/// let meta = FieldMeta::new().wire_name("Tag").flattened().required();
/// assert_eq!(meta.wire_name_override(), Some("Tag"));
/// assert!(meta.is_flattened());
/// assert!(meta.is_required());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldMeta {
    wire_name: Option<&'static str>,
    ec2_name: Option<&'static str>,
    member_name: Option<&'static str>,
    map_key_name: Option<&'static str>,
    map_value_name: Option<&'static str>,
    flattened: bool,
    required: bool,
    ignored: bool,
    kind_hint: Option<KindHint>,
}

impl FieldMeta {
    /// Creates metadata with every option unset.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            wire_name: None,
            ec2_name: None,
            member_name: None,
            map_key_name: None,
            map_value_name: None,
            flattened: false,
            required: false,
            ignored: false,
            kind_hint: None,
        }
    }

    /// Sets the general wire name override.
    #[must_use]
    pub const fn wire_name(mut self, name: &'static str) -> Self {
        self.wire_name = Some(name);
        self
    }

    /// Sets the override consulted only under [`ProtocolVariant::Ec2`].
    #[must_use]
    pub const fn ec2_name(mut self, name: &'static str) -> Self {
        self.ec2_name = Some(name);
        self
    }

    /// Sets the element name used for non-flattened sequence members.
    #[must_use]
    pub const fn member_name(mut self, name: &'static str) -> Self {
        self.member_name = Some(name);
        self
    }

    /// Overrides the key and value element names of mapping entries.
    #[must_use]
    pub const fn map_names(mut self, key: &'static str, value: &'static str) -> Self {
        self.map_key_name = Some(key);
        self.map_value_name = Some(value);
        self
    }

    /// Marks the collection as serialised without a `member`/`entry` segment.
    #[must_use]
    pub const fn flattened(mut self) -> Self {
        self.flattened = true;
        self
    }

    /// Marks the field as required; absence becomes a decode error.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Excludes the field from decoding entirely.
    #[must_use]
    pub const fn ignored(mut self) -> Self {
        self.ignored = true;
        self
    }

    /// Forces the structural kind used when decoding the field.
    #[must_use]
    pub const fn kind_hint(mut self, hint: KindHint) -> Self {
        self.kind_hint = Some(hint);
        self
    }

    /// General wire name override, if any.
    #[must_use]
    pub const fn wire_name_override(&self) -> Option<&'static str> {
        self.wire_name
    }

    /// EC2-specific wire name override, if any.
    #[must_use]
    pub const fn ec2_name_override(&self) -> Option<&'static str> {
        self.ec2_name
    }

    /// Element name override for sequence members, if any.
    #[must_use]
    pub const fn member_name_override(&self) -> Option<&'static str> {
        self.member_name
    }

    /// Key element name of mapping entries.
    #[must_use]
    pub fn map_key_name(&self) -> &'static str {
        self.map_key_name.unwrap_or(DEFAULT_MAP_KEY_NAME)
    }

    /// Value element name of mapping entries.
    #[must_use]
    pub fn map_value_name(&self) -> &'static str {
        self.map_value_name.unwrap_or(DEFAULT_MAP_VALUE_NAME)
    }

    /// Whether the collection is flattened.
    #[must_use]
    pub const fn is_flattened(&self) -> bool {
        self.flattened
    }

    /// Whether the field must be present.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// Whether the field is skipped by the decoder.
    #[must_use]
    pub const fn is_ignored(&self) -> bool {
        self.ignored
    }

    /// Explicit kind hint, if any.
    #[must_use]
    pub const fn hint(&self) -> Option<KindHint> {
        self.kind_hint
    }
}
