//! Wire name and path construction rules.

use std::borrow::Cow;

use crate::metadata::ProtocolVariant;
use crate::schema::Field;

/// Segment inserted before the indices of a non-flattened sequence.
pub(crate) const DEFAULT_MEMBER_SEGMENT: &str = "member";

/// Segment inserted before the indices of a non-flattened mapping.
pub(crate) const ENTRY_SEGMENT: &str = "entry";

/// Resolves the wire name of `field` under `variant`.
///
/// Precedence: the EC2 override (EC2 only), then the member name of a
/// flattened collection, then the general override, then the identifier.
/// Under EC2 the first character of the resolved name is upper-cased and the
/// remainder is left untouched.
#[must_use]
pub fn wire_name(field: &Field, variant: ProtocolVariant) -> Cow<'static, str> {
    let meta = field.meta();
    let ec2_override = meta.ec2_name_override().filter(|_| variant.is_ec2());
    let flattened_member = meta
        .member_name_override()
        .filter(|_| meta.is_flattened());
    let name = ec2_override
        .or(flattened_member)
        .or_else(|| meta.wire_name_override())
        .unwrap_or(field.ident());

    if variant.is_ec2() {
        capitalise_first(name)
    } else {
        Cow::Borrowed(name)
    }
}

/// Upper-cases the first character of `name`, borrowing when unchanged.
#[must_use]
pub fn capitalise_first(name: &str) -> Cow<'_, str> {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return Cow::Borrowed(name);
    };
    if first.to_uppercase().eq(std::iter::once(first)) {
        return Cow::Borrowed(name);
    }
    let mut capitalised = String::with_capacity(name.len());
    capitalised.extend(first.to_uppercase());
    capitalised.push_str(chars.as_str());
    Cow::Owned(capitalised)
}

/// Joins `segment` onto `prefix`, yielding the bare segment at the root.
#[must_use]
pub(crate) fn join(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_owned()
    } else {
        format!("{prefix}.{segment}")
    }
}

/// Path of the 1-based `index` below `prefix`.
#[must_use]
pub(crate) fn indexed(prefix: &str, index: usize) -> String {
    join(prefix, &index.to_string())
}
