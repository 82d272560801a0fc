//! Unit tests for schema-driven decoding.

use std::collections::BTreeMap;

use rstest::{fixture, rstest};
use time::macros::datetime;

use super::*;
use crate::schema::ScalarKind;
use crate::value::Scalar;

fn form(input: &str) -> ParamSpace {
    ParamSpace::from_form(input.as_bytes())
}

fn tag_schema() -> Schema {
    Schema::record([
        Field::new("Key", Schema::string()),
        Field::new("Value", Schema::string()),
    ])
}

fn tag(key: &str, value: &str) -> Value {
    Value::Record(Record::new().with("Key", key).with("Value", value))
}

#[fixture]
fn query() -> Decoder {
    Decoder::new(ProtocolVariant::Query)
}

#[fixture]
fn ec2() -> Decoder {
    Decoder::new(ProtocolVariant::Ec2)
}

// ----------------------------------------------------------------------
// Records
// ----------------------------------------------------------------------

#[rstest]
fn decodes_top_level_scalars(query: Decoder) {
    let schema = Schema::record([
        Field::new("UserName", Schema::string()),
        Field::new("MaxItems", Schema::int32()),
        Field::new("Enabled", Schema::bool()),
    ]);
    let value = query
        .decode(&schema, &form("UserName=alice&MaxItems=25&Enabled=true"))
        .expect("decode");
    let expected = Record::new()
        .with("UserName", "alice")
        .with("MaxItems", 25)
        .with("Enabled", true);
    assert_eq!(value, Value::Record(expected));
}

#[rstest]
fn absent_optional_scalars_stay_absent(query: Decoder) {
    let schema = Schema::record([
        Field::new("Marker", Schema::string()),
        Field::new("MaxItems", Schema::int32()),
    ]);
    let value = query.decode(&schema, &form("Action=ListUsers")).expect("decode");
    assert_eq!(value, Value::Record(Record::new()));
}

#[rstest]
fn present_but_empty_string_is_kept(query: Decoder) {
    let schema = Schema::record([Field::new("PathPrefix", Schema::string())]);
    let value = query.decode(&schema, &form("PathPrefix=")).expect("decode");
    assert_eq!(value, Value::Record(Record::new().with("PathPrefix", "")));
}

#[rstest]
fn missing_required_field_names_its_path(query: Decoder) {
    let schema = Schema::record([Field::new(
        "Filter",
        Schema::record([Field::new("Name", Schema::string())
            .with_meta(FieldMeta::new().required())]),
    )]);
    let error = query
        .decode(&schema, &form("Filter.Other=x"))
        .expect_err("required name is absent");
    assert_eq!(
        error,
        DecodeError::MissingRequired {
            path: "Filter.Name".into()
        }
    );
}

#[rstest]
fn ignored_fields_are_never_read(query: Decoder) {
    let schema = Schema::record([
        Field::new("Action", Schema::int32()).with_meta(FieldMeta::new().ignored().required()),
        Field::new("UserName", Schema::string()),
    ]);
    let value = query
        .decode(&schema, &form("Action=GetUser&UserName=bob"))
        .expect("decode");
    assert_eq!(value, Value::Record(Record::new().with("UserName", "bob")));
}

#[rstest]
fn nested_records_use_dotted_paths(query: Decoder) {
    let schema = Schema::record([Field::new(
        "Placement",
        Schema::record([Field::new("AvailabilityZone", Schema::string())]),
    )]);
    let value = query
        .decode(&schema, &form("Placement.AvailabilityZone=eu-west-1a"))
        .expect("decode");
    let placement = Record::new().with("AvailabilityZone", "eu-west-1a");
    assert_eq!(value, Value::Record(Record::new().with("Placement", placement)));
}

#[rstest]
fn parse_failures_abort_the_whole_decode(query: Decoder) {
    let schema = Schema::record([
        Field::new("UserName", Schema::string()),
        Field::new("MaxItems", Schema::int32()),
    ]);
    let error = query
        .decode(&schema, &form("UserName=alice&MaxItems=lots"))
        .expect_err("MaxItems is not an integer");
    assert_eq!(error.path(), "MaxItems");
}

#[rstest]
fn timestamps_decode_as_utc(query: Decoder) {
    let schema = Schema::record([Field::new("Since", Schema::timestamp())]);
    let value = query
        .decode(&schema, &form("Since=2021-06-01T08:30:00Z"))
        .expect("decode");
    let expected = Record::new().with("Since", datetime!(2021-06-01 08:30:00 UTC));
    assert_eq!(value, Value::Record(expected));
}

// ----------------------------------------------------------------------
// Sequences
// ----------------------------------------------------------------------

#[rstest]
fn absent_sequence_decodes_to_empty(query: Decoder) {
    let schema = Schema::record([Field::new("Tags", Schema::sequence(tag_schema()))]);
    let value = query.decode(&schema, &form("Action=TagUser")).expect("decode");
    assert_eq!(
        value,
        Value::Record(Record::new().with("Tags", Vec::<Value>::new()))
    );
}

#[rstest]
fn non_flattened_sequence_uses_member_segment(query: Decoder) {
    let schema = Schema::record([Field::new("Tags", Schema::sequence(tag_schema()))]);
    let params = form(
        "Tags.member.2.Key=b&Tags.member.2.Value=2&Tags.member.1.Key=a&Tags.member.1.Value=1",
    );
    let value = query.decode(&schema, &params).expect("decode");
    let expected = Record::new().with("Tags", vec![tag("a", "1"), tag("b", "2")]);
    assert_eq!(value, Value::Record(expected));
}

#[rstest]
fn non_flattened_sequence_ignores_unsegmented_indices(query: Decoder) {
    let schema = Schema::record([Field::new("Names", Schema::sequence(Schema::string()))]);
    let value = query.decode(&schema, &form("Names.1=a")).expect("decode");
    assert_eq!(
        value,
        Value::Record(Record::new().with("Names", Vec::<Value>::new()))
    );
}

#[rstest]
fn custom_member_name_replaces_member_segment(query: Decoder) {
    let schema = Schema::record([Field::new("Names", Schema::sequence(Schema::string()))
        .with_meta(FieldMeta::new().member_name("item"))]);
    let value = query
        .decode(&schema, &form("Names.item.1=a&Names.item.2=b"))
        .expect("decode");
    assert_eq!(
        value,
        Value::Record(Record::new().with("Names", vec![Value::from("a"), Value::from("b")]))
    );
}

#[rstest]
fn flattened_sequence_indexes_the_member_name(query: Decoder) {
    let schema = Schema::record([Field::new("Names", Schema::sequence(Schema::string()))
        .with_meta(FieldMeta::new().flattened().member_name("Name"))]);
    let value = query.decode(&schema, &form("Name.1=a&Name.2=b")).expect("decode");
    assert_eq!(
        value,
        Value::Record(Record::new().with("Names", vec![Value::from("a"), Value::from("b")]))
    );
}

#[rstest]
fn sequence_stops_at_the_first_gap(query: Decoder) {
    let schema = Schema::record([Field::new("Names", Schema::sequence(Schema::string()))]);
    let value = query
        .decode(&schema, &form("Names.member.1=a&Names.member.3=c"))
        .expect("decode");
    assert_eq!(
        value,
        Value::Record(Record::new().with("Names", vec![Value::from("a")]))
    );
}

#[rstest]
fn byte_fields_are_scalars_not_sequences(query: Decoder) {
    let schema = Schema::record([Field::new("Blob", Schema::Scalar(ScalarKind::Bytes))]);
    let value = query.decode(&schema, &form("Blob=AQID")).expect("decode");
    assert_eq!(
        value,
        Value::Record(Record::new().with("Blob", Scalar::Bytes(vec![1, 2, 3])))
    );
}

#[rstest]
fn ec2_sequences_are_always_flattened(ec2: Decoder) {
    let schema = Schema::record([Field::new("instanceId", Schema::sequence(Schema::string()))]);
    let value = ec2
        .decode(&schema, &form("InstanceId.1=i-1&InstanceId.2=i-2"))
        .expect("decode");
    assert_eq!(
        value,
        Value::Record(
            Record::new().with("instanceId", vec![Value::from("i-1"), Value::from("i-2")])
        )
    );
}

#[rstest]
fn ec2_override_name_is_capitalised(ec2: Decoder) {
    let schema = Schema::record([Field::new("Filters", Schema::sequence(Schema::string()))
        .with_meta(FieldMeta::new().ec2_name("filter").wire_name("FilterSet"))]);
    let value = ec2
        .decode(&schema, &form("Filter.1=a&FilterSet.1=b"))
        .expect("decode");
    assert_eq!(
        value,
        Value::Record(Record::new().with("Filters", vec![Value::from("a")]))
    );
}

// ----------------------------------------------------------------------
// Mappings
// ----------------------------------------------------------------------

fn attributes_schema(meta: FieldMeta) -> Schema {
    Schema::record([Field::new("Attributes", Schema::mapping(Schema::string())).with_meta(meta)])
}

fn seeded_attributes(keys: &[&str]) -> Value {
    let entries: BTreeMap<String, Value> = keys
        .iter()
        .map(|key| ((*key).to_owned(), Value::from("")))
        .collect();
    Value::Record(Record::new().with("Attributes", entries))
}

#[rstest]
fn fresh_decode_of_a_mapping_is_empty(query: Decoder) {
    let value = query
        .decode(
            &attributes_schema(FieldMeta::new()),
            &form("Attributes.entry.1.key=colour&Attributes.entry.1.value=red"),
        )
        .expect("decode");
    assert_eq!(value, seeded_attributes(&[]));
}

#[rstest]
fn seeded_mapping_replays_keys_in_sorted_order(query: Decoder) {
    let mut target = seeded_attributes(&["zone", "colour"]);
    let params = form(
        "Attributes.entry.1.key=colour&Attributes.entry.1.value=red&\
         Attributes.entry.2.key=zone&Attributes.entry.2.value=b",
    );
    query
        .decode_into(&attributes_schema(FieldMeta::new()), &params, &mut target)
        .expect("decode");

    let attributes = target
        .as_record()
        .and_then(|record| record.get("Attributes"))
        .and_then(Value::as_mapping)
        .expect("attributes mapping");
    let decoded: Vec<_> = attributes
        .iter()
        .map(|(key, value)| (key.as_str(), value.as_str()))
        .collect();
    assert_eq!(decoded, [("colour", Some("red")), ("zone", Some("b"))]);
}

#[rstest]
fn seeded_mapping_stores_entries_under_seeded_keys(query: Decoder) {
    let mut target = seeded_attributes(&["a"]);
    let params = form("Attributes.entry.1.key=other&Attributes.entry.1.value=v");
    query
        .decode_into(&attributes_schema(FieldMeta::new()), &params, &mut target)
        .expect("decode");
    let mut expected = BTreeMap::new();
    expected.insert("a".to_owned(), Value::from("v"));
    assert_eq!(
        target,
        Value::Record(Record::new().with("Attributes", expected))
    );
}

#[rstest]
fn flattened_mapping_uses_custom_entry_names(query: Decoder) {
    let meta = FieldMeta::new().flattened().map_names("Name", "Setting");
    let mut target = seeded_attributes(&["x"]);
    let params = form("Attributes.1.Name=x&Attributes.1.Setting=on");
    query
        .decode_into(&attributes_schema(meta), &params, &mut target)
        .expect("decode");
    let mut expected = BTreeMap::new();
    expected.insert("x".to_owned(), Value::from("on"));
    assert_eq!(
        target,
        Value::Record(Record::new().with("Attributes", expected))
    );
}

#[rstest]
fn seeded_mapping_requires_each_entry_key(query: Decoder) {
    let mut target = seeded_attributes(&["a", "b"]);
    let params = form("Attributes.entry.1.key=a&Attributes.entry.1.value=1");
    let error = query
        .decode_into(&attributes_schema(FieldMeta::new()), &params, &mut target)
        .expect_err("second entry key is missing");
    assert_eq!(error.path(), "Attributes.entry.2.key");
    assert_eq!(target, seeded_attributes(&["a", "b"]));
}

#[rstest]
fn absent_seeded_mapping_decodes_to_empty(query: Decoder) {
    let mut target = seeded_attributes(&["a"]);
    query
        .decode_into(&attributes_schema(FieldMeta::new()), &form("Other=1"), &mut target)
        .expect("decode");
    assert_eq!(target, seeded_attributes(&[]));
}

// ----------------------------------------------------------------------
// Kind hints
// ----------------------------------------------------------------------

#[rstest]
fn collection_hint_on_scalar_schema_is_a_mismatch(query: Decoder) {
    let schema = Schema::record([Field::new("Name", Schema::string())
        .with_meta(FieldMeta::new().kind_hint(KindHint::Sequence))]);
    let error = query
        .decode(&schema, &form("Name.member.1=a"))
        .expect_err("hint does not fit");
    assert_eq!(
        error,
        DecodeError::KindMismatch {
            path: "Name".into(),
            hint: KindHint::Sequence,
            actual: KindHint::Scalar,
        }
    );
}

#[rstest]
fn scalar_hint_on_record_schema_is_unsupported(query: Decoder) {
    let schema = Schema::record([Field::new("Placement", tag_schema())
        .with_meta(FieldMeta::new().kind_hint(KindHint::Scalar))]);
    let error = query
        .decode(&schema, &form("Placement=zone"))
        .expect_err("records have no scalar coercion");
    assert!(matches!(error, DecodeError::UnsupportedKind { ref path, .. } if path == "Placement"));
}

#[rstest]
fn matching_hint_behaves_like_inference(query: Decoder) {
    let schema = Schema::record([Field::new("Names", Schema::sequence(Schema::string()))
        .with_meta(FieldMeta::new().kind_hint(KindHint::Sequence))]);
    let value = query.decode(&schema, &form("Names.member.1=a")).expect("decode");
    assert_eq!(
        value,
        Value::Record(Record::new().with("Names", vec![Value::from("a")]))
    );
}

#[test]
fn free_function_matches_decoder() {
    let schema = Schema::record([Field::new("userName", Schema::string())]);
    let params = form("UserName=carol");
    assert_eq!(
        decode(&schema, ProtocolVariant::Ec2, &params),
        Decoder::new(ProtocolVariant::Ec2).decode(&schema, &params)
    );
}
