//! Unit tests for the dispatch service.

use querymock_codec::{Field, FieldMeta, ProtocolVariant, Record, Schema, Value};
use rstest::{fixture, rstest};

use super::*;
use crate::apiset::{ApiSet, QueryOperation};
use crate::fault::FaultCode;
use crate::registry::RegistryError;

fn echo() -> QueryOperation {
    let schema = Schema::record([
        Field::new("Name", Schema::string()).with_meta(FieldMeta::new().required())
    ]);
    QueryOperation::new("Echo", schema, ProtocolVariant::Query, |context, params| {
        let name = params
            .as_record()
            .and_then(|record| record.get_str("Name"))
            .unwrap_or_default()
            .to_owned();
        Ok(Value::Record(
            Record::new()
                .with("Name", name)
                .with("Version", context.version.as_str())
                .with("Service", context.service.as_str()),
        ))
    })
}

fn broken() -> QueryOperation {
    QueryOperation::new("Broken", Schema::record([]), ProtocolVariant::Query, |_, _| {
        Err(RegistryError::unavailable("registry offline").into())
    })
}

#[fixture]
fn service() -> Service {
    let mut first = ApiSet::new("V1", "urn:first");
    first.register(echo());
    first.register(broken());
    let mut second = ApiSet::new("V1", "urn:second");
    second.register(QueryOperation::new(
        "Only",
        Schema::record([]),
        ProtocolVariant::Query,
        |_, _| Ok(Value::Record(Record::new())),
    ));
    let mut service = Service::new("test");
    service.add_api_set(first);
    service.add_api_set(second);
    service
}

fn body(response: &QueryResponse) -> String {
    String::from_utf8(response.body().to_vec()).expect("UTF-8 body")
}

#[rstest]
fn successful_requests_render_the_namespaced_envelope(service: Service) {
    let request = QueryRequest::form_post("Action=Echo&Version=V1&Name=hi");
    let response = service.handle_with_request_id(&request, "req-1");
    assert_eq!(response.status(), 200);
    assert_eq!(response.header("content-type"), Some(CONTENT_TYPE_XML));
    assert_eq!(response.header(REQUEST_ID_HEADER), Some("req-1"));
    assert_eq!(
        body(&response),
        "<EchoResponse xmlns=\"urn:first\"><EchoResult><Name>hi</Name><Version>V1</Version>\
         <Service>test</Service></EchoResult><RequestMetadata><RequestId>req-1</RequestId>\
         </RequestMetadata></EchoResponse>"
    );
}

#[rstest]
fn later_sets_with_the_same_version_are_searched(service: Service) {
    let (api_set, handler) = service.resolve("Only", "V1").expect("resolves");
    assert_eq!(api_set.namespace(), "urn:second");
    assert_eq!(handler.name(), "Only");
}

#[rstest]
#[case::wrong_version("Echo", "V2")]
#[case::unknown_action("Missing", "V1")]
#[case::no_version("Echo", "")]
fn unresolvable_requests_are_invalid_actions(
    service: Service,
    #[case] action: &str,
    #[case] version: &str,
) {
    let fault = service.resolve(action, version).expect_err("does not resolve");
    assert_eq!(fault.fault_code(), FaultCode::InvalidAction);
}

#[rstest]
fn decode_failures_are_invalid_parameter_values(service: Service) {
    let response = service.handle(&QueryRequest::form_post("Action=Echo&Version=V1"));
    assert_eq!(response.status(), 400);
    let text = body(&response);
    assert!(text.contains("<Code>InvalidParameterValue</Code>"), "{text}");
    assert!(text.contains("<Message>invalid parameter</Message>"), "{text}");
}

#[rstest]
fn internal_failures_hide_their_detail(service: Service) {
    let request = QueryRequest::form_post("Action=Broken&Version=V1");
    let response = service.handle_with_request_id(&request, "req-2");
    assert_eq!(response.status(), 500);
    assert_eq!(response.header("Content-Type"), Some(CONTENT_TYPE_PLAIN));
    assert_eq!(response.header(REQUEST_ID_HEADER), Some("req-2"));
    assert_eq!(body(&response), "Internal server error");
}

#[rstest]
fn generated_request_ids_differ_between_requests(service: Service) {
    let request = QueryRequest::form_post("Action=Echo&Version=V1&Name=a");
    let first = service.handle(&request);
    let second = service.handle(&request);
    assert_ne!(first.header(REQUEST_ID_HEADER), second.header(REQUEST_ID_HEADER));
    assert_eq!(
        first.header("Content-Length"),
        Some(first.body().len().to_string().as_str())
    );
}
