//! Success and fault response documents.

use querymock_codec::Value;

use crate::fault::{FAULT_NAMESPACE, Fault};
use crate::xml::Element;

/// Builds `<{operation}Response>` wrapping the result and request metadata.
///
/// The outer element declares `namespace`; the `<{operation}Result>` child
/// holds the rendered `result` and is followed by `RequestMetadata`.
/// A record result contributes its fields directly to the result element.
#[must_use]
pub fn success_document(
    operation: &str,
    namespace: &str,
    request_id: &str,
    result: &Value,
) -> Element {
    Element::new(format!("{operation}Response"))
        .with_namespace(namespace)
        .with_child(Element::from_value(format!("{operation}Result"), result))
        .with_child(request_metadata(request_id))
}

/// Builds the namespaced `ErrorResponse` document for `fault`.
#[must_use]
pub fn fault_document(request_id: &str, fault: &dyn Fault) -> Element {
    let error = Element::new("Error")
        .with_child(Element::text("Type", fault.kind()))
        .with_child(Element::text("Code", fault.code()))
        .with_child(Element::text("Message", fault.message()));
    Element::new("ErrorResponse")
        .with_namespace(FAULT_NAMESPACE)
        .with_child(error)
        .with_child(Element::text("RequestId", request_id))
}

fn request_metadata(request_id: &str) -> Element {
    Element::new("RequestMetadata").with_child(Element::text("RequestId", request_id))
}

#[cfg(test)]
mod tests {
    use querymock_codec::Record;

    use super::*;
    use crate::fault::SenderFault;

    fn render(element: &Element) -> String {
        String::from_utf8(element.to_bytes().expect("serialise")).expect("utf-8")
    }

    #[test]
    fn success_document_nests_result_and_metadata() {
        let result = Value::Record(
            Record::new().with("User", Record::new().with("UserName", "alice")),
        );
        let document = success_document("GetUser", "urn:iam", "req-1", &result);
        assert_eq!(
            render(&document),
            "<GetUserResponse xmlns=\"urn:iam\"><GetUserResult><User><UserName>alice\
             </UserName></User></GetUserResult><RequestMetadata><RequestId>req-1\
             </RequestId></RequestMetadata></GetUserResponse>"
        );
    }

    #[test]
    fn fault_document_places_request_id_beside_error() {
        let fault = SenderFault::no_such_entity("gone");
        let document = fault_document("req-2", &fault);
        assert_eq!(document.namespace(), Some(FAULT_NAMESPACE));
        let error = document.child("Error").expect("error element");
        assert_eq!(
            error.child("Type").and_then(Element::text_content),
            Some("Sender")
        );
        assert_eq!(
            error.child("Code").and_then(Element::text_content),
            Some("NoSuchEntity")
        );
        assert_eq!(
            error.child("Message").and_then(Element::text_content),
            Some("gone")
        );
        assert_eq!(
            document.child("RequestId").and_then(Element::text_content),
            Some("req-2")
        );
    }
}
