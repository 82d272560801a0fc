//! Transport-neutral request and response values.

use querymock_codec::ParamSpace;

/// Header carrying the request identifier.
pub const REQUEST_ID_HEADER: &str = "x-amzn-RequestId";

/// Media type of form-encoded bodies.
pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";

/// Content type of success and fault documents.
pub const CONTENT_TYPE_XML: &str = "text/xml; charset=UTF-8";

/// Content type of internal error responses.
pub const CONTENT_TYPE_PLAIN: &str = "text/plain; charset=utf-8";

const BODY_METHODS: [&str; 3] = ["POST", "PUT", "PATCH"];

/// An inbound HTTP request reduced to what dispatch needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryRequest {
    method: String,
    path: String,
    query: Option<String>,
    content_type: Option<String>,
    body: Vec<u8>,
}

impl QueryRequest {
    /// Creates a request for `method` on `path` with no query or body.
    #[must_use]
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            ..Self::default()
        }
    }

    /// Builds a form-encoded `POST` to `/` carrying `form`.
    #[must_use]
    pub fn form_post(form: impl Into<Vec<u8>>) -> Self {
        Self::new("POST", "/")
            .with_content_type(Some(CONTENT_TYPE_FORM))
            .with_body(form)
    }

    /// Sets the raw URL query, without the leading `?`.
    #[must_use]
    pub fn with_query(mut self, query: Option<&str>) -> Self {
        self.query = query.map(str::to_owned);
        self
    }

    /// Sets the `Content-Type` header value.
    #[must_use]
    pub fn with_content_type(mut self, content_type: Option<&str>) -> Self {
        self.content_type = content_type.map(str::to_owned);
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// HTTP method.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// HTTP path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Path plus query, as logged for failed requests.
    #[must_use]
    pub fn url(&self) -> String {
        match &self.query {
            Some(query) => format!("{}?{query}", self.path),
            None => self.path.clone(),
        }
    }

    /// Parses the form parameters of the request.
    ///
    /// Form-encoded bodies of `POST`, `PUT`, and `PATCH` requests come first,
    /// followed by the URL query, so body values win on single-value reads.
    #[must_use]
    pub fn form(&self) -> ParamSpace {
        let mut params = ParamSpace::new();
        if self.has_form_body() {
            params.extend_from_form(&self.body);
        }
        if let Some(query) = &self.query {
            params.extend_from_form(query.as_bytes());
        }
        params
    }

    fn has_form_body(&self) -> bool {
        let carries_body = BODY_METHODS
            .iter()
            .any(|method| method.eq_ignore_ascii_case(&self.method));
        let is_form = self.content_type.as_deref().is_some_and(|value| {
            value
                .split(';')
                .next()
                .is_some_and(|media| media.trim().eq_ignore_ascii_case(CONTENT_TYPE_FORM))
        });
        carries_body && is_form
    }
}

/// An outbound HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResponse {
    status: u16,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl QueryResponse {
    pub(crate) fn new(status: u16, request_id: &str, content_type: &str, body: Vec<u8>) -> Self {
        let headers = vec![
            (REQUEST_ID_HEADER.to_owned(), request_id.to_owned()),
            ("Content-Type".to_owned(), content_type.to_owned()),
            ("Content-Length".to_owned(), body.len().to_string()),
        ];
        Self {
            status,
            headers,
            body,
        }
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Response headers in insertion order.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Value of the header `name`, compared case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Response body.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Splits the response into status, headers, and body.
    #[must_use]
    pub fn into_parts(self) -> (u16, Vec<(String, String)>, Vec<u8>) {
        (self.status, self.headers, self.body)
    }
}
