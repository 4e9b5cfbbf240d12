// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The handle every API call goes through, and the transport it sends requests with.
//!
//! A `Client` bundles the three things a call needs besides its own parameters: the `Token` to
//! sign with, the root URL of the API, and a `Transport` that actually puts the request on the
//! wire. `Client::new` sets up an HTTPS transport backed by hyper; use `Client::with_transport` if
//! you want to route requests somewhere else, such as a proxy layer or a test double.
//!
//! `Client` is cheap to clone, and clones share the same transport.

use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use hyper::client::HttpConnector;
use hyper::{Body, Request};

#[cfg(feature = "native_tls")]
use hyper_tls::HttpsConnector;
#[cfg(all(
    any(feature = "rustls", feature = "rustls_webpki"),
    not(feature = "native_tls")
))]
use hyper_rustls::HttpsConnector;

use crate::auth::Token;
use crate::common::CowStr;
use crate::error::Result;
use crate::links;

/// Sends a fully assembled request and hands back the raw response.
///
/// This is the seam between this library and the network. Implementations are expected to do
/// nothing more than deliver the request: response bodies are inspected for Twitter's errors and
/// decoded by the caller, and no retries should be attempted here. Timeouts and cancellation are
/// up to the implementation.
pub trait Transport: Send + Sync {
    /// Deliver the request, resolving to the response headers and body.
    fn send(&self, request: Request<Body>) -> BoxFuture<'static, Result<hyper::Response<Body>>>;
}

#[cfg(feature = "native_tls")]
fn new_https_connector() -> HttpsConnector<HttpConnector> {
    HttpsConnector::new()
}

#[cfg(all(feature = "rustls", not(feature = "native_tls")))]
fn new_https_connector() -> HttpsConnector<HttpConnector> {
    HttpsConnector::with_native_roots()
}

#[cfg(all(
    feature = "rustls_webpki",
    not(feature = "rustls"),
    not(feature = "native_tls")
))]
fn new_https_connector() -> HttpsConnector<HttpConnector> {
    HttpsConnector::with_webpki_roots()
}

/// A `Transport` that sends requests over HTTPS with hyper.
///
/// The TLS implementation is chosen with cargo features: `native_tls` (the default) uses
/// `hyper-tls`, while `rustls` and `rustls_webpki` use `hyper-rustls` with the platform's or
/// Mozilla's root certificates, respectively.
#[derive(Clone)]
pub struct HttpsTransport {
    client: hyper::Client<HttpsConnector<HttpConnector>, Body>,
}

impl HttpsTransport {
    /// Creates a new transport with its own connection pool.
    pub fn new() -> HttpsTransport {
        HttpsTransport {
            client: hyper::Client::builder().build(new_https_connector()),
        }
    }
}

impl Default for HttpsTransport {
    fn default() -> Self {
        HttpsTransport::new()
    }
}

impl Transport for HttpsTransport {
    fn send(&self, request: Request<Body>) -> BoxFuture<'static, Result<hyper::Response<Body>>> {
        let fut = self.client.request(request);
        async move { Ok(fut.await?) }.boxed()
    }
}

/// A handle to the Twitter API: credentials, API root, and the transport to send requests with.
#[derive(Clone)]
pub struct Client {
    token: Token,
    base_url: CowStr,
    transport: Arc<dyn Transport>,
}

impl Client {
    /// Creates a new `Client` that signs requests with the given token and sends them with a new
    /// `HttpsTransport`.
    pub fn new(token: Token) -> Client {
        Client::with_transport(token, HttpsTransport::new())
    }

    /// Creates a new `Client` that signs requests with the given token and sends them with the
    /// given transport.
    pub fn with_transport(token: Token, transport: impl Transport + 'static) -> Client {
        Client {
            token,
            base_url: links::BASE_URL.into(),
            transport: Arc::new(transport),
        }
    }

    /// Sets the root URL that endpoint paths are appended to. The default is
    /// `https://api.twitter.com/1.1/`.
    ///
    /// A trailing slash is added if the given URL doesn't have one.
    pub fn base_url(self, url: impl Into<CowStr>) -> Client {
        let mut url = url.into();
        if !url.ends_with('/') {
            url.to_mut().push('/');
        }
        Client {
            base_url: url,
            ..self
        }
    }

    /// Returns the token this client signs requests with.
    pub fn token(&self) -> &Token {
        &self.token
    }

    /// Returns the full URL for the given endpoint path.
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn transport(&self) -> &dyn Transport {
        &*self.transport
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Client")
            .field("token", &self.token)
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    use std::collections::VecDeque;
    use std::sync::Mutex;

    use hyper::StatusCode;

    use crate::auth::KeyPair;

    /// A request as seen by `MockTransport`, with its body already collected.
    #[derive(Debug, Clone)]
    pub(crate) struct SeenRequest {
        pub method: hyper::Method,
        pub uri: hyper::Uri,
        pub authorization: Option<String>,
        pub body: String,
    }

    impl SeenRequest {
        /// Returns the decoded query string or form body, whichever the request carried.
        pub fn params(&self) -> Vec<(String, String)> {
            let raw = if self.method == hyper::Method::GET {
                self.uri.query().unwrap_or("").to_string()
            } else {
                self.body.clone()
            };
            raw.split('&')
                .filter(|p| !p.is_empty())
                .map(|p| {
                    let mut kv = p.splitn(2, '=');
                    let k = kv.next().unwrap_or("");
                    let v = kv.next().unwrap_or("");
                    (decode(k), decode(v))
                })
                .collect()
        }

        pub fn param(&self, key: &str) -> Option<String> {
            self.params()
                .into_iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v)
        }
    }

    fn decode(src: &str) -> String {
        percent_encoding::percent_decode_str(src)
            .decode_utf8()
            .unwrap()
            .into_owned()
    }

    struct Canned {
        status: StatusCode,
        headers: Vec<(&'static str, String)>,
        body: String,
    }

    /// Hands out canned responses in order and records every request it's given.
    #[derive(Clone)]
    pub(crate) struct MockTransport {
        responses: Arc<Mutex<VecDeque<Canned>>>,
        seen: Arc<Mutex<Vec<SeenRequest>>>,
    }

    impl MockTransport {
        pub fn new() -> MockTransport {
            MockTransport {
                responses: Arc::new(Mutex::new(VecDeque::new())),
                seen: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub fn respond(self, status: StatusCode, body: &str) -> MockTransport {
            self.respond_with_headers(status, &[], body)
        }

        pub fn respond_with_headers(
            self,
            status: StatusCode,
            headers: &[(&'static str, &str)],
            body: &str,
        ) -> MockTransport {
            self.responses.lock().unwrap().push_back(Canned {
                status,
                headers: headers.iter().map(|(k, v)| (*k, v.to_string())).collect(),
                body: body.to_string(),
            });
            self
        }

        pub fn seen(&self) -> Vec<SeenRequest> {
            self.seen.lock().unwrap().clone()
        }
    }

    impl Transport for MockTransport {
        fn send(
            &self,
            request: Request<Body>,
        ) -> BoxFuture<'static, Result<hyper::Response<Body>>> {
            let canned = self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("MockTransport ran out of responses");
            let seen = self.seen.clone();

            async move {
                let (parts, body) = request.into_parts();
                let body = hyper::body::to_bytes(body).await?;
                seen.lock().unwrap().push(SeenRequest {
                    method: parts.method,
                    uri: parts.uri,
                    authorization: parts
                        .headers
                        .get(hyper::header::AUTHORIZATION)
                        .map(|v| v.to_str().unwrap().to_string()),
                    body: String::from_utf8(body.to_vec()).unwrap(),
                });

                let mut resp = hyper::Response::builder().status(canned.status);
                for (k, v) in canned.headers {
                    resp = resp.header(k, v);
                }
                Ok(resp.body(Body::from(canned.body)).unwrap())
            }
            .boxed()
        }
    }

    /// Fails the test if anything tries to send a request through it.
    pub(crate) struct PanicTransport;

    impl Transport for PanicTransport {
        fn send(&self, request: Request<Body>) -> BoxFuture<'static, Result<hyper::Response<Body>>> {
            panic!("no request should have been sent, got {} {}", request.method(), request.uri());
        }
    }

    pub(crate) fn bearer_client(transport: impl Transport + 'static) -> Client {
        Client::with_transport(Token::Bearer("AAAA".to_string()), transport)
    }

    pub(crate) fn access_client(transport: impl Transport + 'static) -> Client {
        let consumer = KeyPair::new("consumer-key", "consumer-secret");
        let access = KeyPair::new("access-key", "access-secret");
        Client::with_transport(Token::Access { consumer, access }, transport)
    }

    #[test]
    fn base_url_gets_trailing_slash() {
        let client = bearer_client(PanicTransport).base_url("http://localhost:8080/1.1");
        assert_eq!(
            client.url("friendships/show.json"),
            "http://localhost:8080/1.1/friendships/show.json"
        );
    }

    #[test]
    fn default_base_url() {
        let client = bearer_client(PanicTransport);
        assert_eq!(
            client.url("friendships/lookup.json"),
            "https://api.twitter.com/1.1/friendships/lookup.json"
        );
    }
}
