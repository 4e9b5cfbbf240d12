// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Infrastructure types related to packaging rate-limit information alongside responses from
//! Twitter.

use std::convert::TryFrom;
use std::vec;

use hyper::{Body, Request};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, trace};

use crate::client::Transport;
use crate::error::Error::{self, BadStatus, TwitterError};
use crate::error::{Result, TwitterErrors};

use super::Headers;

const X_RATE_LIMIT_LIMIT: &'static str = "X-Rate-Limit-Limit";
const X_RATE_LIMIT_REMAINING: &'static str = "X-Rate-Limit-Remaining";
const X_RATE_LIMIT_RESET: &'static str = "X-Rate-Limit-Reset";

/// Error code Twitter uses for "Rate limit exceeded".
const RATE_LIMIT_EXCEEDED: i32 = 88;

fn rate_limit(headers: &Headers, header: &'static str) -> Result<Option<i32>> {
    let val = headers.get(header);

    if let Some(val) = val {
        let val = val.to_str()?.parse::<i32>()?;
        Ok(Some(val))
    } else {
        Ok(None)
    }
}

fn rate_limit_limit(headers: &Headers) -> Result<Option<i32>> {
    rate_limit(headers, X_RATE_LIMIT_LIMIT)
}

fn rate_limit_remaining(headers: &Headers) -> Result<Option<i32>> {
    rate_limit(headers, X_RATE_LIMIT_REMAINING)
}

fn rate_limit_reset(headers: &Headers) -> Result<Option<i32>> {
    rate_limit(headers, X_RATE_LIMIT_RESET)
}

/// Rate-limit information returned with a response.
///
/// Fields are `-1` when Twitter didn't send the corresponding header.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct RateLimit {
    /// The rate limit ceiling for the given request.
    pub limit: i32,
    /// The number of requests left for the 15-minute window.
    pub remaining: i32,
    /// The UTC Unix timestamp at which the rate window resets.
    pub reset: i32,
}

impl TryFrom<&Headers> for RateLimit {
    type Error = Error;

    fn try_from(headers: &Headers) -> Result<Self> {
        let status = RateLimit {
            limit: rate_limit_limit(headers)?.unwrap_or(-1),
            remaining: rate_limit_remaining(headers)?.unwrap_or(-1),
            reset: rate_limit_reset(headers)?.unwrap_or(-1),
        };
        trace!(?status, "rate-limit headers");
        Ok(status)
    }
}

/// A helper struct to wrap response data with accompanying rate limit information.
///
/// This is returned by any function that calls a rate-limited method on Twitter, to allow for
/// inline checking of the rate-limit information without an extra call.
///
/// As this implements `Deref` and `DerefMut`, you can transparently use the structure's methods
/// as if they were methods on the struct itself.
#[derive(Debug, Clone, derive_more::Deref, derive_more::DerefMut)]
pub struct Response<T> {
    /// Latest rate limit status
    pub rate_limit_status: RateLimit,
    /// The decoded response from the request.
    #[deref]
    #[deref_mut]
    pub response: T,
}

impl<T> Response<T> {
    /// Convert a `Response<T>` to a `Response<U>` by running its contained response through the
    /// given function. This preserves its rate-limit information.
    ///
    /// Note that this is not a member function, so as to not conflict with potential methods on the
    /// contained `T`.
    pub fn map<F, U>(src: Response<T>, fun: F) -> Response<U>
    where
        F: FnOnce(T) -> U,
    {
        Response {
            rate_limit_status: src.rate_limit_status,
            response: fun(src.response),
        }
    }

    /// Unwrap the `Response`, returning the inner data and the rate-limit information.
    pub fn into_parts(src: Response<T>) -> (T, RateLimit) {
        (src.response, src.rate_limit_status)
    }
}

/// Iterator returned by calling `.into_iter()` on a `Response<Vec<T>>`.
pub struct ResponseIter<T> {
    rate_limit_status: RateLimit,
    resp_iter: vec::IntoIter<T>,
}

impl<T> Iterator for ResponseIter<T> {
    type Item = Response<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let rate_limit_status = self.rate_limit_status;
        self.resp_iter.next().map(|response| Response {
            rate_limit_status,
            response,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.resp_iter.size_hint()
    }
}

impl<T> ExactSizeIterator for ResponseIter<T> {
    fn len(&self) -> usize {
        self.resp_iter.len()
    }
}

impl<T> IntoIterator for Response<Vec<T>> {
    type Item = Response<T>;
    type IntoIter = ResponseIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        ResponseIter {
            rate_limit_status: self.rate_limit_status,
            resp_iter: self.response.into_iter(),
        }
    }
}

/// Sends the given request through the transport and loads the response body.
///
/// Twitter may send its error structure alongside any status code, so the body is checked for it
/// first: a structured error with at least one entry is always reported as `TwitterError` (or
/// `RateLimit`), even when the status code alone would have produced `BadStatus`.
pub async fn raw_request(
    transport: &dyn Transport,
    request: Request<Body>,
) -> Result<(Headers, Vec<u8>)> {
    debug!(method = %request.method(), path = request.uri().path(), "sending request");

    let resp = transport.send(request).await?;
    let (parts, body) = resp.into_parts();
    let body = hyper::body::to_bytes(body).await?.to_vec();

    match serde_json::from_slice::<TwitterErrors>(&body) {
        Ok(errors) if !errors.errors.is_empty() => {
            debug!(status = %parts.status, %errors, "twitter returned errors");
            // a reset header that doesn't parse still leaves the errors from the body
            if errors.has_code(RATE_LIMIT_EXCEEDED) {
                if let Ok(Some(reset)) = rate_limit_reset(&parts.headers) {
                    return Err(Error::RateLimit(reset));
                }
            }
            return Err(TwitterError(parts.headers, errors));
        }
        _ => (),
    }

    if !parts.status.is_success() {
        return Err(BadStatus(parts.status));
    }

    Ok((parts.headers, body))
}

/// Sends the given request and deserializes the JSON body into the requested type, alongside the
/// rate-limit information from the response headers.
pub async fn request_with_json_response<T: DeserializeOwned>(
    transport: &dyn Transport,
    request: Request<Body>,
) -> Result<Response<T>> {
    let (headers, body) = raw_request(transport, request).await?;
    let response = serde_json::from_slice(&body)?;
    let rate_limit_status = RateLimit::try_from(&headers)?;
    Ok(Response {
        rate_limit_status,
        response,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::MockTransport;
    use hyper::StatusCode;

    fn request() -> Request<Body> {
        Request::get("https://api.twitter.com/1.1/friendships/show.json")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn api_errors_beat_bad_status() {
        let transport = MockTransport::new().respond(
            StatusCode::NOT_FOUND,
            r#"{"errors":[{"message":"User not found.","code":50}]}"#,
        );

        match raw_request(&transport, request()).await {
            Err(TwitterError(_, errs)) => assert!(errs.has_code(50)),
            other => panic!("expected TwitterError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn api_errors_on_success_status() {
        let transport = MockTransport::new().respond(
            StatusCode::OK,
            r#"{"errors":[{"message":"Internal error","code":131}]}"#,
        );

        match raw_request(&transport, request()).await {
            Err(TwitterError(_, errs)) => assert_eq!(errs.errors[0].message, "Internal error"),
            other => panic!("expected TwitterError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn bad_status_without_error_body() {
        let transport = MockTransport::new().respond(StatusCode::BAD_GATEWAY, "<html></html>");

        match raw_request(&transport, request()).await {
            Err(BadStatus(status)) => assert_eq!(status, StatusCode::BAD_GATEWAY),
            other => panic!("expected BadStatus, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn rate_limit_with_reset_header() {
        let transport = MockTransport::new().respond_with_headers(
            StatusCode::TOO_MANY_REQUESTS,
            &[(X_RATE_LIMIT_RESET, "1500000000")],
            r#"{"errors":[{"message":"Rate limit exceeded","code":88}]}"#,
        );

        match raw_request(&transport, request()).await {
            Err(Error::RateLimit(reset)) => assert_eq!(reset, 1500000000),
            other => panic!("expected RateLimit, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn rate_limit_without_reset_header() {
        let transport = MockTransport::new().respond(
            StatusCode::TOO_MANY_REQUESTS,
            r#"{"errors":[{"message":"Rate limit exceeded","code":88}]}"#,
        );

        match raw_request(&transport, request()).await {
            Err(TwitterError(_, errs)) => assert!(errs.has_code(88)),
            other => panic!("expected TwitterError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn rate_limit_with_garbled_reset_header() {
        let transport = MockTransport::new().respond_with_headers(
            StatusCode::TOO_MANY_REQUESTS,
            &[(X_RATE_LIMIT_RESET, "soon")],
            r#"{"errors":[{"message":"Rate limit exceeded","code":88}]}"#,
        );

        match raw_request(&transport, request()).await {
            Err(TwitterError(_, errs)) => {
                assert!(errs.has_code(88));
                assert_eq!(errs.errors[0].message, "Rate limit exceeded");
            }
            other => panic!("expected TwitterError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn empty_error_list_falls_back_to_status() {
        let transport = MockTransport::new().respond(StatusCode::FORBIDDEN, r#"{"errors":[]}"#);

        match raw_request(&transport, request()).await {
            Err(BadStatus(status)) => assert_eq!(status, StatusCode::FORBIDDEN),
            other => panic!("expected BadStatus, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn empty_error_list_on_success_is_not_an_error() {
        let transport = MockTransport::new().respond(StatusCode::OK, r#"{"errors":[]}"#);

        let (_, body) = raw_request(&transport, request()).await.unwrap();
        assert_eq!(body, br#"{"errors":[]}"#.to_vec());
    }

    #[tokio::test]
    async fn json_response_carries_rate_limit() {
        let transport = MockTransport::new().respond_with_headers(
            StatusCode::OK,
            &[
                (X_RATE_LIMIT_LIMIT, "180"),
                (X_RATE_LIMIT_REMAINING, "179"),
                (X_RATE_LIMIT_RESET, "1500000000"),
            ],
            "[1,2,3]",
        );

        let resp = request_with_json_response::<Vec<u64>>(&transport, request())
            .await
            .unwrap();

        assert_eq!(resp.response, vec![1, 2, 3]);
        assert_eq!(resp.rate_limit_status.limit, 180);
        assert_eq!(resp.rate_limit_status.remaining, 179);
        assert_eq!(resp.len(), 3);
    }

    #[tokio::test]
    async fn missing_rate_limit_headers() {
        let transport = MockTransport::new().respond(StatusCode::OK, "[]");

        let resp = request_with_json_response::<Vec<u64>>(&transport, request())
            .await
            .unwrap();

        assert_eq!(
            resp.rate_limit_status,
            RateLimit {
                limit: -1,
                remaining: -1,
                reset: -1
            }
        );
    }

    #[tokio::test]
    async fn shape_mismatch_is_deserialize_error() {
        let transport = MockTransport::new().respond(StatusCode::OK, r#"{"ids":[]}"#);

        match request_with_json_response::<Vec<u64>>(&transport, request()).await {
            Err(Error::DeserializeError(_)) => (),
            other => panic!("expected DeserializeError, got {:?}", other),
        }
    }
}
