// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A composite error type for errors that can occur while interacting with Twitter.
//!
//! Any action that crosses the network to call Twitter has many places where it can go wrong.
//! Whether it's a bad network connection, a revoked authorization token, a deleted account, or
//! simply asking for more users than an endpoint accepts, the `Error` enum in this module collects
//! all of them into one place.
//!
//! There are two variants that carry Twitter's own `{message, code}` error shape:
//! `InvalidRequest`, which this library raises itself before sending anything, and
//! `TwitterError`, which means the request reached Twitter and was rejected there. Use
//! `Error::twitter_errors` if you want to look at the codes without caring which side raised them.

use std::fmt;

use serde::Deserialize;

use crate::common::Headers;

/// Convenient alias to a Result containing a local Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Represents a collection of errors returned from a Twitter API call.
///
/// This is returned as part of [`Error::TwitterError`][] whenever Twitter has rejected a call.
///
/// [`Error::TwitterError`]: enum.Error.html
#[derive(Debug, Clone, PartialEq, Deserialize, thiserror::Error)]
pub struct TwitterErrors {
    /// A collection of errors returned by Twitter.
    pub errors: Vec<TwitterErrorCode>,
}

impl TwitterErrors {
    /// Creates a collection holding a single error.
    pub fn single(code: i32, message: impl Into<String>) -> TwitterErrors {
        TwitterErrors {
            errors: vec![TwitterErrorCode {
                message: message.into(),
                code,
            }],
        }
    }

    /// Returns whether any error in this collection has the given code.
    pub fn has_code(&self, code: i32) -> bool {
        self.errors.iter().any(|e| e.code == code)
    }
}

impl fmt::Display for TwitterErrors {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut first = true;
        for e in &self.errors {
            if first {
                first = false;
            } else {
                writeln!(f, ",")?;
            }

            write!(f, "{}", e)?;
        }

        Ok(())
    }
}

/// Represents a specific error returned from a Twitter API call.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TwitterErrorCode {
    /// The error message returned by Twitter.
    pub message: String,
    /// The numeric error code returned by Twitter. A list of possible error codes can be found in
    /// the [API documentation][error-codes].
    ///
    /// [error-codes]: https://developer.twitter.com/en/docs/basics/response-codes
    pub code: i32,
}

impl fmt::Display for TwitterErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}: {}", self.code, self.message)
    }
}

/// A set of errors that can occur when interacting with Twitter.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request was rejected locally, before anything was sent to Twitter. The enclosed
    /// `TwitterErrors` mirror the shape Twitter uses for its own errors, so the codes can be
    /// matched the same way.
    #[error("Request rejected before sending: {}", _0)]
    InvalidRequest(TwitterErrors),
    /// The response from Twitter returned an error structure instead of the expected response. The
    /// enclosed value was the response from Twitter.
    #[error("Errors returned by Twitter: {}", _1)]
    TwitterError(Headers, TwitterErrors),
    /// The response returned from Twitter contained an error indicating that the rate limit for
    /// that method has been reached. The enclosed value is the Unix timestamp in UTC when the next
    /// rate-limit window will open.
    #[error("Rate limit reached, hold until {}", _0)]
    RateLimit(i32),
    /// The response from Twitter gave a response code that indicated an error. The enclosed value
    /// was the response code.
    ///
    /// This is only returned if Twitter did not also return an error structure in the body; those
    /// come back as `TwitterError` instead.
    #[error("Error status received: {}", _0)]
    BadStatus(hyper::StatusCode),
    /// The web request experienced an error. The enclosed error was returned from hyper.
    #[error("Network error: {}", _0)]
    NetError(#[from] hyper::Error),
    /// The request could not be assembled. The enclosed error was returned from the `http` crate.
    #[error("Error building request: {}", _0)]
    RequestBuildError(#[from] hyper::http::Error),
    /// An error occurred while loading the JSON response. The enclosed error was returned from
    /// `serde_json`.
    #[error("JSON deserialize error: {}", _0)]
    DeserializeError(#[from] serde_json::Error),
    /// An error occurred when reading the value from a response header. The enclosed error was
    /// returned from hyper.
    ///
    /// This error should be considerably rare, but is included to ensure that this library doesn't
    /// panic if it receives malformed headers or the like.
    #[error("Error parsing headers: {}", _0)]
    HeaderParseError(#[from] hyper::header::ToStrError),
    /// An error occurred when converting a rate-limit header to an integer. The enclosed error was
    /// returned from the standard library.
    ///
    /// This error should be considerably rare, but is included to ensure that this library doesn't
    /// panic if it receives malformed headers or the like.
    #[error("Error parsing headers: {}", _0)]
    HeaderConvertError(#[from] std::num::ParseIntError),
}

impl Error {
    /// Returns the `{message, code}` errors carried by this error, whether they were raised
    /// locally (`InvalidRequest`) or returned by Twitter (`TwitterError`).
    pub fn twitter_errors(&self) -> Option<&TwitterErrors> {
        match self {
            Error::InvalidRequest(errs) => Some(errs),
            Error::TwitterError(_, errs) => Some(errs),
            _ => None,
        }
    }
}
