// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Credentials used to sign requests to Twitter.
//!
//! Every call in this library is signed with a `Token`. There are two kinds:
//!
//! - `Token::Access` pairs your application's consumer key with an access token for a specific
//!   user. Requests are signed with OAuth 1.0a, and act on behalf of that user. Calls that change
//!   the user's follows (`friendship::create`, `friendship::destroy`, `friendship::update`) or look
//!   at the user's own relations (`incoming`, `outgoing`, `lookup`, `no_retweets`) need this kind.
//! - `Token::Bearer` is an application-only token. It can only be used for calls that don't
//!   involve a "current user", like `friendship::show`.
//!
//! Acquiring these tokens is outside the scope of this library. Generate them in Twitter's
//! developer portal, or run the OAuth flow with another tool and hand the results in here.

pub(crate) mod raw;

pub use self::raw::{get, post};

use crate::common::CowStr;

/// A key/secret pair representing an OAuth token.
///
/// This struct is used as part of the authentication process. You'll need to manually create at
/// least one of these, to hold onto your consumer token.
///
/// ## Example
///
/// ```rust
/// let con_token = twitter_friendships::KeyPair::new("consumer key", "consumer token");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPair {
    /// A key used to identify an application or user.
    pub key: CowStr,
    /// A private key used to sign messages from an application or user.
    pub secret: CowStr,
}

impl KeyPair {
    /// Creates a KeyPair with the given key and secret.
    ///
    /// This can be called with either `&'static str` (a string literal) or `String` for either
    /// parameter.
    pub fn new<K, S>(key: K, secret: S) -> KeyPair
    where
        K: Into<CowStr>,
        S: Into<CowStr>,
    {
        KeyPair {
            key: key.into(),
            secret: secret.into(),
        }
    }
}

/// A token that can be used to sign requests to Twitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// An OAuth Access token indicating the request is coming from a specific user.
    Access {
        /// A "consumer" key/secret that represents the application sending the request.
        consumer: KeyPair,
        /// An "access" key/secret that represents the user's authorization of the application.
        access: KeyPair,
    },
    /// An OAuth Bearer token indicating the request is coming from the application itself, not a
    /// particular user.
    Bearer(String),
}
