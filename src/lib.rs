// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A library for following accounts and inspecting follow relationships on Twitter.
//!
//! This library covers the `friendships/*` family of Twitter's v1.1 REST API. It signs requests
//! with a `Token` you already have, sends them through a `Client`, and hands back typed results
//! along with the rate-limit information Twitter sent with them.
//!
//! ## Getting started
//!
//! Every call takes a `Client`, which pairs a `Token` with the HTTPS connection used to reach
//! Twitter:
//!
//! ```rust,no_run
//! # #[tokio::main]
//! # async fn main() {
//! use twitter_friendships::{Client, KeyPair, Token};
//!
//! let consumer = KeyPair::new("consumer key", "consumer secret");
//! let access = KeyPair::new("access token key", "access token secret");
//! let client = Client::new(Token::Access { consumer, access });
//!
//! let rel = twitter_friendships::friendship::show("rustlang", "ThisWeekInRust", &client)
//!     .await
//!     .unwrap();
//! println!("rustlang follows ThisWeekInRust: {}", rel.source.following);
//! # }
//! ```
//!
//! The `friendship` module holds every call, and its documentation has a summary of each. Calls
//! that return a single page yield a `Response<T>`, which derefs to `T` and carries a
//! `RateLimit`. Calls over cursored lists return a `CursorIter`, which implements `Stream`.
//!
//! ## Batch lookups
//!
//! `friendship::lookup` asks about up to 100 accounts at once. Accounts can be named by ID or
//! screen name, singly or in lists, and all of them are merged before the request goes out:
//!
//! ```rust,no_run
//! # #[tokio::main]
//! # async fn main() {
//! # let client: twitter_friendships::Client = unimplemented!();
//! use twitter_friendships::friendship::{self, Connection, LookupParams};
//!
//! let params = LookupParams::new()
//!     .screen_names(vec!["rustlang", "ThisWeekInRust"])
//!     .user_id(165262228);
//!
//! for rel in friendship::lookup(&params, &client).await.unwrap().iter() {
//!     if rel.has(Connection::FollowedBy) {
//!         println!("{} follows you", rel.screen_name);
//!     }
//! }
//! # }
//! ```
//!
//! Asking about more than 100 accounts fails with `Error::InvalidRequest` before anything is
//! sent.
//!
//! ## Logging
//!
//! This library emits events through `tracing`. Outgoing requests and the status of their
//! responses are logged at `debug`, and rate-limit header parsing at `trace`. Install any
//! `tracing` subscriber to see them.
//!
//! ## TLS
//!
//! By default, HTTPS goes through `native-tls`. Turn off default features and enable `rustls`
//! (platform root certificates) or `rustls_webpki` (bundled root certificates) to use `rustls`
//! instead. To send requests some other way entirely, implement `Transport` and hand it to
//! `Client::with_transport`.

#![warn(missing_docs)]
#![warn(unused_extern_crates)]
#![warn(unused_qualifications)]

pub mod auth;
mod client;
mod common;
pub mod cursor;
pub mod error;
pub mod friendship;
mod links;
pub mod user;

pub use crate::auth::{KeyPair, Token};
pub use crate::client::{Client, HttpsTransport, Transport};
pub use crate::common::{ParamList, RateLimit, Response, ResponseIter};
