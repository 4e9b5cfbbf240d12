// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Types and traits to navigate cursored collections.
//!
//! Much of this module can be considered an implementation detail; the main intended entry point
//! to this code is `CursorIter`, and that can just be used as a stream to ignore the rest of this
//! module. The rest of it is available to make sure consumers of the API can understand precisely
//! what types come out of functions that return `CursorIter`.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use serde::{de::DeserializeOwned, Deserialize};

use crate::client::Client;
use crate::common::*;
use crate::error::Result;

/// Trait to generalize over paginated views of API results.
///
/// Types that implement Cursor are used as intermediate steps in [`CursorIter`][]'s Stream
/// implementation, to properly load the data from Twitter. Most of the time you don't need to deal
/// with Cursor structs directly, but you can get them via `CursorIter`'s manual paging
/// functionality.
///
/// [`CursorIter`]: struct.CursorIter.html
pub trait Cursor {
    /// What type is being returned by the API call?
    type Item;

    /// Returns a numeric reference to the previous page of results.
    fn previous_cursor_id(&self) -> i64;
    /// Returns a numeric reference to the next page of results.
    fn next_cursor_id(&self) -> i64;
    /// Unwraps the cursor, returning the collection of results from inside.
    fn into_inner(self) -> Vec<Self::Item>;
}

/// Represents a single-page view into a list of IDs.
///
/// This type is intended to be used in the background by [`CursorIter`][] to hold an intermediate
/// list of IDs to iterate over. See that struct's documentation for details.
///
/// [`CursorIter`]: struct.CursorIter.html
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IDCursor {
    /// Numeric reference to the previous page of results.
    pub previous_cursor: i64,
    /// Numeric reference to the next page of results.
    pub next_cursor: i64,
    /// The list of user IDs in this page of results.
    pub ids: Vec<u64>,
}

impl Cursor for IDCursor {
    type Item = u64;

    fn previous_cursor_id(&self) -> i64 {
        self.previous_cursor
    }

    fn next_cursor_id(&self) -> i64 {
        self.next_cursor
    }

    fn into_inner(self) -> Vec<Self::Item> {
        self.ids
    }
}

/// Represents a paginated list of results, such as the users who have asked to follow the
/// authenticated user.
///
/// This struct is given by several methods in this library, whenever Twitter would return a
/// cursored list of items. It implements the `Stream` trait, loading items in batches so that
/// several can be immedately returned whenever a single network call completes.
///
/// ```rust,no_run
/// # use twitter_friendships::Client;
/// use futures::StreamExt;
///
/// # #[tokio::main]
/// # async fn main() {
/// # let client: Client = unimplemented!();
/// twitter_friendships::friendship::incoming(&client).take(10).for_each(|resp| {
///     println!("{}", resp.unwrap().response);
///     futures::future::ready(())
/// }).await;
/// # }
/// ```
///
/// You can even collect the results, letting you get one set of rate-limit information for the
/// entire search setup:
///
/// ```rust,no_run
/// # use twitter_friendships::Client;
/// # #[tokio::main]
/// # async fn main() {
/// # let client: Client = unimplemented!();
/// use futures::TryStreamExt;
///
/// let ids: Vec<u64> = twitter_friendships::friendship::incoming(&client)
///     .map_ok(|r| r.response)
///     .try_collect()
///     .await
///     .unwrap();
/// # }
/// ```
///
/// The `Stream` implementation yields `Response<T::Item>` on a successful iteration, and `Error`
/// for errors, so network errors, rate-limit errors and other issues are passed directly through.
/// The `Stream` implementation will allow you to poll again after an error to re-initiate the late
/// network call; this way, you can wait for your network connection to return or for your rate
/// limit to refresh and try again with the same state.
///
/// ## Manual paging
///
/// The `Stream` implementation works by loading in a page of results when it's polled, and serving
/// the individual elements from that locally-cached page until it runs out. If you'd rather know
/// exactly when a network call happens, use the `call()` method to load the cursor struct
/// directly. The cursor values are opaque, so hand them back exactly as Twitter gave them:
///
/// ```rust,no_run
/// # use twitter_friendships::Client;
/// # #[tokio::main]
/// # async fn main() {
/// # let client: Client = unimplemented!();
/// let mut pending = twitter_friendships::friendship::outgoing(&client);
/// let resp = pending.call().await.unwrap();
///
/// for id in &resp.response.ids {
///     println!("{}", id);
/// }
///
/// pending = pending.with_cursor(resp.response.next_cursor);
/// let resp = pending.call().await.unwrap();
///
/// for id in &resp.response.ids {
///     println!("{}", id);
/// }
/// # }
/// ```
#[must_use = "cursor iterators are lazy and do nothing unless consumed"]
pub struct CursorIter<T>
where
    T: Cursor + DeserializeOwned,
{
    link: &'static str,
    client: Client,
    params_base: Option<ParamList>,
    /// Numeric reference to the previous page of results. A value of zero indicates that the
    /// current page of results is the first page of the cursor.
    ///
    /// This value is intended to be automatically set and used as part of this struct's Stream
    /// implementation. It is made available for those who wish to manually manage network calls
    /// and pagination.
    pub previous_cursor: i64,
    /// Numeric reference to the next page of results. A value of zero indicates that the current
    /// page of results is the last page of the cursor. The initial value of `-1` loads the first
    /// page. Neither `-1` nor `0` is sent to Twitter as a `cursor` parameter.
    ///
    /// This value is intended to be automatically set and used as part of this struct's Stream
    /// implementation. It is made available for those who wish to manually manage network calls
    /// and pagination.
    pub next_cursor: i64,
    loader: Option<FutureResponse<T>>,
    iter: Option<ResponseIter<T::Item>>,
}

impl<T> CursorIter<T>
where
    T: Cursor + DeserializeOwned + Send + 'static,
{
    /// Sets the cursor for the next page to load, as given by a previous page's `next_cursor` or
    /// `previous_cursor`.
    ///
    /// Calling this function will invalidate any current results, if any were previously loaded.
    pub fn with_cursor(self, cursor: i64) -> CursorIter<T> {
        CursorIter {
            next_cursor: cursor,
            loader: None,
            iter: None,
            ..self
        }
    }

    /// Loads the next page of results.
    ///
    /// This is intended to be used as part of this struct's Stream implementation. It is provided
    /// as a convenience for those who wish to manage network calls and pagination manually.
    pub fn call(&self) -> impl Future<Output = Result<Response<T>>> {
        let params = self
            .params_base
            .clone()
            .unwrap_or_default()
            .add_opt_param(
                "cursor",
                Some(self.next_cursor)
                    .filter(|&c| c != -1 && c != 0)
                    .map_string(),
            );
        let client = self.client.clone();
        let link = self.link;

        async move {
            let req = get(&client.url(link), client.token(), Some(&params))?;
            request_with_json_response(client.transport(), req).await
        }
    }

    /// Creates a new instance of CursorIter, with the given parameters and empty initial results.
    ///
    /// This is essentially an internal infrastructure function, not meant to be used from consumer
    /// code.
    pub(crate) fn new(
        link: &'static str,
        client: &Client,
        params_base: Option<ParamList>,
    ) -> CursorIter<T> {
        CursorIter {
            link,
            client: client.clone(),
            params_base,
            previous_cursor: -1,
            next_cursor: -1,
            loader: None,
            iter: None,
        }
    }
}

impl<T> Stream for CursorIter<T>
where
    T: Cursor + DeserializeOwned + Send + 'static,
    T::Item: Unpin,
{
    type Item = Result<Response<T::Item>>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        if let Some(mut fut) = this.loader.take() {
            match fut.as_mut().poll(cx) {
                Poll::Pending => {
                    this.loader = Some(fut);
                    return Poll::Pending;
                }
                Poll::Ready(Ok(resp)) => {
                    this.previous_cursor = resp.previous_cursor_id();
                    this.next_cursor = resp.next_cursor_id();

                    let resp = Response::map(resp, |r| r.into_inner());

                    let mut iter = resp.into_iter();
                    let first = iter.next();
                    this.iter = Some(iter);

                    match first {
                        Some(item) => return Poll::Ready(Some(Ok(item))),
                        None if this.next_cursor == 0 => return Poll::Ready(None),
                        // an empty page that still points onward; keep loading
                        None => (),
                    }
                }
                Poll::Ready(Err(e)) => return Poll::Ready(Some(Err(e))),
            }
        }

        if let Some(ref mut results) = this.iter {
            if let Some(item) = results.next() {
                return Poll::Ready(Some(Ok(item)));
            } else if this.next_cursor == 0 {
                return Poll::Ready(None);
            }
        }

        this.loader = Some(Box::pin(this.call()));
        Pin::new(this).poll_next(cx)
    }
}
