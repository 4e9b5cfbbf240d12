// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use serde::Deserialize;

use crate::client::Client;
use crate::common::*;
use crate::cursor::{CursorIter, IDCursor};
use crate::error::Result;
use crate::user::{TwitterUser, UserID};
use crate::links;

use super::{LookupParams, RelationLookup, Relationship};

#[derive(Deserialize)]
struct RelationshipResponse {
    relationship: Relationship,
}

//---Groups of users---

/// Lookup the relations between the authenticated user and the given accounts.
///
/// Twitter only allows 100 accounts per call. The accounts are counted after `LookupParams` has
/// been normalized, so comma-joined screen names count once per name. If there are more than 100,
/// this returns `Error::InvalidRequest` with code 200 without sending anything.
pub async fn lookup(
    params: &LookupParams,
    client: &Client,
) -> Result<Response<Vec<RelationLookup>>> {
    let users = params.normalize()?;

    let req = get(
        &client.url(links::friendships::LOOKUP),
        client.token(),
        Some(&users.to_params()),
    )?;

    request_with_json_response(client.transport(), req).await
}

/// Lookup the relations between the authenticated user and the given accounts, given as anything
/// that converts into `UserID`.
///
/// This collects the accounts into a `LookupParams` and calls `lookup`; the same 100-account limit
/// applies.
pub async fn lookup_users<T, I>(accts: I, client: &Client) -> Result<Response<Vec<RelationLookup>>>
where
    T: Into<UserID>,
    I: IntoIterator<Item = T>,
{
    let params = accts.into_iter().collect::<LookupParams>();
    lookup(&params, client).await
}

//---Cursored collections---

/// Lookup the user IDs with pending follow requests to the authenticated user.
///
/// This function is only really relevant if the authenticated user is protected. Otherwise, the
/// first page of results will be empty and the stream ends right away.
pub fn incoming(client: &Client) -> CursorIter<IDCursor> {
    CursorIter::new(links::friendships::INCOMING, client, None)
}

/// Lookup the user IDs with pending follow requests from the authenticated user.
pub fn outgoing(client: &Client) -> CursorIter<IDCursor> {
    CursorIter::new(links::friendships::OUTGOING, client, None)
}

//---Relationship information---

/// Lookup relationship settings between two arbitrary users.
///
/// Settings like notifications, retweets and blocking are only returned when `source` is the
/// authenticated user; otherwise they come back as `None`.
pub async fn show<F, T>(source: F, target: T, client: &Client) -> Result<Response<Relationship>>
where
    F: Into<UserID>,
    T: Into<UserID>,
{
    let params = ParamList::new()
        .add_prefixed_user_param("source", source.into())
        .add_prefixed_user_param("target", target.into());

    let req = get(&client.url(links::friendships::SHOW), client.token(), Some(&params))?;

    let resp = request_with_json_response::<RelationshipResponse>(client.transport(), req).await?;
    Ok(Response::map(resp, |r| r.relationship))
}

/// Lookup the user IDs that the authenticated user has disabled retweets from.
///
/// Use `update` to enable/disable viewing retweets from a specific user.
pub async fn no_retweets(client: &Client) -> Result<Response<Vec<u64>>> {
    let params = ParamList::new().add_param("stringify_ids", "false");

    let req = get(
        &client.url(links::friendships::NO_RETWEETS),
        client.token(),
        Some(&params),
    )?;

    request_with_json_response(client.transport(), req).await
}

//---Controlling relationships---

/// Follow the given account with the authenticated user, and set whether device notifications
/// should be enabled.
///
/// Upon success, the future returned by this function yields the user that was just followed,
/// even when following a protected account. In the latter case, this indicates that the follow
/// request was successfully sent.
///
/// Calling this with an account the user already follows may return an error, or ("for performance
/// reasons") may return success without changing any account settings.
///
/// If `follow` is `None`, no device-notification preference is sent and Twitter's default is used.
pub async fn create<T: Into<UserID>>(
    acct: T,
    follow: Option<bool>,
    client: &Client,
) -> Result<Response<TwitterUser>> {
    let params = ParamList::new()
        .add_user_param(acct.into())
        .add_opt_param("follow", follow.map_string());

    let req = post(&client.url(links::friendships::CREATE), client.token(), Some(&params))?;

    request_with_json_response(client.transport(), req).await
}

/// Unfollow the given account with the authenticated user.
///
/// Upon success, the future returned by this function yields the user that was just unfollowed.
///
/// Calling this with an account the user doesn't follow will return success, even though it
/// doesn't change any settings.
pub async fn destroy<T: Into<UserID>>(acct: T, client: &Client) -> Result<Response<TwitterUser>> {
    let params = ParamList::new().add_user_param(acct.into());

    let req = post(&client.url(links::friendships::DESTROY), client.token(), Some(&params))?;

    request_with_json_response(client.transport(), req).await
}

/// Update notification settings and retweet visibility for the given user.
///
/// Calling this for an account the authenticated user does not already follow will not cause them
/// to follow that user. Settings given as `None` are left unchanged.
pub async fn update<T: Into<UserID>>(
    acct: T,
    notifications: Option<bool>,
    retweets: Option<bool>,
    client: &Client,
) -> Result<Response<Relationship>> {
    let params = ParamList::new()
        .add_user_param(acct.into())
        .add_opt_param("device", notifications.map_string())
        .add_opt_param("retweets", retweets.map_string());

    let req = post(&client.url(links::friendships::UPDATE), client.token(), Some(&params))?;

    let resp = request_with_json_response::<RelationshipResponse>(client.transport(), req).await?;
    Ok(Response::map(resp, |r| r.relationship))
}
