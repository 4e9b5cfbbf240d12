// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Ways to refer to a Twitter user, and the user profile returned by follow actions.
//!
//! - `UserID`: used as a generic input to every function in `friendship` that names a single
//!   account, this enum allows you to refer to a user by a numeric ID or by their screen name.
//! - `TwitterUser`: returned by `friendship::create` and `friendship::destroy`, describing the
//!   account that was just followed or unfollowed.

use serde::Deserialize;

use crate::common::*;

/// Convenience enum to generalize between referring to an account by numeric ID or by screen name.
///
/// Many API calls ask for a user either by either screen name (e.g. `rustlang`) or by a numeric ID
/// assigned to the account (e.g. `165262228`). In this library, these calls are abstracted around
/// this enum, and can take any type that converts into it. This enum has `From` implementations for
/// the following types:
///
/// * `u64`
/// * `&u64` (convenient when used with iterators)
/// * `&str`
/// * `String`
/// * `&String` (to counteract the fact that deref coercion doesn't work with generics)
/// * `&UserID` (convenient when used with iterators)
///
/// This way, when a function has a parameter of type `T: Into<UserID>`, you can call it with any of
/// these types, and it will be converted automatically. The proper parameter is then used when
/// performing the call to Twitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserID {
    /// Referring via the account's numeric ID.
    ID(u64),
    /// Referring via the account's screen name.
    ScreenName(CowStr),
}

impl From<u64> for UserID {
    fn from(id: u64) -> UserID {
        UserID::ID(id)
    }
}

impl<'a> From<&'a u64> for UserID {
    fn from(id: &'a u64) -> UserID {
        UserID::ID(*id)
    }
}

impl<'a> From<&'a str> for UserID {
    fn from(name: &'a str) -> UserID {
        UserID::ScreenName(name.to_string().into())
    }
}

impl From<String> for UserID {
    fn from(name: String) -> UserID {
        UserID::ScreenName(name.into())
    }
}

impl<'a> From<&'a String> for UserID {
    fn from(name: &'a String) -> UserID {
        UserID::ScreenName(name.clone().into())
    }
}

impl<'a> From<&'a UserID> for UserID {
    fn from(id: &'a UserID) -> UserID {
        id.clone()
    }
}

/// Represents a Twitter user.
///
/// Field-level documentation is mostly ripped wholesale from [Twitter's user
/// documentation][api-user].
///
/// [api-user]: https://dev.twitter.com/overview/api/users
///
/// The fields present in this struct can be divided up into a few sections: Profile Information and
/// Settings, and "perspectival" fields that describe the account from the point of view of the
/// authenticated user.
///
/// Twitter is in the process of removing the perspectival fields from user objects, so they're
/// all optional here. Use `friendship::show` or `friendship::lookup` for a reliable view of how
/// two accounts relate.
#[derive(Debug, Clone, Deserialize)]
pub struct TwitterUser {
    /// Unique identifier for this user.
    pub id: u64,
    /// The screen name or handle identifying this user.
    ///
    /// Screen names are unique per-user but can be changed. Use `id` for an immutable identifier
    /// for an account.
    pub screen_name: String,
    /// The user-entered display name.
    pub name: String,
    /// The UTC timestamp for when this user account was created on Twitter.
    #[serde(deserialize_with = "deserialize_datetime")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// The user-defined string describing their account.
    pub description: Option<String>,
    /// The user-entered location field from their profile. Not necessarily parseable
    /// or even a location.
    pub location: Option<String>,
    /// The website link given by this user in their profile.
    pub url: Option<String>,
    /// Indicates whether the user is a [protected][] account.
    ///
    /// Following a protected account sends a follow request instead of following it directly.
    ///
    /// [protected]: https://support.twitter.com/articles/14016
    pub protected: bool,
    /// Indicates whether this user is a verified account.
    pub verified: bool,
    /// The number of followers this account has.
    ///
    /// In certain server-stress conditions, this may temporarily mistakenly return 0.
    pub followers_count: i32,
    /// The number of users this account follows, aka its "followings".
    ///
    /// In certain server-stress conditions, this may temporarily mistakenly return 0.
    pub friends_count: i32,
    /// The number of public lists the user is a member of.
    #[serde(default)]
    pub listed_count: i32,
    /// The number of tweets this user has favorited or liked in the account's lifetime.
    #[serde(default)]
    pub favourites_count: i32,
    /// The number of tweets (including retweets) posted by this user.
    pub statuses_count: i32,
    /// A URL pointing to the user's avatar image. Uses HTTPS as the protocol.
    #[serde(default)]
    pub profile_image_url_https: Option<String>,
    /// Indicates whether the authenticated user is following this account.
    #[serde(default)]
    pub following: Option<bool>,
    /// When true, indicates that the authenticating user has issued a follow request to
    /// this protected account.
    #[serde(default)]
    pub follow_request_sent: Option<bool>,
    /// Indicates whether the authenticated user has chosen to receive this user's tweets
    /// by SMS.
    #[serde(default)]
    pub notifications: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::tests::load_file;

    #[test]
    fn user_id_conversions() {
        let name = String::from("rustlang");
        let id: u64 = 165262228;

        assert_eq!(UserID::from(id), UserID::ID(165262228));
        assert_eq!(UserID::from(&id), UserID::ID(165262228));
        assert_eq!(UserID::from("rustlang"), UserID::ScreenName("rustlang".into()));
        assert_eq!(UserID::from(&name), UserID::ScreenName("rustlang".into()));
        assert_eq!(UserID::from(name), UserID::ScreenName("rustlang".into()));
    }

    #[test]
    fn parse_user() {
        let user: TwitterUser =
            serde_json::from_str(&load_file("sample_payloads/user.json")).unwrap();

        assert_eq!(user.id, 165262228);
        assert_eq!(user.screen_name, "rustlang");
        assert_eq!(user.name, "Rust Language");
        assert_eq!(user.created_at.timestamp(), 1276545829);
        assert!(!user.protected);
        assert_eq!(user.following, Some(true));
        assert_eq!(user.follow_request_sent, Some(false));
        assert_eq!(user.notifications, None);
        assert_eq!(user.url.as_deref(), Some("https://t.co/Q5tOYDuZrm"));
    }
}
