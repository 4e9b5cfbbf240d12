// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Structs and methods for following, unfollowing, and inspecting relationships between accounts.
//!
//! ## Types
//!
//! - `Relationship`/`RelationSource`/`RelationTarget`: returned by `show` and `update`, these
//!   describe how two accounts relate to each other, from the point of view of each.
//! - `RelationLookup`/`Connection`: returned by `lookup`, these give a compact list of connection
//!   tags between the authenticated user and each account asked about.
//! - `LookupParams`/`UserIdentifierSet`: the input to `lookup`, and the normalized form it's turned
//!   into before anything is sent to Twitter.
//!
//! ## Functions
//!
//! ### Actions
//!
//! - `create`/`destroy`: follow or unfollow an account.
//! - `update`: change device notification and retweet settings for an account you follow.
//!
//! ### Lookup
//!
//! - `show`: the full relationship between any two accounts.
//! - `lookup`/`lookup_users`: connection tags for up to 100 accounts at once.
//!
//! ### Cursored lists
//!
//! - `incoming`: IDs of accounts with pending follow requests to the authenticated user.
//! - `outgoing`: IDs of protected accounts the authenticated user has asked to follow.
//!
//! ### Other
//!
//! - `no_retweets`: IDs of accounts whose retweets the authenticated user has muted.

use serde::Deserialize;

mod fun;
mod lookup;

pub use self::fun::*;
pub use self::lookup::*;

/// Represents relationship settings between two Twitter accounts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Relationship {
    /// Contains settings from the perspective of the "source" account.
    ///
    /// This includes settings like notifications, retweets, and blocking, which are only visible
    /// to the source account when it's also the authenticated user. For any other source, those
    /// fields come back as `None`.
    pub source: RelationSource,
    /// Contains settings from the perspective of the "target" account.
    pub target: RelationTarget,
}

/// Represents relationship settings between two Twitter accounts, from the perspective of the
/// source user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RelationSource {
    /// Numeric ID for this account.
    pub id: u64,
    /// The same ID as `id`, as a string.
    #[serde(default)]
    pub id_str: String,
    /// Screen name for this account.
    pub screen_name: String,
    /// Indicates whether this account follows the target account.
    pub following: bool,
    /// Indicates whether this account is followed by the target account.
    pub followed_by: bool,
    /// Indicates whether this account can send a direct message to the target account.
    #[serde(default)]
    pub can_dm: bool,
    /// Indicates whether this account has blocked the target account.
    #[serde(default)]
    pub blocking: Option<bool>,
    /// Indicates whether this account has been blocked by the target account.
    #[serde(default)]
    pub blocked_by: Option<bool>,
    /// Indicates whether this account has muted the target account.
    #[serde(default)]
    pub muting: Option<bool>,
    /// Indicates whether this account has chosen to receive all replies from the target account.
    #[serde(default)]
    pub all_replies: Option<bool>,
    /// Indicates whether this account has chosen to see retweets from the target account.
    #[serde(default)]
    pub want_retweets: Option<bool>,
    /// Indicates whether this account has reported the target account as spam.
    #[serde(default)]
    pub marked_spam: Option<bool>,
    /// Indicates whether this account has chosen to receive device notifications for the target
    /// account's tweets.
    #[serde(default)]
    pub notifications_enabled: Option<bool>,
    /// Indicates whether the target account has a pending follow request to this account.
    #[serde(default)]
    pub following_received: Option<bool>,
    /// Indicates whether this account has a pending follow request to the target account.
    #[serde(default)]
    pub following_requested: Option<bool>,
}

/// Represents relationship settings between two Twitter accounts, from the perspective of the
/// target user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RelationTarget {
    /// Numeric ID for this account.
    pub id: u64,
    /// The same ID as `id`, as a string.
    #[serde(default)]
    pub id_str: String,
    /// Screen name for this account.
    pub screen_name: String,
    /// Indicates whether this account follows the source account.
    pub following: bool,
    /// Indicates whether this account is followed by the source account.
    pub followed_by: bool,
    /// Indicates whether the source account has a pending follow request to this account.
    #[serde(default)]
    pub following_received: Option<bool>,
    /// Indicates whether this account has a pending follow request to the source account.
    #[serde(default)]
    pub following_requested: Option<bool>,
}

/// Represents the relation the authenticated user has to a given account.
///
/// This is returned by `lookup`, as opposed to `Relationship`, which is returned by `show`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RelationLookup {
    /// The display name of the target account.
    pub name: String,
    /// The screen name of the target account.
    pub screen_name: String,
    /// The numeric ID of the target account.
    pub id: u64,
    /// The same ID as `id`, as a string.
    #[serde(default)]
    pub id_str: String,
    /// The ways the target account is connected to the authenticated user.
    ///
    /// If the target account has no relation to the authenticated user, this will not be empty;
    /// its only element will be `Connection::None`.
    pub connections: Vec<Connection>,
}

impl RelationLookup {
    /// Returns whether the given connection tag is present for this account.
    pub fn has(&self, connection: Connection) -> bool {
        self.connections.contains(&connection)
    }
}

/// Represents the ways a target account can be connected to another account.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Connection {
    /// The target account has no relation.
    None,
    /// The authenticated user has requested to follow the target account.
    FollowingRequested,
    /// The target account has requested to follow the authenticated user.
    FollowingReceived,
    /// The target account follows the authenticated user.
    FollowedBy,
    /// The authenticated user follows the target account.
    Following,
    /// The authenticated user has blocked the target account.
    #[serde(alias = "blocked")]
    Blocking,
    /// The authenticated user has muted the target account.
    Muting,
    /// A connection tag this library doesn't know about yet.
    #[serde(other)]
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::tests::load_file;

    #[test]
    fn parse_lookup_connections() {
        let lookups: Vec<RelationLookup> =
            serde_json::from_str(&load_file("sample_payloads/relation_lookup.json")).unwrap();

        assert_eq!(lookups.len(), 4);

        assert_eq!(lookups[0].screen_name, "rustlang");
        assert_eq!(
            lookups[0].connections,
            vec![Connection::Following, Connection::FollowedBy]
        );
        assert!(lookups[0].has(Connection::Following));
        assert!(!lookups[0].has(Connection::Muting));

        assert_eq!(lookups[1].id, 2873012325);
        assert_eq!(lookups[1].connections, vec![Connection::FollowingRequested]);

        assert_eq!(lookups[2].connections, vec![Connection::None]);

        assert_eq!(
            lookups[3].connections,
            vec![Connection::Blocking, Connection::Muting, Connection::Unknown]
        );
    }

    #[test]
    fn blocked_alias() {
        let conns: Vec<Connection> = serde_json::from_str(r#"["blocked", "blocking"]"#).unwrap();
        assert_eq!(conns, vec![Connection::Blocking, Connection::Blocking]);
    }

    #[test]
    fn parse_full_relationship() {
        #[derive(Deserialize)]
        struct Wrapper {
            relationship: Relationship,
        }

        let rel = serde_json::from_str::<Wrapper>(&load_file(
            "sample_payloads/relationship_full.json",
        ))
        .unwrap()
        .relationship;

        assert_eq!(rel.source.screen_name, "rustlang");
        assert_eq!(rel.source.id, 165262228);
        assert!(!rel.source.following);
        assert!(rel.source.followed_by);
        assert!(!rel.source.can_dm);
        assert_eq!(rel.source.notifications_enabled, Some(true));
        assert_eq!(rel.source.blocking, Some(true));
        assert_eq!(rel.source.muting, Some(true));
        assert_eq!(rel.source.want_retweets, Some(false));
        assert_eq!(rel.source.all_replies, Some(true));
        assert_eq!(rel.source.marked_spam, Some(true));

        assert_eq!(rel.target.screen_name, "ThisWeekInRust");
        assert_eq!(rel.target.id_str, "2873012325");
        assert!(rel.target.following);
        assert!(!rel.target.followed_by);
    }
}
