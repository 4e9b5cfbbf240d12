// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::iter::FromIterator;

use tracing::debug;

use crate::common::*;
use crate::error::{Error, Result, TwitterErrors};
use crate::user::UserID;

/// The most accounts `lookup` will ask about in a single call.
pub const MAX_LOOKUP_USERS: usize = 100;

/// Error code reported when a lookup names more than `MAX_LOOKUP_USERS` accounts.
pub const TOO_MANY_USERS_CODE: i32 = 200;

const TOO_MANY_USERS_MESSAGE: &str = "This API only supports up to 100 users";

/// The accounts to ask about in a call to `lookup`.
///
/// Accounts can be given by numeric ID or by screen name, each either one at a time or as a list,
/// and all four can be mixed in the same call. A screen name given through `screen_name` may
/// already be a comma-separated list, as Twitter itself accepts.
///
/// ```rust
/// use twitter_friendships::friendship::LookupParams;
///
/// let params = LookupParams::new()
///     .screen_names(vec!["rustlang", "ThisWeekInRust"])
///     .user_id(12);
///
/// let users = params.normalize().unwrap();
/// assert_eq!(users.len(), 3);
/// assert_eq!(users.screen_name_param().as_deref(), Some("rustlang,ThisWeekInRust"));
/// ```
///
/// It can also be collected from anything that converts into `UserID`:
///
/// ```rust
/// use twitter_friendships::friendship::LookupParams;
/// use twitter_friendships::user::UserID;
///
/// let accts: Vec<UserID> = vec![165262228.into(), "ThisWeekInRust".into()];
/// let params: LookupParams = accts.iter().collect();
///
/// assert_eq!(params.user_ids, vec![165262228]);
/// assert_eq!(params.screen_names, vec!["ThisWeekInRust".to_string()]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupParams {
    /// A single numeric ID. Zero is treated the same as `None`.
    pub user_id: Option<u64>,
    /// A list of numeric IDs.
    pub user_ids: Vec<u64>,
    /// A single screen name, or several joined with commas.
    pub screen_name: Option<String>,
    /// A list of screen names.
    pub screen_names: Vec<String>,
}

impl LookupParams {
    /// Creates an empty set of lookup parameters.
    pub fn new() -> LookupParams {
        LookupParams::default()
    }

    /// Sets the single numeric ID to look up.
    pub fn user_id(self, id: u64) -> LookupParams {
        LookupParams {
            user_id: Some(id),
            ..self
        }
    }

    /// Adds the given numeric IDs to the list to look up.
    pub fn user_ids<I: IntoIterator<Item = u64>>(mut self, ids: I) -> LookupParams {
        self.user_ids.extend(ids);
        self
    }

    /// Sets the single screen name to look up. This may be several names joined with commas.
    pub fn screen_name(self, name: impl Into<String>) -> LookupParams {
        LookupParams {
            screen_name: Some(name.into()),
            ..self
        }
    }

    /// Adds the given screen names to the list to look up.
    pub fn screen_names<I, S>(mut self, names: I) -> LookupParams
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.screen_names.extend(names.into_iter().map(Into::into));
        self
    }

    /// Merges every way of naming an account into one ordered list per kind, and checks the
    /// combined count against `MAX_LOOKUP_USERS`.
    ///
    /// Screen names come out as the `screen_names` list first, followed by the entries of
    /// `screen_name`. Numeric IDs come out as `user_id` first (if it's present and nonzero),
    /// followed by the `user_ids` list. Comma-joined screen names are split apart, and empty
    /// entries are dropped. Duplicates are kept as given.
    ///
    /// If the combined count is over the limit, this returns `Error::InvalidRequest` with code
    /// `TOO_MANY_USERS_CODE`, and `lookup` will not contact Twitter at all.
    pub fn normalize(&self) -> Result<UserIdentifierSet> {
        let screen_names = self
            .screen_names
            .iter()
            .chain(self.screen_name.iter())
            .flat_map(|names| names.split(','))
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();

        let user_ids = self
            .user_id
            .filter(|&id| id != 0)
            .into_iter()
            .chain(self.user_ids.iter().copied())
            .collect();

        let users = UserIdentifierSet {
            user_ids,
            screen_names,
        };

        if users.len() > MAX_LOOKUP_USERS {
            debug!(
                requested = users.len(),
                max = MAX_LOOKUP_USERS,
                "rejecting friendship lookup before sending"
            );
            return Err(Error::InvalidRequest(TwitterErrors::single(
                TOO_MANY_USERS_CODE,
                TOO_MANY_USERS_MESSAGE,
            )));
        }

        Ok(users)
    }
}

impl<T: Into<UserID>> FromIterator<T> for LookupParams {
    fn from_iter<I: IntoIterator<Item = T>>(accts: I) -> LookupParams {
        let mut params = LookupParams::new();

        for acct in accts {
            match acct.into() {
                UserID::ID(id) => params.user_ids.push(id),
                UserID::ScreenName(name) => params.screen_names.push(name.into_owned()),
            }
        }

        params
    }
}

/// The normalized set of accounts for a `lookup` call, as produced by `LookupParams::normalize`.
///
/// Each list keeps the order it was given in. They are only joined into comma-separated strings
/// when the request is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserIdentifierSet {
    /// Numeric IDs to look up.
    pub user_ids: Vec<u64>,
    /// Screen names to look up.
    pub screen_names: Vec<String>,
}

impl UserIdentifierSet {
    /// The total number of accounts named, counting both kinds.
    pub fn len(&self) -> usize {
        self.user_ids.len() + self.screen_names.len()
    }

    /// Returns whether no accounts are named at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The `user_id` parameter as it's sent to Twitter, or `None` if there are no numeric IDs.
    pub fn user_id_param(&self) -> Option<String> {
        if self.user_ids.is_empty() {
            return None;
        }

        let ids = self.user_ids.iter().map(|id| id.to_string()).collect::<Vec<_>>();
        Some(ids.join(","))
    }

    /// The `screen_name` parameter as it's sent to Twitter, or `None` if there are no screen
    /// names.
    pub fn screen_name_param(&self) -> Option<String> {
        if self.screen_names.is_empty() {
            None
        } else {
            Some(self.screen_names.join(","))
        }
    }

    pub(crate) fn to_params(&self) -> ParamList {
        ParamList::new()
            .add_opt_param("user_id", self.user_id_param())
            .add_opt_param("screen_name", self.screen_name_param())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("user{}", i)).collect()
    }

    fn assert_too_many(result: Result<UserIdentifierSet>) {
        match result {
            Err(Error::InvalidRequest(errs)) => {
                assert_eq!(errs.errors.len(), 1);
                assert_eq!(errs.errors[0].code, 200);
                assert_eq!(errs.errors[0].message, "This API only supports up to 100 users");
            }
            other => panic!("expected InvalidRequest, got {:?}", other),
        }
    }

    #[test]
    fn mixed_inputs() {
        let params = LookupParams::new()
            .screen_names(vec!["a", "b"])
            .screen_name("c")
            .user_id(1)
            .user_ids(vec![2, 3]);

        let users = params.normalize().unwrap();

        assert_eq!(users.screen_names, vec!["a", "b", "c"]);
        assert_eq!(users.user_ids, vec![1, 2, 3]);
        assert_eq!(users.len(), 6);
        assert_eq!(users.screen_name_param().as_deref(), Some("a,b,c"));
        assert_eq!(users.user_id_param().as_deref(), Some("1,2,3"));
    }

    #[test]
    fn zero_single_id_is_absent() {
        let users = LookupParams::new()
            .screen_names(vec!["a"])
            .user_id(0)
            .normalize()
            .unwrap();

        assert_eq!(users.screen_names, vec!["a"]);
        assert!(users.user_ids.is_empty());
        assert_eq!(users.user_id_param(), None);
        assert_eq!(users.len(), 1);

        let params = users.to_params();
        assert_eq!(params.get("screen_name").map(|v| v.as_ref()), Some("a"));
        assert!(!params.contains_key("user_id"));
    }

    #[test]
    fn ids_only() {
        let users = LookupParams::new().user_ids(vec![10, 20]).normalize().unwrap();

        assert_eq!(users.user_id_param().as_deref(), Some("10,20"));
        assert_eq!(users.screen_name_param(), None);

        let params = users.to_params();
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("user_id").map(|v| v.as_ref()), Some("10,20"));
    }

    #[test]
    fn exactly_at_limit() {
        let users = LookupParams::new()
            .screen_names(names(60))
            .user_ids(1..=40)
            .normalize()
            .unwrap();

        assert_eq!(users.len(), MAX_LOOKUP_USERS);
    }

    #[test]
    fn one_over_limit() {
        assert_too_many(LookupParams::new().screen_names(names(101)).normalize());
        assert_too_many(LookupParams::new().user_ids(1..=101).normalize());
        assert_too_many(
            LookupParams::new()
                .screen_names(names(100))
                .user_id(7)
                .normalize(),
        );
    }

    #[test]
    fn fifty_ids_and_fifty_one_names() {
        assert_too_many(
            LookupParams::new()
                .user_ids(1..=50)
                .screen_names(names(51))
                .normalize(),
        );
    }

    #[test]
    fn zero_id_does_not_count_toward_limit() {
        let users = LookupParams::new()
            .screen_names(names(100))
            .user_id(0)
            .normalize()
            .unwrap();

        assert_eq!(users.len(), 100);
    }

    #[test]
    fn joined_screen_names_are_split() {
        let joined = names(101).join(",");
        assert_too_many(LookupParams::new().screen_name(joined).normalize());

        let users = LookupParams::new()
            .screen_names(vec!["x"])
            .screen_name("a,,b,")
            .normalize()
            .unwrap();

        assert_eq!(users.screen_names, vec!["x", "a", "b"]);
        assert_eq!(users.len(), 3);
    }

    #[test]
    fn empty_input() {
        let users = LookupParams::new().normalize().unwrap();

        assert!(users.is_empty());
        assert_eq!(users.user_id_param(), None);
        assert_eq!(users.screen_name_param(), None);
        assert!(users.to_params().is_empty());

        let users = LookupParams::new().screen_name("").normalize().unwrap();
        assert!(users.is_empty());
    }

    #[test]
    fn duplicates_are_kept() {
        let users = LookupParams::new()
            .screen_names(vec!["a", "a"])
            .user_id(5)
            .user_ids(vec![5])
            .normalize()
            .unwrap();

        assert_eq!(users.screen_names, vec!["a", "a"]);
        assert_eq!(users.user_ids, vec![5, 5]);
        assert_eq!(users.len(), 4);
    }

    #[test]
    fn normalizing_twice_is_stable() {
        let params = LookupParams::new()
            .screen_names(vec!["b", "a"])
            .screen_name("c,d")
            .user_ids(vec![3, 1, 2]);

        let first = params.normalize().unwrap();
        let second = params.normalize().unwrap();
        assert_eq!(first, second);

        let again = LookupParams::new()
            .screen_names(first.screen_names.clone())
            .user_ids(first.user_ids.clone())
            .normalize()
            .unwrap();
        assert_eq!(again, first);
    }

    #[test]
    fn collect_from_user_ids() {
        let params: LookupParams = vec![
            UserID::from(1u64),
            UserID::from("rustlang"),
            UserID::from(2u64),
        ]
        .into_iter()
        .collect();

        assert_eq!(params.user_ids, vec![1, 2]);
        assert_eq!(params.screen_names, vec!["rustlang"]);
        assert_eq!(params.user_id, None);
        assert_eq!(params.screen_name, None);
    }
}
