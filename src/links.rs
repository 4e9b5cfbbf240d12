// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

pub const BASE_URL: &'static str = "https://api.twitter.com/1.1/";

pub mod friendships {
    pub const CREATE: &'static str = "friendships/create.json";
    pub const DESTROY: &'static str = "friendships/destroy.json";
    pub const SHOW: &'static str = "friendships/show.json";
    pub const UPDATE: &'static str = "friendships/update.json";
    pub const INCOMING: &'static str = "friendships/incoming.json";
    pub const OUTGOING: &'static str = "friendships/outgoing.json";
    pub const LOOKUP: &'static str = "friendships/lookup.json";
    pub const NO_RETWEETS: &'static str = "friendships/no_retweets/ids.json";
}
