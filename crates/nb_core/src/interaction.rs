use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// A user action on an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Like,
    Dislike,
    Favorite,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Like => "like",
            Action::Dislike => "dislike",
            Action::Favorite => "favorite",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "like" => Some(Action::Like),
            "dislike" => Some(Action::Dislike),
            "favorite" => Some(Action::Favorite),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The per-user lists an article can appear in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    Liked,
    Disliked,
    Favorites,
}

impl ListKind {
    pub const ALL: [ListKind; 3] = [ListKind::Liked, ListKind::Disliked, ListKind::Favorites];

    pub fn as_str(&self) -> &'static str {
        match self {
            ListKind::Liked => "liked",
            ListKind::Disliked => "disliked",
            ListKind::Favorites => "favorites",
        }
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "liked" => Ok(ListKind::Liked),
            "disliked" => Ok(ListKind::Disliked),
            "favorites" => Ok(ListKind::Favorites),
            other => Err(Error::UnknownList(other.to_string())),
        }
    }
}

/// Like/dislike/favorite flags and local counters for one article.
///
/// `user_liked` and `user_disliked` are never both set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionState {
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub dislikes: u32,
    #[serde(default)]
    pub user_liked: bool,
    #[serde(default)]
    pub user_disliked: bool,
    #[serde(default)]
    pub user_favorited: bool,
}

impl InteractionState {
    /// Returns the state after `action`.
    pub fn apply(mut self, action: Action) -> Self {
        match action {
            Action::Like => {
                self.user_liked = !self.user_liked;
                if self.user_liked {
                    self.likes += 1;
                    if self.user_disliked {
                        self.user_disliked = false;
                        self.dislikes = self.dislikes.saturating_sub(1);
                    }
                } else {
                    self.likes = self.likes.saturating_sub(1);
                }
            }
            Action::Dislike => {
                self.user_disliked = !self.user_disliked;
                if self.user_disliked {
                    self.dislikes += 1;
                    if self.user_liked {
                        self.user_liked = false;
                        self.likes = self.likes.saturating_sub(1);
                    }
                } else {
                    self.dislikes = self.dislikes.saturating_sub(1);
                }
            }
            Action::Favorite => {
                self.user_favorited = !self.user_favorited;
            }
        }
        self
    }

    /// Like [`apply`](Self::apply) for an action name; unknown names leave the state as is.
    pub fn apply_named(self, action: &str) -> Self {
        match Action::parse(action) {
            Some(action) => self.apply(action),
            None => self,
        }
    }

    pub fn in_list(&self, kind: ListKind) -> bool {
        match kind {
            ListKind::Liked => self.user_liked,
            ListKind::Disliked => self.user_disliked,
            ListKind::Favorites => self.user_favorited,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_flag_states() -> Vec<InteractionState> {
        let mut states = Vec::new();
        for liked in [false, true] {
            for disliked in [false, true] {
                for favorited in [false, true] {
                    if liked && disliked {
                        continue;
                    }
                    states.push(InteractionState {
                        likes: u32::from(liked),
                        dislikes: u32::from(disliked),
                        user_liked: liked,
                        user_disliked: disliked,
                        user_favorited: favorited,
                    });
                }
            }
        }
        states
    }

    #[test]
    fn test_like_toggles_back_to_default() {
        let state = InteractionState::default().apply(Action::Like);
        assert_eq!(
            state,
            InteractionState {
                likes: 1,
                user_liked: true,
                ..Default::default()
            }
        );
        assert_eq!(state.apply(Action::Like), InteractionState::default());
    }

    #[test]
    fn test_like_clears_dislike() {
        let state = InteractionState {
            dislikes: 1,
            user_disliked: true,
            ..Default::default()
        };
        let next = state.apply(Action::Like);
        assert!(next.user_liked);
        assert_eq!(next.likes, 1);
        assert!(!next.user_disliked);
        assert_eq!(next.dislikes, 0);
    }

    #[test]
    fn test_dislike_clears_like() {
        let state = InteractionState::default().apply(Action::Like).apply(Action::Dislike);
        assert_eq!(
            state,
            InteractionState {
                dislikes: 1,
                user_disliked: true,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_favorite_is_independent() {
        let liked = InteractionState::default().apply(Action::Like);
        let favorited = liked.apply(Action::Favorite);
        assert!(favorited.user_favorited);
        assert_eq!(favorited.likes, 1);
        assert!(favorited.user_liked);
        assert_eq!(favorited.apply(Action::Favorite), liked);
    }

    #[test]
    fn test_unknown_action_is_noop() {
        for state in all_flag_states() {
            assert_eq!(state.apply_named("share"), state);
            assert_eq!(state.apply_named(""), state);
        }
        assert!(InteractionState::default().apply_named("like").user_liked);
    }

    #[test]
    fn test_like_and_dislike_never_both_set() {
        let actions = [Action::Like, Action::Dislike, Action::Favorite];
        // every sequence of length 4 from every reachable state
        for start in all_flag_states() {
            for a in actions {
                for b in actions {
                    for c in actions {
                        for d in actions {
                            let mut state = start;
                            for action in [a, b, c, d] {
                                state = state.apply(action);
                                assert!(!(state.user_liked && state.user_disliked));
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_counters_never_underflow() {
        let inconsistent = InteractionState {
            user_liked: true,
            user_disliked: false,
            ..Default::default()
        };
        assert_eq!(inconsistent.apply(Action::Like).likes, 0);
        assert_eq!(inconsistent.apply(Action::Dislike).likes, 0);
    }

    #[test]
    fn test_list_kind_round_trip() {
        for kind in ListKind::ALL {
            assert_eq!(kind.as_str().parse::<ListKind>().unwrap(), kind);
        }
        assert!(matches!("starred".parse::<ListKind>(), Err(Error::UnknownList(_))));
    }

    #[test]
    fn test_state_json_field_names() {
        let json = serde_json::to_value(InteractionState::default().apply(Action::Favorite)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "likes": 0,
                "dislikes": 0,
                "userLiked": false,
                "userDisliked": false,
                "userFavorited": true
            })
        );
    }
}
