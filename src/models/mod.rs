pub mod assistants;
pub mod employers;

use serde::Deserialize;

/// Caller identity as the Telegram mini-app supplies it: the numeric user
/// id (when the client script could read it) and/or the `@username`.
/// Doubles as the query-param set for the own-profile GET endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TelegramIdentity {
    pub tg_id: Option<i64>,
    pub tg_username: Option<String>,
}

/// Which key identifies a profile. `tg_id` always wins: Telegram assigns
/// it and the client cannot change it, while usernames are editable and
/// only a fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityKey {
    ByTelegramId(i64),
    ByUsername(String),
    Anonymous,
}

impl TelegramIdentity {
    /// The strongest single key this identity offers.
    pub fn key(&self) -> IdentityKey {
        self.lookup_keys()
            .into_iter()
            .next()
            .unwrap_or(IdentityKey::Anonymous)
    }

    /// Keys to try when resolving an existing profile, strongest first.
    /// A profile saved before the client started sending `tg_id` is still
    /// found through its username.
    pub fn lookup_keys(&self) -> Vec<IdentityKey> {
        let mut keys = Vec::with_capacity(2);
        if let Some(id) = self.tg_id {
            keys.push(IdentityKey::ByTelegramId(id));
        }
        if let Some(username) = self.trimmed_username() {
            keys.push(IdentityKey::ByUsername(username));
        }
        keys
    }

    /// Username with surrounding whitespace dropped; `None` when blank.
    pub fn trimmed_username(&self) -> Option<String> {
        self.tg_username
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(str::to_string)
    }
}

/// `Some(trimmed)` for non-blank input, `None` otherwise. Optional text
/// fields are stored as NULL rather than empty strings.
pub(crate) fn none_if_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
