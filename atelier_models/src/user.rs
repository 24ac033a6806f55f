//! Placeholder account entity.
//!
//! The product declares a user table for a future authentication feature,
//! but no login, session, or password-hashing behavior exists yet. Nothing
//! outside the initial database migration refers to these types.

use nutype::nutype;

#[nutype(derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Deref,
    From,
    Serialize,
    Deserialize,
))]
pub struct UserId(uuid::Uuid);

#[nutype(
    validate(len_char_min = 1, len_char_max = 32),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct UserName(String);

#[nutype(
    validate(len_char_min = 1, len_char_max = 4096),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct UserPassword(String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: UserName,
    pub password: UserPassword,
}
