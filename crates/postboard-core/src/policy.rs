//! Ownership policy for post mutations.

use crate::domain::{Caller, Post};

/// Whether `caller` may update or delete `post`: its author or any superuser.
pub fn can_modify(caller: &Caller, post: &Post) -> bool {
    match caller.identity() {
        Some(identity) => identity.is_superuser || post.is_authored_by(identity.user_id),
        None => false,
    }
}
