//! Domain entities - the core business objects.

mod caller;
mod post;
mod user;

pub use caller::{Caller, CallerIdentity};
pub use post::{Author, NewPost, Post, PostChanges};
pub use user::{NewUser, User};
