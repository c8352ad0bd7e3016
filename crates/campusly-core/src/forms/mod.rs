//! Form and modal state machines.
//!
//! Each form validates locally, hands back a request for the caller to
//! run, and reports completion so the owning page can refresh.

mod add_member;
mod comment;
mod confirm;
mod create_group;
mod edit_post;
mod login;
mod register;

pub use add_member::AddMemberModal;
pub use comment::{CommentComposer, CommentDrafts};
pub use confirm::ConfirmDelete;
pub use create_group::CreateGroupModal;
pub use edit_post::EditPostModal;
pub use login::LoginForm;
pub use register::{OTP_LEN, RegisterForm, RegisterStep};
