//! Share model -> entity mapper

use feed_core::entities::Share;
use feed_core::value_objects::{PostId, ShareId, UserId};

use crate::models::ShareModel;

impl From<ShareModel> for Share {
    fn from(model: ShareModel) -> Self {
        Share {
            id: ShareId::new(model.id),
            post_id: PostId::new(model.post_id),
            user_id: UserId::new(model.user_id),
            shared_to: model.shared_to,
            created_at: model.created_at,
        }
    }
}
