//! Business model -> entity mapper

use feed_core::entities::Business;
use feed_core::value_objects::{BusinessId, UserId};

use crate::models::BusinessModel;

impl From<BusinessModel> for Business {
    fn from(model: BusinessModel) -> Self {
        Business {
            id: BusinessId::new(model.id),
            owner_id: UserId::new(model.owner_id),
            name: model.name,
            logo: model.logo,
            created_at: model.created_at,
        }
    }
}
