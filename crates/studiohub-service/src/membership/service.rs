//! Membership service.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use studiohub_core::Clock;
use studiohub_core::error::AppError;
use studiohub_database::store::MembershipStore;
use studiohub_entity::membership::Membership;

use crate::context::RequestContext;

/// A membership together with its remaining visit allowance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembershipView {
    #[serde(flatten)]
    pub membership: Membership,
    /// `None` for unlimited plans.
    pub visits_remaining: Option<i32>,
}

impl From<Membership> for MembershipView {
    fn from(membership: Membership) -> Self {
        let visits_remaining = membership.visits_remaining();
        Self {
            membership,
            visits_remaining,
        }
    }
}

/// A client's memberships split into usable ones and everything else.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MyMemberships {
    /// `ACTIVE` memberships whose end date has not passed.
    pub active: Vec<MembershipView>,
    /// Expired, frozen, canceled, or past their end date.
    pub history: Vec<MembershipView>,
}

/// Lists a client's own memberships.
#[derive(Clone)]
pub struct MembershipService {
    memberships: Arc<dyn MembershipStore>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for MembershipService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MembershipService").finish_non_exhaustive()
    }
}

impl MembershipService {
    pub fn new(memberships: Arc<dyn MembershipStore>, clock: Arc<dyn Clock>) -> Self {
        Self { memberships, clock }
    }

    /// The current user's memberships, newest start date first in each bucket.
    pub async fn list_mine(&self, ctx: &RequestContext) -> Result<MyMemberships, AppError> {
        let today = self.clock.today();
        let (active, history): (Vec<_>, Vec<_>) = self
            .memberships
            .list_memberships_for_user(ctx.user_id)
            .await?
            .into_iter()
            .partition(|m| m.is_current(today));

        Ok(MyMemberships {
            active: active.into_iter().map(MembershipView::from).collect(),
            history: history.into_iter().map(MembershipView::from).collect(),
        })
    }
}
