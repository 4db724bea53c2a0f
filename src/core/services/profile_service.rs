use crate::api::BudgetApi;
use crate::domain::{find_by_id, EntityId, Profile};
use crate::errors::Result;

/// Profiles visible to the signed-in user.
#[derive(Debug, Default)]
pub struct ProfileStore {
    profiles: Vec<Profile>,
    current_profile: Option<Profile>,
    editing: bool,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all_profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn current_profile(&self) -> Option<&Profile> {
        self.current_profile.as_ref()
    }

    pub fn profile(&self, id: &EntityId) -> Option<&Profile> {
        find_by_id(&self.profiles, id)
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn set_editing(&mut self, editing: bool) {
        self.editing = editing;
    }

    /// Unlike the other stores, failures are returned so the caller can
    /// surface them next to the form that triggered the load.
    pub async fn fetch_profiles<A>(&mut self, api: &A) -> Result<()>
    where
        A: BudgetApi + ?Sized,
    {
        match api.all_profiles().await {
            Ok(profiles) => {
                self.profiles = profiles;
                Ok(())
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to fetch profiles");
                Err(err)
            }
        }
    }

    pub fn set_current_profile(&mut self, profile: Option<Profile>) {
        self.current_profile = profile;
    }

    pub fn reset_current_profile(&mut self) {
        self.profiles.clear();
        self.current_profile = None;
        self.editing = false;
    }
}
