use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::check_role;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::settings::SnipcartSettings;
use crate::forms::settings::SnipcartSettingsForm;
use crate::repository::{SettingsReader, SettingsWriter};
use crate::services::{ServiceError, ServiceResult};

/// Loads the checkout settings of the user's site, if saved.
pub fn load_settings<R>(
    repo: &R,
    user: &AuthenticatedUser,
) -> ServiceResult<Option<SnipcartSettings>>
where
    R: SettingsReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    repo.get_snipcart_settings(user.hub_id)
        .map_err(ServiceError::from)
}

/// Creates or replaces the checkout settings of the user's site.
pub fn save_settings<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: SnipcartSettingsForm,
) -> ServiceResult<SnipcartSettings>
where
    R: SettingsWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let settings = form
        .into_settings(user.hub_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.save_snipcart_settings(&settings)
        .map_err(ServiceError::from)
}
