/// localStorage key the sign-in flow stores the manager's identifier under.
pub const ACTOR_STORAGE_KEY: &str = "estate.managerCognitoId";

/// Identifier of the signed-in manager, if any.
pub fn current_actor_id() -> Option<String> {
    let storage = web_sys::window()?.local_storage().ok()??;
    storage
        .get_item(ACTOR_STORAGE_KEY)
        .ok()?
        .filter(|id| !id.trim().is_empty())
}
