use serenity::all::Permissions;

/// Whether `user_id` may delete an archive owned by `owner_id`.
///
/// Owners may always delete their archives. Others need `MANAGE_MESSAGES` or
/// `ADMINISTRATOR` in the guild where they clicked; `permissions` is `None` outside
/// guilds, where only the owner qualifies.
pub fn can_delete_archive(owner_id: u64, user_id: u64, permissions: Option<Permissions>) -> bool {
    if owner_id == user_id {
        return true;
    }

    permissions.is_some_and(|p| p.manage_messages() || p.administrator())
}
