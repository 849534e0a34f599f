/// Longest nickname a user may pick, counted in characters.
pub const MAX_NICKNAME_LEN: usize = 12;

/// Display name reserved for the moderation account.
pub const ADMIN_NICKNAME: &str = "Admin";

/// Suffix appended to a nickname when the admin bans its owner.
/// Contains raw markup on purpose: the pages render nicknames as HTML.
pub const BANNED_MARKER: &str = r#"<b style="color:lightcoral">(Banned)</b>"#;
