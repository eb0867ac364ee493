pub const DEFAULT_ROOM: &str = "main";

/// Keeps `[A-Za-z0-9_-]`, caps at 64 chars, and falls back to the main room.
pub fn sanitize_room_name(value: &str) -> String {
    let mut cleaned = String::with_capacity(value.len().min(64));
    for ch in value.trim().chars() {
        if cleaned.len() >= 64 {
            break;
        }
        if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
            cleaned.push(ch);
        }
    }
    if cleaned.is_empty() {
        return DEFAULT_ROOM.to_string();
    }
    cleaned
}
