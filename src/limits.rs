/// Longest accepted title, in characters.
pub const MAX_TITLE_LEN: usize = 200;

/// Longest accepted description or location, in characters.
pub const MAX_TEXT_LEN: usize = 2_000;

/// Widest "upcoming" window, roughly ten years.
pub const MAX_HORIZON_DAYS: u32 = 3_660;
