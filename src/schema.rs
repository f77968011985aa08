/// Column-name constants for the trip datasets.
/// Single source of truth for the loader and the reporters.

// ── Source columns ──────────────────────────────────────────────────────────
pub mod trip {
    pub const START_TIME: &str = "Start Time";
    pub const TRIP_DURATION: &str = "Trip Duration";
    pub const START_STATION: &str = "Start Station";
    pub const END_STATION: &str = "End Station";
    pub const USER_TYPE: &str = "User Type";

    pub const REQUIRED: [&str; 5] = [
        START_TIME,
        TRIP_DURATION,
        START_STATION,
        END_STATION,
        USER_TYPE,
    ];
}

// ── Optional demographic columns ────────────────────────────────────────────
pub mod demographics {
    pub const GENDER: &str = "Gender";
    pub const BIRTH_YEAR: &str = "Birth Year";
}

// ── Columns derived from the start time ─────────────────────────────────────
pub mod derived {
    pub const MONTH: &str = "month";
    pub const DAY_OF_WEEK: &str = "day_of_week";
    pub const HOUR: &str = "hour";
}

// ── Frequency tables ────────────────────────────────────────────────────────
pub mod frequency {
    pub const COUNT: &str = "count";
}

pub const START_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
