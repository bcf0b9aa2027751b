mod time_utils;

pub use time_utils::{
    TimeUtils, civil_parts, day_span, epoch_ms_to_date_string, parse_date_arg, utc_midnight,
    ymd_to_epoch_ms,
};
