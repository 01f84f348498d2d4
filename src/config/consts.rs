// src/config/consts.rs

// Portals
pub const LADOK_COURSES_URL: &str = "https://www.student.ladok.se/student/app/studentwebb/min-utbildning/alla";
pub const LTH_PLAN_URL: &str = "https://kurser.lth.se/lot/programme";
pub const DEFAULT_ACADEMIC_YEAR: &str = "22_23";

// Net
pub const USER_AGENT: &str = concat!("ladok_scrape/", env!("CARGO_PKG_VERSION"));
pub const REQUEST_TIMEOUT_SECS: u64 = 15;

// Page lookups
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

// Local data
pub const DEFAULT_DATA_DIR: &str = "data";
pub const GRADES_FILE: &str = "grades.json";
pub const PROGRAMME_FILE_SUFFIX: &str = "-programme.json";
pub const JSON_INDENT: &[u8] = b"    ";

// Debug log
pub const STORE_DIR: &str = ".store";
pub const LOG_FILE: &str = "debug.log";

// Requirements
pub const COMPULSORY_BLOCKS: [&str; 3] = [
    "Årskurs 1 - Obligatoriska kurser",
    "Årskurs 2 - Obligatoriska kurser",
    "Årskurs 3 - Obligatoriska kurser",
];
pub const SPECIALIZATION_MARKER: &str = "Specialisering";

// Badge markers, probed in this order
pub const BADGE_REGISTERED: &str = "badge-light";
pub const BADGE_COMPLETED: &str = "badge-success";
pub const BADGE_ONGOING: &str = "badge-primary";
pub const BADGE_OTHER: &str = "badge-danger";
