//! Central Configuration Constants
//!
//! Single source of truth for the NSL-KDD schema and pipeline defaults.

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "BlackWall";

// ============================================
// NSL-KDD SCHEMA
// ============================================

/// Raw NSL-KDD columns in file order (41 features + label)
pub const NSL_KDD_COLUMNS: &[&str] = &[
    "duration", "protocol_type", "service", "flag", "src_bytes", "dst_bytes",
    "land", "wrong_fragment", "urgent", "hot", "num_failed_logins", "logged_in",
    "num_compromised", "root_shell", "su_attempted", "num_root", "num_file_creations",
    "num_shells", "num_access_files", "num_outbound_cmds", "is_host_login",
    "is_guest_login", "count", "srv_count", "serror_rate", "srv_serror_rate",
    "rerror_rate", "srv_rerror_rate", "same_srv_rate", "diff_srv_rate",
    "srv_diff_host_rate", "dst_host_count", "dst_host_srv_count", "dst_host_same_srv_rate",
    "dst_host_diff_srv_rate", "dst_host_same_src_port_rate", "dst_host_srv_diff_host_rate",
    "dst_host_serror_rate", "dst_host_srv_serror_rate", "dst_host_rerror_rate",
    "dst_host_srv_rerror_rate", "label",
];

/// Number of raw NSL-KDD columns
/// IMPORTANT: Must match NSL_KDD_COLUMNS.len()!
pub const NSL_KDD_COLUMN_COUNT: usize = 42;

/// Trailing column carried by the KDDTrain+/KDDTest+ files
pub const DIFFICULTY_COLUMN: &str = "difficulty";

/// Raw label column
pub const LABEL_COLUMN: &str = "label";

/// Reserved name of the derived binary target
pub const TARGET_COLUMN: &str = "is_attack";

// ============================================
// DEFAULTS
// ============================================

pub const DEFAULT_TRAIN_PATH: &str = "data/NSL_KDD99/KDDTrain+.txt";
pub const DEFAULT_TEST_PATH: &str = "data/NSL_KDD99/KDDTest+.txt";

/// Token tried first when picking the normal class
pub const DEFAULT_NORMAL_LABEL: &str = "normal";

/// Frequency-ranked candidates appended after the configured normal labels
pub const DEFAULT_FALLBACK_DEPTH: usize = 3;

/// Number of labels shown in distribution summaries
pub const LABEL_SUMMARY_TOP: usize = 10;
