//! MenuLens Common Library
//!
//! CLIとWeb(WASM)で共有される型とロジック

pub mod connectivity;
pub mod controller;
pub mod dietary;
pub mod error;
pub mod favorites;
pub mod parser;
pub mod prompts;
pub mod queue;
pub mod storage;
pub mod types;

pub use connectivity::ConnectivityMonitor;
pub use controller::{
    HistorySink, MenuAnalyzer, ScanController, SubmissionState, SubmitOutcome,
    ANALYSIS_FAILED_MESSAGE, FALLBACK_ORIGINAL_SUMMARY, FALLBACK_TRANSLATED_SUMMARY,
};
pub use dietary::{evaluate, AllergenLabel, CompatibilityVerdict, DietaryLabel, Violation};
pub use error::{Error, Result};
pub use favorites::{CachedTranslationStore, FavoritesStore};
pub use parser::{extract_json, parse_menu_response};
pub use prompts::{build_dish_info_prompt, build_dish_video_prompt, build_menu_prompt, TARGET_LANGUAGES};
pub use queue::{PendingScanStore, PENDING_SCANS_KEY};
pub use storage::{MemoryStorage, StorageBackend};
pub use types::{AuthUser, CachedTranslation, DietaryProfile, HistoryRecord, MenuItem, PendingScan};
