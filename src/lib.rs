mod error;
mod openf1;
mod pipeline;
mod provider;
mod types;
mod utils;

pub use error::F1DataError;
pub use openf1::error::ProviderError;
pub use openf1::loader::DEFAULT_BASE_URL;
pub use openf1::provider::OpenF1Provider;
pub use provider::DataProvider;

pub use pipeline::exporter::{output_path, write_season, DEFAULT_OUTPUT_DIR};
pub use pipeline::round_counter::completed_rounds;
pub use pipeline::round_fetcher::fetch_round;
pub use pipeline::round_table::{RoundTable, SeasonTable, ROUND_COLUMN, SEASON_COLUMN};
pub use pipeline::season::{collect_season, round_count, rounds_to_fetch, run_pipeline};

pub use types::schedule::{Event, EventSchedule};
pub use types::session::{LoadOptions, Session, SessionInfo, SessionKind, LAP_START_COLUMN, TIME_COLUMN};

pub use utils::get_cache_dir;
