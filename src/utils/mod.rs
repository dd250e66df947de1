pub mod constants;
pub mod coordinates;
pub mod encoding;
pub mod filename;
pub mod progress;

pub use constants::*;
pub use coordinates::{haversine_distance, is_valid_coordinate};
pub use encoding::decode_text;
pub use filename::{default_output_path, generate_default_snapshot_filename};
pub use progress::ProgressReporter;
