//! Fruit Lens Common Library
//!
//! CLIとライブラリ利用側で共有される型・パーサー・セッション状態

pub mod error;
pub mod parser;
pub mod results;
pub mod selection;
pub mod state;

pub use error::{Error, Result, SessionError};
pub use parser::{normalize_response, parse_analysis_response, ParsedResponse, RejectedEntry};
pub use results::{AnalysisResult, Measure, ResultSet};
pub use selection::{is_image_content_type, validate_candidate, FileCandidate, SelectedImage};
pub use state::{Event, Phase, SessionState, StalePolicy};
