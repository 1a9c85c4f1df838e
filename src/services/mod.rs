//! Feature extraction services.
//!
//! [`features`] turns one song into a feature map; [`batch`] runs it over
//! many songs in parallel. [`survey`] reports how a collection is annotated.

pub mod batch;
pub mod features;
pub mod survey;

pub use batch::{extract_batch, BatchReport, FailedSong, SongFeatures};
pub use features::FeatureExtractor;
pub use survey::AnnotationSurvey;
