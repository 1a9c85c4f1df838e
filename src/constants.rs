//! Application constants.
//!
//! Centralizes magic numbers and keyword tables used across the pipeline.

/// Lyric normalization constants.
pub mod normalize {
    /// Largest repeat multiplier that is expanded. Larger markers are left untouched.
    pub const MAX_REPEAT: usize = 100;
}

/// Annotation keyword tables.
pub mod annotations {
    /// Keywords that mark performance cues rather than song structure.
    pub const INSTRUMENT_KEYWORDS: &[&str] = &["guitar solo", "instrumental", "solo", "spoken"];

    /// Keywords that mark a structural annotation, in classification priority order.
    pub const STRUCTURE_KEYWORDS: &[&str] = &[
        "verse",
        "chorus",
        "intro",
        "outro",
        "bridge",
        "hook",
        "refrain",
        "interlude",
        "drop",
    ];
}

/// Annotation survey constants.
pub mod survey {
    /// Words whose presence anywhere in a lyric counts it as annotated.
    pub const ANNOTATION_WORDS: &[&str] = &[
        "solo",
        "verse",
        "intro",
        "chorus",
        "refrain",
        "outro",
        "bridge",
        "interlude",
        "pre-chorus",
        "end chorus",
        "end refrain",
    ];

    /// Number of most common annotations reported.
    pub const TOP_ANNOTATIONS: usize = 100;
}

/// Feature extraction constants.
pub mod features {
    /// Value reported for structural features of lyrics without any annotation.
    pub const UNDEFINED_SENTINEL: i64 = -1;

    /// Minimum number of spaces a sanitized lyric needs before features are computed.
    pub const MIN_SPACES: usize = 2;
}

/// Memoization constants.
pub mod cache {
    /// Default number of entries kept by each per-worker memo.
    pub const DEFAULT_CAPACITY: usize = 4096;
}
