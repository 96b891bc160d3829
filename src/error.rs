use thiserror::Error;

#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("I/O error while {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON parse error while {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("label '{label}' is missing from the alignment vocabulary")]
    UnknownLabel { label: String },
    #[error("cannot score against an empty {role} sequence")]
    DegenerateSequence { role: &'static str },
    #[error(
        "segment (version {version}, time {time}) is claimed by timeline groups {first_group} and {second_group}"
    )]
    PartitionViolation {
        version: usize,
        time: usize,
        first_group: usize,
        second_group: usize,
    },
    #[error("timeline group {group} references (version {version}, time {time}): {reason}")]
    InvalidSegment {
        group: usize,
        version: usize,
        time: usize,
        reason: String,
    },
    #[error("{context}: expected {expected} entries, got {actual}")]
    LengthMismatch {
        context: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("aligner returned an invalid path: {message}")]
    InvalidPath { message: String },
    #[error("{context}: {message}")]
    Collaborator {
        context: &'static str,
        message: String,
    },
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("{family}{}: {source}", version_suffix(.version))]
    Family {
        family: &'static str,
        version: Option<usize>,
        #[source]
        source: Box<EvaluationError>,
    },
    #[error("song '{song}': {source}")]
    Song {
        song: String,
        #[source]
        source: Box<EvaluationError>,
    },
}

fn version_suffix(version: &Option<usize>) -> String {
    version
        .map(|v| format!(" version {v}"))
        .unwrap_or_default()
}

impl EvaluationError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    pub(crate) fn json(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            context: context.into(),
            source,
        }
    }

    pub fn collaborator(context: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Collaborator {
            context,
            message: err.to_string(),
        }
    }

    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_path(message: impl Into<String>) -> Self {
        Self::InvalidPath {
            message: message.into(),
        }
    }

    pub(crate) fn in_family(self, family: &'static str, version: Option<usize>) -> Self {
        Self::Family {
            family,
            version,
            source: Box::new(self),
        }
    }

    pub(crate) fn in_song(self, song: impl Into<String>) -> Self {
        Self::Song {
            song: song.into(),
            source: Box::new(self),
        }
    }

    /// Strips `Song`/`Family` wrappers and returns the underlying failure.
    pub fn root_cause(&self) -> &EvaluationError {
        match self {
            Self::Family { source, .. } | Self::Song { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
