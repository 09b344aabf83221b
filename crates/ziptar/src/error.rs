use crate::cli::Flag;

/// Command line misuse. Detected before any archive stream is opened.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UsageError {
    #[error("no flags given")]
    MissingFlags,

    #[error("undefined flag character {0}")]
    UndefinedFlagCharacter(char),

    #[error("undefined option {0}")]
    UndefinedOption(String),

    #[error("argument is not valid UTF-8: {0}")]
    NonUtf8Argument(String),

    #[error("cannot use more than one compression format")]
    CompressionConflict,

    #[error("cannot do two things at once")]
    MultipleActions,

    #[error("need to specify action - create, extract or list")]
    MissingAction,

    #[error("archive file name expected after file flag")]
    MissingArchivePath,

    #[error("gzip and bzip only makes sense with tar archives")]
    CompressionWithZip,

    #[error("not expected any argument when extracting")]
    UnexpectedExtractArguments,

    #[error("not expected any argument when listing")]
    UnexpectedListArguments,

    #[error("cowardly refusing to create an empty archive")]
    EmptyArchive,
}

impl UsageError {
    /// Parse failures are followed by the usage text.
    pub fn shows_usage(&self) -> bool {
        matches!(
            self,
            Self::MissingFlags | Self::UndefinedFlagCharacter(_) | Self::UndefinedOption(_)
        )
    }
}

/// A malformed flag table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("flag '{0}' has no spelling")]
    NoSpelling(Flag),

    #[error("spelling '{spelling}' is used by both '{first}' and '{second}'")]
    DuplicateSpelling {
        spelling: String,
        first: Flag,
        second: Flag,
    },

    #[error("long option '{0}' must start with '--' followed by a name")]
    MalformedLong(&'static str),

    #[error("short flag character '{0}' is not allowed")]
    MalformedShort(char),
}
