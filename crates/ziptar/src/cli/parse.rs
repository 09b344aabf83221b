use std::collections::BTreeSet;
use std::ffi::OsString;

use crate::cli::flags::{self, Flag};
use crate::error::UsageError;

/// Flags switched on for one invocation. Absent means not set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedOptions {
    flags: BTreeSet<Flag>,
}

impl ParsedOptions {
    pub fn contains(&self, flag: Flag) -> bool {
        self.flags.contains(&flag)
    }

    pub fn iter(&self) -> impl Iterator<Item = Flag> + '_ {
        self.flags.iter().copied()
    }
}

/// Convert raw arguments to strings, refusing any that are not UTF-8.
pub fn utf8_args<I>(args: I) -> Result<Vec<String>, UsageError>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            arg.into_string()
                .map_err(|arg| UsageError::NonUtf8Argument(arg.to_string_lossy().into_owned()))
        })
        .collect()
}

/// Split the raw arguments (program name excluded) into flags and
/// positional arguments.
///
/// The first positional argument is the mode token: each of its
/// characters names one flag. Arguments starting with `--` are long
/// options, unless they follow a bare `--`, after which everything is
/// positional.
pub fn parse<I, S>(args: I) -> Result<(ParsedOptions, Vec<String>), UsageError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut args = args.into_iter().map(Into::into);
    let mut longs = Vec::new();
    let mut positional = Vec::new();

    while let Some(arg) = args.next() {
        if arg == "--" {
            positional.extend(args.by_ref());
            break;
        } else if arg.starts_with("--") {
            longs.push(arg);
        } else {
            positional.push(arg);
        }
    }

    let mut positional = positional.into_iter();
    let mode = positional.next().ok_or(UsageError::MissingFlags)?;

    let mut options = ParsedOptions::default();
    for c in mode.chars() {
        let flag = flags::resolve(&format!("-{c}"))
            .ok_or(UsageError::UndefinedFlagCharacter(c))?;
        options.flags.insert(flag);
    }
    for long in longs {
        let flag = flags::resolve(&long)
            .ok_or_else(|| UsageError::UndefinedOption(long.clone()))?;
        options.flags.insert(flag);
    }

    Ok((options, positional.collect()))
}
