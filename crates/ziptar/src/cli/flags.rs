use std::collections::HashMap;
use std::fmt;

use clap::{Arg, ArgAction, Command};

use crate::error::TableError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Flag {
    Zip,
    Create,
    Extract,
    List,
    Gzip,
    Bzip,
    File,
}

impl Flag {
    pub fn name(self) -> &'static str {
        match self {
            Self::Zip => "zip",
            Self::Create => "create",
            Self::Extract => "extract",
            Self::List => "list",
            Self::Gzip => "gzip",
            Self::Bzip => "bzip",
            Self::File => "file",
        }
    }

    fn help(self) -> &'static str {
        match self {
            Self::Zip => "Use a zip archive instead of tar",
            Self::Create => "Create an archive from the given paths",
            Self::Extract => "Extract the archive into the current directory",
            Self::List => "List archive member names",
            Self::Gzip => "Compress the tar archive with gzip",
            Self::Bzip => "Compress the tar archive with bzip2",
            Self::File => "Read or write the archive at the next path instead of stdin/stdout",
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepted spellings of one flag.
///
/// `shorts` are matched one character at a time inside the mode token;
/// `longs` are matched whole and carry their leading `--`.
#[derive(Clone, Copy, Debug)]
pub struct FlagSpec {
    pub flag: Flag,
    pub shorts: &'static [char],
    pub longs: &'static [&'static str],
}

pub static FLAGS: &[FlagSpec] = &[
    FlagSpec {
        flag: Flag::Zip,
        shorts: &[],
        longs: &["--zip"],
    },
    FlagSpec {
        flag: Flag::Create,
        shorts: &['c'],
        longs: &["--create"],
    },
    FlagSpec {
        flag: Flag::Extract,
        shorts: &['x'],
        longs: &["--extract"],
    },
    FlagSpec {
        flag: Flag::List,
        shorts: &['t'],
        longs: &["--list"],
    },
    FlagSpec {
        flag: Flag::Gzip,
        shorts: &['g'],
        longs: &["--gzip"],
    },
    FlagSpec {
        flag: Flag::Bzip,
        shorts: &['j'],
        longs: &["--bzip"],
    },
    FlagSpec {
        flag: Flag::File,
        shorts: &['f'],
        longs: &["--file"],
    },
];

impl FlagSpec {
    fn arg(&self) -> Arg {
        let mut arg = Arg::new(self.flag.name())
            .action(ArgAction::SetTrue)
            .help(self.flag.help());

        let mut longs = self
            .longs
            .iter()
            .copied()
            .filter_map(|l| l.strip_prefix("--"));
        if let Some(first) = longs.next() {
            arg = arg.long(first);
        }
        arg = arg.aliases(longs);

        let mut shorts = self.shorts.iter().copied();
        if let Some(first) = shorts.next() {
            arg = arg.short(first);
        }
        arg.short_aliases(shorts)
    }
}

/// Build the flag matcher for `table`: one boolean argument per flag.
pub fn command(table: &[FlagSpec]) -> Command {
    table.iter().fold(
        Command::new("ziptar")
            .no_binary_name(true)
            .disable_help_flag(true)
            .disable_version_flag(true),
        |cmd, spec| cmd.arg(spec.arg()),
    )
}

/// Resolve a single `-c` or `--create` style token to its flag.
pub fn resolve(token: &str) -> Option<Flag> {
    let matches = command(FLAGS).try_get_matches_from([token]).ok()?;
    FLAGS
        .iter()
        .map(|spec| spec.flag)
        .find(|flag| matches.get_flag(flag.name()))
}

/// Check that every flag is reachable and no spelling is shared.
pub fn validate_table(table: &[FlagSpec]) -> Result<(), TableError> {
    let mut seen: HashMap<String, Flag> = HashMap::new();

    for spec in table {
        if spec.shorts.is_empty() && spec.longs.is_empty() {
            return Err(TableError::NoSpelling(spec.flag));
        }

        for &short in spec.shorts {
            if short == '-' || short.is_whitespace() {
                return Err(TableError::MalformedShort(short));
            }
        }
        for &long in spec.longs {
            let name = long.strip_prefix("--").unwrap_or_default();
            if name.is_empty() || name.starts_with('-') || name.contains('=') {
                return Err(TableError::MalformedLong(long));
            }
        }

        let spellings = spec
            .shorts
            .iter()
            .map(char::to_string)
            .chain(spec.longs.iter().map(|l| l.to_string()));
        for spelling in spellings {
            if let Some(&first) = seen.get(&spelling) {
                return Err(TableError::DuplicateSpelling {
                    spelling,
                    first,
                    second: spec.flag,
                });
            }
            seen.insert(spelling, spec.flag);
        }
    }

    Ok(())
}

/// Usage text listing every spelling next to its flag name.
pub fn usage() -> String {
    let mut text = String::from("Usage: ziptar flags [options] [archive] [files]\n");

    for spec in FLAGS {
        let spellings = spec
            .longs
            .iter()
            .map(|l| l.to_string())
            .chain(spec.shorts.iter().map(char::to_string))
            .collect::<Vec<_>>()
            .join(" ");
        text.push_str(&format!("\t{spellings:<20}{}\n", spec.flag));
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_command() {
        command(FLAGS).debug_assert();
    }

    #[test]
    fn builtin_table_is_valid() {
        assert_eq!(validate_table(FLAGS), Ok(()));
    }

    #[test]
    fn duplicate_short_is_rejected() {
        let table = [
            FlagSpec {
                flag: Flag::Create,
                shorts: &['c'],
                longs: &["--create"],
            },
            FlagSpec {
                flag: Flag::List,
                shorts: &['c'],
                longs: &["--list"],
            },
        ];
        assert_eq!(
            validate_table(&table),
            Err(TableError::DuplicateSpelling {
                spelling: "c".to_owned(),
                first: Flag::Create,
                second: Flag::List,
            })
        );
    }

    #[test]
    fn malformed_long_is_rejected() {
        let table = [FlagSpec {
            flag: Flag::Zip,
            shorts: &[],
            longs: &["zip"],
        }];
        assert_eq!(validate_table(&table), Err(TableError::MalformedLong("zip")));
    }

    #[test]
    fn flag_without_spelling_is_rejected() {
        let table = [FlagSpec {
            flag: Flag::File,
            shorts: &[],
            longs: &[],
        }];
        assert_eq!(
            validate_table(&table),
            Err(TableError::NoSpelling(Flag::File))
        );
    }

    #[test]
    fn resolves_short_and_long_spellings() {
        assert_eq!(resolve("-c"), Some(Flag::Create));
        assert_eq!(resolve("--create"), Some(Flag::Create));
        assert_eq!(resolve("-j"), Some(Flag::Bzip));
        assert_eq!(resolve("--zip"), Some(Flag::Zip));
    }

    #[test]
    fn unknown_spellings_do_not_resolve() {
        assert_eq!(resolve("-z"), None);
        assert_eq!(resolve("-h"), None);
        assert_eq!(resolve("--"), None);
        assert_eq!(resolve("--help"), None);
        assert_eq!(resolve("--file=archive.zip"), None);
        assert_eq!(resolve("--cre"), None);
    }

    #[test]
    fn usage_lists_every_flag() {
        let text = usage();
        assert!(text.starts_with("Usage: ziptar flags [options] [archive] [files]\n"));
        assert!(text.contains("\t--create c          create\n"));
        assert!(text.contains("\t--zip               zip\n"));
        assert_eq!(text.lines().count(), FLAGS.len() + 1);
    }
}
