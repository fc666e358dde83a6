use std::env;

/// Command line options for the token dumper.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Options {
    pub file: String,
    pub locations: bool,
}

impl Options {
    pub fn parse() -> Result<Options, String> {
        Options::from_args(env::args().skip(1))
    }

    fn from_args(args: impl Iterator<Item = String>) -> Result<Options, String> {
        let mut options = Options::default();

        for arg in args {
            match arg.as_str() {
                "-l" | "--locations" => options.locations = true,
                _ if arg.starts_with('-') => {
                    return Err(format!("unknown option '{}'", arg));
                }
                _ => {
                    if !options.file.is_empty() {
                        return Err(format!("unexpected argument '{}'", arg));
                    }
                    options.file = arg;
                }
            }
        }

        if options.file.is_empty() {
            return Err("no input file given".to_owned());
        }
        Ok(options)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn parse(args: &[&str]) -> Result<Options, String> {
        Options::from_args(args.iter().map(|arg| arg.to_string()))
    }

    #[test]
    fn file_only() {
        assert_eq!(
            parse(&["program.rill"]),
            Ok(Options {
                file: "program.rill".to_owned(),
                locations: false,
            })
        );
    }

    #[test]
    fn locations_flag() {
        let options = parse(&["--locations", "program.rill"]).unwrap();
        assert!(options.locations);
        assert_eq!(options.file, "program.rill");

        let options = parse(&["program.rill", "-l"]).unwrap();
        assert!(options.locations);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["--nope", "program.rill"]).is_err());
        assert!(parse(&["a.rill", "b.rill"]).is_err());
    }
}
