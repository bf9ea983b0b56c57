//! Command-line arguments
//!
//! Parsed by hand: the flag set is small and fixed.

use anyhow::{Result, bail};
use common::Secret;

pub const USAGE: &str = "\
Usage: hlo-cli [--config <path>] [--user-token <token>] [--access-token <token>] [--save-access-token]

Options:
  --config <path>            Config file (default: $HLO_CONFIG or ./hlo-cli.toml)
  -u, --user-token <token>   HeroLab Online API user token
  -a, --access-token <token> HeroLab Online API access token
  --save-access-token        Store the access token in the token directory
  -h, --help                 Print this help

If an access token is available it is used as is. Otherwise a user token is
exchanged for one. Tokens not given on the command line are read from
HLO_ACCESS_TOKEN / HLO_USER_TOKEN, then from <home>/.hlo-api/, and finally
prompted for.";

#[derive(Debug, Default)]
pub struct Args {
    pub config: Option<String>,
    pub user_token: Option<Secret<String>>,
    pub access_token: Option<Secret<String>>,
    pub save_access_token: bool,
    pub help: bool,
}

impl Args {
    /// Parse arguments, excluding the program name.
    pub fn parse<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut parsed = Args::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            // --flag=value is accepted as well as --flag value
            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) if flag.starts_with("--") => {
                    (flag.to_string(), Some(value.to_string()))
                }
                _ => (arg.clone(), None),
            };
            let mut value = || -> Result<String> {
                match inline.clone().or_else(|| args.next()) {
                    Some(value) => Ok(value),
                    None => bail!("{flag} requires a value"),
                }
            };

            match flag.as_str() {
                "--config" => parsed.config = Some(value()?),
                "-u" | "--user-token" => parsed.user_token = token(value()?),
                "-a" | "--access-token" => parsed.access_token = token(value()?),
                "--save-access-token" => parsed.save_access_token = true,
                "-h" | "--help" => parsed.help = true,
                other => bail!("unknown argument: {other}\n\n{USAGE}"),
            }
        }

        Ok(parsed)
    }
}

fn token(value: String) -> Option<Secret<String>> {
    let value = value.trim();
    (!value.is_empty()).then(|| Secret::new(value.to_owned()))
}
