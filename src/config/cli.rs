// src/config/cli.rs
use super::models::DEFAULT_PORT;
use clap::Parser;
use std::ffi::OsString;

#[derive(Parser, Debug)]
#[command(
    name = "sshmon-check-elasticsearch",
    about = "sshmon check for the health of an Elasticsearch cluster",
    disable_version_flag = true
)]
pub struct Cli {
    /// Print the version info and exit
    #[arg(short = 'v')]
    pub version: bool,

    /// Service name (defaults to Elasticsearch_<host>)
    #[arg(long, env = "SSHMON_ES_SERVICE", default_value = "")]
    pub service: String,

    /// Host
    #[arg(long, env = "SSHMON_ES_HOST", default_value = "")]
    pub host: String,

    /// Port
    #[arg(long, env = "SSHMON_ES_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Use alternate dns server
    #[arg(long, env = "SSHMON_ES_DNS", default_value = "")]
    pub dns: String,
}

/// Rewrite `-flag` to `--flag` so existing sshmon check definitions keep
/// working. Short flags, numbers and anything after `--` are left alone.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut passthrough = false;

    args.into_iter()
        .enumerate()
        .map(|(index, arg)| {
            let arg: OsString = arg.into();
            if index == 0 || passthrough {
                return arg;
            }

            match arg.to_str() {
                Some("--") => {
                    passthrough = true;
                    arg
                }
                Some(flag) if is_single_dash_long(flag) => OsString::from(format!("-{}", flag)),
                _ => arg,
            }
        })
        .collect()
}

fn is_single_dash_long(arg: &str) -> bool {
    let mut chars = arg.chars();
    chars.next() == Some('-')
        && chars.next().map_or(false, |c| c.is_ascii_alphabetic())
        && chars.next().is_some()
}
