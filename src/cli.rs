//! Command-line interface.

use std::time::Duration;

use clap::{Parser, ValueEnum};

/// Check DELL iDRAC management controllers over Redfish.
///
/// Nagios command definitions commonly append site-wide flags to every
/// plugin invocation; the parser accepts and ignores anything it does not
/// recognize, and required flags are validated afterwards instead.
#[derive(Debug, Parser)]
#[command(
    name = "check_idrac",
    version,
    about = "Check DELL iDRAC Management Controllers",
    ignore_errors = true
)]
pub struct Cli {
    /// Hostname or IP of the target device
    #[arg(short = 'H', long)]
    pub hostname: Option<String>,

    /// Monitoring user
    #[arg(short = 'U', long, default_value = "monitor")]
    pub user: String,

    /// Monitoring user password
    #[arg(short = 'P', long)]
    pub password: Option<String>,

    /// Timeout in seconds
    #[arg(short = 't', long, default_value_t = 10)]
    pub timeout: u64,

    /// Dump each raw response into a <mode>_response.json file
    #[arg(long)]
    pub dumpresponse: bool,

    /// Subsystem to check
    #[arg(long, value_enum)]
    pub mode: Option<Mode>,
}

/// Selectable subsystem checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    Health,
    Controller,
    Powersupply,
    Disk,
    Thermal,
    Memory,
    Dellsystem,
    Version,
}

impl Mode {
    /// Name as accepted on the command line, also used for the dump file.
    pub fn name(self) -> &'static str {
        match self {
            Mode::Health => "health",
            Mode::Controller => "controller",
            Mode::Powersupply => "powersupply",
            Mode::Disk => "disk",
            Mode::Thermal => "thermal",
            Mode::Memory => "memory",
            Mode::Dellsystem => "dellsystem",
            Mode::Version => "version",
        }
    }
}

/// Flags validated past the permissive first parse.
#[derive(Debug)]
pub struct Options {
    pub hostname: String,
    pub user: String,
    pub password: String,
    pub timeout: Duration,
    pub dumpresponse: bool,
    pub mode: Mode,
}

impl Cli {
    pub fn validate(self) -> Result<Options, &'static str> {
        let hostname = self.hostname.ok_or("argument --hostname/-H is required")?;
        let password = self.password.ok_or("argument --password/-P is required")?;
        let mode = self.mode.ok_or(
            "argument --mode is required (health, controller, powersupply, disk, thermal, memory, dellsystem, version)",
        )?;
        Ok(Options {
            hostname,
            user: self.user,
            password,
            timeout: Duration::from_secs(self.timeout),
            dumpresponse: self.dumpresponse,
            mode,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("check_idrac").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_full_invocation() {
        let options = parse(&[
            "-H",
            "idrac.example.com",
            "-U",
            "nagios",
            "-P",
            "secret",
            "-t",
            "30",
            "--mode",
            "disk",
        ])
        .validate()
        .unwrap();
        assert_eq!(options.hostname, "idrac.example.com");
        assert_eq!(options.user, "nagios");
        assert_eq!(options.password, "secret");
        assert_eq!(options.timeout, Duration::from_secs(30));
        assert_eq!(options.mode, Mode::Disk);
        assert!(!options.dumpresponse);
    }

    #[test]
    fn test_defaults() {
        let options = parse(&["-H", "h", "-P", "p", "--mode", "health"])
            .validate()
            .unwrap();
        assert_eq!(options.user, "monitor");
        assert_eq!(options.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_unknown_flags_are_ignored() {
        let options = parse(&[
            "-H",
            "h",
            "-P",
            "p",
            "--mode",
            "thermal",
            "--perfdata",
            "--site",
            "dc1",
        ])
        .validate()
        .unwrap();
        assert_eq!(options.mode, Mode::Thermal);
    }

    #[test]
    fn test_missing_required_flags() {
        assert!(parse(&["-P", "p", "--mode", "health"]).validate().is_err());
        assert!(parse(&["-H", "h", "--mode", "health"]).validate().is_err());
        assert!(parse(&["-H", "h", "-P", "p"]).validate().is_err());
    }

    #[test]
    fn test_mode_names() {
        for (mode, name) in [
            (Mode::Health, "health"),
            (Mode::Powersupply, "powersupply"),
            (Mode::Dellsystem, "dellsystem"),
            (Mode::Version, "version"),
        ] {
            assert_eq!(mode.name(), name);
            let parsed = parse(&["-H", "h", "-P", "p", "--mode", name])
                .validate()
                .unwrap();
            assert_eq!(parsed.mode, mode);
        }
    }
}
