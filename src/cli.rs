use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use srt_calendar_core::{FixtureFormat, TitleStyle};

#[derive(Parser, Debug)]
#[command(name = "srt-calendar")]
#[command(about = "Generate an iCalendar (.ics) file for your booked SRT trains")]
#[command(after_help = "Credentials are read from the SRT_IDEN and SRT_PASSWORD \
    environment variables (a .env file in the working directory is also loaded).")]
pub struct Cli {
    /// Output .ics file path
    #[arg(long, default_value = "calendar.ics")]
    pub out: PathBuf,

    /// Use reservations from the fixture file instead of logging in to SRT
    #[arg(long)]
    pub debug: bool,

    /// Fixture file read in debug mode
    #[arg(long, default_value = "fixtures/reservations.json")]
    pub fixture: PathBuf,

    /// Fixture format (defaults to the file extension, then JSON)
    #[arg(long, value_enum)]
    pub fixture_format: Option<FixtureFormatArg>,

    /// How event titles are written
    #[arg(long, value_enum, default_value_t = TitleStyleArg::Reservation)]
    pub title_style: TitleStyleArg,

    /// Only export reservations that have been paid
    #[arg(long)]
    pub paid_only: bool,

    /// Timeout for each SRT request in seconds (0 disables it)
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Calendar name shown by calendar apps (X-WR-CALNAME)
    #[arg(long)]
    pub calendar_name: Option<String>,

    /// Publishing token; not used here, accepted so the publish step can share arguments
    #[arg(long)]
    pub token: Option<String>,

    /// Print debug logs
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.timeout > 0).then(|| Duration::from_secs(self.timeout))
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FixtureFormatArg {
    Json,
    Toml,
}

impl From<FixtureFormatArg> for FixtureFormat {
    fn from(arg: FixtureFormatArg) -> Self {
        match arg {
            FixtureFormatArg::Json => FixtureFormat::Json,
            FixtureFormatArg::Toml => FixtureFormat::Toml,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TitleStyleArg {
    /// "<예약>수서→부산: 3-12A" (marks unpaid reservations)
    Reservation,
    /// "SRT 381 수서→부산: 3-12A"
    Train,
}

impl From<TitleStyleArg> for TitleStyle {
    fn from(arg: TitleStyleArg) -> Self {
        match arg {
            TitleStyleArg::Reservation => TitleStyle::Reservation,
            TitleStyleArg::Train => TitleStyle::Train,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["srt-calendar"]);

        assert_eq!(cli.out, PathBuf::from("calendar.ics"));
        assert!(!cli.debug);
        assert_eq!(cli.fixture, PathBuf::from("fixtures/reservations.json"));
        assert_eq!(cli.title_style, TitleStyleArg::Reservation);
        assert_eq!(cli.request_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(cli.token, None);
    }

    #[test]
    fn test_token_is_accepted() {
        let cli = Cli::parse_from(["srt-calendar", "--out", "x.ics", "--token", "abc"]);
        assert_eq!(cli.token.as_deref(), Some("abc"));
        assert_eq!(cli.out, PathBuf::from("x.ics"));
    }

    #[test]
    fn test_zero_timeout_disables_it() {
        let cli = Cli::parse_from(["srt-calendar", "--timeout", "0"]);
        assert_eq!(cli.request_timeout(), None);
    }

    #[test]
    fn test_value_enums() {
        let cli = Cli::parse_from([
            "srt-calendar",
            "--title-style",
            "train",
            "--fixture-format",
            "toml",
        ]);

        assert_eq!(TitleStyle::from(cli.title_style), TitleStyle::Train);
        assert_eq!(cli.fixture_format.map(FixtureFormat::from), Some(FixtureFormat::Toml));
    }
}
