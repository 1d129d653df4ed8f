//! Command-line surface.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::{
    axis::InstanceRequest,
    config::{VERSION, WEIGHT, WIDTH},
};

#[derive(Debug, Parser)]
#[command(name = "vf2s", version = VERSION, disable_version_flag = true)]
#[command(about = "Create a uniquely named static instance of a variable font")]
pub struct Cli {
    /// Weight axis value (300-800)
    #[arg(long, default_value_t = WEIGHT.default)]
    pub weight: i32,

    /// Width axis value (60-100)
    #[arg(long, default_value_t = WIDTH.default)]
    pub width: i32,

    /// Print version and exit
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: (),

    /// Input variable font
    pub path: PathBuf,
}

impl Cli {
    pub fn request(&self) -> InstanceRequest {
        InstanceRequest::new(Some(self.weight), Some(self.width), &self.path)
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, error::ErrorKind};

    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["vf2s", "OpenSans-VF.ttf"]).unwrap();
        assert_eq!(cli.request(), InstanceRequest::new(Some(400), Some(100), "OpenSans-VF.ttf"));
    }

    #[test]
    fn explicit_values() {
        let cli =
            Cli::try_parse_from(["vf2s", "--weight", "700", "--width", "75", "a.ttf"]).unwrap();
        assert_eq!((cli.weight, cli.width), (700, 75));
    }

    #[test]
    fn out_of_range_values_reach_the_validator() {
        let cli = Cli::try_parse_from(["vf2s", "--weight", "299", "a.ttf"]).unwrap();
        assert_eq!(cli.weight, 299);
    }

    #[test]
    fn short_v_prints_version() {
        let err = Cli::try_parse_from(["vf2s", "-v"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayVersion);
        assert_eq!(err.to_string().trim(), "vf2s v0.6.0");
    }

    #[test]
    fn path_is_required() {
        let err = Cli::try_parse_from(["vf2s"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn non_integer_weight_is_a_usage_error() {
        let err = Cli::try_parse_from(["vf2s", "--weight", "bold", "a.ttf"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn command_is_consistent() {
        Cli::command().debug_assert();
    }
}
