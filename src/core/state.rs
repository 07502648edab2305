//! Pipeline and stage status

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status shared by pipelines and their stages
///
/// Serialized as the variant name; deserialized case-insensitively.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Status {
    /// Not started yet
    #[default]
    Pending,
    /// Currently running
    Running,
    /// Finished successfully
    Success,
    /// Finished with a failure
    Failed,
}

impl Status {
    /// All statuses, in lifecycle order
    pub const ALL: [Status; 4] = [
        Status::Pending,
        Status::Running,
        Status::Success,
        Status::Failed,
    ];

    /// Label used in JSON, HTML and metric labels
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "Pending",
            Status::Running => "Running",
            Status::Success => "Success",
            Status::Failed => "Failed",
        }
    }

    /// Derive an overall status from stage statuses.
    ///
    /// Opt-in only: the registry never applies this on its own, a pipeline's
    /// overall status is whatever was last set on it.
    pub fn derive_from<I>(stages: I) -> Status
    where
        I: IntoIterator<Item = Status>,
    {
        let mut total = 0usize;
        let mut succeeded = 0usize;
        let mut running = false;

        for status in stages {
            total += 1;
            match status {
                Status::Failed => return Status::Failed,
                Status::Success => succeeded += 1,
                Status::Running => running = true,
                Status::Pending => {}
            }
        }

        if total > 0 && succeeded == total {
            Status::Success
        } else if running || succeeded > 0 {
            Status::Running
        } else {
            Status::Pending
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::ALL
            .iter()
            .copied()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown status: {}", s))
    }
}

impl TryFrom<String> for Status {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("success".parse::<Status>().unwrap(), Status::Success);
        assert_eq!(" RUNNING ".parse::<Status>().unwrap(), Status::Running);
        assert!("done".parse::<Status>().is_err());
    }

    #[test]
    fn test_serializes_as_variant_name() {
        let json = serde_json::to_string(&Status::Failed).unwrap();
        assert_eq!(json, "\"Failed\"");
    }

    #[test]
    fn test_deserializes_case_insensitively() {
        let status: Status = serde_json::from_str("\"success\"").unwrap();
        assert_eq!(status, Status::Success);

        let status: Status = serde_yaml::from_str("running").unwrap();
        assert_eq!(status, Status::Running);

        let err = serde_json::from_str::<Status>("\"done\"").unwrap_err();
        assert!(err.to_string().contains("Unknown status: done"));
    }

    #[test]
    fn test_derive_from_stages() {
        use Status::*;

        assert_eq!(Status::derive_from(Vec::<Status>::new()), Pending);
        assert_eq!(Status::derive_from([Pending, Pending]), Pending);
        assert_eq!(Status::derive_from([Success, Pending]), Running);
        assert_eq!(Status::derive_from([Success, Running, Pending]), Running);
        assert_eq!(Status::derive_from([Success, Success]), Success);
        assert_eq!(Status::derive_from([Success, Failed, Running]), Failed);
    }
}
