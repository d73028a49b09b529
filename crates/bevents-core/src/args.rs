//! Positional argument validation for `events list`

use crate::error::{Error, Result};

/// Validated positional arguments of `events list`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListArgs {
    /// `ALIAS/BUCKET` or URL of the bucket
    pub location: String,
    /// Target ARN to filter by, empty to list all
    pub arn: String,
}

impl ListArgs {
    /// Accepts exactly one or two positional arguments
    pub fn from_positional(args: &[String]) -> Result<Self> {
        match args {
            [location] => Ok(Self {
                location: location.clone(),
                arn: String::new(),
            }),
            [location, arn] => Ok(Self {
                location: location.clone(),
                arn: arn.clone(),
            }),
            _ => Err(Error::Usage(format!(
                "expected ALIAS/BUCKET [TARGET_ID], got {} argument(s)",
                args.len()
            ))),
        }
    }

    /// Whether a target filter was given
    pub fn is_filtered(&self) -> bool {
        !self.arn.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_accepts_one_or_two() {
        let parsed = ListArgs::from_positional(&args(&["myminio/mybucket"])).unwrap();
        assert_eq!(parsed.location, "myminio/mybucket");
        assert_eq!(parsed.arn, "");
        assert!(!parsed.is_filtered());

        let parsed = ListArgs::from_positional(&args(&[
            "myminio/mybucket",
            "arn:minio:sqs::1:webhook",
        ]))
        .unwrap();
        assert_eq!(parsed.arn, "arn:minio:sqs::1:webhook");
        assert!(parsed.is_filtered());
    }

    #[test]
    fn test_rejects_other_counts() {
        for count in [0usize, 3, 4, 7] {
            let items: Vec<String> = (0..count).map(|i| format!("arg{}", i)).collect();
            let err = ListArgs::from_positional(&items).unwrap_err();
            assert!(err.is_usage(), "count {} should be a usage error", count);
        }
    }
}
