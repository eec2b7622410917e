use std::env;
use std::process::Command;

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

const UNKNOWN: &str = "unknown";
const SHORT_COMMIT_LEN: usize = 7;

/// Provenance baked into `lightwire --version`.
struct BuildStamp {
    commit: Option<String>,
    date: Option<String>,
}

impl BuildStamp {
    /// CI variables win over the local checkout; `SOURCE_DATE_EPOCH` covers
    /// tarball builds with no git history.
    fn detect() -> Self {
        let commit = env::var("GITHUB_SHA")
            .ok()
            .filter(|sha| !sha.is_empty())
            .or_else(|| git_stdout(&["rev-parse", "HEAD"]));
        let date = git_stdout(&["log", "-1", "--format=%cI"]).or_else(epoch_date);
        Self { commit, date }
    }

    fn short_commit(&self) -> &str {
        self.commit
            .as_deref()
            .map_or(UNKNOWN, |sha| sha.get(..SHORT_COMMIT_LEN).unwrap_or(sha))
    }
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    for var in ["GITHUB_SHA", "SOURCE_DATE_EPOCH"] {
        println!("cargo:rerun-if-env-changed={var}");
    }

    let stamp = BuildStamp::detect();
    let vars = [
        ("LIGHTWIRE_BUILD_COMMIT", stamp.short_commit()),
        (
            "LIGHTWIRE_BUILD_COMMIT_FULL",
            stamp.commit.as_deref().unwrap_or(UNKNOWN),
        ),
        ("LIGHTWIRE_BUILD_DATE", stamp.date.as_deref().unwrap_or(UNKNOWN)),
    ];
    for (key, value) in vars {
        println!("cargo:rustc-env={key}={value}");
    }
}

fn git_stdout(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    let text = String::from_utf8(output.stdout).ok()?;
    let text = text.trim();
    (output.status.success() && !text.is_empty()).then(|| text.to_string())
}

fn epoch_date() -> Option<String> {
    let epoch: i64 = env::var("SOURCE_DATE_EPOCH").ok()?.parse().ok()?;
    OffsetDateTime::from_unix_timestamp(epoch)
        .ok()?
        .format(&Rfc3339)
        .ok()
}
