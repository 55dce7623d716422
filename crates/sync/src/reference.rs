//! TMDB reference dump: every watch-provider region and every movie provider
//! name, written as a plain-text report for picking config values.

use std::collections::BTreeSet;
use std::path::Path;

use elsewherr_clients::{ReferenceList, TmdbApi};
use elsewherr_core::types::Region;
use tracing::{error, info, warn};

use crate::SyncError;

/// Report contents before rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceReport {
    pub regions: Vec<Region>,
    /// Deduplicated and sorted.
    pub providers: Vec<String>,
}

/// Fetch both reference lists and write the report to `output`.
///
/// An existing report is removed first. Any fetch failure aborts the dump,
/// leaving no report behind.
pub async fn run_reference_dump(
    tmdb: &dyn TmdbApi,
    output: &Path,
) -> Result<ReferenceReport, SyncError> {
    if output.exists() {
        info!(path = %output.display(), "removing existing report");
        std::fs::remove_file(output)?;
    }

    let regions = fetch(tmdb, ReferenceList::Regions).await?;
    let providers = fetch(tmdb, ReferenceList::MovieProviders).await?;

    let report = ReferenceReport {
        regions: parse_regions(&regions),
        providers: provider_names(&providers),
    };
    info!(
        regions = report.regions.len(),
        providers = report.providers.len(),
        "fetched reference data"
    );

    std::fs::write(output, render_report(&report))?;
    info!(path = %output.display(), "wrote report");
    Ok(report)
}

async fn fetch(
    tmdb: &dyn TmdbApi,
    list: ReferenceList,
) -> Result<Vec<serde_json::Value>, SyncError> {
    tmdb.reference_list(list).await.map_err(|e| {
        error!(list = %list, error = %e, "failed to fetch reference data");
        SyncError::Tmdb(e)
    })
}

fn parse_regions(results: &[serde_json::Value]) -> Vec<Region> {
    results
        .iter()
        .filter_map(|r| {
            let region = serde_json::from_value::<Region>(r.clone());
            if region.is_err() {
                warn!(entry = %r, "skipping malformed region");
            }
            region.ok()
        })
        .collect()
}

/// Distinct provider names in alphabetical order.
pub fn provider_names(results: &[serde_json::Value]) -> Vec<String> {
    results
        .iter()
        .filter_map(|p| p["provider_name"].as_str())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn render_report(report: &ReferenceReport) -> String {
    let mut out = String::from("Regions\n-------\n");
    for r in &report.regions {
        out.push_str(&format!("{}\t{}\n", r.iso_3166_1, r.english_name));
    }

    out.push_str("\n\nProviders\n---------\n");
    for p in &report.providers {
        out.push_str(p);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use elsewherr_clients::fake::FakeTmdb;
    use serde_json::json;

    fn temp_report(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("elsewherr_{name}_{}.txt", std::process::id()))
    }

    fn fake() -> FakeTmdb {
        FakeTmdb::new()
            .with_reference(
                ReferenceList::Regions,
                vec![json!({
                    "iso_3166_1": "US",
                    "english_name": "United States",
                    "native_name": "United States"
                })],
            )
            .with_reference(
                ReferenceList::MovieProviders,
                vec![
                    json!({ "provider_id": 8, "provider_name": "Netflix" }),
                    json!({ "provider_id": 15, "provider_name": "Hulu" }),
                    json!({ "provider_id": 8, "provider_name": "Netflix" }),
                ],
            )
    }

    #[test]
    fn provider_names_are_unique_and_sorted() {
        let names = provider_names(&[
            json!({ "provider_name": "Netflix" }),
            json!({ "provider_name": "Hulu" }),
            json!({ "provider_name": "Netflix" }),
            json!({ "provider_name": "" }),
            json!({ "provider_id": 3 }),
        ]);
        assert_eq!(names, vec!["Hulu", "Netflix"]);
    }

    #[test]
    fn report_layout() {
        let report = ReferenceReport {
            regions: vec![
                Region { iso_3166_1: "US".into(), english_name: "United States".into() },
                Region { iso_3166_1: "GB".into(), english_name: "United Kingdom".into() },
            ],
            providers: vec!["Hulu".into(), "Netflix".into()],
        };
        assert_eq!(
            render_report(&report),
            "Regions\n-------\nUS\tUnited States\nGB\tUnited Kingdom\n\n\n\
             Providers\n---------\nHulu\nNetflix\n"
        );
    }

    #[tokio::test]
    async fn dump_writes_deduplicated_report() {
        let path = temp_report("dump");
        std::fs::write(&path, "stale contents").unwrap();

        let report = run_reference_dump(&fake(), &path).await.unwrap();
        assert_eq!(report.providers, vec!["Hulu", "Netflix"]);

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(!written.contains("stale"));
        assert!(written.starts_with("Regions\n-------\nUS\tUnited States\n"));
        assert!(written.ends_with("Providers\n---------\nHulu\nNetflix\n"));
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn region_failure_aborts_before_providers() {
        let path = temp_report("regions_abort");
        std::fs::write(&path, "old").unwrap();

        let tmdb = fake().failing_reference(ReferenceList::Regions);
        let err = run_reference_dump(&tmdb, &path).await.unwrap_err();
        assert!(matches!(err, SyncError::Tmdb(_)));
        assert!(!path.exists());
        assert_eq!(tmdb.reference_lookups().await, vec![ReferenceList::Regions]);
    }

    #[tokio::test]
    async fn provider_failure_aborts_without_report() {
        let path = temp_report("abort");
        std::fs::write(&path, "old").unwrap();

        let tmdb = fake().failing_reference(ReferenceList::MovieProviders);
        let err = run_reference_dump(&tmdb, &path).await.unwrap_err();
        assert!(matches!(err, SyncError::Tmdb(_)));
        assert!(!path.exists());
    }
}
