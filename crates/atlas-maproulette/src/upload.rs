//! Upload driver: flag logs in, one challenge per check out.
//!
//! A run reads every log in the input folder, narrows the flags by check name
//! and country, groups them by check, and then for each check (in name order)
//! creates a challenge followed by its tasks in batches. Calls are strictly
//! sequential; a challenge always exists before its first task is sent.
//!
//! Runs are not idempotent unless [`UploadRequest::reuse_challenges`] is set:
//! uploading the same folder twice creates every challenge twice.

use std::path::PathBuf;

use atlas_config::ChecksConfig;
use atlas_core::{CoreError, FlagRecord};
use atlas_logs::{group_by_check, read_log_dir};
use serde::Serialize;

use crate::api::{MapRouletteApi, ProjectRequest};
use crate::challenge::build_challenge;
use crate::error::MapRouletteError;
use crate::task::{TaskRequest, build_task};

/// Largest batch the MapRoulette `/tasks` endpoint accepts.
pub const MAX_BATCH_SIZE: usize = 5000;

/// Project the challenges are created in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectSelector {
    /// An existing project id, used as is.
    Id(u64),
    /// A project name, looked up and created if missing.
    Name(String),
}

#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Folder holding `.log` / `.log.gz` files.
    pub input_folder: PathBuf,
    /// Atlas Checks `configuration.json`.
    pub checks_config: PathBuf,
    pub project: ProjectSelector,
    /// ISO3 codes to keep. Empty keeps every flag.
    pub countries: Vec<String>,
    /// Check names to keep. Empty keeps every flag.
    pub checks: Vec<String>,
    /// Look up a challenge by name before creating it.
    pub reuse_challenges: bool,
    pub batch_size: usize,
}

impl UploadRequest {
    /// A request with no filters, no reuse, and the service's maximum batch size.
    #[must_use]
    pub fn new(
        input_folder: impl Into<PathBuf>,
        checks_config: impl Into<PathBuf>,
        project: ProjectSelector,
    ) -> Self {
        Self {
            input_folder: input_folder.into(),
            checks_config: checks_config.into(),
            project,
            countries: Vec::new(),
            checks: Vec::new(),
            reuse_challenges: false,
            batch_size: MAX_BATCH_SIZE,
        }
    }
}

/// Outcome for one check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChallengeUpload {
    pub check: String,
    pub challenge_id: u64,
    pub tasks: usize,
    pub batches: usize,
    /// The challenge already existed and was not created by this run.
    pub reused: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadSummary {
    pub project_id: u64,
    pub challenges: Vec<ChallengeUpload>,
}

impl UploadSummary {
    #[must_use]
    pub fn total_tasks(&self) -> usize {
        self.challenges.iter().map(|c| c.tasks).sum()
    }
}

/// Progress notifications emitted while a run is under way.
#[derive(Debug, Clone, Copy)]
pub enum UploadEvent<'a> {
    /// Flags are grouped; this many challenges will be uploaded.
    Planned { challenges: usize, flags: usize },
    /// A challenge and all of its tasks are uploaded.
    ChallengeDone(&'a ChallengeUpload),
}

/// Keep the flags matching the check and country filters.
///
/// An empty filter keeps everything. Country codes compare case-insensitively
/// against every code of a multi-country flag.
///
/// # Errors
///
/// Returns [`CoreError::MalformedFlag`] when the check filter is active and a
/// record has no string `generator`.
pub fn select_flags(
    records: Vec<FlagRecord>,
    checks: &[String],
    countries: &[String],
) -> Result<Vec<FlagRecord>, CoreError> {
    let mut selected = Vec::with_capacity(records.len());
    for record in records {
        if !checks.is_empty() {
            let name = record.check_name()?;
            if !checks.iter().any(|check| check == name) {
                continue;
            }
        }
        if !countries.is_empty() {
            let codes = record.country_codes();
            let matches = codes
                .iter()
                .any(|code| countries.iter().any(|want| want.eq_ignore_ascii_case(code)));
            if !matches {
                continue;
            }
        }
        selected.push(record);
    }
    Ok(selected)
}

/// Drives one upload against a [`MapRouletteApi`].
pub struct Uploader<A> {
    api: A,
}

impl<A: MapRouletteApi> Uploader<A> {
    pub const fn new(api: A) -> Self {
        Self { api }
    }

    pub const fn api(&self) -> &A {
        &self.api
    }

    /// Run an upload without progress reporting.
    ///
    /// # Errors
    ///
    /// See [`run_with`](Self::run_with).
    pub async fn run(&self, request: &UploadRequest) -> Result<UploadSummary, MapRouletteError> {
        self.run_with(request, |_| {}).await
    }

    /// Run an upload, calling `on_event` as it progresses.
    ///
    /// # Errors
    ///
    /// Fails on the first unreadable input (config or log), malformed flag,
    /// or remote call that still fails after retries. Challenges created
    /// before the failure are left in place.
    pub async fn run_with<F>(
        &self,
        request: &UploadRequest,
        mut on_event: F,
    ) -> Result<UploadSummary, MapRouletteError>
    where
        F: FnMut(UploadEvent<'_>),
    {
        let config = ChecksConfig::from_path(&request.checks_config)?;
        let project_id = self.resolve_project(&request.project).await?;

        let records = read_log_dir(&request.input_folder)?;
        let read = records.len();
        let records = select_flags(records, &request.checks, &request.countries)?;
        tracing::info!(
            read,
            selected = records.len(),
            folder = %request.input_folder.display(),
            "loaded flags"
        );
        let flag_count = records.len();
        let groups = group_by_check(records)?;
        on_event(UploadEvent::Planned {
            challenges: groups.len(),
            flags: flag_count,
        });

        let batch_size = request.batch_size.max(1);
        let mut challenges = Vec::with_capacity(groups.len());
        for (check, flags) in &groups {
            let upload = self
                .upload_check(&config, project_id, check, flags, batch_size, request.reuse_challenges)
                .await?;
            on_event(UploadEvent::ChallengeDone(&upload));
            challenges.push(upload);
        }

        Ok(UploadSummary {
            project_id,
            challenges,
        })
    }

    async fn resolve_project(&self, selector: &ProjectSelector) -> Result<u64, MapRouletteError> {
        match selector {
            ProjectSelector::Id(id) => Ok(*id),
            ProjectSelector::Name(name) => {
                if let Some(id) = self.api.find_project(name).await? {
                    tracing::debug!(project = %name, id, "found project");
                    return Ok(id);
                }
                tracing::info!(project = %name, "project not found, creating it");
                self.api.create_project(&ProjectRequest::named(name.as_str())).await
            }
        }
    }

    async fn upload_check(
        &self,
        config: &ChecksConfig,
        project_id: u64,
        check: &str,
        flags: &[FlagRecord],
        batch_size: usize,
        reuse: bool,
    ) -> Result<ChallengeUpload, MapRouletteError> {
        let existing = if reuse {
            self.api.find_challenge(project_id, check).await?
        } else {
            None
        };
        let (challenge_id, reused) = match existing {
            Some(id) => {
                tracing::info!(check, id, "reusing existing challenge");
                (id, true)
            }
            None => {
                let challenge = build_challenge(config, check, project_id);
                (self.api.create_challenge(&challenge).await?, false)
            }
        };

        let tasks: Vec<TaskRequest> = flags.iter().map(|flag| build_task(flag, challenge_id)).collect();
        let mut batches = 0;
        for batch in tasks.chunks(batch_size) {
            let response = self.api.create_tasks(batch).await?;
            batches += 1;
            tracing::info!(check, challenge_id, batch = batches, tasks = batch.len(), %response, "uploaded task batch");
        }

        Ok(ChallengeUpload {
            check: check.to_owned(),
            challenge_id,
            tasks: tasks.len(),
            batches,
            reused,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn flag(check: &str, country: Option<&str>) -> FlagRecord {
        let mut properties = json!({"generator": check, "identifiers": [1]});
        if let Some(code) = country {
            properties["iso_country_code"] = json!(code);
        }
        FlagRecord::new(json!({"type": "FeatureCollection", "features": [], "properties": properties}))
    }

    fn names(records: &[FlagRecord]) -> Vec<&str> {
        records.iter().map(|r| r.check_name().unwrap()).collect()
    }

    #[test]
    fn empty_filters_keep_everything() {
        let records = vec![flag("A", None), flag("B", Some("USA"))];
        assert_eq!(select_flags(records, &[], &[]).unwrap().len(), 2);
    }

    #[test]
    fn check_filter_keeps_named_checks() {
        let records = vec![flag("A", None), flag("B", None), flag("C", None)];
        let kept = select_flags(records, &["A".into(), "C".into()], &[]).unwrap();
        assert_eq!(names(&kept), vec!["A", "C"]);
    }

    #[test]
    fn country_filter_matches_any_listed_code() {
        let records = vec![
            flag("A", Some("USA")),
            flag("B", Some("CAN,MEX")),
            flag("C", Some("FRA")),
            flag("D", None),
        ];
        let kept = select_flags(records, &[], &["mex".into(), "USA".into()]).unwrap();
        assert_eq!(names(&kept), vec!["A", "B"]);
    }

    #[test]
    fn check_filter_rejects_malformed_records() {
        let records = vec![FlagRecord::new(json!({"properties": {}}))];
        let err = select_flags(records, &["A".into()], &[]).unwrap_err();
        assert!(matches!(err, CoreError::MalformedFlag { .. }));
    }

    #[test]
    fn request_defaults() {
        let request = UploadRequest::new("logs", "config.json", ProjectSelector::Id(3));
        assert_eq!(request.batch_size, MAX_BATCH_SIZE);
        assert!(!request.reuse_challenges);
        assert!(request.checks.is_empty());
    }
}
