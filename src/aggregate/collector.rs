//! Aggregation pass: walks `<root>/<project>/<subdirectory>/purls.yml` via
//! `ServiceContext` ports and merges every manifest into one document.

use std::collections::HashMap;
use std::path::Path;

use crate::aggregate::{AggregateReport, EntryFailure, Overwrite, PurlDocument, VERSION_KEY};
use crate::config::{CollisionPolicy, Config};
use crate::context::ServiceContext;
use crate::error::{EntryError, PurlError, Result};
use crate::manifest::{Manifest, MANIFEST_FILE};

/// Builds the purl document for `config.resource_dir` without writing it.
///
/// Projects and subdirectories are visited in sorted order. Failures for a
/// single project or subdirectory are logged, recorded in the report, and
/// skipped. Names that are not valid UTF-8 are still visited; they are
/// converted lossily only for document keys and log lines.
///
/// # Errors
///
/// Returns [`PurlError::ResourceRoot`] if the resource root cannot be listed.
pub fn collect(ctx: &ServiceContext, config: &Config) -> Result<AggregateReport> {
    let root = &config.resource_dir;
    let projects = ctx
        .fs
        .list_dir(root)
        .map_err(|source| PurlError::ResourceRoot {
            path: root.clone(),
            source,
        })?;

    let mut state = Collector {
        policy: config.on_collision,
        owners: HashMap::new(),
        report: AggregateReport {
            document: PurlDocument::new(config.version.clone()),
            failures: Vec::new(),
            overwrites: Vec::new(),
        },
    };

    for project_name in projects {
        let project_path = root.join(&project_name);
        let project = project_name.to_string_lossy();
        let subdirs = match ctx.fs.list_dir(&project_path) {
            Ok(subdirs) => subdirs,
            Err(e) => {
                let error = EntryError::Io {
                    path: project_path,
                    details: e.to_string(),
                };
                state.fail(&project, error);
                continue;
            }
        };
        tracing::debug!(
            project = %project,
            subdirectories = subdirs.len(),
            "scanning project"
        );

        for sub in subdirs {
            let sub_path = project_path.join(&sub);
            let key = sub.to_string_lossy().into_owned();
            match load_entry(ctx, &sub_path, &key) {
                Ok(manifest) => state.insert(&project, &sub_path, key, manifest.purls),
                Err(e) => state.fail(&project, e),
            }
        }
    }

    Ok(state.report)
}

/// Serializes `document` as indented JSON and overwrites `path`.
///
/// # Errors
///
/// Returns [`PurlError::Serialize`] or [`PurlError::WriteOutput`].
pub fn write_document(ctx: &ServiceContext, path: &Path, document: &PurlDocument) -> Result<()> {
    let json = document.to_json_pretty()?;
    ctx.fs
        .write(path, &json)
        .map_err(|source| PurlError::WriteOutput {
            path: path.to_path_buf(),
            source,
        })
}

/// Collects the document, writes it to `config.output_path`, and logs a summary.
///
/// # Errors
///
/// Returns an error if the resource root cannot be listed or the output
/// cannot be written. Per-entry failures never fail the run.
pub fn run(ctx: &ServiceContext, config: &Config) -> Result<AggregateReport> {
    let report = collect(ctx, config)?;
    write_document(ctx, &config.output_path, &report.document)?;

    tracing::info!(
        output = %config.output_path.display(),
        version = %report.document.version(),
        entries = report.document.len(),
        failures = report.failures.len(),
        by_kind = ?report.failure_counts(),
        overwrites = report.overwrites.len(),
        "wrote purl document"
    );
    Ok(report)
}

fn load_entry(
    ctx: &ServiceContext,
    sub_path: &Path,
    key: &str,
) -> std::result::Result<Manifest, EntryError> {
    if key == VERSION_KEY {
        return Err(EntryError::ReservedKey {
            path: sub_path.to_path_buf(),
            key: key.to_string(),
        });
    }
    Manifest::load(ctx, &sub_path.join(MANIFEST_FILE))
}

struct Collector {
    policy: CollisionPolicy,
    /// Which project produced each key so far.
    owners: HashMap<String, String>,
    report: AggregateReport,
}

impl Collector {
    fn insert(&mut self, project: &str, sub_path: &Path, key: String, purls: Vec<String>) {
        if let Some(first) = self.owners.get(&key) {
            match self.policy {
                CollisionPolicy::Overwrite => {
                    tracing::warn!(
                        key = %key,
                        replaced = %first,
                        project = %project,
                        "duplicate subdirectory name, overwriting earlier entry"
                    );
                    self.report.overwrites.push(Overwrite {
                        key: key.clone(),
                        replaced_project: first.clone(),
                        project: project.to_string(),
                    });
                }
                CollisionPolicy::Error => {
                    let error = EntryError::Duplicate {
                        path: sub_path.to_path_buf(),
                        key,
                        first_project: first.clone(),
                    };
                    self.fail(project, error);
                    return;
                }
            }
        }
        self.owners.insert(key.clone(), project.to_string());
        self.report.document.insert(key, purls);
    }

    fn fail(&mut self, project: &str, error: EntryError) {
        tracing::warn!(
            project = %project,
            kind = error.kind(),
            "could not handle entry: {error}"
        );
        self.report.failures.push(EntryFailure {
            project: project.to_string(),
            error,
        });
    }
}
