//! Scripted lifecycle replays.
//!
//! A script is a JSON array of steps tagged by `command`. Employments are named by
//! an alias chosen at `create_employment`; later steps refer to the alias and the
//! replay tracks which snapshot currently heads that chain. A failing step is
//! reported and the replay carries on.

use crate::infra::{InMemoryEventPublisher, InMemoryLaborResourceRepository, OpenPersonDirectory};
use chrono::NaiveDate;
use clap::Args;
use labor_core::config::AppConfig;
use labor_core::error::AppError;
use labor_core::labor::{
    ConflictPolicy, EmploymentEvent, EmploymentEventId, EmploymentTerms, FixedClock,
    LaborDomainService, LaborEvent, LaborResource, LaborResourceId, LaborServiceError, PersonId,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Args, Debug)]
pub(crate) struct ReplayArgs {
    /// Path to a JSON array of lifecycle commands
    pub(crate) script: PathBuf,
    /// Override the current date used for timestamps and cancellations (defaults to today, UTC).
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub(crate) enum ReplayStep {
    CreateLaborResource {
        person_id: PersonId,
    },
    CreateEmployment {
        person_id: PersonId,
        alias: String,
        terms: EmploymentTerms,
    },
    Onboard {
        employment: String,
        date: NaiveDate,
        #[serde(default)]
        remarks: Option<String>,
    },
    InitiateLeaving {
        employment: String,
        date: NaiveDate,
        #[serde(default)]
        remarks: Option<String>,
    },
    Terminate {
        employment: String,
        #[serde(default)]
        remarks: Option<String>,
    },
    Cancel {
        employment: String,
        #[serde(default)]
        remarks: Option<String>,
    },
    UpdatePosition {
        employment: String,
        position: String,
        #[serde(default)]
        department: Option<String>,
    },
}

impl ReplayStep {
    fn name(&self) -> &'static str {
        match self {
            ReplayStep::CreateLaborResource { .. } => "create_labor_resource",
            ReplayStep::CreateEmployment { .. } => "create_employment",
            ReplayStep::Onboard { .. } => "onboard",
            ReplayStep::InitiateLeaving { .. } => "initiate_leaving",
            ReplayStep::Terminate { .. } => "terminate",
            ReplayStep::Cancel { .. } => "cancel",
            ReplayStep::UpdatePosition { .. } => "update_position",
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct StepFailure {
    pub(crate) step: usize,
    pub(crate) command: &'static str,
    pub(crate) error: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ReplayReport {
    pub(crate) today: NaiveDate,
    pub(crate) conflict_policy: ConflictPolicy,
    pub(crate) resources: Vec<LaborResource>,
    pub(crate) events: Vec<LaborEvent>,
    pub(crate) failures: Vec<StepFailure>,
}

/// Where an aliased employment lives and which snapshot currently heads its chain.
#[derive(Debug, Clone)]
struct Handle {
    labor_resource_id: LaborResourceId,
    head: EmploymentEventId,
}

#[derive(Debug, thiserror::Error)]
enum StepError {
    #[error("unknown employment alias '{0}'")]
    UnknownAlias(String),
    #[error("employment alias '{0}' already used")]
    DuplicateAlias(String),
    #[error(transparent)]
    Service(#[from] LaborServiceError),
}

pub(crate) fn run_replay(args: ReplayArgs, config: &AppConfig) -> Result<(), AppError> {
    let raw = std::fs::read_to_string(&args.script)?;
    let steps: Vec<ReplayStep> = serde_json::from_str(&raw)?;
    let today = crate::infra::resolve_today(args.today);

    info!(
        script = %args.script.display(),
        steps = steps.len(),
        %today,
        "replaying lifecycle script"
    );

    let report = replay(steps, today, config)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

pub(crate) fn replay(
    steps: Vec<ReplayStep>,
    today: NaiveDate,
    config: &AppConfig,
) -> Result<ReplayReport, AppError> {
    let repository = Arc::new(InMemoryLaborResourceRepository::default());
    let publisher = Arc::new(InMemoryEventPublisher::default());
    let service = LaborDomainService::with_clock(
        repository.clone(),
        publisher.clone(),
        Arc::new(OpenPersonDirectory),
        Arc::new(FixedClock::on(today)),
        config.labor,
    );

    let mut handles: HashMap<String, Handle> = HashMap::new();
    let mut failures = Vec::new();

    for (index, step) in steps.into_iter().enumerate() {
        let command = step.name();
        if let Err(err) = apply(&service, &mut handles, step) {
            warn!(step = index + 1, command, error = %err, "replay step failed");
            failures.push(StepFailure {
                step: index + 1,
                command,
                error: err.to_string(),
            });
        }
    }

    let resources = repository
        .all()
        .map_err(|err| AppError::Labor(err.into()))?;

    Ok(ReplayReport {
        today,
        conflict_policy: config.labor.conflict_policy,
        resources,
        events: publisher.events(),
        failures,
    })
}

fn apply(
    service: &LaborDomainService<InMemoryLaborResourceRepository, InMemoryEventPublisher>,
    handles: &mut HashMap<String, Handle>,
    step: ReplayStep,
) -> Result<(), StepError> {
    match step {
        ReplayStep::CreateLaborResource { person_id } => {
            service.create_labor_resource(&person_id)?;
        }
        ReplayStep::CreateEmployment {
            person_id,
            alias,
            terms,
        } => {
            if handles.contains_key(&alias) {
                return Err(StepError::DuplicateAlias(alias));
            }
            let snapshot = service.create_employment(&person_id, terms)?;
            track(handles, alias, &snapshot);
        }
        ReplayStep::Onboard {
            employment,
            date,
            remarks,
        } => {
            let handle = lookup(handles, &employment)?;
            let snapshot = service.onboard(
                &handle.labor_resource_id,
                &handle.head,
                date,
                remarks.as_deref(),
            )?;
            track(handles, employment, &snapshot);
        }
        ReplayStep::InitiateLeaving {
            employment,
            date,
            remarks,
        } => {
            let handle = lookup(handles, &employment)?;
            let snapshot = service.initiate_leaving(
                &handle.labor_resource_id,
                &handle.head,
                date,
                remarks.as_deref(),
            )?;
            track(handles, employment, &snapshot);
        }
        ReplayStep::Terminate {
            employment,
            remarks,
        } => {
            let handle = lookup(handles, &employment)?;
            let snapshot = service.terminate_employment(
                &handle.labor_resource_id,
                &handle.head,
                remarks.as_deref(),
            )?;
            track(handles, employment, &snapshot);
        }
        ReplayStep::Cancel {
            employment,
            remarks,
        } => {
            let handle = lookup(handles, &employment)?;
            let snapshot = service.cancel_employment(
                &handle.labor_resource_id,
                &handle.head,
                remarks.as_deref(),
            )?;
            track(handles, employment, &snapshot);
        }
        ReplayStep::UpdatePosition {
            employment,
            position,
            department,
        } => {
            let handle = lookup(handles, &employment)?;
            service.update_position(
                &handle.labor_resource_id,
                &handle.head,
                &position,
                department.as_deref(),
            )?;
        }
    }
    Ok(())
}

fn lookup(handles: &HashMap<String, Handle>, alias: &str) -> Result<Handle, StepError> {
    handles
        .get(alias)
        .cloned()
        .ok_or_else(|| StepError::UnknownAlias(alias.to_string()))
}

fn track(handles: &mut HashMap<String, Handle>, alias: String, snapshot: &EmploymentEvent) {
    handles.insert(
        alias,
        Handle {
            labor_resource_id: snapshot.labor_resource_id().clone(),
            head: snapshot.id().clone(),
        },
    );
}
