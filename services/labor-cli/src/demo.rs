use crate::infra::{InMemoryEventPublisher, InMemoryLaborResourceRepository, OpenPersonDirectory};
use chrono::{Duration, NaiveDate};
use clap::Args;
use labor_core::config::AppConfig;
use labor_core::error::AppError;
use labor_core::labor::{
    BrandId, EmploymentEvent, EmploymentTerms, EmploymentType, EnterpriseId, FixedClock,
    LaborDomainService, LaborPolicyId, PersonId,
};
use std::sync::Arc;
use tracing::info;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Override the current date used for timestamps and cancellations (defaults to today, UTC).
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) fn run_demo(args: DemoArgs, config: &AppConfig) -> Result<(), AppError> {
    let today = crate::infra::resolve_today(args.today);
    let repository = Arc::new(InMemoryLaborResourceRepository::default());
    let publisher = Arc::new(InMemoryEventPublisher::default());
    let service = LaborDomainService::with_clock(
        repository,
        publisher.clone(),
        Arc::new(OpenPersonDirectory),
        Arc::new(FixedClock::on(today)),
        config.labor,
    );

    println!("Employment lifecycle demo");
    println!(
        "- today {} | conflict policy {}",
        today,
        config.labor.conflict_policy.label()
    );

    let person = PersonId::from("person-ada");
    let barista = EmploymentTerms {
        employment_type: EmploymentType::FullTime,
        enterprise_id: EnterpriseId::from("ent-harbor"),
        brand_id: BrandId::from("brand-harbor-coffee"),
        labor_policy_id: LaborPolicyId::from("policy-standard"),
        position: "Barista".to_string(),
        department: Some("Front of house".to_string()),
        start_date: today,
        end_date: Some(today + Duration::days(364)),
    };

    let pending = service.create_employment(&person, barista)?;
    let resource_id = pending.labor_resource_id().clone();
    describe("Hired", &pending);

    let active = service.onboard(&resource_id, pending.id(), today, Some("first shift"))?;
    describe("Onboarded", &active);

    let courier = EmploymentTerms {
        employment_type: EmploymentType::Contractor,
        enterprise_id: EnterpriseId::from("ent-swift"),
        brand_id: BrandId::from("brand-swift-delivery"),
        labor_policy_id: LaborPolicyId::from("policy-gig"),
        position: "Courier".to_string(),
        department: None,
        start_date: today + Duration::days(30),
        end_date: None,
    };
    let side_gig = match service.create_employment(&person, courier) {
        Ok(snapshot) => {
            describe("Side gig accepted", &snapshot);
            Some(snapshot)
        }
        Err(err) => {
            println!("- Side gig rejected: {err}");
            None
        }
    };

    let leaving = service.initiate_leaving(
        &resource_id,
        active.id(),
        today + Duration::days(90),
        Some("relocating"),
    )?;
    describe("Leaving", &leaving);

    let terminated = service.terminate_employment(&resource_id, leaving.id(), None)?;
    describe("Terminated", &terminated);

    if let Some(gig) = side_gig {
        let canceled = service.cancel_employment(&resource_id, gig.id(), Some("gig withdrawn"))?;
        describe("Side gig canceled", &canceled);
    }

    let resource = service.labor_resource(&resource_id)?;
    println!("\nBarista chain for {}", resource.person_id());
    for snapshot in resource.chain(pending.id()) {
        println!(
            "  v{} {:<15} {} ({})",
            snapshot.version(),
            snapshot.status().label(),
            snapshot.time_range(),
            snapshot.description()
        );
    }

    let events = publisher.events();
    info!(events = events.len(), "demo finished");
    println!("\nPublished events");
    for event in &events {
        println!("  - {}", serde_json::to_string(event)?);
    }

    Ok(())
}

fn describe(step: &str, snapshot: &EmploymentEvent) {
    println!(
        "- {step}: {} at {} as {} [{}] {}",
        snapshot.employment_type().label(),
        snapshot.enterprise_id(),
        snapshot.position(),
        snapshot.status(),
        snapshot.time_range()
    );
}
