use super::common::*;
use crate::labor::{
    BrandId, ConflictPolicy, EmploymentEventId, EmploymentStatus, EmploymentType, EnterpriseId, EntityKind,
    LaborError, LaborEvent, LaborResource, LaborResourceId, PersonId,
};

#[test]
fn create_emits_labor_resource_created() {
    let (resource, event) =
        LaborResource::create(LaborResourceId::from("labor-1"), person()).expect("resource");

    assert_eq!(resource.revision(), 0);
    assert!(resource.employments().is_empty());
    match event {
        LaborEvent::LaborResourceCreated(created) => {
            assert_eq!(created.labor_resource_id, LaborResourceId::from("labor-1"));
            assert_eq!(created.person_id, person());
        }
        other => panic!("expected labor resource created, got {other:?}"),
    }

    match LaborResource::create(LaborResourceId::from("labor-2"), PersonId::from("")) {
        Err(LaborError::DomainRule(_)) => {}
        other => panic!("expected domain rule violation, got {other:?}"),
    }
}

#[test]
fn create_employment_returns_snapshot_and_event() {
    let mut resource = resource();
    let (snapshot, event) = resource
        .create_employment(year_2023(), ConflictPolicy::AnyOverlap, &clock())
        .expect("employment created");

    assert_eq!(snapshot.status(), EmploymentStatus::PendingOnboard);
    assert_eq!(snapshot.labor_resource_id(), resource.id());
    assert_eq!(resource.employment_event(snapshot.id()), Some(&snapshot));
    match event {
        LaborEvent::EmploymentCreated(created) => {
            assert_eq!(&created.employment_event_id, snapshot.id());
            assert_eq!(created.person_id, person());
            assert_eq!(created.enterprise_id, enterprise());
            assert_eq!(created.employment_type, EmploymentType::FullTime);
            assert_eq!(created.start_date, date(2023, 1, 1));
        }
        other => panic!("expected employment created, got {other:?}"),
    }
}

#[test]
fn onboard_through_the_aggregate_appends_a_successor() {
    let mut resource = resource();
    let (pending, _) = resource
        .create_employment(year_2023(), ConflictPolicy::AnyOverlap, &clock())
        .expect("employment created");

    let (active, event) = resource
        .onboard(pending.id(), date(2023, 1, 15), None, &clock())
        .expect("onboard succeeds");

    assert_eq!(active.status(), EmploymentStatus::Active);
    assert_eq!(active.time_range().start_date(), date(2023, 1, 15));
    assert_eq!(active.time_range().end_date(), Some(date(2023, 12, 31)));
    assert_eq!(resource.employments().len(), 2);
    assert!(!resource.employments().is_current(pending.id()));
    assert_eq!(resource.current_employment_events(), vec![&active]);
    assert_eq!(
        resource.employments().current_member_of(pending.id()),
        Some(&active)
    );
    match event {
        LaborEvent::EmploymentOnboarded(onboarded) => {
            assert_eq!(&onboarded.employment_event_id, active.id());
            assert_eq!(onboarded.onboard_date, date(2023, 1, 15));
        }
        other => panic!("expected employment onboarded, got {other:?}"),
    }
}

#[test]
fn onboarding_the_active_snapshot_again_fails_without_side_effects() {
    let mut resource = resource();
    let (pending, _) = resource
        .create_employment(year_2023(), ConflictPolicy::AnyOverlap, &clock())
        .expect("employment created");
    let (active, _) = resource
        .onboard(pending.id(), date(2023, 1, 15), None, &clock())
        .expect("onboard succeeds");
    let before = resource.clone();

    match resource.onboard(active.id(), date(2023, 2, 1), None, &clock()) {
        Err(LaborError::StateTransition { status, .. }) => {
            assert_eq!(status, EmploymentStatus::Active)
        }
        other => panic!("expected state transition error, got {other:?}"),
    }
    assert_eq!(resource, before);
}

#[test]
fn superseded_and_unknown_snapshots_are_not_found() {
    let mut resource = resource();
    let (pending, _) = resource
        .create_employment(year_2023(), ConflictPolicy::AnyOverlap, &clock())
        .expect("employment created");
    resource
        .onboard(pending.id(), date(2023, 1, 15), None, &clock())
        .expect("onboard succeeds");

    match resource.cancel_employment(pending.id(), None, &clock()) {
        Err(LaborError::NotFound { entity, id }) => {
            assert_eq!(entity, EntityKind::EmploymentEvent);
            assert_eq!(id, pending.id().to_string());
        }
        other => panic!("expected not found, got {other:?}"),
    }

    match resource.terminate_employment(&EmploymentEventId::from("missing"), None, &clock()) {
        Err(LaborError::NotFound { .. }) => {}
        other => panic!("expected not found, got {other:?}"),
    }
    assert_eq!(resource.employments().len(), 2);
}

#[test]
fn leaving_before_the_chain_start_is_a_domain_rule_violation() {
    let mut resource = resource();
    let (pending, _) = resource
        .create_employment(year_2023(), ConflictPolicy::AnyOverlap, &clock())
        .expect("employment created");
    let (active, _) = resource
        .onboard(pending.id(), date(2023, 1, 15), None, &clock())
        .expect("onboard succeeds");

    match resource.initiate_leaving(active.id(), date(2022, 12, 1), None, &clock()) {
        Err(LaborError::DomainRule(_)) => {}
        other => panic!("expected domain rule violation, got {other:?}"),
    }
    assert!(resource.employments().is_current(active.id()));
}

#[test]
fn full_lifecycle_builds_one_chain() {
    let mut resource = resource();
    let (pending, _) = resource
        .create_employment(year_2023(), ConflictPolicy::AnyOverlap, &clock())
        .expect("employment created");
    let (active, _) = resource
        .onboard(pending.id(), date(2023, 1, 15), None, &clock())
        .expect("onboard");
    let (leaving, leaving_event) = resource
        .initiate_leaving(active.id(), date(2023, 5, 31), None, &clock())
        .expect("leaving");
    let (terminated, terminated_event) = resource
        .terminate_employment(leaving.id(), Some("exit interview done"), &clock())
        .expect("terminate");

    let chain: Vec<EmploymentStatus> = resource
        .chain(active.id())
        .into_iter()
        .map(|event| event.status())
        .collect();
    assert_eq!(
        chain,
        vec![
            EmploymentStatus::PendingOnboard,
            EmploymentStatus::Active,
            EmploymentStatus::Leaving,
            EmploymentStatus::Terminated,
        ]
    );
    assert_eq!(terminated.description(), "exit interview done");
    assert!(matches!(
        leaving_event,
        LaborEvent::EmploymentLeavingInitiated(ref e) if e.leaving_date == date(2023, 5, 31)
    ));
    assert_eq!(terminated_event.event_type(), "employment_terminated");
    assert!(resource.active_employment_events().is_empty());
    assert!(resource
        .chain(terminated.id())
        .iter()
        .all(|event| event.is_same_employment(&pending)));
}

#[test]
fn cancel_from_pending_ends_on_the_current_date() {
    let mut resource = resource();
    let (pending, _) = resource
        .create_employment(year_2023(), ConflictPolicy::AnyOverlap, &clock())
        .expect("employment created");

    let (canceled, event) = resource
        .cancel_employment(pending.id(), None, &clock())
        .expect("cancel succeeds");

    assert_eq!(canceled.status(), EmploymentStatus::Canceled);
    assert_eq!(canceled.time_range().end_date(), Some(today()));
    assert_eq!(event.event_type(), "employment_canceled");
    assert_eq!(event.employment_event_id(), Some(canceled.id()));
}

#[test]
fn overlapping_employment_is_rejected_under_any_overlap() {
    let mut resource = resource();
    let (first, _) = resource
        .create_employment(year_2023(), ConflictPolicy::AnyOverlap, &clock())
        .expect("first employment");
    let overlapping = terms_at(
        "ent-lighthouse",
        EmploymentType::PartTime,
        date(2023, 6, 1),
        None,
    );

    let candidate = pending_event(overlapping.clone());
    assert!(candidate.overlaps_with(&first));
    assert!(first.overlaps_with(&candidate));

    match resource.create_employment(overlapping, ConflictPolicy::AnyOverlap, &clock()) {
        Err(LaborError::DomainRule(message)) => assert!(message.contains("overlaps")),
        other => panic!("expected domain rule violation, got {other:?}"),
    }
    assert_eq!(resource.employments().len(), 1);
}

#[test]
fn same_enterprise_and_type_policy_only_blocks_matching_employments() {
    let mut resource = resource();
    resource
        .create_employment(year_2023(), ConflictPolicy::SameEnterpriseAndType, &clock())
        .expect("first employment");

    resource
        .create_employment(
            terms_at(
                "ent-lighthouse",
                EmploymentType::FullTime,
                date(2023, 6, 1),
                None,
            ),
            ConflictPolicy::SameEnterpriseAndType,
            &clock(),
        )
        .expect("other enterprise is allowed");

    let mut part_time = terms(date(2023, 3, 1), Some(date(2023, 8, 31)));
    part_time.employment_type = EmploymentType::PartTime;
    resource
        .create_employment(part_time, ConflictPolicy::SameEnterpriseAndType, &clock())
        .expect("other type at the same enterprise is allowed");

    match resource.create_employment(
        terms(date(2023, 7, 1), None),
        ConflictPolicy::SameEnterpriseAndType,
        &clock(),
    ) {
        Err(LaborError::DomainRule(_)) => {}
        other => panic!("expected domain rule violation, got {other:?}"),
    }
    assert_eq!(resource.current_employment_events().len(), 3);
}

#[test]
fn terminal_chains_do_not_block_new_employment() {
    let mut resource = resource();
    let (pending, _) = resource
        .create_employment(year_2023(), ConflictPolicy::AnyOverlap, &clock())
        .expect("first employment");
    resource
        .cancel_employment(pending.id(), None, &clock())
        .expect("cancel");

    resource
        .create_employment(year_2023(), ConflictPolicy::AnyOverlap, &clock())
        .expect("canceled employment no longer conflicts");
}

#[test]
fn superseded_snapshots_do_not_count_as_conflicts() {
    let mut resource = resource();
    let (pending, _) = resource
        .create_employment(year_2023(), ConflictPolicy::AnyOverlap, &clock())
        .expect("employment created");
    let (active, _) = resource
        .onboard(pending.id(), date(2023, 1, 15), None, &clock())
        .expect("onboard");
    resource
        .initiate_leaving(active.id(), date(2023, 2, 28), None, &clock())
        .expect("leaving");

    // The pending snapshot still spans the whole year, but only the head counts.
    resource
        .create_employment(
            terms(date(2023, 4, 1), None),
            ConflictPolicy::AnyOverlap,
            &clock(),
        )
        .expect("no overlap with the leaving head");
}

#[test]
fn active_queries_follow_current_members() {
    let mut resource = resource();
    let (pending, _) = resource
        .create_employment(year_2023(), ConflictPolicy::AnyOverlap, &clock())
        .expect("employment created");
    assert!(!resource.has_active_employment_with_enterprise(&enterprise()));

    let (active, _) = resource
        .onboard(pending.id(), date(2023, 1, 15), None, &clock())
        .expect("onboard");

    assert_eq!(resource.active_employment_events(), vec![&active]);
    assert!(resource.has_active_employment_with_enterprise(&enterprise()));
    assert!(resource.has_active_employment_with_brand(&brand()));
    assert!(!resource.has_active_employment_with_enterprise(&EnterpriseId::from("ent-other")));
    assert_eq!(resource.active_employment_events_on(date(2023, 3, 1)).len(), 1);
    assert!(resource.active_employment_events_on(date(2023, 1, 14)).is_empty());
    assert_eq!(resource.employment_events_by_enterprise(&enterprise()).len(), 2);
    assert_eq!(resource.employment_events_by_brand(&brand()).len(), 2);
}

#[test]
fn active_on_date_includes_both_range_boundaries() {
    let mut resource = resource();
    let (pending, _) = resource
        .create_employment(year_2023(), ConflictPolicy::AnyOverlap, &clock())
        .expect("employment created");
    assert!(resource.active_employment_events_on(date(2023, 6, 1)).is_empty());

    let (active, _) = resource
        .onboard(pending.id(), date(2023, 2, 1), None, &clock())
        .expect("onboard");

    assert!(resource.active_employment_events_on(date(2023, 1, 20)).is_empty());
    assert!(resource.active_employment_events_on(date(2023, 1, 31)).is_empty());
    assert_eq!(resource.active_employment_events_on(date(2023, 2, 1)), vec![&active]);
    assert_eq!(resource.active_employment_events_on(date(2023, 12, 31)), vec![&active]);
    assert!(resource.active_employment_events_on(date(2024, 1, 1)).is_empty());
}

#[test]
fn enterprise_and_brand_lookups_include_superseded_snapshots() {
    let mut resource = resource();
    let (pending, _) = resource
        .create_employment(year_2023(), ConflictPolicy::AnyOverlap, &clock())
        .expect("employment created");
    let (active, _) = resource
        .onboard(pending.id(), date(2023, 2, 1), None, &clock())
        .expect("onboard");
    let (leaving, _) = resource
        .initiate_leaving(active.id(), date(2023, 8, 31), None, &clock())
        .expect("leaving");

    let by_enterprise: Vec<&EmploymentEventId> = resource
        .employment_events_by_enterprise(&enterprise())
        .into_iter()
        .map(|event| event.id())
        .collect();
    assert_eq!(by_enterprise, vec![pending.id(), active.id(), leaving.id()]);

    let by_brand: Vec<&EmploymentEventId> = resource
        .employment_events_by_brand(&brand())
        .into_iter()
        .map(|event| event.id())
        .collect();
    assert_eq!(by_brand, vec![pending.id(), active.id(), leaving.id()]);

    assert!(resource
        .employment_events_by_enterprise(&EnterpriseId::from("ent-other"))
        .is_empty());
    assert!(resource
        .employment_events_by_brand(&BrandId::from("brand-other"))
        .is_empty());
}

#[test]
fn latest_events_put_newest_appends_first_on_ties() {
    let mut resource = resource();
    let (pending, _) = resource
        .create_employment(year_2023(), ConflictPolicy::AnyOverlap, &clock())
        .expect("employment created");
    let (active, _) = resource
        .onboard(pending.id(), date(2023, 1, 15), None, &clock())
        .expect("onboard");

    let latest: Vec<&EmploymentEventId> = resource
        .latest_employment_events()
        .into_iter()
        .map(|event| event.id())
        .collect();
    assert_eq!(latest, vec![active.id(), pending.id()]);
}

#[test]
fn update_position_targets_the_current_member() {
    let mut resource = resource();
    let (pending, _) = resource
        .create_employment(year_2023(), ConflictPolicy::AnyOverlap, &clock())
        .expect("employment created");
    let (active, _) = resource
        .onboard(pending.id(), date(2023, 1, 15), None, &clock())
        .expect("onboard");

    let updated = resource
        .update_position(active.id(), "Shift Lead", Some("Operations".to_string()))
        .expect("position updates")
        .clone();
    assert_eq!(updated.position(), "Shift Lead");
    assert_eq!(updated.version(), active.version());
    assert_eq!(resource.employments().len(), 2);

    match resource.update_position(pending.id(), "Manager", None) {
        Err(LaborError::NotFound { .. }) => {}
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn resource_round_trips_through_json() {
    let mut resource = resource();
    let (pending, _) = resource
        .create_employment(year_2023(), ConflictPolicy::AnyOverlap, &clock())
        .expect("employment created");
    resource
        .onboard(pending.id(), date(2023, 1, 15), None, &clock())
        .expect("onboard");

    let json = serde_json::to_string(&resource).expect("serialize resource");
    let back: LaborResource = serde_json::from_str(&json).expect("deserialize resource");
    assert_eq!(back, resource);
    assert_eq!(back.current_employment_events().len(), 1);
}
