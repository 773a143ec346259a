use crate::labor::{EmploymentStatus, EmploymentType, LaborError, LifecycleOperation, TRANSITIONS};

const OPERATIONS: [LifecycleOperation; 4] = [
    LifecycleOperation::Onboard,
    LifecycleOperation::InitiateLeaving,
    LifecycleOperation::Terminate,
    LifecycleOperation::Cancel,
];

#[test]
fn pending_onboard_only_allows_onboard_and_cancel() {
    let pending = EmploymentStatus::INITIAL;
    assert_eq!(pending, EmploymentStatus::PendingOnboard);
    assert!(pending.can_onboard());
    assert!(pending.can_cancel());
    assert!(!pending.can_initiate_leaving());
    assert!(!pending.can_terminate());

    match pending.transition(LifecycleOperation::Terminate) {
        Err(LaborError::StateTransition { status, operation }) => {
            assert_eq!(status, EmploymentStatus::PendingOnboard);
            assert_eq!(operation, LifecycleOperation::Terminate);
        }
        other => panic!("expected state transition error, got {other:?}"),
    }
}

#[test]
fn every_pair_outside_the_table_is_rejected() {
    for status in EmploymentStatus::all() {
        for operation in OPERATIONS {
            let expected = TRANSITIONS
                .iter()
                .find(|(from, op, _)| *from == status && *op == operation)
                .map(|(_, _, to)| *to);
            match (status.transition(operation), expected) {
                (Ok(actual), Some(target)) => assert_eq!(actual, target),
                (Err(LaborError::StateTransition { .. }), None) => {}
                (other, expected) => {
                    panic!("{status} x {operation}: expected {expected:?}, got {other:?}")
                }
            }
        }
    }
}

#[test]
fn lifecycle_walks_to_terminated() {
    let active = EmploymentStatus::PendingOnboard
        .transition(LifecycleOperation::Onboard)
        .expect("onboard");
    let leaving = active
        .transition(LifecycleOperation::InitiateLeaving)
        .expect("initiate leaving");
    let terminated = leaving
        .transition(LifecycleOperation::Terminate)
        .expect("terminate");

    assert!(active.is_active());
    assert!(!leaving.is_terminal());
    assert!(terminated.is_terminal());
    assert!(EmploymentStatus::Canceled.is_terminal());
}

#[test]
fn terminal_states_permit_nothing() {
    for status in [EmploymentStatus::Terminated, EmploymentStatus::Canceled] {
        assert!(OPERATIONS.iter().all(|op| !status.permits(*op)));
    }
}

#[test]
fn transition_error_reads_naturally() {
    let error = EmploymentStatus::Active
        .transition(LifecycleOperation::Onboard)
        .expect_err("active cannot onboard");
    assert_eq!(error.to_string(), "cannot onboard an employment that is active");
}

#[test]
fn employment_type_classification() {
    assert!(EmploymentType::FullTime.is_formal());
    assert!(EmploymentType::PartTime.is_formal());
    assert!(!EmploymentType::Intern.is_formal());
    assert!(EmploymentType::Contractor.is_flexible());
    assert!(!EmploymentType::Outsource.is_flexible());
    assert_eq!(EmploymentType::PartTime.label(), "part_time");
}
