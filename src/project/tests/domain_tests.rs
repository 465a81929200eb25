//! Unit tests for project lifecycle rules.

use crate::directory::domain::{ClientId, UserId};
use crate::fixtures::fixed_clock;
use crate::project::domain::{
    Progress, Project, ProjectDomainError, ProjectName, ProjectStatus,
};
use rstest::rstest;

fn planning_project() -> Project {
    let name = ProjectName::new("  Website refresh ").expect("valid name");
    Project::new(ClientId::new(), name, "", &fixed_clock())
}

#[rstest]
#[case(ProjectStatus::Planning, ProjectStatus::Active, true)]
#[case(ProjectStatus::Planning, ProjectStatus::Cancelled, true)]
#[case(ProjectStatus::Planning, ProjectStatus::Completed, false)]
#[case(ProjectStatus::Planning, ProjectStatus::OnHold, false)]
#[case(ProjectStatus::Active, ProjectStatus::OnHold, true)]
#[case(ProjectStatus::Active, ProjectStatus::Completed, true)]
#[case(ProjectStatus::Active, ProjectStatus::Cancelled, true)]
#[case(ProjectStatus::Active, ProjectStatus::Planning, false)]
#[case(ProjectStatus::OnHold, ProjectStatus::Active, true)]
#[case(ProjectStatus::OnHold, ProjectStatus::Cancelled, true)]
#[case(ProjectStatus::OnHold, ProjectStatus::Completed, false)]
#[case(ProjectStatus::Completed, ProjectStatus::Active, false)]
#[case(ProjectStatus::Cancelled, ProjectStatus::Planning, false)]
#[case(ProjectStatus::Active, ProjectStatus::Active, false)]
fn can_transition_to_returns_expected(
    #[case] from: ProjectStatus,
    #[case] to: ProjectStatus,
    #[case] expected: bool,
) {
    assert_eq!(from.can_transition_to(to), expected);
}

#[rstest]
fn status_round_trips_through_storage_names() {
    for status in ProjectStatus::ALL {
        assert_eq!(ProjectStatus::try_from(status.as_str()), Ok(status));
    }
    assert!(ProjectStatus::try_from("archived").is_err());
}

#[rstest]
#[case("", ProjectDomainError::EmptyName)]
#[case("   ", ProjectDomainError::EmptyName)]
fn blank_names_are_rejected(#[case] input: &str, #[case] expected: ProjectDomainError) {
    assert_eq!(ProjectName::new(input), Err(expected));
}

#[rstest]
fn overlong_name_is_rejected() {
    let result = ProjectName::new("x".repeat(121));

    assert!(matches!(result, Err(ProjectDomainError::NameTooLong { max: 120 })));
}

#[rstest]
fn name_is_trimmed_and_new_project_is_planning() {
    let project = planning_project();

    assert_eq!(project.name().as_str(), "Website refresh");
    assert_eq!(project.status(), ProjectStatus::Planning);
    assert_eq!(project.progress().percent(), 0);
}

#[rstest]
#[case(0, true)]
#[case(100, true)]
#[case(101, false)]
fn progress_is_a_percentage(#[case] percent: u8, #[case] valid: bool) {
    assert_eq!(Progress::new(percent).is_ok(), valid);
}

#[rstest]
fn completing_forces_full_progress() {
    let clock = fixed_clock();
    let mut project = planning_project();
    project
        .change_status(ProjectStatus::Active, &clock)
        .expect("planning to active");
    project
        .update_progress(Progress::new(40).expect("valid"), &clock)
        .expect("active project accepts progress");

    let previous = project
        .change_status(ProjectStatus::Completed, &clock)
        .expect("active to completed");

    assert_eq!(previous, ProjectStatus::Active);
    assert_eq!(project.progress(), Progress::COMPLETE);
}

#[rstest]
fn closed_projects_reject_progress() {
    let clock = fixed_clock();
    let mut project = planning_project();
    project
        .change_status(ProjectStatus::Cancelled, &clock)
        .expect("planning to cancelled");

    let result = project.update_progress(Progress::new(10).expect("valid"), &clock);

    assert_eq!(result, Err(ProjectDomainError::Closed(ProjectStatus::Cancelled)));
}

#[rstest]
fn invalid_transition_leaves_status_unchanged() {
    let mut project = planning_project();

    let result = project.change_status(ProjectStatus::Completed, &fixed_clock());

    assert!(matches!(
        result,
        Err(ProjectDomainError::InvalidStatusTransition {
            from: ProjectStatus::Planning,
            to: ProjectStatus::Completed,
        })
    ));
    assert_eq!(project.status(), ProjectStatus::Planning);
}

#[rstest]
fn assigning_twice_keeps_one_entry() {
    let clock = fixed_clock();
    let mut project = planning_project();
    let member = UserId::new();

    assert!(project.assign_member(member, &clock));
    assert!(!project.assign_member(member, &clock));
    assert_eq!(project.team(), &[member]);
}
