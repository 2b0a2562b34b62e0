use services::{AppServices, MutationError, SessionContext, toggle_problem};
use storage::{InMemoryRepository, RemoteCall, Storage, StorageError};
use tracker_core::model::{
    CompletionSet, Difficulty, Problem, ProblemId, ProblemLinks, Subtopic, SubtopicId, Topic,
    TopicId,
};
use tracker_core::progress::{TopicStatus, difficulty_stats, topic_status};
use tracker_core::time::fixed_clock;

fn arrays_curriculum() -> Vec<Topic> {
    vec![Topic::new(
        TopicId::new("arrays"),
        "Arrays",
        "Contiguous memory",
        vec![Subtopic::new(
            SubtopicId::new("basics"),
            "Basics",
            vec![
                Problem::new(
                    ProblemId::new("P1"),
                    "Two Sum",
                    Some(Difficulty::Easy),
                    ProblemLinks::new(),
                ),
                Problem::new(
                    ProblemId::new("P2"),
                    "3Sum",
                    Some(Difficulty::Medium),
                    ProblemLinks::new(),
                ),
            ],
        )],
    )]
}

fn seeded(completed: &[&str]) -> (InMemoryRepository, AppServices) {
    let repo = InMemoryRepository::new();
    repo.seed_topics(arrays_curriculum()).unwrap();
    repo.seed_completed(completed.iter().map(|id| ProblemId::new(*id)).collect())
        .unwrap();
    let services = AppServices::new(&Storage::from_in_memory(repo.clone()));
    (repo, services)
}

#[tokio::test]
async fn load_then_aggregate_matches_arrays_scenario() {
    let (_repo, services) = seeded(&["P1"]);
    let loaded = services.loader().load_session().await.unwrap();

    let arrays = &loaded.curriculum.topics()[0];
    assert_eq!(topic_status(arrays, &loaded.completed), TopicStatus::InProgress);

    let [easy, medium, hard] = difficulty_stats(&loaded.curriculum, &loaded.completed);
    assert_eq!((easy.total, easy.solved, easy.percentage), (1, 1, 100));
    assert_eq!(easy.solved_names, ["Two Sum"]);
    assert_eq!((medium.total, medium.solved, medium.percentage), (1, 0, 0));
    assert!(medium.solved_names.is_empty());
    assert_eq!((hard.total, hard.solved, hard.percentage), (0, 0, 0));
}

#[tokio::test]
async fn empty_completion_set_yields_nothing_solved() {
    let (_repo, services) = seeded(&[]);
    let loaded = services.loader().load_session().await.unwrap();

    for stats in difficulty_stats(&loaded.curriculum, &loaded.completed) {
        assert_eq!(stats.solved, 0);
        assert!(stats.solved_names.is_empty());
    }
}

#[tokio::test]
async fn toggling_remaining_problem_completes_topic() {
    let (repo, services) = seeded(&["P1"]);
    let tracker = services.start_tracking().await.unwrap();

    assert!(tracker.toggle(&ProblemId::new("P2")).await.unwrap());

    let expected = CompletionSet::from_ids([ProblemId::new("P1"), ProblemId::new("P2")]);
    assert_eq!(*tracker.completed(), expected);
    assert_eq!(tracker.report().topics[0].status, TopicStatus::Completed);
    assert_eq!(
        repo.calls().unwrap(),
        vec![
            RemoteCall::FetchCurriculum,
            RemoteCall::FetchCompleted,
            RemoteCall::MarkComplete(ProblemId::new("P2")),
        ]
    );
}

#[tokio::test]
async fn remote_rejection_leaves_completion_set_identical() {
    let (repo, services) = seeded(&["P1"]);
    let tracker = services.start_tracking().await.unwrap();
    let before = (*tracker.completed()).clone();
    repo.reject_marks(Some(StorageError::Connection("offline".into())))
        .unwrap();

    let err = tracker.toggle(&ProblemId::new("P2")).await.unwrap_err();

    assert!(matches!(err, MutationError::RemoteRejected { .. }));
    assert_eq!(*tracker.completed(), before);
    assert!(!repo.completed_ids().unwrap().contains(&ProblemId::new("P2")));
}

#[tokio::test]
async fn complete_then_uncomplete_round_trips() {
    let (repo, _services) = seeded(&[]);
    let original = CompletionSet::new();
    let p1 = ProblemId::new("P1");

    let marked = toggle_problem(&repo, &p1, &original).await.unwrap();
    let unmarked = toggle_problem(&repo, &p1, &marked).await.unwrap();

    assert_eq!(unmarked, original);
    assert!(repo.completed_ids().unwrap().is_empty());
}

#[tokio::test]
async fn load_failure_delivers_no_partial_state() {
    let (repo, services) = seeded(&["P1"]);
    repo.fail_completed(Some(StorageError::Status(502))).unwrap();

    assert!(services.start_tracking().await.is_err());
}

#[tokio::test]
async fn session_context_wires_services_over_storage() {
    let (repo, _services) = seeded(&["P1", "P2"]);
    let session = SessionContext::with_storage(&Storage::from_in_memory(repo), fixed_clock());

    let tracker = session.services().start_tracking().await.unwrap();
    assert_eq!(tracker.report().overall.percentage, 100);
    session.close();
}
