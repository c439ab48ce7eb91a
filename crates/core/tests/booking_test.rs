use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use fitclub_core::{
    errors::ClubError,
    models::{
        booking::{BookingOutcome, NewClass, RejectReason},
        class::BookingStatus,
        maintenance::MaintenanceStatus,
        trainer::{Specialization, Trainer},
    },
    store::{BookingStore, BookingTx, MemoryStore},
    BookingService, TimeInterval,
};
use mockall::mock;
use pretty_assertions::assert_eq;
use uuid::Uuid;

fn at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 14)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

fn slot(hour: u32, minute: u32, minutes: i64) -> TimeInterval {
    TimeInterval::starting_at(at(hour, minute), minutes).unwrap()
}

fn trainer(specialization: Specialization) -> Trainer {
    Trainer {
        id: Uuid::new_v4(),
        first_name: "Sam".to_string(),
        last_name: specialization.to_string(),
        specialization,
        credentials: None,
    }
}

struct Club {
    store: MemoryStore,
    service: BookingService,
    studio: Uuid,
    gym: Uuid,
    yoga: Uuid,
    yoga_backup: Uuid,
    strength: Uuid,
    members: Vec<Uuid>,
}

impl Club {
    async fn open() -> Self {
        let store = MemoryStore::new();
        let studio = Uuid::new_v4();
        let gym = Uuid::new_v4();
        store.add_room(studio).await;
        store.add_room(gym).await;

        let yoga = trainer(Specialization::Yoga);
        let yoga_backup = trainer(Specialization::Yoga);
        let strength = trainer(Specialization::Strength);
        let (yoga_id, yoga_backup_id, strength_id) = (yoga.id, yoga_backup.id, strength.id);
        store.add_trainer(yoga).await;
        store.add_trainer(yoga_backup).await;
        store.add_trainer(strength).await;

        let mut members = Vec::new();
        for _ in 0..7 {
            let member = Uuid::new_v4();
            store.add_member(member).await;
            members.push(member);
        }

        let service = BookingService::new(Arc::new(store.clone()));
        Self {
            store,
            service,
            studio,
            gym,
            yoga: yoga_id,
            yoga_backup: yoga_backup_id,
            strength: strength_id,
            members,
        }
    }

    fn class(&self, activity: Specialization, room_id: Uuid, trainer_id: Uuid, interval: TimeInterval) -> NewClass {
        NewClass {
            name: format!("{} class", activity),
            activity,
            room_id,
            trainer_id,
            interval,
        }
    }

    async fn yoga_class_at(&self, interval: TimeInterval) -> Uuid {
        let outcome = self
            .service
            .schedule_class(self.class(Specialization::Yoga, self.studio, self.yoga, interval))
            .await
            .unwrap();
        outcome.approved_id().expect("class should be approved")
    }
}

fn rejected(reason: RejectReason) -> BookingOutcome {
    BookingOutcome::rejected(reason)
}

#[test_log::test(tokio::test)]
async fn test_same_room_overlap_is_rejected() {
    let club = Club::open().await;
    club.yoga_class_at(slot(9, 0, 60)).await;

    let clash = club
        .service
        .schedule_class(club.class(Specialization::Yoga, club.studio, club.yoga_backup, slot(9, 30, 60)))
        .await
        .unwrap();
    assert_eq!(clash, rejected(RejectReason::RoomConflict));

    let after = club
        .service
        .schedule_class(club.class(Specialization::Yoga, club.studio, club.yoga_backup, slot(10, 0, 60)))
        .await
        .unwrap();
    assert!(after.is_approved());
}

#[tokio::test]
async fn test_other_room_same_time_is_approved() {
    let club = Club::open().await;
    club.yoga_class_at(slot(9, 0, 60)).await;

    let outcome = club
        .service
        .schedule_class(club.class(Specialization::Strength, club.gym, club.strength, slot(9, 0, 60)))
        .await
        .unwrap();
    assert!(outcome.is_approved());
}

#[tokio::test]
async fn test_trainer_double_booking_is_rejected() {
    let club = Club::open().await;
    club.yoga_class_at(slot(9, 0, 60)).await;

    let overlapping = club
        .service
        .book_private_session(club.members[0], club.yoga, slot(9, 30, 60))
        .await
        .unwrap();
    assert_eq!(overlapping, rejected(RejectReason::TrainerConflict));

    let later = club
        .service
        .book_private_session(club.members[0], club.yoga, slot(10, 0, 60))
        .await
        .unwrap();
    assert!(later.is_approved());
}

#[tokio::test]
async fn test_private_session_blocks_trainer_class_elsewhere() {
    let club = Club::open().await;
    let session = club
        .service
        .book_private_session(club.members[0], club.strength, slot(14, 0, 90))
        .await
        .unwrap();
    assert!(session.is_approved());

    let class = club
        .service
        .schedule_class(club.class(Specialization::Strength, club.gym, club.strength, slot(15, 0, 60)))
        .await
        .unwrap();
    assert_eq!(class, rejected(RejectReason::TrainerConflict));
}

#[tokio::test]
async fn test_sixth_registration_exceeds_capacity() {
    let club = Club::open().await;
    let class_id = club.yoga_class_at(slot(9, 0, 60)).await;

    for member in &club.members[..5] {
        let outcome = club.service.register_for_class(*member, class_id).await.unwrap();
        assert!(outcome.is_approved());
    }

    let sixth = club
        .service
        .register_for_class(club.members[5], class_id)
        .await
        .unwrap();
    assert_eq!(sixth, rejected(RejectReason::CapacityExceeded));
}

#[tokio::test]
async fn test_configured_capacity_is_enforced() {
    let club = Club::open().await;
    let service = BookingService::new(Arc::new(club.store.clone())).with_class_capacity(1);
    let class_id = club.yoga_class_at(slot(9, 0, 60)).await;

    assert!(service.register_for_class(club.members[0], class_id).await.unwrap().is_approved());
    assert_eq!(
        service.register_for_class(club.members[1], class_id).await.unwrap(),
        rejected(RejectReason::CapacityExceeded)
    );
}

#[tokio::test]
async fn test_dropping_a_class_frees_a_place() {
    let club = Club::open().await;
    let class_id = club.yoga_class_at(slot(9, 0, 60)).await;
    for member in &club.members[..5] {
        club.service.register_for_class(*member, class_id).await.unwrap();
    }

    let dropped = club.service.drop_class(club.members[0], class_id).await.unwrap();
    assert_eq!(dropped, BookingOutcome::approved(class_id));

    let again = club.service.drop_class(club.members[0], class_id).await.unwrap();
    assert_eq!(again, rejected(RejectReason::NotFound));

    let sixth = club
        .service
        .register_for_class(club.members[5], class_id)
        .await
        .unwrap();
    assert!(sixth.is_approved());
}

#[test_log::test(tokio::test)]
async fn test_cancel_class_removes_registrations() {
    let club = Club::open().await;
    let class_id = club.yoga_class_at(slot(9, 0, 60)).await;
    for member in &club.members[..3] {
        club.service.register_for_class(*member, class_id).await.unwrap();
    }
    assert_eq!(club.store.entries_for_class(class_id).await.len(), 3);

    let outcome = club.service.cancel_class(class_id).await.unwrap();
    assert_eq!(outcome, BookingOutcome::approved(class_id));

    assert!(club.store.entries_for_class(class_id).await.is_empty());
    let class = club.store.class(class_id).await.unwrap();
    assert_eq!(class.status, BookingStatus::Cancelled);
}

#[tokio::test]
async fn test_cancelling_twice_is_a_no_op() {
    let club = Club::open().await;
    let class_id = club.yoga_class_at(slot(9, 0, 60)).await;

    club.service.cancel_class(class_id).await.unwrap();
    let second = club.service.cancel_class(class_id).await.unwrap();

    assert_eq!(second, BookingOutcome::approved(class_id));
    assert_eq!(club.store.class(class_id).await.unwrap().status, BookingStatus::Cancelled);
}

#[tokio::test]
async fn test_cancelled_class_is_not_bookable() {
    let club = Club::open().await;
    let class_id = club.yoga_class_at(slot(9, 0, 60)).await;
    club.service.cancel_class(class_id).await.unwrap();

    assert_eq!(
        club.service.register_for_class(club.members[0], class_id).await.unwrap(),
        rejected(RejectReason::NotFound)
    );
    assert_eq!(
        club.service.update_class_schedule(class_id, slot(11, 0, 60)).await.unwrap(),
        rejected(RejectReason::NotFound)
    );

    let reuse = club
        .service
        .schedule_class(club.class(Specialization::Yoga, club.studio, club.yoga_backup, slot(9, 0, 60)))
        .await
        .unwrap();
    assert!(reuse.is_approved());
}

#[tokio::test]
async fn test_unknown_ids_are_not_found() {
    let club = Club::open().await;
    let nobody = Uuid::new_v4();

    let unknown_room = club
        .service
        .schedule_class(club.class(Specialization::Yoga, nobody, club.yoga, slot(9, 0, 60)))
        .await
        .unwrap();
    let unknown_trainer = club
        .service
        .book_private_session(club.members[0], nobody, slot(9, 0, 60))
        .await
        .unwrap();
    let unknown_member = club
        .service
        .book_private_session(nobody, club.yoga, slot(9, 0, 60))
        .await
        .unwrap();
    let unknown_class = club.service.cancel_class(nobody).await.unwrap();
    let unknown_window = club
        .service
        .update_maintenance_status(nobody, MaintenanceStatus::Completed)
        .await
        .unwrap();

    for outcome in [unknown_room, unknown_trainer, unknown_member, unknown_class, unknown_window] {
        assert_eq!(outcome, rejected(RejectReason::NotFound));
    }
}

#[tokio::test]
async fn test_update_class_schedule_ignores_its_own_slot() {
    let club = Club::open().await;
    let class_id = club.yoga_class_at(slot(9, 0, 60)).await;

    let shifted = club
        .service
        .update_class_schedule(class_id, slot(9, 30, 60))
        .await
        .unwrap();
    assert_eq!(shifted, BookingOutcome::approved(class_id));
    assert_eq!(club.store.class(class_id).await.unwrap().interval, slot(9, 30, 60));
}

#[tokio::test]
async fn test_update_class_schedule_revalidates_room() {
    let club = Club::open().await;
    let first = club.yoga_class_at(slot(9, 0, 60)).await;
    let second = club
        .service
        .schedule_class(club.class(Specialization::Yoga, club.studio, club.yoga_backup, slot(11, 0, 60)))
        .await
        .unwrap()
        .approved_id()
        .unwrap();

    let onto_first = club
        .service
        .update_class_schedule(second, slot(9, 30, 60))
        .await
        .unwrap();
    assert_eq!(onto_first, rejected(RejectReason::RoomConflict));
    assert_eq!(club.store.class(second).await.unwrap().interval, slot(11, 0, 60));
    assert_eq!(club.store.class(first).await.unwrap().interval, slot(9, 0, 60));
}

#[tokio::test]
async fn test_maintenance_overlapping_yoga_class_is_rejected() {
    let club = Club::open().await;
    club.yoga_class_at(slot(9, 0, 60)).await;

    let outcome = club.service.schedule_maintenance(slot(9, 45, 30)).await.unwrap();
    assert_eq!(outcome, rejected(RejectReason::EquipmentConflict));
}

#[tokio::test]
async fn test_maintenance_overlapping_private_session_is_rejected() {
    let club = Club::open().await;
    club.service
        .book_private_session(club.members[0], club.strength, slot(9, 0, 60))
        .await
        .unwrap();

    let outcome = club.service.schedule_maintenance(slot(9, 30, 60)).await.unwrap();
    assert_eq!(outcome, rejected(RejectReason::EquipmentConflict));

    let clear = club.service.schedule_maintenance(slot(10, 0, 60)).await.unwrap();
    assert!(clear.is_approved());
}

#[tokio::test]
async fn test_maintenance_is_never_double_booked() {
    let club = Club::open().await;
    let first = club.service.schedule_maintenance(slot(6, 0, 120)).await.unwrap();
    assert!(first.is_approved());

    let second = club.service.schedule_maintenance(slot(7, 0, 60)).await.unwrap();
    assert_eq!(second, rejected(RejectReason::EquipmentConflict));
}

#[tokio::test]
async fn test_classes_are_blocked_during_maintenance() {
    let club = Club::open().await;
    club.service.schedule_maintenance(slot(9, 0, 60)).await.unwrap();

    let strength_class = club
        .service
        .schedule_class(club.class(Specialization::Strength, club.gym, club.strength, slot(9, 30, 60)))
        .await
        .unwrap();
    assert_eq!(strength_class, rejected(RejectReason::EquipmentConflict));
}

#[tokio::test]
async fn test_maintenance_blocks_only_equipment_bound_trainers() {
    let club = Club::open().await;
    club.service.schedule_maintenance(slot(9, 0, 60)).await.unwrap();

    let yoga_session = club
        .service
        .book_private_session(club.members[0], club.yoga, slot(9, 0, 60))
        .await
        .unwrap();
    assert_eq!(yoga_session, rejected(RejectReason::EquipmentConflict));

    let strength_session = club
        .service
        .book_private_session(club.members[1], club.strength, slot(9, 0, 60))
        .await
        .unwrap();
    assert!(strength_session.is_approved());
}

#[tokio::test]
async fn test_completed_maintenance_no_longer_blocks() {
    let club = Club::open().await;
    let window = club
        .service
        .schedule_maintenance(slot(9, 0, 60))
        .await
        .unwrap()
        .approved_id()
        .unwrap();

    let completed = club
        .service
        .update_maintenance_status(window, MaintenanceStatus::Completed)
        .await
        .unwrap();
    assert_eq!(completed, BookingOutcome::approved(window));
    assert_eq!(
        club.store.maintenance(window).await.unwrap().status,
        MaintenanceStatus::Completed
    );

    club.yoga_class_at(slot(9, 0, 60)).await;
}

#[tokio::test]
async fn test_reschedule_maintenance_excludes_itself() {
    let club = Club::open().await;
    let window = club
        .service
        .schedule_maintenance(slot(6, 0, 60))
        .await
        .unwrap()
        .approved_id()
        .unwrap();

    let moved = club
        .service
        .reschedule_maintenance(window, slot(6, 30, 60))
        .await
        .unwrap();
    assert_eq!(moved, BookingOutcome::approved(window));

    club.yoga_class_at(slot(9, 0, 60)).await;
    let onto_class = club
        .service
        .reschedule_maintenance(window, slot(8, 30, 60))
        .await
        .unwrap();
    assert_eq!(onto_class, rejected(RejectReason::EquipmentConflict));
    assert_eq!(club.store.maintenance(window).await.unwrap().interval, slot(6, 30, 60));
}

#[tokio::test]
async fn test_declared_unavailability_blocks_trainer() {
    let club = Club::open().await;
    let period = club
        .service
        .declare_unavailability(club.yoga, slot(12, 0, 120))
        .await
        .unwrap()
        .approved_id()
        .unwrap();

    let during = club
        .service
        .schedule_class(club.class(Specialization::Yoga, club.studio, club.yoga, slot(13, 0, 60)))
        .await
        .unwrap();
    assert_eq!(during, rejected(RejectReason::TrainerConflict));

    let moved = club
        .service
        .update_unavailability(period, slot(16, 0, 60))
        .await
        .unwrap();
    assert_eq!(moved, BookingOutcome::approved(period));
    assert_eq!(club.store.unavailability(period).await.unwrap().interval, slot(16, 0, 60));

    club.yoga_class_at(slot(13, 0, 60)).await;
}

#[tokio::test]
async fn test_reschedule_session_excludes_itself() {
    let club = Club::open().await;
    let session = club
        .service
        .book_private_session(club.members[0], club.strength, slot(9, 0, 60))
        .await
        .unwrap()
        .approved_id()
        .unwrap();

    let shifted = club
        .service
        .reschedule_session(session, slot(9, 15, 60))
        .await
        .unwrap();
    assert_eq!(shifted, BookingOutcome::approved(session));

    let other = club
        .service
        .book_private_session(club.members[1], club.strength, slot(11, 0, 60))
        .await
        .unwrap()
        .approved_id()
        .unwrap();
    let clash = club
        .service
        .reschedule_session(other, slot(10, 0, 60))
        .await
        .unwrap();
    assert_eq!(clash, rejected(RejectReason::TrainerConflict));
}

#[tokio::test]
async fn test_cancelled_session_frees_the_trainer() {
    let club = Club::open().await;
    let session = club
        .service
        .book_private_session(club.members[0], club.strength, slot(9, 0, 60))
        .await
        .unwrap()
        .approved_id()
        .unwrap();

    let not_theirs = club.service.cancel_session(club.members[1], session).await.unwrap();
    assert_eq!(not_theirs, rejected(RejectReason::NotFound));

    let cancelled = club.service.cancel_session(club.members[0], session).await.unwrap();
    assert_eq!(cancelled, BookingOutcome::approved(session));
    assert_eq!(
        club.store.schedule_entry(session).await.unwrap().status,
        BookingStatus::Cancelled
    );

    let rebooked = club
        .service
        .book_private_session(club.members[1], club.strength, slot(9, 0, 60))
        .await
        .unwrap();
    assert!(rebooked.is_approved());
}

#[tokio::test]
async fn test_uncommitted_transaction_leaves_no_trace() {
    let club = Club::open().await;
    let class_id = club.yoga_class_at(slot(9, 0, 60)).await;

    {
        let mut tx = club.store.begin().await.unwrap();
        tx.set_class_status(class_id, BookingStatus::Cancelled).await.unwrap();
        tx.delete_class_registrations(class_id).await.unwrap();
    }

    assert_eq!(club.store.class(class_id).await.unwrap().status, BookingStatus::Scheduled);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_room_bookings_admit_exactly_one() {
    let club = Club::open().await;
    let first = club.class(Specialization::Yoga, club.studio, club.yoga, slot(18, 0, 60));
    let second = club.class(Specialization::Yoga, club.studio, club.yoga_backup, slot(18, 30, 60));

    let (a, b) = (club.service.clone(), club.service.clone());
    let (left, right) = tokio::join!(
        tokio::spawn(async move { a.schedule_class(first).await }),
        tokio::spawn(async move { b.schedule_class(second).await }),
    );
    let outcomes = [left.unwrap().unwrap(), right.unwrap().unwrap()];

    let approved = outcomes.iter().filter(|o| o.is_approved()).count();
    let conflicts = outcomes
        .iter()
        .filter(|o| o.reason() == Some(RejectReason::RoomConflict))
        .count();
    assert_eq!((approved, conflicts), (1, 1));
}

mock! {
    pub Store {}

    #[async_trait]
    impl BookingStore for Store {
        async fn begin(&self) -> eyre::Result<Box<dyn BookingTx>>;
    }
}

#[tokio::test]
async fn test_unreachable_store_surfaces_storage_error() {
    let mut store = MockStore::new();
    store
        .expect_begin()
        .times(1)
        .returning(|| Err(eyre::eyre!("connection refused")));
    let service = BookingService::new(Arc::new(store));

    let result = service.schedule_maintenance(slot(9, 0, 60)).await;

    match result {
        Err(ClubError::Storage(report)) => assert!(report.to_string().contains("connection refused")),
        other => panic!("Expected storage error, got: {:?}", other),
    }
}
