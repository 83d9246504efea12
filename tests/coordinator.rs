// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Poll cycle behavior of the desk coordinator.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{Call, FakeDesk, Failure, POLL, lit};
use myrtdesk_lib::coordinator::{CoordinatorConfig, DeskCoordinator};
use myrtdesk_lib::error::{Error, ProtocolError};
use myrtdesk_lib::event::DeskEvent;
use tokio::sync::broadcast::error::TryRecvError;

fn coordinator(desk: &Arc<FakeDesk>) -> DeskCoordinator<FakeDesk> {
    DeskCoordinator::new(Arc::clone(desk), CoordinatorConfig::new())
}

// ============================================================================
// Single refresh
// ============================================================================

mod refresh {
    use super::*;

    #[tokio::test]
    async fn builds_snapshot_from_all_three_reads() {
        let desk = Arc::new(FakeDesk::new().with_light(lit()));
        let coordinator = coordinator(&desk);

        let snapshot = coordinator.refresh().await.unwrap();

        assert!(snapshot.light().enabled);
        assert_eq!(snapshot.heap(), 120_000);
        assert_eq!(snapshot.height(), 750);
        assert!(coordinator.last_update_success());
        assert!(coordinator.last_error().is_none());
        assert!(Arc::ptr_eq(&coordinator.data().unwrap(), &snapshot));
    }

    #[tokio::test]
    async fn clears_each_buffer_right_before_its_read() {
        let desk = Arc::new(FakeDesk::new());
        let coordinator = coordinator(&desk);

        coordinator.refresh().await.unwrap();

        assert_eq!(desk.calls(), POLL);
    }

    #[tokio::test]
    async fn no_data_before_first_refresh() {
        let desk = Arc::new(FakeDesk::new());
        let coordinator = coordinator(&desk);

        assert!(coordinator.data().is_none());
        assert!(!coordinator.last_update_success());
        assert!(desk.calls().is_empty());
    }

    #[tokio::test]
    async fn publishes_updated_event() {
        let desk = Arc::new(FakeDesk::new());
        let coordinator = coordinator(&desk);
        let mut events = coordinator.subscribe();

        let snapshot = coordinator.refresh().await.unwrap();

        match events.try_recv().unwrap() {
            DeskEvent::Updated(published) => assert!(Arc::ptr_eq(&published, &snapshot)),
            DeskEvent::UpdateFailed(failed) => panic!("unexpected failure: {failed}"),
        }
        assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn next_snapshot_supersedes_previous() {
        let desk = Arc::new(FakeDesk::new());
        let coordinator = coordinator(&desk);

        let first = coordinator.refresh().await.unwrap();
        desk.set_height(1_100);
        let second = coordinator.refresh().await.unwrap();

        assert_eq!(first.height(), 750);
        assert_eq!(second.height(), 1_100);
        assert_eq!(coordinator.data().unwrap().height(), 1_100);
    }
}

// ============================================================================
// Failures
// ============================================================================

mod failures {
    use super::*;

    #[tokio::test]
    async fn failed_height_read_keeps_previous_snapshot() {
        let desk = Arc::new(FakeDesk::new());
        let coordinator = coordinator(&desk);
        let previous = coordinator.refresh().await.unwrap();

        let mut events = coordinator.subscribe();
        desk.set_height(900);
        desk.fail_height(Some(Failure::Transport));

        let failed = coordinator.refresh().await.unwrap_err();

        assert!(matches!(
            failed.cause(),
            Error::Protocol(ProtocolError::ConnectionFailed(_))
        ));
        assert!(Arc::ptr_eq(&coordinator.data().unwrap(), &previous));
        assert_eq!(coordinator.data().unwrap().height(), 750);
        assert!(!coordinator.last_update_success());
        assert!(coordinator.last_error().is_some());

        assert!(events.try_recv().unwrap().is_failure());
        assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn failed_first_read_skips_remaining_reads() {
        let desk = Arc::new(FakeDesk::new());
        desk.fail_backlight(Some(Failure::Transport));
        let coordinator = coordinator(&desk);

        assert!(coordinator.refresh().await.is_err());

        assert_eq!(desk.calls(), [Call::ClearBacklight, Call::ReadBacklight]);
        assert!(coordinator.data().is_none());
    }

    #[tokio::test]
    async fn value_error_fails_refresh() {
        let desk = Arc::new(FakeDesk::new());
        desk.fail_backlight(Some(Failure::Value));
        let coordinator = coordinator(&desk);

        let failed = coordinator.refresh().await.unwrap_err();

        assert!(matches!(failed.cause(), Error::Value(_)));
        assert!(!failed.is_timeout());
    }

    #[tokio::test]
    async fn parse_error_fails_refresh() {
        let desk = Arc::new(FakeDesk::new());
        desk.fail_height(Some(Failure::Parse));
        let coordinator = coordinator(&desk);

        let failed = coordinator.refresh().await.unwrap_err();

        assert!(matches!(failed.cause(), Error::Parse(_)));
    }

    #[tokio::test]
    async fn success_after_failure_clears_error() {
        let desk = Arc::new(FakeDesk::new());
        let coordinator = coordinator(&desk);

        desk.fail_height(Some(Failure::Transport));
        assert!(coordinator.refresh().await.is_err());
        desk.fail_height(None);
        assert!(coordinator.refresh().await.is_ok());

        assert!(coordinator.last_update_success());
        assert!(coordinator.last_error().is_none());
    }
}

// ============================================================================
// Deadline
// ============================================================================

mod deadline {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn deadline_covers_the_whole_batch() {
        let desk = Arc::new(FakeDesk::new());
        // each read fits a per-call budget, the three together do not
        desk.set_read_delay(Duration::from_secs(4));
        let coordinator = coordinator(&desk);
        let mut events = coordinator.subscribe();

        let failed = coordinator.refresh().await.unwrap_err();

        assert!(failed.is_timeout());
        assert!(coordinator.data().is_none());
        assert!(events.try_recv().unwrap().is_failure());
        assert_eq!(desk.count(Call::ReadHeight), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn batch_within_deadline_succeeds() {
        let desk = Arc::new(FakeDesk::new());
        desk.set_read_delay(Duration::from_secs(3));
        let coordinator = coordinator(&desk);

        assert!(coordinator.refresh().await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn custom_deadline() {
        let desk = Arc::new(FakeDesk::new());
        desk.set_read_delay(Duration::from_secs(1));
        let coordinator = DeskCoordinator::new(
            Arc::clone(&desk),
            CoordinatorConfig::new().with_refresh_timeout(Duration::from_secs(2)),
        );

        let failed = coordinator.refresh().await.unwrap_err();

        assert!(matches!(failed.cause(), Error::Timeout(d) if *d == Duration::from_secs(2)));
    }
}

// ============================================================================
// Scheduling
// ============================================================================

mod scheduling {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn refreshes_never_overlap() {
        let desk = Arc::new(FakeDesk::new());
        desk.set_read_delay(Duration::from_millis(100));
        let coordinator = Arc::new(coordinator(&desk));

        let (first, second) = tokio::join!(coordinator.refresh(), coordinator.refresh());

        assert!(first.is_ok());
        assert!(second.is_ok());
        let expected: Vec<Call> = POLL.iter().chain(POLL.iter()).copied().collect();
        assert_eq!(desk.calls(), expected);
    }

    #[tokio::test(start_paused = true)]
    async fn run_polls_on_interval() {
        let desk = Arc::new(FakeDesk::new());
        let coordinator = Arc::new(coordinator(&desk));

        let poller = coordinator.spawn();
        tokio::time::sleep(Duration::from_millis(10_500)).await;
        poller.abort();

        // ticks at 0 s, 5 s and 10 s
        assert_eq!(desk.count(Call::ReadHeight), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn run_keeps_polling_after_failures() {
        let desk = Arc::new(FakeDesk::new());
        desk.fail_height(Some(Failure::Transport));
        let coordinator = Arc::new(coordinator(&desk));
        let mut events = coordinator.subscribe();

        let poller = coordinator.spawn();
        tokio::time::sleep(Duration::from_millis(5_500)).await;
        desk.fail_height(None);
        tokio::time::sleep(Duration::from_secs(5)).await;
        poller.abort();

        assert!(events.recv().await.unwrap().is_failure());
        assert!(events.recv().await.unwrap().is_failure());
        assert!(events.recv().await.unwrap().snapshot().is_some());
        assert!(coordinator.last_update_success());
    }
}
