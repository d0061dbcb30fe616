#![allow(clippy::unwrap_used)]
// Polling loop behaviour against a scripted chat room.

mod common;

use std::path::PathBuf;
use std::time::Duration;

use pretty_assertions::assert_eq;
use tokio_util::sync::CancellationToken;

use netbot_core::{CoreError, Message, Poller, Reply, Session};

use common::{FakeRoom, Posted, harness};

const PREFIX: &str = "/66070101 ";

fn poller(room: FakeRoom, artifact: Option<PathBuf>) -> Poller<FakeRoom> {
    let h = harness(artifact, Some("Hello\nWorld"));
    Poller::new(room, h.dispatcher, PREFIX, Duration::from_millis(10))
}

#[tokio::test]
async fn messages_without_prefix_are_ignored() {
    let room = FakeRoom::with_messages(["hello bot", "/66070102 restconf", "/66070101restconf"]);
    let poller = poller(room, None);
    let mut session = Session::new();

    for _ in 0..3 {
        assert_eq!(poller.poll_once(&mut session).await.unwrap(), None);
    }
    assert_eq!(session.selected(), None);
}

#[tokio::test]
async fn prefixed_command_is_answered_in_the_room() {
    let room = FakeRoom::with_messages(["/66070101 restconf", "/66070101 10.0.15.61 create"]);
    let poller = poller(room, None);
    let mut session = Session::new();

    let first = poller.poll_once(&mut session).await.unwrap();
    assert_eq!(first, Some(Reply::text("Ok: Restconf")));
    poller.poll_once(&mut session).await.unwrap();

    let room_posts = poller_posts(&poller);
    assert_eq!(
        room_posts,
        vec![
            Posted::Text("Ok: Restconf".into()),
            Posted::Text(
                "Interface loopback 66070101 is created successfully using Restconf".into()
            ),
        ]
    );
}

#[tokio::test]
async fn attachment_is_posted_with_caption() {
    let path = PathBuf::from("show_run_66070101_10.0.15.61.txt");
    let room = FakeRoom::with_messages(["/66070101 10.0.15.61 showrun"]);
    let poller = poller(room, Some(path.clone()));

    poller.poll_once(&mut Session::new()).await.unwrap();
    assert_eq!(
        poller_posts(&poller),
        vec![Posted::File {
            caption: "show running config".into(),
            path,
        }]
    );
}

#[tokio::test]
async fn failed_attachment_falls_back_to_text() {
    let mut room = FakeRoom::with_messages(["/66070101 10.0.15.61 showrun"]);
    room.fail_files = true;
    let poller = poller(room, Some(PathBuf::from("show_run.txt")));

    poller.poll_once(&mut Session::new()).await.unwrap();
    assert_eq!(poller_posts(&poller), vec![Posted::Text("Error: Ansible".into())]);
}

#[tokio::test]
async fn failed_post_does_not_stop_the_loop() {
    let mut room = FakeRoom::with_messages(["/66070101 netconf", "/66070101 10.0.15.61 status"]);
    room.fail_text = true;
    let poller = poller(room, None);
    let mut session = Session::new();

    assert!(poller.poll_once(&mut session).await.is_ok());
    assert!(poller.poll_once(&mut session).await.is_ok());
}

#[tokio::test]
async fn empty_room_is_fatal() {
    let room = FakeRoom::default();
    room.push(Ok(None));
    let poller = poller(room, None);

    let err = poller.poll_once(&mut Session::new()).await.unwrap_err();
    assert_eq!(err, CoreError::InboxEmpty);
    assert!(err.is_fatal());
}

#[tokio::test]
async fn inbox_error_ends_run() {
    let room = FakeRoom::with_messages(["/66070101 restconf"]);
    room.push(Err(CoreError::InboxUnavailable {
        message: "HTTP 503".into(),
    }));
    let poller = poller(room, None);

    let err = poller.run(CancellationToken::new()).await.unwrap_err();
    assert_eq!(
        err,
        CoreError::InboxUnavailable {
            message: "HTTP 503".into()
        }
    );
    assert_eq!(poller_posts(&poller), vec![Posted::Text("Ok: Restconf".into())]);
}

#[tokio::test]
async fn cancellation_stops_run() {
    let room = FakeRoom::default();
    for _ in 0..1000 {
        room.push(Ok(Some(Message::new("chatter"))));
    }
    let poller = poller(room, None);
    let cancel = CancellationToken::new();
    cancel.cancel();

    assert!(poller.run(cancel).await.is_ok());
}

fn poller_posts(poller: &Poller<FakeRoom>) -> Vec<Posted> {
    poller.room().posted()
}
