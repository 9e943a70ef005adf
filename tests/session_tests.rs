//! Integration tests for the client session state machine: connection
//! lifecycle, reconnect timing, dispatch, compose and attachments.

use std::time::{Duration, Instant};

use inboxshell::config::Timings;
use inboxshell::model::attachment::Attachment;
use inboxshell::model::compose::OutgoingEmail;
use inboxshell::model::recipient::display_name;
use inboxshell::protocol::OutboundMessage;
use inboxshell::session::{AppEvent, Command, ConnectionState, Session, StatusKind};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// A session that has opened its first connection at `t0`, outbox drained.
fn connected(t0: Instant) -> Session {
    let mut session = Session::new(Timings::default());
    session.start();
    session.handle_event(t0, AppEvent::Opened);
    session.take_commands();
    session
}

fn connects(commands: &[Command]) -> usize {
    commands.iter().filter(|c| **c == Command::Connect).count()
}

fn sent(commands: &[Command]) -> Vec<&OutboundMessage> {
    commands
        .iter()
        .filter_map(|c| match c {
            Command::Send(message) => Some(message),
            _ => None,
        })
        .collect()
}

fn single_send(commands: &[Command]) -> &OutgoingEmail {
    match sent(commands).as_slice() {
        [OutboundMessage::SendEmail(email)] => email,
        other => panic!("expected one send_email, got {other:?}"),
    }
}

/// Select `recipient`, receive a one-entry list and open that entry.
fn open_email(session: &mut Session, t: Instant, recipient: &str, filename: &str) {
    session.select_recipient(t, recipient);
    session.handle_frame(
        t,
        &format!(
            r#"{{"type":"emails","recipient":"{recipient}","data":[{{"filename":"{filename}","display":"{filename}","isAttachment":false}}]}}"#
        ),
    );
    session.select_email(t, 0);
    session.take_commands();
}

fn fill_form(session: &mut Session, sender: &str, recipients: &str) {
    session.form.sender = sender.to_string();
    session.form.recipients = recipients.to_string();
    session.form.subject = "Hello".to_string();
    session.form.body = "Body text".to_string();
}

// ─── Connection lifecycle ───────────────────────────────────────────

#[test]
fn test_start_connects_immediately() {
    let mut session = Session::new(Timings::default());
    assert_eq!(session.connection(), ConnectionState::Disconnected);

    session.start();
    assert_eq!(session.connection(), ConnectionState::Connecting);
    assert_eq!(session.take_commands(), vec![Command::Connect]);
    assert_eq!(session.connect_attempts(), 1);
    assert!(!session.is_send_enabled());
}

#[test]
fn test_open_requests_recipients_once() {
    let t0 = Instant::now();
    let mut session = Session::new(Timings::default());
    session.start();
    session.take_commands();

    session.handle_event(t0, AppEvent::Opened);
    assert!(session.is_connected());
    assert!(session.is_send_enabled());

    let commands = session.take_commands();
    assert_eq!(sent(&commands), vec![&OutboundMessage::GetRecipients]);

    let status = session.status().unwrap();
    assert_eq!(status.text, "Connected to SMTP server");
    assert_eq!(status.kind, StatusKind::Success);
}

#[test]
fn test_close_disables_send_and_reports() {
    let t0 = Instant::now();
    let mut session = connected(t0);

    session.handle_event(t0 + ms(10), AppEvent::Closed);
    assert_eq!(session.connection(), ConnectionState::Disconnected);
    assert!(!session.is_send_enabled());
    assert_eq!(session.status().unwrap().kind, StatusKind::Error);
    assert_eq!(session.reconnect_at(), Some(t0 + ms(10) + ms(3000)));
}

#[test]
fn test_reconnect_fires_exactly_at_delay() {
    let t = Instant::now();
    let mut session = connected(t);
    session.handle_event(t, AppEvent::Closed);

    session.tick(t + ms(2999));
    assert_eq!(connects(&session.take_commands()), 0);

    session.tick(t + ms(3000));
    assert_eq!(connects(&session.take_commands()), 1);
    assert_eq!(session.connection(), ConnectionState::Connecting);

    // Further ticks do not issue a second attempt
    session.tick(t + ms(3100));
    session.tick(t + ms(5000));
    assert_eq!(connects(&session.take_commands()), 0);
}

#[test]
fn test_reconnect_repeats_every_delay_while_server_down() {
    let t = Instant::now();
    let mut session = connected(t);
    session.handle_event(t, AppEvent::Closed);

    for n in 1..=4u64 {
        let due = t + ms(3000 * n);
        session.tick(due - ms(1));
        assert_eq!(connects(&session.take_commands()), 0, "early attempt {n}");

        session.tick(due);
        assert_eq!(connects(&session.take_commands()), 1, "attempt {n}");

        // The dial fails: error then close
        session.handle_event(due, AppEvent::TransportError("refused".into()));
        session.handle_event(due, AppEvent::Closed);
    }
    assert_eq!(session.connect_attempts(), 5);
}

#[test]
fn test_transport_error_sets_status_without_reconnect() {
    let t = Instant::now();
    let mut session = connected(t);

    session.handle_event(t, AppEvent::TransportError("reset".into()));
    assert_eq!(session.status().unwrap().text, "Connection error");
    assert_eq!(session.connection(), ConnectionState::Disconnected);
    assert!(!session.is_send_enabled());
    // Only the following close schedules a reconnect
    assert_eq!(session.reconnect_at(), None);
}

#[test]
fn test_reopen_after_reconnect_refreshes_inbox() {
    let t = Instant::now();
    let mut session = connected(t);
    session.handle_event(t, AppEvent::Closed);
    session.tick(t + ms(3000));
    session.take_commands();

    session.handle_event(t + ms(3050), AppEvent::Opened);
    assert!(session.is_connected());
    assert_eq!(session.reconnect_at(), None);
    assert_eq!(
        sent(&session.take_commands()),
        vec![&OutboundMessage::GetRecipients]
    );
}

// ─── Dispatch ───────────────────────────────────────────────────────

#[test]
fn test_inbox_updated_triggers_exactly_one_refresh() {
    let t = Instant::now();
    let mut session = connected(t);

    session.handle_frame(t, r#"{"type":"inbox_updated","message":"New email"}"#);
    assert_eq!(
        sent(&session.take_commands()),
        vec![&OutboundMessage::GetRecipients]
    );
}

#[test]
fn test_recipients_reply_replaces_list() {
    let t = Instant::now();
    let mut session = connected(t);
    assert!(session.recipients().is_none());

    session.handle_frame(
        t,
        r#"{"type":"recipients","data":[{"name":"bob_at_example_com","count":2}]}"#,
    );
    let list = session.recipients().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].display_name(), "bob@example.com");

    session.handle_frame(t, r#"{"type":"recipients","data":[]}"#);
    assert!(session.recipients().unwrap().is_empty());
}

#[test]
fn test_unknown_type_is_ignored() {
    let t = Instant::now();
    let mut session = connected(t);
    let before = session.status().cloned();

    session.handle_frame(t, r#"{"type":"server_stats","uptime":42}"#);
    session.handle_frame(t, r#"{"no_type":true}"#);
    assert!(session.take_commands().is_empty());
    assert_eq!(session.status().cloned(), before);
    assert!(session.is_connected());
}

#[test]
fn test_invalid_frame_is_ignored() {
    let t = Instant::now();
    let mut session = connected(t);

    session.handle_frame(t, "not json at all");
    session.handle_frame(t, r#"{"type":"recipients","data":"oops"}"#);
    assert!(session.take_commands().is_empty());
    assert!(session.is_connected());
    assert!(session.recipients().is_none());
}

#[test]
fn test_server_error_shows_error_status() {
    let t = Instant::now();
    let mut session = connected(t);

    session.handle_frame(t, r#"{"type":"error","message":"File not found"}"#);
    let status = session.status().unwrap();
    assert_eq!(status.text, "File not found");
    assert_eq!(status.kind, StatusKind::Error);
}

#[test]
fn test_binary_content_is_flagged() {
    let t = Instant::now();
    let mut session = connected(t);
    open_email(&mut session, t, "bob", "photo.png");

    session.handle_frame(
        t,
        r#"{"type":"email_content","content":"[Binary file: photo.png]","is_binary":true,"recipient":"bob","filename":"photo.png"}"#,
    );
    let content = session.content().unwrap();
    assert!(content.is_binary);
    assert_eq!(content.filename.as_deref(), Some("photo.png"));
}

// ─── Mailbox browsing ───────────────────────────────────────────────

#[test]
fn test_select_recipient_requests_emails_and_resets_content() {
    let t = Instant::now();
    let mut session = connected(t);
    open_email(&mut session, t, "bob", "old.txt");
    session.handle_frame(
        t,
        r#"{"type":"email_content","content":"old","is_binary":false}"#,
    );
    assert_eq!(session.content().unwrap().content, "old");

    session.select_recipient(t, "alice_at_example_com");
    assert_eq!(session.selected_recipient(), Some("alice_at_example_com"));
    assert_eq!(session.selected_email(), None);
    assert!(session.content().is_none());
    assert_eq!(
        sent(&session.take_commands()),
        vec![&OutboundMessage::GetEmails {
            recipient: "alice_at_example_com".into()
        }]
    );
}

#[test]
fn test_email_content_uses_recipient_of_displayed_list() {
    let t = Instant::now();
    let mut session = connected(t);

    // Two quick selections; the reply for the first one arrives last
    session.select_recipient(t, "alice");
    session.select_recipient(t, "bob");
    session.take_commands();
    session.handle_frame(
        t,
        r#"{"type":"emails","recipient":"bob","data":[{"filename":"b1.txt","display":"B1","isAttachment":false}]}"#,
    );
    session.handle_frame(
        t,
        r#"{"type":"emails","recipient":"alice","data":[{"filename":"a1.txt","display":"A1","isAttachment":false}]}"#,
    );

    assert_eq!(session.emails().unwrap().recipient, "alice");
    session.select_email(t, 0);
    assert_eq!(session.selected_email(), Some("a1.txt"));
    assert_eq!(
        sent(&session.take_commands()),
        vec![&OutboundMessage::GetEmailContent {
            recipient: "alice".into(),
            filename: "a1.txt".into(),
        }]
    );
}

#[test]
fn test_late_content_after_switching_recipient_is_dropped() {
    let t = Instant::now();
    let mut session = connected(t);
    open_email(&mut session, t, "alice_at_x_com", "a1.txt");

    // Switch mailboxes before alice's content arrives
    session.select_recipient(t, "bob_at_y_com");
    session.handle_frame(
        t,
        r#"{"type":"email_content","content":"alice secret","is_binary":false,"recipient":"alice_at_x_com","filename":"a1.txt"}"#,
    );

    assert_eq!(session.selected_recipient(), Some("bob_at_y_com"));
    assert_eq!(session.selected_email(), None);
    assert!(session.content().is_none());
}

#[test]
fn test_content_for_previous_email_is_dropped() {
    let t = Instant::now();
    let mut session = connected(t);
    session.select_recipient(t, "bob");
    session.handle_frame(
        t,
        r#"{"type":"emails","recipient":"bob","data":[{"filename":"b1.txt","display":"B1","isAttachment":false},{"filename":"b2.txt","display":"B2","isAttachment":false}]}"#,
    );
    session.select_email(t, 0);
    session.select_email(t, 1);

    // Replies arrive in request order; only the second one is shown
    session.handle_frame(
        t,
        r#"{"type":"email_content","content":"first","is_binary":false,"recipient":"bob","filename":"b1.txt"}"#,
    );
    assert!(session.content().is_none());
    session.handle_frame(
        t,
        r#"{"type":"email_content","content":"second","is_binary":false,"recipient":"bob","filename":"b2.txt"}"#,
    );
    assert_eq!(session.content().unwrap().content, "second");
}

#[test]
fn test_content_without_selection_is_dropped() {
    let t = Instant::now();
    let mut session = connected(t);
    session.handle_frame(
        t,
        r#"{"type":"email_content","content":"unasked","is_binary":false}"#,
    );
    assert!(session.content().is_none());
}

#[test]
fn test_select_email_out_of_range_is_noop() {
    let t = Instant::now();
    let mut session = connected(t);
    session.select_email(t, 0);
    session.handle_frame(t, r#"{"type":"emails","recipient":"bob","data":[]}"#);
    session.select_email(t, 3);
    assert!(session.take_commands().is_empty());
    assert_eq!(session.selected_email(), None);
}

#[test]
fn test_requests_while_disconnected_show_error() {
    let t = Instant::now();
    let mut session = connected(t);
    session.handle_event(t, AppEvent::Closed);

    session.select_recipient(t + ms(100), "bob");
    assert!(session.take_commands().is_empty());
    assert_eq!(session.status().unwrap().text, "Not connected to server");
}

#[test]
fn test_refresh_while_disconnected_is_silent() {
    let t = Instant::now();
    let mut session = Session::new(Timings::default());
    session.start();
    session.take_commands();

    session.refresh_inbox();
    assert!(session.take_commands().is_empty());
    assert!(session.status().is_none());
}

#[test]
fn test_display_name_transform() {
    assert_eq!(display_name("john_doe_at_example_com"), "john.doe@example.com");
    assert_eq!(display_name("plain"), "plain");
    assert_eq!(display_name("a_at_b_at_c"), "a@b@c");
}

// ─── Compose and send ───────────────────────────────────────────────

#[test]
fn test_submit_splits_and_trims_recipients() {
    let t = Instant::now();
    let mut session = connected(t);
    fill_form(&mut session, "  me@example.com ", "a@x.com, ,b@y.com ,");

    assert!(session.submit(t));
    let commands = session.take_commands();
    let email = single_send(&commands);
    assert_eq!(email.sender, "me@example.com");
    assert_eq!(email.recipients, vec!["a@x.com", "b@y.com"]);
    assert_eq!(email.subject, "Hello");
    assert!(email.attachments.is_empty());

    let status = session.status().unwrap();
    assert_eq!(status.text, "Sending email...");
    assert_eq!(status.kind, StatusKind::Info);
}

#[test]
fn test_separator_only_recipients_send_nothing() {
    let t = Instant::now();
    let mut session = connected(t);
    fill_form(&mut session, "me@example.com", " , ,, ");

    assert!(!session.submit(t));
    assert!(session.take_commands().is_empty());
    assert_eq!(
        session.status().unwrap().text,
        "At least one recipient is required"
    );
    assert!(session.is_send_enabled());
}

#[test]
fn test_missing_sender_sends_nothing() {
    let t = Instant::now();
    let mut session = connected(t);
    fill_form(&mut session, "   ", "a@x.com");

    assert!(!session.submit(t));
    assert!(session.take_commands().is_empty());
    assert_eq!(
        session.status().unwrap().text,
        "Sender and recipients are required"
    );
}

#[test]
fn test_send_control_reenabled_after_cooldown() {
    let t = Instant::now();
    let mut session = connected(t);
    fill_form(&mut session, "me@example.com", "a@x.com");

    assert!(session.submit(t));
    assert!(!session.is_send_enabled());

    // A second submit during the cooldown is ignored
    assert!(!session.submit(t + ms(500)));

    session.tick(t + ms(1999));
    assert!(!session.is_send_enabled());
    session.tick(t + ms(2000));
    assert!(session.is_send_enabled());
}

#[test]
fn test_submit_while_disconnected_after_cooldown() {
    let t = Instant::now();
    let mut session = connected(t);
    fill_form(&mut session, "me@example.com", "a@x.com");
    assert!(session.submit(t));
    session.take_commands();

    // The socket drops during the cooldown, the timer still re-enables send
    session.handle_event(t + ms(1000), AppEvent::Closed);
    session.tick(t + ms(2000));
    assert!(session.is_send_enabled());

    fill_form(&mut session, "me@example.com", "a@x.com");
    assert!(!session.submit(t + ms(2100)));
    assert!(sent(&session.take_commands()).is_empty());
    assert_eq!(session.status().unwrap().text, "Not connected to server");
}

#[test]
fn test_send_success_clears_form_and_refreshes() {
    let t = Instant::now();
    let mut session = connected(t);
    fill_form(&mut session, "me@example.com", "a@x.com");
    session.handle_event(
        t,
        AppEvent::AttachmentLoaded(Attachment::from_bytes("a.txt", b"A")),
    );
    assert!(session.submit(t));
    session.take_commands();

    session.handle_frame(
        t + ms(300),
        r#"{"type":"send_success","message":"Email sent successfully","timestamp":"2024-05-01T10:00:00.000Z"}"#,
    );
    assert!(session.form.is_empty());
    assert!(session.attachments().is_empty());
    assert_eq!(
        sent(&session.take_commands()),
        vec![&OutboundMessage::GetRecipients]
    );

    let status = session.status().unwrap();
    assert_eq!(status.text, "Email sent successfully");
    assert_eq!(status.kind, StatusKind::Success);
}

#[test]
fn test_clear_form_restores_default_sender() {
    let mut session =
        Session::new(Timings::default()).with_default_sender(Some("me@example.com".into()));
    assert_eq!(session.form.sender, "me@example.com");

    session.form.sender = "other@example.com".into();
    session.form.body = "draft".into();
    session.clear_form();
    assert_eq!(session.form.sender, "me@example.com");
    assert!(session.form.body.is_empty());
}

// ─── Attachments ────────────────────────────────────────────────────

#[test]
fn test_attachments_append_in_completion_order() {
    let t = Instant::now();
    let mut session = connected(t);

    session.stage_files(vec!["a.txt".into(), "b.txt".into()]);
    assert_eq!(
        session.take_commands(),
        vec![Command::LoadAttachments(vec!["a.txt".into(), "b.txt".into()])]
    );

    // b finishes reading before a
    session.handle_event(
        t,
        AppEvent::AttachmentLoaded(Attachment::from_bytes("b.txt", b"B")),
    );
    session.handle_event(
        t,
        AppEvent::AttachmentLoaded(Attachment::from_bytes("a.txt", b"A")),
    );
    let names: Vec<&str> = session.attachments().iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["b.txt", "a.txt"]);

    fill_form(&mut session, "me@example.com", "x@y.z");
    assert!(session.submit(t));
    let commands = session.take_commands();
    let email = single_send(&commands);
    assert_eq!(email.attachments[0].name, "b.txt");
    assert_eq!(email.attachments[1].name, "a.txt");
}

#[test]
fn test_remove_attachment_by_position() {
    let t = Instant::now();
    let mut session = connected(t);
    for name in ["one.txt", "two.txt", "three.txt"] {
        session.handle_event(
            t,
            AppEvent::AttachmentLoaded(Attachment::from_bytes(name, b"x")),
        );
    }

    let removed = session.remove_attachment(1).unwrap();
    assert_eq!(removed.name, "two.txt");
    assert_eq!(session.attachments().len(), 2);
    assert!(session.remove_attachment(5).is_none());
}

#[test]
fn test_failed_read_names_the_file() {
    let t = Instant::now();
    let mut session = connected(t);
    session.handle_event(
        t,
        AppEvent::AttachmentFailed {
            path: "/missing/report.pdf".into(),
            error: "not found".into(),
        },
    );
    assert!(session.attachments().is_empty());
    let status = session.status().unwrap();
    assert_eq!(status.kind, StatusKind::Error);
    assert!(status.text.contains("report.pdf"));
}

#[test]
fn test_stage_no_files_is_noop() {
    let mut session = Session::new(Timings::default());
    session.stage_files(Vec::new());
    assert!(session.take_commands().is_empty());
}

// ─── Status expiry ──────────────────────────────────────────────────

#[test]
fn test_success_and_error_status_expire() {
    let t = Instant::now();
    let mut session = connected(t);
    assert!(session.status().is_some());

    session.tick(t + ms(4999));
    assert!(session.status().is_some());
    session.tick(t + ms(5000));
    assert!(session.status().is_none());

    session.set_status(t + ms(6000), "boom", StatusKind::Error);
    session.tick(t + ms(11_000));
    assert!(session.status().is_none());
}

#[test]
fn test_info_status_persists_until_replaced() {
    let t = Instant::now();
    let mut session = connected(t);
    fill_form(&mut session, "me@example.com", "a@x.com");
    assert!(session.submit(t));

    session.tick(t + ms(60_000));
    assert_eq!(session.status().unwrap().text, "Sending email...");

    session.handle_frame(t + ms(60_001), r#"{"type":"send_success","message":"Sent"}"#);
    assert_eq!(session.status().unwrap().text, "Sent");
}
