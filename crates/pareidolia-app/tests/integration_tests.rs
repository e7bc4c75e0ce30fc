//! End-to-end flows over the in-memory backend: a promoter drafts and submits
//! an event, a reviewer publishes it, consumers review it once it is over.

use std::sync::Arc;

use chrono::Duration;

use pareidolia_app::{
    App, AppError, CallerIdentity, EventRow, EventUpdate, InMemoryPersistence, Persistence,
};
use pareidolia_core::{Account, AccountRole, Timestamp};
use pareidolia_review::{ReviewContext, ReviewSubmission, ANONYMOUS_AUTHOR_NAME, PROMOTER_BADGE};
use pareidolia_state::{Event, EventState};

struct World {
    app: App,
    store: Arc<InMemoryPersistence>,
    promoter: CallerIdentity,
    reviewer: CallerIdentity,
    consumer: CallerIdentity,
}

fn caller(store: &InMemoryPersistence, name: &str, role: AccountRole) -> CallerIdentity {
    let account = Account::new(name, "Test", role);
    store.insert_account(account.clone());
    CallerIdentity::new(account.id, account.role)
}

fn world() -> World {
    let store = Arc::new(InMemoryPersistence::new());
    let promoter = caller(&store, "Paola", AccountRole::Promoter);
    let reviewer = caller(&store, "Remo", AccountRole::Reviewer);
    let consumer = caller(&store, "Carla", AccountRole::Consumer);
    World {
        app: App::new(store.clone()),
        store,
        promoter,
        reviewer,
        consumer,
    }
}

fn draft_event(w: &World, ends_in: Duration) -> Event {
    let ends_at = Timestamp::now().checked_add(ends_in).unwrap();
    let event = Event::new_draft(
        "Night Market",
        "Street food and music.",
        vec![w.promoter.account_id],
        ends_at,
    );
    w.store.save_event(&event).unwrap();
    event
}

fn submission(event: &Event, anonymous: bool, tag: Option<&str>) -> ReviewSubmission {
    ReviewSubmission {
        event_id: event.id,
        title: "Lovely evening".into(),
        description: "Long queues but worth it.".into(),
        score: 4,
        tag: tag.map(str::to_string),
        anonymous,
    }
}

#[test]
fn full_event_lifecycle() {
    let w = world();
    let event = draft_event(&w, Duration::hours(-1));

    let edited = w
        .app
        .events
        .update_details(
            &w.promoter,
            &event.id,
            EventUpdate {
                title: Some("Night Market 2026".into()),
                ..EventUpdate::default()
            },
        )
        .unwrap();
    assert_eq!(edited.title, "Night Market 2026");
    assert!(matches!(
        w.app.events.published_event(&event.id),
        Err(AppError::NotFound(_))
    ));

    let submitted = w.app.events.submit_for_review(&w.promoter, &event.id).unwrap();
    assert_eq!(submitted.state, EventState::Review);
    assert!(!submitted.can_edit());

    let published = w.app.events.move_forward(&w.reviewer, &event.id).unwrap();
    assert_eq!(published.state, EventState::Published);
    assert!(!published.can_send_message());
    assert_eq!(w.app.events.published_event(&event.id).unwrap().title, "Night Market 2026");

    let err = w.app.events.move_forward(&w.reviewer, &event.id).unwrap_err();
    assert_eq!(err.code(), "CONFLICT");
    assert_eq!(
        w.store.load_event(&event.id).unwrap().state,
        EventState::Published
    );
}

#[test]
fn rejected_event_goes_back_to_draft_and_is_editable_again() {
    let w = world();
    let event = draft_event(&w, Duration::days(7));

    w.app.events.submit_for_review(&w.promoter, &event.id).unwrap();
    let back = w.app.events.move_backwards(&w.reviewer, &event.id).unwrap();
    assert_eq!(back.state, EventState::Draft);

    let update = EventUpdate {
        description: Some("Now with a jazz stage.".into()),
        ..EventUpdate::default()
    };
    let edited = w
        .app
        .events
        .update_details(&w.promoter, &event.id, update)
        .unwrap();
    assert_eq!(edited.description, "Now with a jazz stage.");
}

#[test]
fn consumer_reviews_published_event() {
    let w = world();
    let event = draft_event(&w, Duration::hours(-3));
    w.app.events.submit_for_review(&w.promoter, &event.id).unwrap();
    w.app.events.move_forward(&w.reviewer, &event.id).unwrap();

    let view = w
        .app
        .reviews
        .submit_review(&w.consumer, submission(&event, false, Some("Foodie")))
        .unwrap();
    assert_eq!(view.author_name, "Carla Test");
    assert_eq!(view.description, "Long queues but worth it. [Tag: Foodie]");

    let listed = w
        .app
        .reviews
        .reviews_for_event(&event.id, &ReviewContext::default())
        .unwrap();
    assert_eq!(listed, vec![view]);

    let again = w
        .app
        .reviews
        .submit_review(&w.consumer, submission(&event, false, None))
        .unwrap_err();
    assert_eq!(again.code(), "CONFLICT");
}

#[test]
fn anonymous_promoter_review_hides_badge() {
    let w = world();
    let event = draft_event(&w, Duration::hours(-3));
    w.app.events.submit_for_review(&w.promoter, &event.id).unwrap();
    w.app.events.move_forward(&w.reviewer, &event.id).unwrap();

    let admin = caller(&w.store, "Ada", AccountRole::Admin);
    let promoter_record = submission(&event, false, None)
        .into_record(w.promoter.account_id)
        .unwrap();
    w.store.save_review(&promoter_record).unwrap();

    let visible = w
        .app
        .reviews
        .get_review(&promoter_record.id, &ReviewContext::for_viewer(Some(admin.role)))
        .unwrap();
    assert_eq!(visible.author_name, format!("{PROMOTER_BADGE}Paola Test"));
    assert_eq!(visible.author_role, Some(AccountRole::Promoter));

    let hidden = w
        .app
        .reviews
        .get_review(
            &promoter_record.id,
            &ReviewContext {
                anonymous_requested: true,
                viewer_role: Some(admin.role),
            },
        )
        .unwrap();
    assert_eq!(hidden.author_name, ANONYMOUS_AUTHOR_NAME);
    assert!(!hidden.author_name.contains("Promoter"));
    assert_eq!(hidden.author_id, None);
    assert_eq!(hidden.author_role, None);
}

#[test]
fn corrupt_state_tag_is_an_internal_error() {
    let w = world();
    let event = draft_event(&w, Duration::days(1));
    let mut row = EventRow::from(&event);
    row.state = "CANCELLED".into();
    w.store.insert_event_row(row);

    let err = w.app.events.move_forward(&w.reviewer, &event.id).unwrap_err();
    assert!(matches!(err, AppError::Internal(_)));
    let body = err.to_body();
    assert_eq!(body.code, "INTERNAL_ERROR");
    assert!(!body.message.contains("CANCELLED"));
}

#[test]
fn concurrent_reads_see_identical_views() {
    let w = world();
    let event = draft_event(&w, Duration::hours(-3));
    w.app.events.submit_for_review(&w.promoter, &event.id).unwrap();
    w.app.events.move_forward(&w.reviewer, &event.id).unwrap();
    let view = w
        .app
        .reviews
        .submit_review(&w.consumer, submission(&event, true, Some("VIP")))
        .unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let app = w.app.clone();
            let id = view.id;
            std::thread::spawn(move || app.reviews.get_review(&id, &ReviewContext::default()))
        })
        .collect();

    for handle in handles {
        let seen = handle.join().unwrap().unwrap();
        assert_eq!(seen, view);
        assert_eq!(seen.author_name, ANONYMOUS_AUTHOR_NAME);
    }
}
