//! Integration tests for folio-tui.
//!
//! These exercise the public API from outside the crate: route resolution
//! and redirects, preloading, entrance animation semantics, and the contact
//! form's submission flow, driven through the headless pilot.

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use tokio_test::assert_ok;

use folio_tui::anim::{AnimationTrigger, Easing, EntranceController, TweenSpec};
use folio_tui::event::{Key, PreloaderHidden};
use folio_tui::form::{FailingSender, FormStatus};
use folio_tui::geometry::Region;
use folio_tui::page::{portfolio_routes, SectionId};
use folio_tui::testing::Pilot;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

// ---------------------------------------------------------------------------
// Route table invariants
// ---------------------------------------------------------------------------

#[test]
fn unmatched_paths_resolve_to_the_wildcard_redirect() {
    let table = portfolio_routes().unwrap();
    for path in ["/unknown-page", "/about/x/y", "/ABOUT", "/contact2"] {
        let entry = table.resolve(path).unwrap();
        // Deep paths under a registered prefix resolve to that page; every
        // other stray path hits the wildcard.
        assert!(entry.is_wildcard() || path.starts_with(&entry.path), "{path}");
    }
    assert!(table.resolve("/totally/unknown").unwrap().is_wildcard());
}

#[test]
fn wildcard_is_terminal_and_shadows_nothing() {
    let table = portfolio_routes().unwrap();
    assert!(table.entries().last().unwrap().is_wildcard());
    for path in ["/", "/about", "/projects", "/skills", "/contact"] {
        assert_eq!(table.resolve(path).unwrap().path, path);
    }
}

#[tokio::test(start_paused = true)]
async fn navigating_to_unknown_page_lands_on_root() {
    let mut pilot = assert_ok!(Pilot::new(80, 24));
    pilot.navigate("/unknown-page");
    pilot.settle_for(ms(200)).await;
    assert_eq!(pilot.title(), "Uma Shankar - Software Engineer");
}

// ---------------------------------------------------------------------------
// Preloading
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn preloaded_routes_navigate_instantly() {
    let mut pilot = Pilot::new(80, 24).unwrap();
    pilot.navigate("/");
    // Initial activation, then background preloads (50ms fetch each).
    pilot.settle_for(ms(400)).await;
    assert!(pilot.app().router().loader().is_warm("/about"));

    // A warm navigation completes within a single pump step, far below the
    // 50ms cold-fetch delay.
    pilot.navigate("/about");
    pilot.settle_for(Pilot::STEP).await;
    assert_eq!(pilot.title(), "About | Uma Shankar");
}

// ---------------------------------------------------------------------------
// Entrance animation semantics
// ---------------------------------------------------------------------------

fn mounted_row(n: usize, top: i32) -> (Vec<SectionId>, slotmap::SecondaryMap<SectionId, Region>) {
    let mut arena: slotmap::SlotMap<SectionId, ()> = slotmap::SlotMap::with_key();
    let mut bounds = slotmap::SecondaryMap::new();
    let mut ids = Vec::new();
    for i in 0..n {
        let id = arena.insert(());
        bounds.insert(id, Region::new(0, top + (i as i32) * 8, 80, 8));
        ids.push(id);
    }
    (ids, bounds)
}

#[test]
fn staggered_elements_start_at_index_times_interval() {
    let (ids, bounds) = mounted_row(3, 10);
    let mut ctrl = EntranceController::new();
    ctrl.arm(
        AnimationTrigger::new("card")
            .with_threshold(0.8)
            .with_tween(TweenSpec::entrance().with_easing(Easing::Linear).with_duration(ms(100)))
            .staggered(ms(100)),
        ids.clone(),
    )
    .unwrap();

    let viewport = Region::new(0, 0, 80, 30);
    ctrl.on_scroll(viewport, &bounds, Duration::ZERO);

    // Element i runs over [i*100, i*100 + 100): sample at the midpoints.
    for (i, id) in ids.iter().enumerate() {
        let midpoint = ms(i as u64 * 100 + 50);
        let styles = ctrl.styles(midpoint);
        let opacity = styles[id].opacity;
        assert!(
            (opacity - 0.5).abs() < 1e-5,
            "element {i} at its midpoint should be half-faded, got {opacity}"
        );
    }
}

#[tokio::test(start_paused = true)]
async fn fires_once_survives_scroll_down_up_down() {
    let mut pilot = Pilot::new(80, 10).unwrap();
    pilot.navigate("/skills");
    pilot.settle_for(ms(200)).await;

    let initial = pilot.view().unwrap().entrances().tween_count();
    assert!(initial > 0, "above-the-fold sections animate on mount");

    pilot.scroll_by(100);
    let after_down = pilot.view().unwrap().entrances().tween_count();
    assert!(after_down >= initial);

    pilot.scroll_to(0);
    pilot.scroll_by(100);
    pilot.scroll_to(0);
    assert_eq!(
        pilot.view().unwrap().entrances().tween_count(),
        after_down,
        "fires-once triggers must not re-fire on repeated crossings"
    );
}

#[tokio::test(start_paused = true)]
async fn renavigation_disarms_old_view_observers() {
    let mut pilot = Pilot::new(80, 10).unwrap();
    pilot.navigate("/skills");
    pilot.settle_for(ms(200)).await;
    assert!(pilot.view().unwrap().entrances().armed_count() > 0);

    pilot.navigate("/about");
    pilot.settle_for(ms(200)).await;
    assert_eq!(pilot.title(), "About | Uma Shankar");
    // The new view's observers belong to the new view alone.
    let armed = pilot.view().unwrap().entrances().armed_count();
    assert!(armed <= 2, "stale observers must not accumulate, got {armed}");
}

// ---------------------------------------------------------------------------
// Contact form scenarios
// ---------------------------------------------------------------------------

async fn contact_pilot() -> Pilot {
    let mut pilot = Pilot::new(80, 30).unwrap();
    pilot.navigate("/contact");
    pilot.settle_for(ms(200)).await;
    assert_eq!(pilot.title(), "Contact | Uma Shankar");
    pilot
}

fn fill_valid_contact(pilot: &mut Pilot) {
    pilot.type_text("Al");
    pilot.press_key(Key::Tab);
    pilot.type_text("a@b.com");
    pilot.press_key(Key::Tab);
    pilot.type_text("Hello there!");
}

#[tokio::test(start_paused = true)]
async fn valid_submission_notifies_and_clears() {
    let mut pilot = contact_pilot().await;
    fill_valid_contact(&mut pilot);
    pilot.press_key(Key::Enter);

    let form = pilot.view().unwrap().form().unwrap();
    assert_eq!(form.status(), FormStatus::Submitting);

    // The simulated delivery takes 1.5s.
    pilot.settle_for(ms(1600)).await;
    let texts = pilot.notification_texts();
    assert_eq!(texts.len(), 1);
    assert!(texts[0].starts_with("Message sent successfully"));
    for field in ["name", "email", "message"] {
        assert_eq!(pilot.form_value(field).unwrap(), "", "{field} should be cleared");
    }
}

#[tokio::test(start_paused = true)]
async fn double_submit_yields_exactly_one_notification() {
    let mut pilot = contact_pilot().await;
    fill_valid_contact(&mut pilot);
    pilot.press_key(Key::Enter);
    pilot.press_key(Key::Enter); // second submit while in flight: no-op

    pilot.settle_for(ms(3500)).await;
    // One completion, one reset; notifications expire after 4s so the single
    // one is still visible here.
    assert_eq!(pilot.notification_texts().len(), 1);
    assert_eq!(pilot.form_value("name").unwrap(), "");
}

#[tokio::test(start_paused = true)]
async fn invalid_email_keeps_form_idle_and_silent() {
    let mut pilot = contact_pilot().await;
    pilot.type_text("Al");
    pilot.press_key(Key::Tab);
    pilot.type_text("not-an-email");
    pilot.press_key(Key::Tab);
    pilot.type_text("Hello there!");
    pilot.press_key(Key::Enter);

    pilot.settle_for(ms(2000)).await;
    let form = pilot.view().unwrap().form().unwrap();
    assert_eq!(form.status(), FormStatus::Idle);
    assert!(form.field("email").unwrap().is_touched());
    assert!(pilot.notification_texts().is_empty());
    // Values are kept for correction.
    assert_eq!(pilot.form_value("email").unwrap(), "not-an-email");
}

#[tokio::test(start_paused = true)]
async fn failed_delivery_preserves_values_for_retry() {
    let mut pilot = Pilot::new(80, 30)
        .unwrap()
        .with_sender(Arc::new(FailingSender::new(ms(200), "relay down")));
    pilot.navigate("/contact");
    pilot.settle_for(ms(200)).await;

    fill_valid_contact(&mut pilot);
    pilot.press_key(Key::Enter);
    pilot.settle_for(ms(400)).await;

    let texts = pilot.notification_texts();
    assert_eq!(texts.len(), 1);
    assert!(texts[0].contains("Could not send"));
    assert_eq!(pilot.form_value("name").unwrap(), "Al");
    assert_eq!(pilot.form_value("message").unwrap(), "Hello there!");
}

// ---------------------------------------------------------------------------
// Preloader event contract
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn preloader_hidden_event_reports_total_time() {
    let mut pilot = Pilot::with_config(
        folio_tui::app::AppConfig::new()
            .with_splash(ms(400))
            .with_fetch_delay(ms(50)),
        80,
        24,
    )
    .unwrap();
    pilot.navigate("/");

    // While the splash runs, the frame is the overlay.
    pilot.tick(ms(100));
    assert!(pilot.render().iter().any(|l| l.text.contains("Loading...")));

    pilot.settle_for(ms(600)).await;
    let events = pilot.events();
    let hidden = events
        .iter()
        .find_map(|e| e.downcast_ref::<PreloaderHidden>())
        .expect("PreloaderHidden should be dispatched");
    assert!(hidden.total_time >= ms(400));

    // After the splash the page renders with its title bar.
    assert!(pilot.render()[0].text.contains("Uma Shankar"));
}
