use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use hola_core::{
    project_screen, AppAction, AppReconciler, AppState, AppUpdate, CaptureOptions, CaptureResult,
    FfiApp, ImageSource, MediaBridge, Mood, PermissionStatus, PromptKind, SaveResult,
    ScreenModal,
};
use tempfile::tempdir;

fn write_config(data_dir: &str, disable_media: bool) {
    let path = std::path::Path::new(data_dir).join("hola_config.json");
    let v = serde_json::json!({
        "disable_media": disable_media,
        "capture_quality": 0.8,
    });
    std::fs::write(path, serde_json::to_vec(&v).unwrap()).unwrap();
}

fn wait_until(what: &str, timeout: Duration, mut f: impl FnMut() -> bool) {
    let start = Instant::now();
    while start.elapsed() < timeout {
        if f() {
            return;
        }
        std::thread::sleep(Duration::from_millis(20));
    }
    panic!("{what}: condition not met within {timeout:?}");
}

fn new_app(disable_media: bool) -> (Arc<FfiApp>, tempfile::TempDir) {
    let dir = tempdir().unwrap();
    write_config(&dir.path().to_string_lossy(), disable_media);
    let app = FfiApp::new(dir.path().to_string_lossy().to_string());
    (app, dir)
}

/// Dispatch and wait for the action's snapshot to land.
fn dispatch_and_wait(app: &FfiApp, action: AppAction) -> AppState {
    let rev = app.state().rev;
    app.dispatch(action);
    wait_until("state advanced", Duration::from_secs(2), || {
        app.state().rev > rev
    });
    app.state()
}

fn type_name(app: &FfiApp, value: &str) -> AppState {
    dispatch_and_wait(
        app,
        AppAction::SetNameInput {
            value: value.to_string(),
        },
    )
}

struct TestReconciler {
    updates: Arc<Mutex<Vec<AppUpdate>>>,
}

impl TestReconciler {
    fn new() -> (Self, Arc<Mutex<Vec<AppUpdate>>>) {
        let updates = Arc::new(Mutex::new(vec![]));
        (
            Self {
                updates: updates.clone(),
            },
            updates,
        )
    }
}

impl AppReconciler for TestReconciler {
    fn reconcile(&self, update: AppUpdate) {
        self.updates.lock().unwrap().push(update);
    }
}

#[derive(Clone)]
struct MockMediaBridge {
    camera: Arc<Mutex<PermissionStatus>>,
    library_read: Arc<Mutex<PermissionStatus>>,
    library_write: Arc<Mutex<PermissionStatus>>,
    next_capture: Arc<Mutex<CaptureResult>>,
    save_result: Arc<Mutex<SaveResult>>,
    saved_uris: Arc<Mutex<Vec<String>>>,
    last_options: Arc<Mutex<Option<CaptureOptions>>>,
}

impl MockMediaBridge {
    fn new() -> Self {
        Self {
            camera: Arc::new(Mutex::new(PermissionStatus::Granted)),
            library_read: Arc::new(Mutex::new(PermissionStatus::Granted)),
            library_write: Arc::new(Mutex::new(PermissionStatus::Granted)),
            next_capture: Arc::new(Mutex::new(CaptureResult::Cancelled)),
            save_result: Arc::new(Mutex::new(SaveResult::Saved)),
            saved_uris: Arc::new(Mutex::new(vec![])),
            last_options: Arc::new(Mutex::new(None)),
        }
    }

    fn will_capture(&self, uri: &str) {
        *self.next_capture.lock().unwrap() = CaptureResult::Captured {
            uri: uri.to_string(),
        };
    }

    fn saved_uris(&self) -> Vec<String> {
        self.saved_uris.lock().unwrap().clone()
    }
}

impl MediaBridge for MockMediaBridge {
    fn request_camera_access(&self) -> PermissionStatus {
        *self.camera.lock().unwrap()
    }

    fn capture_photo(&self, options: CaptureOptions) -> CaptureResult {
        *self.last_options.lock().unwrap() = Some(options);
        self.next_capture.lock().unwrap().clone()
    }

    fn request_library_read_access(&self) -> PermissionStatus {
        *self.library_read.lock().unwrap()
    }

    fn pick_from_library(&self, options: CaptureOptions) -> CaptureResult {
        *self.last_options.lock().unwrap() = Some(options);
        self.next_capture.lock().unwrap().clone()
    }

    fn request_library_write_access(&self) -> PermissionStatus {
        *self.library_write.lock().unwrap()
    }

    fn save_asset(&self, uri: String) -> SaveResult {
        self.saved_uris.lock().unwrap().push(uri);
        self.save_result.lock().unwrap().clone()
    }
}

fn wait_idle(app: &FfiApp) {
    wait_until("media flow settled", Duration::from_secs(3), || {
        !app.state().busy.any()
    });
}

#[test]
fn typing_updates_count_and_emoji_from_trimmed_text() {
    let (app, _dir) = new_app(true);

    let s = type_name(&app, "   Ana   ");
    assert_eq!(s.name_input, "   Ana   ");
    assert_eq!(s.char_count, 3);
    assert_eq!(s.mood, Mood::MildPositive);

    let s = type_name(&app, "Guadalupe Victoria");
    assert_eq!(s.char_count, 18);
    assert_eq!(s.mood, Mood::Excited);
    assert_eq!(s.emoji, Mood::Excited.emoji());
}

#[test]
fn add_name_scenario_trims_and_clears_input() {
    let (app, _dir) = new_app(true);
    type_name(&app, " Ana ");
    let s = dispatch_and_wait(&app, AppAction::AddName);

    assert_eq!(s.names, vec!["Ana".to_string()]);
    assert_eq!(s.name_input, "");
    assert!(s.status_message.contains("Ana"));
}

#[test]
fn duplicate_and_empty_adds_are_rejected() {
    let (app, _dir) = new_app(true);

    let s = dispatch_and_wait(&app, AppAction::AddName);
    assert!(s.names.is_empty());
    assert_eq!(s.status_message, "Enter a name to add it to the list.");

    type_name(&app, "Ana");
    dispatch_and_wait(&app, AppAction::AddName);
    type_name(&app, "Ana");
    let s = dispatch_and_wait(&app, AppAction::AddName);
    assert_eq!(s.names, vec!["Ana".to_string()]);
    assert_eq!(s.status_message, "'Ana' is already in the list.");
}

#[test]
fn greeting_uses_trimmed_name_or_asks_for_one() {
    let (app, _dir) = new_app(true);
    let s = dispatch_and_wait(&app, AppAction::ShowGreeting);
    assert_eq!(s.status_message, "Please enter your name before continuing.");

    type_name(&app, "  Luz ");
    let s = dispatch_and_wait(&app, AppAction::ShowGreeting);
    assert_eq!(s.status_message, "Hello, Luz!");
}

#[test]
fn delete_name_goes_through_confirmation() {
    let (app, _dir) = new_app(true);
    for name in ["Ana", "Bea"] {
        type_name(&app, name);
        dispatch_and_wait(&app, AppAction::AddName);
    }

    let s = dispatch_and_wait(
        &app,
        AppAction::RequestDeleteName {
            name: "Ana".into(),
        },
    );
    let prompt = s.prompt.clone().expect("delete prompt");
    assert!(matches!(prompt.kind, PromptKind::DeleteName { ref name } if name == "Ana"));
    assert!(matches!(project_screen(&s).modal, ScreenModal::Confirm(_)));

    let s = dispatch_and_wait(
        &app,
        AppAction::RespondToPrompt {
            prompt_id: prompt.id,
            confirmed: true,
        },
    );
    assert_eq!(s.names, vec!["Bea".to_string()]);
    assert!(s.prompt.is_none());
    assert_eq!(s.status_message, "'Ana' was removed from the list.");
}

#[test]
fn clear_all_after_counter_and_names_resets_everything() {
    let (app, _dir) = new_app(true);
    for _ in 0..3 {
        dispatch_and_wait(&app, AppAction::IncrementCounter);
    }
    for name in ["A", "B"] {
        type_name(&app, name);
        dispatch_and_wait(&app, AppAction::AddName);
    }
    let s = app.state();
    assert_eq!(s.counter, 3);
    assert_eq!(s.names, vec!["A".to_string(), "B".to_string()]);

    let s = dispatch_and_wait(&app, AppAction::ClearAll);
    assert_eq!(
        s,
        AppState {
            rev: s.rev,
            ..AppState::empty()
        }
    );
}

#[test]
fn reconciler_sees_every_revision_in_order() {
    let (app, _dir) = new_app(true);
    let (reconciler, updates) = TestReconciler::new();
    app.listen_for_updates(Box::new(reconciler));

    // A second listener is refused so updates are never split.
    let (second, second_updates) = TestReconciler::new();
    app.listen_for_updates(Box::new(second));

    for _ in 0..5 {
        app.dispatch(AppAction::IncrementCounter);
    }
    wait_until("five updates", Duration::from_secs(2), || {
        updates.lock().unwrap().len() == 5
    });

    let revs: Vec<u64> = updates.lock().unwrap().iter().map(|u| u.rev()).collect();
    assert_eq!(revs, vec![1, 2, 3, 4, 5]);
    let AppUpdate::FullState(last) = updates.lock().unwrap().last().cloned().unwrap();
    assert_eq!(last.counter, 5);
    assert!(second_updates.lock().unwrap().is_empty());
}

#[test]
fn capture_with_denied_permission_keeps_image_absent() {
    let (app, _dir) = new_app(false);
    let bridge = MockMediaBridge::new();
    *bridge.camera.lock().unwrap() = PermissionStatus::Denied;
    bridge.will_capture("file:///never.jpg");
    app.set_media_bridge(Box::new(bridge.clone()));

    app.dispatch(AppAction::CaptureFromCamera);
    wait_until("alert shown", Duration::from_secs(3), || {
        app.state().alert.is_some()
    });

    let s = app.state();
    assert!(s.image.is_none());
    assert_eq!(s.alert.unwrap().title, "Permission denied");
    assert!(bridge.last_options.lock().unwrap().is_none());
}

#[test]
fn pick_then_save_round_trip_through_the_bridge() {
    let (app, _dir) = new_app(false);
    let bridge = MockMediaBridge::new();
    bridge.will_capture("content://media/42");
    app.set_media_bridge(Box::new(bridge.clone()));

    app.dispatch(AppAction::PickFromLibrary);
    wait_until("image picked", Duration::from_secs(3), || {
        app.state().image.is_some()
    });
    let s = app.state();
    let image = s.image.clone().unwrap();
    assert_eq!(image.uri, "content://media/42");
    assert_eq!(image.source, ImageSource::Library);
    let options = bridge.last_options.lock().unwrap().clone().unwrap();
    assert!((options.quality - 0.8).abs() < f32::EPSILON);
    assert!(!options.allows_editing);

    dispatch_and_wait(&app, AppAction::ClearAlert);
    let s = dispatch_and_wait(&app, AppAction::RequestSaveImage);
    let prompt = s.prompt.expect("save prompt");
    app.dispatch(AppAction::RespondToPrompt {
        prompt_id: prompt.id,
        confirmed: true,
    });
    wait_until("saved alert", Duration::from_secs(3), || {
        app.state().alert.is_some()
    });
    wait_idle(&app);

    assert_eq!(bridge.saved_uris(), vec!["content://media/42".to_string()]);
    assert_eq!(app.state().alert.unwrap().title, "Saved");
}

#[test]
fn failed_save_reports_generic_error_and_keeps_image() {
    let (app, _dir) = new_app(false);
    let bridge = MockMediaBridge::new();
    bridge.will_capture("file:///photo.jpg");
    *bridge.save_result.lock().unwrap() = SaveResult::Failed {
        message: "E_IO".into(),
    };
    app.set_media_bridge(Box::new(bridge.clone()));

    app.dispatch(AppAction::CaptureFromCamera);
    wait_until("photo taken", Duration::from_secs(3), || {
        app.state().image.is_some()
    });
    wait_idle(&app);
    dispatch_and_wait(&app, AppAction::ClearAlert);

    let s = dispatch_and_wait(&app, AppAction::RequestSaveImage);
    app.dispatch(AppAction::RespondToPrompt {
        prompt_id: s.prompt.unwrap().id,
        confirmed: true,
    });
    wait_until("error alert", Duration::from_secs(3), || {
        app.state().alert.is_some()
    });
    wait_idle(&app);

    let s = app.state();
    assert_eq!(s.alert.unwrap().message, "Could not save the image.");
    assert_eq!(s.image.unwrap().uri, "file:///photo.jpg");
}

#[test]
fn media_disabled_by_config_never_calls_the_bridge() {
    let (app, _dir) = new_app(true);
    let bridge = MockMediaBridge::new();
    bridge.will_capture("file:///x.jpg");
    app.set_media_bridge(Box::new(bridge.clone()));

    let s = dispatch_and_wait(&app, AppAction::CaptureFromCamera);
    assert_eq!(s.alert.unwrap().title, "Unavailable");
    assert!(s.image.is_none());
    assert!(bridge.last_options.lock().unwrap().is_none());
}
