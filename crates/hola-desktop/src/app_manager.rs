use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};
use std::thread;

use flume::Sender;
use hola_core::{AppAction, AppReconciler, AppState, AppUpdate, FfiApp};

use crate::media_bridge::DesktopMediaBridge;

#[derive(Clone)]
pub struct AppManager {
    inner: Arc<Inner>,
}

impl std::hash::Hash for AppManager {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::ptr::hash(Arc::as_ptr(&self.inner), state);
    }
}

struct Inner {
    core: Arc<FfiApp>,
    model: RwLock<ManagerModel>,
    subscribers: Mutex<Vec<Sender<()>>>,
}

struct ManagerModel {
    state: AppState,
    last_rev_applied: u64,
}

impl ManagerModel {
    fn new(initial: AppState) -> Self {
        Self {
            last_rev_applied: initial.rev,
            state: initial,
        }
    }

    fn apply_update(&mut self, update: AppUpdate) -> bool {
        let update_rev = update.rev();
        if update_rev <= self.last_rev_applied {
            return false;
        }

        self.last_rev_applied = update_rev;
        match update {
            AppUpdate::FullState(state) => self.state = state,
        }
        true
    }
}

impl AppManager {
    pub fn new() -> std::io::Result<Self> {
        let data_dir = resolve_data_dir()?;
        ensure_default_config(&data_dir)?;

        let core = FfiApp::new(data_dir.to_string_lossy().to_string());
        core.set_media_bridge(Box::new(DesktopMediaBridge::new(
            data_dir.join("captures"),
            resolve_library_dir(),
        )));
        let initial = core.state();

        let inner = Arc::new(Inner {
            core: core.clone(),
            model: RwLock::new(ManagerModel::new(initial)),
            subscribers: Mutex::new(Vec::new()),
        });

        let (update_tx, update_rx) = flume::unbounded::<AppUpdate>();
        core.listen_for_updates(Box::new(ChannelReconciler { tx: update_tx }));

        let inner_for_thread = inner.clone();
        thread::spawn(move || {
            while let Ok(update) = update_rx.recv() {
                inner_for_thread.apply_update(update);
            }
        });

        Ok(Self { inner })
    }

    pub fn state(&self) -> AppState {
        read_model(&self.inner.model).state.clone()
    }

    pub fn dispatch(&self, action: AppAction) {
        self.inner.core.dispatch(action);
    }

    pub fn subscribe_updates(&self) -> flume::Receiver<()> {
        self.inner.subscribe_updates()
    }
}

impl Inner {
    fn apply_update(&self, update: AppUpdate) {
        let mut model = write_model(&self.model);
        let changed = model.apply_update(update);
        drop(model);

        if changed {
            self.notify_subscribers();
        }
    }

    fn subscribe_updates(&self) -> flume::Receiver<()> {
        let (tx, rx) = flume::unbounded();
        let mut subscribers = lock_subscribers(&self.subscribers);
        subscribers.push(tx);
        rx
    }

    fn notify_subscribers(&self) {
        let mut subscribers = lock_subscribers(&self.subscribers);
        subscribers.retain(|tx| tx.send(()).is_ok());
    }
}

struct ChannelReconciler {
    tx: Sender<AppUpdate>,
}

impl AppReconciler for ChannelReconciler {
    fn reconcile(&self, update: AppUpdate) {
        let _ = self.tx.send(update);
    }
}

pub(crate) fn resolve_data_dir() -> std::io::Result<PathBuf> {
    let dir = if let Some(raw) = std::env::var_os("HOLA_DESKTOP_DATA_DIR") {
        PathBuf::from(raw)
    } else if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".hola")
    } else {
        PathBuf::from(".hola")
    };
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

fn resolve_library_dir() -> PathBuf {
    if let Some(raw) = std::env::var_os("HOLA_DESKTOP_LIBRARY_DIR") {
        PathBuf::from(raw)
    } else if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join("Pictures").join("Hola")
    } else {
        PathBuf::from("Hola Pictures")
    }
}

fn ensure_default_config(data_dir: &Path) -> std::io::Result<()> {
    let path = data_dir.join("hola_config.json");
    if path.exists() {
        return Ok(());
    }
    std::fs::write(path, hola_core::default_config_json().as_bytes())
}

fn read_model(lock: &RwLock<ManagerModel>) -> std::sync::RwLockReadGuard<'_, ManagerModel> {
    match lock.read() {
        Ok(guard) => guard,
        Err(poison) => poison.into_inner(),
    }
}

fn write_model(lock: &RwLock<ManagerModel>) -> std::sync::RwLockWriteGuard<'_, ManagerModel> {
    match lock.write() {
        Ok(guard) => guard,
        Err(poison) => poison.into_inner(),
    }
}

fn lock_subscribers(lock: &Mutex<Vec<Sender<()>>>) -> std::sync::MutexGuard<'_, Vec<Sender<()>>> {
    match lock.lock() {
        Ok(guard) => guard,
        Err(poison) => poison.into_inner(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(rev: u64, counter: u64) -> AppState {
        let mut state = AppState::empty();
        state.rev = rev;
        state.counter = counter;
        state
    }

    #[test]
    fn stale_full_state_is_dropped() {
        let mut model = ManagerModel::new(state_with(5, 2));
        let changed = model.apply_update(AppUpdate::FullState(state_with(4, 9)));

        assert!(!changed);
        assert_eq!(model.state.rev, 5);
        assert_eq!(model.state.counter, 2);
    }

    #[test]
    fn newer_full_state_replaces_the_mirror() {
        let mut model = ManagerModel::new(state_with(0, 0));
        assert!(model.apply_update(AppUpdate::FullState(state_with(1, 1))));
        assert!(model.apply_update(AppUpdate::FullState(state_with(3, 2))));
        assert_eq!(model.last_rev_applied, 3);
        assert_eq!(model.state.counter, 2);
    }

    #[test]
    fn default_config_is_written_once() {
        let tmp = tempfile::tempdir().expect("tempdir");
        ensure_default_config(tmp.path()).unwrap();
        let path = tmp.path().join("hola_config.json");
        assert!(path.exists());

        std::fs::write(&path, b"{\"disable_media\": true}").unwrap();
        ensure_default_config(tmp.path()).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "{\"disable_media\": true}"
        );
    }
}
