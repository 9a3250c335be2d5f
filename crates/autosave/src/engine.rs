use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};
use uuid::Uuid;

use crate::store::{SetPatch, SetRow, SetStore, StoreError, StoreResult};

/// Quiet period after the last edit before dirty rows are flushed.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowState {
    /// Edited locally, not yet written.
    Pending,
    /// Last write attempt failed; still dirty, retried on the next flush.
    Failed,
}

/// The mirror and dirty bookkeeping, separated from the actor loop so the
/// transition rules are testable without a runtime.
struct EditorState {
    rows: Vec<SetRow>,
    dirty: HashMap<Uuid, RowState>,
}

impl EditorState {
    fn new(rows: Vec<SetRow>) -> Self {
        Self {
            rows,
            dirty: HashMap::new(),
        }
    }

    fn row(&self, set_id: Uuid) -> Option<&SetRow> {
        self.rows.iter().find(|row| row.set_id == set_id)
    }

    fn row_mut(&mut self, set_id: Uuid) -> Option<&mut SetRow> {
        self.rows.iter_mut().find(|row| row.set_id == set_id)
    }

    /// Apply an edit to the mirror and mark the row dirty. Returns false
    /// when there is nothing to do (unknown row or empty patch), in which
    /// case the debounce timer must not be re-armed.
    fn apply_edit(&mut self, set_id: Uuid, patch: SetPatch) -> bool {
        if patch.is_empty() {
            return false;
        }
        let Some(row) = self.row_mut(set_id) else {
            return false;
        };

        if let Some(weight) = patch.weight {
            row.weight = weight;
        }
        if let Some(reps) = patch.reps {
            row.reps = reps;
        }
        if let Some(is_completed) = patch.is_completed {
            row.is_completed = is_completed;
        }

        // A fresh edit supersedes an earlier failure.
        self.dirty.insert(set_id, RowState::Pending);
        true
    }

    /// Merge a background refresh into the mirror. Clean rows take the
    /// server values; dirty rows keep their local editable fields, and
    /// dirty rows missing from the refresh survive until flushed.
    fn apply_refresh(&mut self, incoming: Vec<SetRow>) {
        let mut next = Vec::with_capacity(incoming.len());
        for mut row in incoming {
            if self.dirty.contains_key(&row.set_id) {
                if let Some(local) = self.row(row.set_id) {
                    row.weight = local.weight;
                    row.reps = local.reps;
                    row.is_completed = local.is_completed;
                }
            }
            next.push(row);
        }
        for row in &self.rows {
            if self.dirty.contains_key(&row.set_id)
                && !next.iter().any(|kept| kept.set_id == row.set_id)
            {
                next.push(row.clone());
            }
        }
        self.rows = next;
    }

    /// Insert a freshly created row, keeping sets of the same exercise in
    /// set-number order.
    fn insert_row(&mut self, row: SetRow) {
        let position = self
            .rows
            .iter()
            .rposition(|existing| {
                existing.tracked_exercise_id == row.tracked_exercise_id
                    && existing.set_number <= row.set_number
            })
            .map(|index| index + 1)
            .unwrap_or(self.rows.len());
        self.rows.insert(position, row);
    }

    fn dirty_ids(&self) -> Vec<Uuid> {
        self.dirty.keys().copied().collect()
    }

    fn has_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    fn clear_dirty(&mut self, set_id: Uuid) {
        self.dirty.remove(&set_id);
    }

    fn mark_failed(&mut self, set_id: Uuid) {
        self.dirty.insert(set_id, RowState::Failed);
    }
}

enum Command {
    EditSet {
        set_id: Uuid,
        patch: SetPatch,
    },
    ToggleComplete {
        set_id: Uuid,
        reply: oneshot::Sender<StoreResult<bool>>,
    },
    AddSet {
        tracked_exercise_id: Uuid,
        set_number: i64,
        weight: f64,
        reps: i64,
        reply: oneshot::Sender<StoreResult<SetRow>>,
    },
    Refresh {
        rows: Vec<SetRow>,
    },
    FlushNow {
        reply: oneshot::Sender<()>,
    },
    Snapshot {
        reply: oneshot::Sender<Vec<SetRow>>,
    },
    UnsavedRows {
        reply: oneshot::Sender<Vec<Uuid>>,
    },
}

/// Handle to the autosave actor for one open editing session.
///
/// Field edits are fire-and-forget and coalesce behind the debounce timer;
/// completion toggles and set creation are awaited and bypass it.
pub struct SessionEditor {
    tx: mpsc::UnboundedSender<Command>,
    task: JoinHandle<()>,
}

impl SessionEditor {
    pub fn spawn<S: SetStore>(store: S, initial_rows: Vec<SetRow>) -> Self {
        Self::spawn_with_debounce(store, initial_rows, DEFAULT_DEBOUNCE)
    }

    pub fn spawn_with_debounce<S: SetStore>(
        store: S,
        initial_rows: Vec<SetRow>,
        debounce: Duration,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run_editor(store, EditorState::new(initial_rows), rx, debounce));
        Self { tx, task }
    }

    /// Record a field edit. Applied to the local mirror immediately and
    /// persisted after the quiet period.
    pub fn edit_set(&self, set_id: Uuid, patch: SetPatch) {
        let _ = self.tx.send(Command::EditSet { set_id, patch });
    }

    /// Flip a set's completion flag, writing through immediately. On
    /// failure the mirror is rolled back and the error surfaced.
    pub async fn toggle_complete(&self, set_id: Uuid) -> StoreResult<bool> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::ToggleComplete { set_id, reply })?;
        rx.await.map_err(closed)?
    }

    /// Create a set and mirror it. The row only appears once the
    /// persistent identifier is known; there are no temporary client ids.
    pub async fn add_set(
        &self,
        tracked_exercise_id: Uuid,
        set_number: i64,
        weight: f64,
        reps: i64,
    ) -> StoreResult<SetRow> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::AddSet {
            tracked_exercise_id,
            set_number,
            weight,
            reps,
            reply,
        })?;
        rx.await.map_err(closed)?
    }

    /// Merge a background refresh; dirty rows keep their local values.
    pub fn refresh(&self, rows: Vec<SetRow>) {
        let _ = self.tx.send(Command::Refresh { rows });
    }

    /// Flush all dirty rows now, without waiting for the quiet period.
    pub async fn flush_now(&self) -> StoreResult<()> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::FlushNow { reply })?;
        rx.await.map_err(closed)
    }

    /// Current local mirror contents.
    pub async fn snapshot(&self) -> StoreResult<Vec<SetRow>> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Snapshot { reply })?;
        rx.await.map_err(closed)
    }

    /// Rows with unflushed edits: the "unsaved changes" indicator.
    pub async fn unsaved_rows(&self) -> StoreResult<Vec<Uuid>> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::UnsavedRows { reply })?;
        rx.await.map_err(closed)
    }

    /// Shut the editor down, flushing any queued edits first.
    pub async fn close(self) {
        drop(self.tx);
        let _ = self.task.await;
    }

    fn send(&self, command: Command) -> StoreResult<()> {
        self.tx
            .send(command)
            .map_err(|_| StoreError::Transport("editor closed".to_string()))
    }
}

fn closed<E>(_: E) -> StoreError {
    StoreError::Transport("editor closed".to_string())
}

async fn run_editor<S: SetStore>(
    store: S,
    mut state: EditorState,
    mut rx: mpsc::UnboundedReceiver<Command>,
    debounce: Duration,
) {
    let mut deadline: Option<Instant> = None;

    loop {
        let command = if let Some(at) = deadline {
            tokio::select! {
                biased;
                _ = sleep_until(at) => {
                    deadline = flush(&store, &mut state, debounce).await;
                    continue;
                }
                command = rx.recv() => command,
            }
        } else {
            rx.recv().await
        };

        let Some(command) = command else {
            break;
        };

        match command {
            Command::EditSet { set_id, patch } => {
                if state.apply_edit(set_id, patch) {
                    deadline = Some(Instant::now() + debounce);
                }
            }
            Command::ToggleComplete { set_id, reply } => {
                let _ = reply.send(toggle_complete(&store, &mut state, set_id).await);
            }
            Command::AddSet {
                tracked_exercise_id,
                set_number,
                weight,
                reps,
                reply,
            } => {
                let result = store
                    .create_set(tracked_exercise_id, set_number, weight, reps, false)
                    .await;
                if let Ok(row) = &result {
                    state.insert_row(row.clone());
                }
                let _ = reply.send(result);
            }
            Command::Refresh { rows } => {
                state.apply_refresh(rows);
            }
            Command::FlushNow { reply } => {
                deadline = flush(&store, &mut state, debounce).await;
                let _ = reply.send(());
            }
            Command::Snapshot { reply } => {
                let _ = reply.send(state.rows.clone());
            }
            Command::UnsavedRows { reply } => {
                let _ = reply.send(state.dirty_ids());
            }
        }
    }

    // The UI dropped the handle; queued edits still get one last flush.
    if state.has_dirty() {
        flush(&store, &mut state, debounce).await;
    }
}

/// Write every dirty row's current mirror values: per-field last-write-wins,
/// one network write per row no matter how many edits coalesced. Each row
/// is acknowledged individually; only its own confirmed write clears its
/// marker. Returns the retry deadline when failures remain.
async fn flush<S: SetStore>(
    store: &S,
    state: &mut EditorState,
    debounce: Duration,
) -> Option<Instant> {
    let mut any_failed = false;

    for set_id in state.dirty_ids() {
        let Some(row) = state.row(set_id) else {
            // The row left the mirror (e.g. deleted); nothing to persist.
            state.clear_dirty(set_id);
            continue;
        };

        let patch = SetPatch {
            weight: Some(row.weight),
            reps: Some(row.reps),
            is_completed: Some(row.is_completed),
        };

        match store.update_set(set_id, patch).await {
            Ok(()) => state.clear_dirty(set_id),
            Err(error) => {
                tracing::warn!(%set_id, %error, "autosave write failed; keeping row dirty");
                state.mark_failed(set_id);
                any_failed = true;
            }
        }
    }

    any_failed.then(|| Instant::now() + debounce)
}

async fn toggle_complete<S: SetStore>(
    store: &S,
    state: &mut EditorState,
    set_id: Uuid,
) -> StoreResult<bool> {
    let Some(previous) = state.row(set_id).map(|row| row.is_completed) else {
        return Err(StoreError::NotFound);
    };
    let next = !previous;

    // Optimistic: the mirror flips before the write settles.
    if let Some(row) = state.row_mut(set_id) {
        row.is_completed = next;
    }

    let patch = SetPatch {
        is_completed: Some(next),
        ..Default::default()
    };

    match store.update_set(set_id, patch).await {
        Ok(()) => Ok(next),
        Err(error) => {
            if let Some(row) = state.row_mut(set_id) {
                row.is_completed = previous;
            }
            Err(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use tokio::time::{Duration, Instant, sleep};

    use super::*;
    use crate::store::{SetPatch, SetRow, SetStore, StoreError, StoreResult};

    #[derive(Clone, Default)]
    struct RecordingStore {
        inner: Arc<Mutex<RecordingInner>>,
    }

    #[derive(Default)]
    struct RecordingInner {
        updates: Vec<(Uuid, SetPatch, Instant)>,
        attempts: usize,
        fail_updates: bool,
    }

    impl RecordingStore {
        fn updates(&self) -> Vec<(Uuid, SetPatch, Instant)> {
            self.inner.lock().unwrap().updates.clone()
        }

        fn attempts(&self) -> usize {
            self.inner.lock().unwrap().attempts
        }

        fn set_failing(&self, failing: bool) {
            self.inner.lock().unwrap().fail_updates = failing;
        }
    }

    #[async_trait]
    impl SetStore for RecordingStore {
        async fn update_set(&self, set_id: Uuid, patch: SetPatch) -> StoreResult<()> {
            let mut inner = self.inner.lock().unwrap();
            inner.attempts += 1;
            if inner.fail_updates {
                return Err(StoreError::Transport("connection reset".to_string()));
            }
            inner.updates.push((set_id, patch, Instant::now()));
            Ok(())
        }

        async fn create_set(
            &self,
            tracked_exercise_id: Uuid,
            set_number: i64,
            weight: f64,
            reps: i64,
            is_completed: bool,
        ) -> StoreResult<SetRow> {
            Ok(SetRow {
                set_id: Uuid::new_v4(),
                tracked_exercise_id,
                set_number,
                weight,
                reps,
                is_completed,
            })
        }
    }

    fn sample_row(set_number: i64) -> SetRow {
        SetRow {
            set_id: Uuid::new_v4(),
            tracked_exercise_id: Uuid::new_v4(),
            set_number,
            weight: 0.0,
            reps: 0,
            is_completed: false,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn debounce_coalesces_rapid_edits_into_one_write() {
        let store = RecordingStore::default();
        let row = sample_row(1);
        let editor = SessionEditor::spawn(store.clone(), vec![row.clone()]);
        let started = Instant::now();

        editor.edit_set(row.set_id, SetPatch::weight(10.0));
        sleep(Duration::from_millis(500)).await;
        editor.edit_set(row.set_id, SetPatch::weight(20.0));
        sleep(Duration::from_millis(500)).await;
        editor.edit_set(row.set_id, SetPatch::weight(30.0));

        // Still inside the quiet period: nothing has been written.
        sleep(Duration::from_millis(1999)).await;
        assert!(store.updates().is_empty());

        sleep(Duration::from_millis(2)).await;

        let updates = store.updates();
        assert_eq!(updates.len(), 1);
        let (set_id, patch, at) = &updates[0];
        assert_eq!(*set_id, row.set_id);
        assert_eq!(patch.weight, Some(30.0));
        assert!(at.duration_since(started) >= Duration::from_millis(3000));

        assert!(editor.unsaved_rows().await.unwrap().is_empty());
        editor.close().await;
    }

    #[tokio::test(start_paused = true)]
    async fn edits_to_different_rows_flush_in_one_pass() {
        let store = RecordingStore::default();
        let first = sample_row(1);
        let second = sample_row(2);
        let editor = SessionEditor::spawn(store.clone(), vec![first.clone(), second.clone()]);

        editor.edit_set(first.set_id, SetPatch::weight(60.0));
        editor.edit_set(second.set_id, SetPatch::reps(12));

        sleep(Duration::from_millis(2001)).await;

        let updates = store.updates();
        assert_eq!(updates.len(), 2);
        editor.close().await;
    }

    #[tokio::test(start_paused = true)]
    async fn failed_write_keeps_row_dirty_and_retries() {
        let store = RecordingStore::default();
        let row = sample_row(1);
        let editor = SessionEditor::spawn(store.clone(), vec![row.clone()]);

        store.set_failing(true);
        editor.edit_set(row.set_id, SetPatch::weight(80.0));
        sleep(Duration::from_millis(2001)).await;

        // The write failed: attempted once, nothing recorded, row still
        // reported unsaved.
        assert_eq!(store.attempts(), 1);
        assert!(store.updates().is_empty());
        assert_eq!(editor.unsaved_rows().await.unwrap(), vec![row.set_id]);

        // The connection comes back; the re-armed timer retries the row.
        store.set_failing(false);
        sleep(Duration::from_millis(2001)).await;

        assert_eq!(store.attempts(), 2);
        let updates = store.updates();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].1.weight, Some(80.0));
        assert!(editor.unsaved_rows().await.unwrap().is_empty());
        editor.close().await;
    }

    #[tokio::test(start_paused = true)]
    async fn toggle_complete_writes_through_immediately() {
        let store = RecordingStore::default();
        let row = sample_row(1);
        let editor = SessionEditor::spawn(store.clone(), vec![row.clone()]);

        let completed = editor.toggle_complete(row.set_id).await.unwrap();
        assert!(completed);

        // No debounce involved: the write already happened.
        let updates = store.updates();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].1.is_completed, Some(true));

        let snapshot = editor.snapshot().await.unwrap();
        assert!(snapshot[0].is_completed);
        editor.close().await;
    }

    #[tokio::test(start_paused = true)]
    async fn toggle_complete_rolls_back_on_failure() {
        let store = RecordingStore::default();
        let row = sample_row(1);
        let editor = SessionEditor::spawn(store.clone(), vec![row.clone()]);

        store.set_failing(true);
        let result = editor.toggle_complete(row.set_id).await;
        assert!(matches!(result, Err(StoreError::Transport(_))));

        let snapshot = editor.snapshot().await.unwrap();
        assert!(!snapshot[0].is_completed);
        editor.close().await;
    }

    #[tokio::test(start_paused = true)]
    async fn add_set_appears_only_with_its_persistent_id() {
        let store = RecordingStore::default();
        let row = sample_row(1);
        let editor = SessionEditor::spawn(store.clone(), vec![row.clone()]);

        let created = editor
            .add_set(row.tracked_exercise_id, 2, 40.0, 10)
            .await
            .unwrap();

        let snapshot = editor.snapshot().await.unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[1].set_id, created.set_id);
        assert_eq!(snapshot[1].set_number, 2);
        editor.close().await;
    }

    #[tokio::test(start_paused = true)]
    async fn refresh_never_clobbers_dirty_rows() {
        let store = RecordingStore::default();
        let dirty = sample_row(1);
        let clean = sample_row(2);
        let editor = SessionEditor::spawn(store.clone(), vec![dirty.clone(), clean.clone()]);

        editor.edit_set(dirty.set_id, SetPatch::weight(100.0));

        let mut stale_dirty = dirty.clone();
        stale_dirty.weight = 5.0;
        let mut fresh_clean = clean.clone();
        fresh_clean.weight = 42.0;
        editor.refresh(vec![stale_dirty, fresh_clean]);

        let snapshot = editor.snapshot().await.unwrap();
        assert_eq!(snapshot[0].weight, 100.0);
        assert_eq!(snapshot[1].weight, 42.0);
        editor.close().await;
    }

    #[tokio::test(start_paused = true)]
    async fn close_flushes_queued_edits() {
        let store = RecordingStore::default();
        let row = sample_row(1);
        let editor = SessionEditor::spawn(store.clone(), vec![row.clone()]);

        editor.edit_set(row.set_id, SetPatch::reps(8));
        editor.close().await;

        let updates = store.updates();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].1.reps, Some(8));
    }

    #[tokio::test(start_paused = true)]
    async fn flush_now_skips_the_quiet_period() {
        let store = RecordingStore::default();
        let row = sample_row(1);
        let editor = SessionEditor::spawn(store.clone(), vec![row.clone()]);

        editor.edit_set(row.set_id, SetPatch::weight(55.0));
        editor.flush_now().await.unwrap();

        assert_eq!(store.updates().len(), 1);
        editor.close().await;
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_row_edit_is_ignored() {
        let store = RecordingStore::default();
        let editor = SessionEditor::spawn(store.clone(), vec![sample_row(1)]);

        editor.edit_set(Uuid::new_v4(), SetPatch::weight(10.0));
        sleep(Duration::from_millis(2001)).await;

        assert!(store.updates().is_empty());
        editor.close().await;
    }
}
