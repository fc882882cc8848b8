//! The synchronized store: in-memory collections mirrored to a remote store.
//!
//! Mutations are optimistic. The local collections change synchronously,
//! before any remote call is issued, so a snapshot taken after a mutation
//! always contains it. Remote calls may then fail: the local change is kept
//! and the record is marked [`SyncStatus::Failed`] until a later sync or
//! [`Store::initialize`] brings both sides together again.
//!
//! Concurrent remote calls are not serialized; the last response to land
//! wins on the remote side.

use std::{
    collections::HashMap,
    fmt,
    sync::{
        PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard,
        atomic::{AtomicU64, AtomicUsize, Ordering},
    },
};

use chrono::{Local, NaiveDate};
use tracing::{debug, error, info, warn};

use crate::{
    AttendanceRecord, Entity, ExpenseEntry, IncomeEntry, LoadError, RecordRef, RemoteStore,
    SalaryTransaction, Snapshot, StaffMember, SyncError, Table, TableFailure, ValidationError,
    stats::{self, Dashboard},
};

mod sync;

pub use sync::{LoadState, SyncStatus};
use sync::{InFlight, SyncEntry};

type Clock = Box<dyn Fn() -> NaiveDate + Send + Sync>;

struct State {
    snapshot: Snapshot,
    sync: HashMap<RecordRef, SyncEntry>,
    selected_date: NaiveDate,
    load: LoadState,
}

/// Owner of the five collections and of the pivot date.
///
/// Built once at startup with [`Store::builder`] and shared by reference.
pub struct Store<R> {
    remote: R,
    state: RwLock<State>,
    revisions: AtomicU64,
    in_flight: AtomicUsize,
    today: Clock,
}

impl<R> fmt::Debug for Store<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.read();
        f.debug_struct("Store")
            .field("records", &state.snapshot.len())
            .field("selected_date", &state.selected_date)
            .field("load", &state.load)
            .field("in_flight", &self.in_flight.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

impl<R> Store<R> {
    /// Return a builder for `Store`. Help to build the struct.
    pub fn builder(remote: R) -> StoreBuilder<R> {
        StoreBuilder {
            remote,
            today: None,
            selected_date: None,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn next_revision(&self) -> u64 {
        self.revisions.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Copy of every collection at this instant.
    pub fn snapshot(&self) -> Snapshot {
        self.read().snapshot.clone()
    }

    /// Copy of one collection.
    pub fn records<E: Entity>(&self) -> Vec<E> {
        E::collection(&self.read().snapshot).clone()
    }

    pub fn get<E: Entity>(&self, id: &str) -> Option<E> {
        self.read().snapshot.get::<E>(id).cloned()
    }

    /// Sync status of a record; `None` for unknown records.
    pub fn sync_status(&self, table: Table, id: &str) -> Option<SyncStatus> {
        self.read()
            .sync
            .get(&RecordRef::new(table, id))
            .map(|entry| entry.status)
    }

    /// Records whose local state is not confirmed remotely, sorted.
    pub fn unsynced(&self) -> Vec<(RecordRef, SyncStatus)> {
        let mut out: Vec<_> = self
            .read()
            .sync
            .iter()
            .filter(|(_, entry)| entry.status != SyncStatus::Synced)
            .map(|(record, entry)| (record.clone(), entry.status))
            .collect();
        out.sort();
        out
    }

    pub fn load_state(&self) -> LoadState {
        self.read().load.clone()
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.read().load, LoadState::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.read().load, LoadState::Ready)
    }

    /// `true` while at least one remote write or delete is in flight.
    pub fn is_syncing(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.read().selected_date
    }

    /// Moves the pivot date. No I/O, aggregates are simply recomputed on the
    /// next read.
    pub fn set_selected_date(&self, date: NaiveDate) {
        self.write().selected_date = date;
    }

    pub fn reset_to_today(&self) -> NaiveDate {
        let today = (self.today)();
        self.set_selected_date(today);
        today
    }

    /// Aggregates at the selected date.
    pub fn dashboard(&self) -> Dashboard {
        let state = self.read();
        stats::dashboard(&state.snapshot, state.selected_date)
    }

    /// Validates `record` and inserts or replaces it (by id) in its
    /// collection. Returns the stored record.
    ///
    /// Blank notes are stored as `None`. References to staff members must
    /// resolve locally. A new attendance record for a `(staff_id, date)` that
    /// already has one takes over that record's id; an existing one cannot be
    /// moved onto such a day.
    pub fn upsert_local<E: Entity>(&self, mut record: E) -> Result<E, ValidationError> {
        record.normalize();
        record.validate()?;

        let mut state = self.write();
        if let Some(staff_id) = record.staff_id()
            && state.snapshot.staff_member(staff_id).is_none()
        {
            return Err(ValidationError::UnknownStaff(staff_id.to_string()));
        }
        record.check_unique(&state.snapshot)?;

        let stored = record.upsert_into(&mut state.snapshot);
        let key = RecordRef::of(&stored);
        debug!(record = %key, "local upsert");
        state.sync.insert(
            key,
            SyncEntry {
                revision: self.next_revision(),
                status: SyncStatus::Pending,
            },
        );
        Ok(stored)
    }

    /// Removes a record from its collection; a staff member takes its
    /// attendance and salary transactions with it.
    ///
    /// Returns the removed references, dependents first.
    pub fn delete_local(&self, table: Table, id: &str) -> Vec<RecordRef> {
        let mut state = self.write();
        let removed = state.snapshot.remove(table, id);
        for record in &removed {
            state.sync.remove(record);
        }
        if !removed.is_empty() {
            debug!(table = %table, id, removed = removed.len(), "local delete");
        }
        removed
    }

    /// Only moves the status forward if the record was not modified locally
    /// since `revision` was read.
    fn settle(&self, record: &RecordRef, revision: Option<u64>, status: SyncStatus) {
        let mut state = self.write();
        if let Some(entry) = state.sync.get_mut(record)
            && Some(entry.revision) == revision
        {
            entry.status = status;
        }
    }
}

impl<R: RemoteStore> Store<R> {
    /// Loads the five tables concurrently and replaces local state with them.
    ///
    /// A table that cannot be fetched is left empty and reported in the
    /// returned [`LoadError`]; the others are loaded anyway. Malformed rows are
    /// dropped. Nothing is retried. The store leaves the loading state
    /// whatever the outcome.
    pub async fn initialize(&self) -> Result<(), LoadError> {
        self.write().load = LoadState::Loading;
        info!("loading tables from remote");

        let (income, expenses, staff, attendance, salary_transactions) = tokio::join!(
            self.fetch::<IncomeEntry>(),
            self.fetch::<ExpenseEntry>(),
            self.fetch::<StaffMember>(),
            self.fetch::<AttendanceRecord>(),
            self.fetch::<SalaryTransaction>(),
        );

        let mut failures = Vec::new();
        let mut snapshot = Snapshot::default();
        load_into(&mut snapshot, income, &mut failures);
        load_into(&mut snapshot, expenses, &mut failures);
        load_into(&mut snapshot, staff, &mut failures);
        load_into(&mut snapshot, attendance, &mut failures);
        load_into(&mut snapshot, salary_transactions, &mut failures);

        let revision = self.next_revision();
        let sync = loaded_refs(&snapshot)
            .map(|record| {
                (
                    record,
                    SyncEntry {
                        revision,
                        status: SyncStatus::Synced,
                    },
                )
            })
            .collect();

        let mut state = self.write();
        state.snapshot = snapshot;
        state.sync = sync;
        if failures.is_empty() {
            info!(records = state.snapshot.len(), "tables loaded");
            state.load = LoadState::Ready;
            Ok(())
        } else {
            let err = LoadError { failures };
            error!("{err}");
            state.load = LoadState::Failed(err.clone());
            Err(err)
        }
    }

    async fn fetch<E: Entity>(&self) -> Result<Vec<E>, TableFailure> {
        let rows = self
            .remote
            .fetch_all(E::TABLE)
            .await
            .map_err(|err| TableFailure {
                table: E::TABLE,
                reason: err.to_string(),
            })?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            match E::from_row(row) {
                Ok(record) => records.push(record),
                Err(err) => warn!(table = %E::TABLE, "dropping malformed row: {err}"),
            }
        }
        Ok(records)
    }

    /// Upserts one record to its remote table.
    ///
    /// Returns `false` on failure; the local collection is left as it is and
    /// the record is marked [`SyncStatus::Failed`]. Sending the same record
    /// twice is harmless.
    pub async fn sync_to_remote<E: Entity>(&self, record: &E) -> bool {
        let key = RecordRef::of(record);
        let revision = self.read().sync.get(&key).map(|entry| entry.revision);
        let _busy = InFlight::enter(&self.in_flight);

        match self.push(record).await {
            Ok(()) => {
                debug!(record = %key, "synced");
                self.settle(&key, revision, SyncStatus::Synced);
                true
            }
            Err(err) => {
                error!(record = %key, "sync failed: {err}");
                if let Ok(payload) = serde_json::to_string_pretty(record) {
                    debug!("rejected payload: {payload}");
                }
                self.settle(&key, revision, SyncStatus::Failed);
                false
            }
        }
    }

    async fn push<E: Entity>(&self, record: &E) -> Result<(), SyncError> {
        let row = record.to_row()?;
        self.remote.upsert(E::TABLE, row).await?;
        Ok(())
    }

    /// Deletes one remote row. On failure the reference is marked
    /// [`SyncStatus::Failed`] (unless it was re-created locally meanwhile).
    pub async fn delete_remote(&self, table: Table, id: &str) -> bool {
        let key = RecordRef::new(table, id);
        let _busy = InFlight::enter(&self.in_flight);

        match self.remote.delete(table, id).await {
            Ok(()) => {
                debug!(record = %key, "remote delete");
                let mut state = self.write();
                if !state.snapshot.contains(&key) {
                    state.sync.remove(&key);
                }
                true
            }
            Err(err) => {
                error!(record = %key, "remote delete failed: {err}");
                let revision = self.next_revision();
                let mut state = self.write();
                if !state.snapshot.contains(&key) {
                    state.sync.insert(
                        key,
                        SyncEntry {
                            revision,
                            status: SyncStatus::Failed,
                        },
                    );
                }
                false
            }
        }
    }

    /// [`upsert_local`](Self::upsert_local) then
    /// [`sync_to_remote`](Self::sync_to_remote).
    ///
    /// `Err` only for validation failures; `Ok(false)` means the record is
    /// stored locally but the remote write failed.
    pub async fn save<E: Entity>(&self, record: E) -> Result<bool, ValidationError> {
        let stored = self.upsert_local(record)?;
        Ok(self.sync_to_remote(&stored).await)
    }

    /// [`delete_local`](Self::delete_local) then one
    /// [`delete_remote`](Self::delete_remote) per removed record, dependents
    /// first. Returns `true` only if every remote delete succeeded.
    ///
    /// A record unknown locally is still deleted remotely.
    pub async fn delete(&self, table: Table, id: &str) -> bool {
        let mut removed = self.delete_local(table, id);
        if removed.is_empty() {
            removed.push(RecordRef::new(table, id));
        }

        let mut all_ok = true;
        for record in removed {
            all_ok &= self.delete_remote(record.table, &record.id).await;
        }
        all_ok
    }
}

fn load_into<E: Entity>(
    snapshot: &mut Snapshot,
    fetched: Result<Vec<E>, TableFailure>,
    failures: &mut Vec<TableFailure>,
) {
    match fetched {
        Ok(records) => {
            for record in records {
                record.upsert_into(snapshot);
            }
        }
        Err(failure) => failures.push(failure),
    }
}

fn loaded_refs(snapshot: &Snapshot) -> impl Iterator<Item = RecordRef> + '_ {
    let income = snapshot.income.iter().map(RecordRef::of);
    let expenses = snapshot.expenses.iter().map(RecordRef::of);
    let staff = snapshot.staff.iter().map(RecordRef::of);
    let attendance = snapshot.attendance.iter().map(RecordRef::of);
    let salary = snapshot.salary_transactions.iter().map(RecordRef::of);
    income
        .chain(expenses)
        .chain(staff)
        .chain(attendance)
        .chain(salary)
}

/// The builder for `Store`
pub struct StoreBuilder<R> {
    remote: R,
    today: Option<Clock>,
    selected_date: Option<NaiveDate>,
}

impl<R> StoreBuilder<R> {
    /// Replace the local clock used by `reset_to_today`.
    pub fn today(mut self, clock: impl Fn() -> NaiveDate + Send + Sync + 'static) -> Self {
        self.today = Some(Box::new(clock));
        self
    }

    /// Initial pivot date, today by default.
    pub fn selected_date(mut self, date: NaiveDate) -> Self {
        self.selected_date = Some(date);
        self
    }

    /// Construct `Store`
    pub fn build(self) -> Store<R> {
        let today: Clock = match self.today {
            Some(clock) => clock,
            None => Box::new(|| Local::now().date_naive()),
        };
        let selected_date = self.selected_date.unwrap_or_else(|| today());
        Store {
            remote: self.remote,
            state: RwLock::new(State {
                snapshot: Snapshot::default(),
                sync: HashMap::new(),
                selected_date,
                load: LoadState::Loading,
            }),
            revisions: AtomicU64::new(0),
            in_flight: AtomicUsize::new(0),
            today,
        }
    }
}
