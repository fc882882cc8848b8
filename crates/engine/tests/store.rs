use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::json;
use tokio::sync::Notify;

use engine::{
    Amount, AttendanceRecord, AttendanceStatus, ExpenseCategory, ExpenseEntry, IncomeEntry,
    IncomeSource, LoadState, MemoryRemote, PaymentMode, RemoteError, RemoteStore, Row,
    SalaryTransaction, SalaryTransactionKind, StaffMember, StaffRole, Store, SyncStatus, Table,
    ValidationError, parse_date,
};

fn date(s: &str) -> NaiveDate {
    parse_date(s).unwrap()
}

fn amount(value: f64) -> Amount {
    Amount::new(value).unwrap()
}

fn store_with(remote: &MemoryRemote) -> Store<MemoryRemote> {
    Store::builder(remote.clone())
        .today(|| NaiveDate::from_ymd_opt(2025, 1, 10).unwrap())
        .build()
}

fn staff(name: &str) -> StaffMember {
    StaffMember::new(name, StaffRole::Receptionist, amount(15000.0), date("2024-06-01")).unwrap()
}

fn seeded_remote() -> MemoryRemote {
    let remote = MemoryRemote::new();
    remote
        .seed(
            Table::Income,
            [json!({"id": "i1", "date": "2025-01-10", "source": "Room Rent", "amount": 1000, "notes": null})],
        )
        .unwrap();
    remote
        .seed(
            Table::Expenses,
            [json!({"id": "e1", "date": "2025-01-10", "category": "Food & Groceries", "amount": 400, "payment_mode": "Cash", "notes": "veg"})],
        )
        .unwrap();
    remote
        .seed(
            Table::Staff,
            [json!({"id": "s1", "name": "Asha", "role": "Manager", "monthly_salary": 30000, "joining_date": "2023-04-01"})],
        )
        .unwrap();
    remote
        .seed(
            Table::Attendance,
            [json!({"id": "a1", "staff_id": "s1", "date": "2025-01-10", "status": "Present"})],
        )
        .unwrap();
    remote
        .seed(
            Table::SalaryTransactions,
            [json!({"id": "t1", "staff_id": "s1", "date": "2025-01-05", "amount": 5000, "type": "Advance", "notes": null})],
        )
        .unwrap();
    remote
}

#[tokio::test]
async fn initialize_loads_every_table() {
    let remote = seeded_remote();
    let store = store_with(&remote);
    assert!(store.is_loading());

    store.initialize().await.unwrap();

    assert!(store.is_ready());
    assert!(!store.is_loading());
    let snapshot = store.snapshot();
    assert_eq!(snapshot.len(), 5);
    assert_eq!(snapshot.expenses[0].notes.as_deref(), Some("veg"));
    assert_eq!(store.sync_status(Table::Staff, "s1"), Some(SyncStatus::Synced));
    assert_eq!(remote.calls(), 5);

    let metrics = store.dashboard().daily;
    assert_eq!(metrics.income, 1000.0);
    assert_eq!(metrics.expenses, 400.0);
    assert_eq!(metrics.profit, 600.0);
    assert_eq!(metrics.margin, 60.0);
    assert_eq!(metrics.staff_present, 1);
}

#[tokio::test]
async fn partial_load_failure_leaves_table_empty() {
    let remote = seeded_remote();
    remote.fail_table(Table::Expenses);
    let store = store_with(&remote);

    let err = store.initialize().await.unwrap_err();

    assert!(err.failed(Table::Expenses));
    assert_eq!(err.failures.len(), 1);
    assert!(!store.is_loading());
    assert!(matches!(store.load_state(), LoadState::Failed(_)));
    let snapshot = store.snapshot();
    assert!(snapshot.expenses.is_empty());
    assert_eq!(snapshot.income.len(), 1);
    assert_eq!(snapshot.staff.len(), 1);
}

#[tokio::test]
async fn ready_with_zero_rows_is_not_a_failure() {
    let remote = MemoryRemote::new();
    let store = store_with(&remote);

    store.initialize().await.unwrap();

    assert_eq!(store.load_state(), LoadState::Ready);
    assert!(store.snapshot().is_empty());
}

#[tokio::test]
async fn malformed_rows_are_dropped_on_load() {
    let remote = seeded_remote();
    remote
        .seed(
            Table::Income,
            [json!({"id": "bad", "date": "10/01/2025", "source": "Room Rent", "amount": 5})],
        )
        .unwrap();
    let store = store_with(&remote);

    store.initialize().await.unwrap();

    let income = store.records::<IncomeEntry>();
    assert_eq!(income.len(), 1);
    assert_eq!(income[0].id, "i1");
}

#[tokio::test]
async fn initialize_overwrites_diverged_local_state() {
    let remote = seeded_remote();
    let store = store_with(&remote);
    store.initialize().await.unwrap();

    remote.set_offline(true);
    let local_only = IncomeEntry::new(date("2025-01-11"), IncomeSource::Other, amount(1.0), None);
    assert!(!store.save(local_only.clone()).await.unwrap());
    assert!(store.get::<IncomeEntry>(&local_only.id).is_some());

    remote.set_offline(false);
    store.initialize().await.unwrap();

    assert!(store.get::<IncomeEntry>(&local_only.id).is_none());
    assert_eq!(store.sync_status(Table::Income, &local_only.id), None);
}

struct StalledRemote;

impl RemoteStore for StalledRemote {
    async fn fetch_all(&self, _table: Table) -> Result<Vec<Row>, RemoteError> {
        std::future::pending().await
    }

    async fn upsert(&self, _table: Table, _row: Row) -> Result<(), RemoteError> {
        std::future::pending().await
    }

    async fn delete(&self, _table: Table, _id: &str) -> Result<(), RemoteError> {
        std::future::pending().await
    }
}

#[tokio::test]
async fn local_write_is_visible_before_remote_answers() {
    let store = Store::builder(StalledRemote).build();
    let entry = IncomeEntry::new(date("2025-01-10"), IncomeSource::Restaurant, amount(250.0), None);

    let stored = store.upsert_local(entry.clone()).unwrap();

    assert!(store.snapshot().income.contains(&entry));
    assert_eq!(store.sync_status(Table::Income, &entry.id), Some(SyncStatus::Pending));

    let mut sync = Box::pin(store.sync_to_remote(&stored));
    tokio::select! {
        biased;
        _ = &mut sync => panic!("remote never answers"),
        _ = async {} => {}
    }

    assert!(store.is_syncing());
    assert!(store.snapshot().income.contains(&entry));
    drop(sync);

    assert!(!store.is_syncing());
    assert_eq!(store.sync_status(Table::Income, &entry.id), Some(SyncStatus::Pending));
}

#[tokio::test]
async fn failed_sync_keeps_local_edit() {
    let remote = MemoryRemote::new();
    let store = store_with(&remote);
    let expense = ExpenseEntry::new(
        date("2025-01-10"),
        ExpenseCategory::Maintenance,
        amount(900.0),
        PaymentMode::Online,
        Some("boiler"),
    );

    remote.fail_table(Table::Expenses);
    let synced = store.save(expense.clone()).await.unwrap();

    assert!(!synced);
    assert!(!store.is_syncing());
    assert_eq!(store.records::<ExpenseEntry>().len(), 1);
    assert!(remote.rows(Table::Expenses).is_empty());
    assert_eq!(store.sync_status(Table::Expenses, &expense.id), Some(SyncStatus::Failed));
    assert_eq!(store.unsynced().len(), 1);

    remote.heal_table(Table::Expenses);
    assert!(store.sync_to_remote(&expense).await);
    assert_eq!(store.sync_status(Table::Expenses, &expense.id), Some(SyncStatus::Synced));
    assert!(store.unsynced().is_empty());
}

#[tokio::test]
async fn syncing_twice_equals_syncing_once() {
    let remote = MemoryRemote::new();
    let store = store_with(&remote);
    let entry = store
        .upsert_local(IncomeEntry::new(
            date("2025-01-10"),
            IncomeSource::RoomRent,
            amount(1200.0),
            None,
        ))
        .unwrap();

    assert!(store.sync_to_remote(&entry).await);
    let once = remote.rows(Table::Income);
    assert!(store.sync_to_remote(&entry).await);
    let twice = remote.rows(Table::Income);

    assert_eq!(once.len(), 1);
    assert_eq!(once, twice);
}

#[tokio::test]
async fn edit_replaces_by_id_locally_and_remotely() {
    let remote = MemoryRemote::new();
    let store = store_with(&remote);
    let mut entry = IncomeEntry::new(date("2025-01-10"), IncomeSource::RoomRent, amount(100.0), None);
    store.save(entry.clone()).await.unwrap();

    entry.amount = amount(150.0);
    store.save(entry.clone()).await.unwrap();

    let income = store.records::<IncomeEntry>();
    assert_eq!(income.len(), 1);
    assert_eq!(income[0].amount.value(), 150.0);
    let rows = remote.rows(Table::Income);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["amount"], 150.0);
}

#[tokio::test]
async fn dangling_staff_reference_is_rejected() {
    let remote = MemoryRemote::new();
    let store = store_with(&remote);
    let orphan = AttendanceRecord::new("nobody", date("2025-01-10"), AttendanceStatus::Present);

    let err = store.save(orphan).await.unwrap_err();

    assert_eq!(err, ValidationError::UnknownStaff("nobody".to_string()));
    assert!(store.snapshot().attendance.is_empty());
    assert_eq!(remote.calls(), 0);
}

#[tokio::test]
async fn attendance_for_same_day_overwrites_existing_record() {
    let remote = MemoryRemote::new();
    let store = store_with(&remote);
    let member = staff("Kiran");
    store.save(member.clone()).await.unwrap();

    let first = AttendanceRecord::new(&member.id, date("2025-01-10"), AttendanceStatus::Absent);
    store.save(first.clone()).await.unwrap();
    let second = AttendanceRecord::new(&member.id, date("2025-01-10"), AttendanceStatus::Present);
    store.save(second.clone()).await.unwrap();

    let attendance = store.records::<AttendanceRecord>();
    assert_eq!(attendance.len(), 1);
    assert_eq!(attendance[0].id, first.id);
    assert!(attendance[0].is_present());
    let rows = remote.rows(Table::Attendance);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["status"], "Present");
    assert!(store.get::<AttendanceRecord>(&second.id).is_none());
}

#[tokio::test]
async fn moving_attendance_onto_a_taken_day_is_rejected() {
    let remote = MemoryRemote::new();
    let store = store_with(&remote);
    let member = staff("Kiran");
    store.save(member.clone()).await.unwrap();

    let mut moved = AttendanceRecord::new(&member.id, date("2025-01-09"), AttendanceStatus::Present);
    store.save(moved.clone()).await.unwrap();
    let held = AttendanceRecord::new(&member.id, date("2025-01-10"), AttendanceStatus::Absent);
    store.save(held.clone()).await.unwrap();
    let calls = remote.calls();

    moved.date = date("2025-01-10");
    let err = store.save(moved.clone()).await.unwrap_err();

    assert_eq!(
        err,
        ValidationError::AttendanceTaken {
            staff_id: member.id.clone(),
            date: date("2025-01-10"),
        }
    );
    assert_eq!(remote.calls(), calls);
    let kept = store.get::<AttendanceRecord>(&moved.id).unwrap();
    assert_eq!(kept.date, date("2025-01-09"));
    assert!(kept.is_present());
    let other = store.get::<AttendanceRecord>(&held.id).unwrap();
    assert_eq!(other.date, date("2025-01-10"));
    assert!(!other.is_present());
    assert_eq!(remote.row(Table::Attendance, &moved.id).unwrap()["date"], "2025-01-09");
    assert_eq!(remote.row(Table::Attendance, &held.id).unwrap()["status"], "Absent");

    moved.date = date("2025-01-11");
    assert!(store.save(moved.clone()).await.unwrap());
    assert_eq!(store.records::<AttendanceRecord>().len(), 2);
    assert_eq!(remote.row(Table::Attendance, &moved.id).unwrap()["date"], "2025-01-11");
}

#[tokio::test]
async fn blank_notes_are_stored_as_absent() {
    let remote = MemoryRemote::new();
    let store = store_with(&remote);
    let mut entry = IncomeEntry::new(
        date("2025-01-10"),
        IncomeSource::Restaurant,
        amount(80.0),
        Some("dinner"),
    );
    store.save(entry.clone()).await.unwrap();

    entry.notes = Some("   ".to_string());
    let stored = store.upsert_local(entry.clone()).unwrap();
    assert!(stored.notes.is_none());
    assert!(store.sync_to_remote(&stored).await);

    assert!(store.get::<IncomeEntry>(&entry.id).unwrap().notes.is_none());
    assert_eq!(remote.row(Table::Income, &entry.id).unwrap()["notes"], serde_json::Value::Null);

    let member = staff("Kiran");
    store.save(member.clone()).await.unwrap();
    let payment = SalaryTransaction {
        notes: Some(" first week ".to_string()),
        ..SalaryTransaction::new(
            &member.id,
            date("2025-01-07"),
            amount(2000.0),
            SalaryTransactionKind::Advance,
            None,
        )
    };
    let stored = store.upsert_local(payment).unwrap();
    assert_eq!(stored.notes.as_deref(), Some("first week"));
}

#[tokio::test]
async fn deleting_staff_cascades_locally_and_remotely() {
    let remote = MemoryRemote::new();
    let store = store_with(&remote);
    let member = staff("Deepa");
    let other = staff("Joseph");
    store.save(member.clone()).await.unwrap();
    store.save(other.clone()).await.unwrap();

    for day in ["2025-01-08", "2025-01-09", "2025-01-10"] {
        store
            .save(AttendanceRecord::new(&member.id, date(day), AttendanceStatus::Present))
            .await
            .unwrap();
    }
    for (day, kind) in [
        ("2025-01-05", SalaryTransactionKind::Advance),
        ("2025-01-31", SalaryTransactionKind::Salary),
    ] {
        store
            .save(SalaryTransaction::new(&member.id, date(day), amount(1000.0), kind, None))
            .await
            .unwrap();
    }
    store
        .save(AttendanceRecord::new(&other.id, date("2025-01-10"), AttendanceStatus::Absent))
        .await
        .unwrap();

    assert!(store.delete(Table::Staff, &member.id).await);

    let snapshot = store.snapshot();
    assert!(snapshot.staff_member(&member.id).is_none());
    assert_eq!(snapshot.attendance_of(&member.id).count(), 0);
    assert_eq!(snapshot.salary_transactions_of(&member.id).count(), 0);
    assert_eq!(snapshot.attendance.len(), 1);

    let references = |table: Table| {
        remote
            .rows(table)
            .into_iter()
            .filter(|row| row["staff_id"] == member.id.as_str() || row["id"] == member.id.as_str())
            .count()
    };
    assert_eq!(references(Table::Staff), 0);
    assert_eq!(references(Table::Attendance), 0);
    assert_eq!(references(Table::SalaryTransactions), 0);
    assert_eq!(remote.rows(Table::Staff).len(), 1);
    assert_eq!(remote.rows(Table::Attendance).len(), 1);
}

#[tokio::test]
async fn failed_remote_delete_is_reported() {
    let remote = MemoryRemote::new();
    let store = store_with(&remote);
    let entry = IncomeEntry::new(date("2025-01-10"), IncomeSource::Other, amount(5.0), None);
    store.save(entry.clone()).await.unwrap();

    remote.set_offline(true);
    let ok = store.delete(Table::Income, &entry.id).await;

    assert!(!ok);
    assert!(store.records::<IncomeEntry>().is_empty());
    assert_eq!(remote.rows(Table::Income).len(), 1);
    assert_eq!(store.sync_status(Table::Income, &entry.id), Some(SyncStatus::Failed));

    remote.set_offline(false);
    assert!(store.delete_remote(Table::Income, &entry.id).await);
    assert_eq!(store.sync_status(Table::Income, &entry.id), None);
    assert!(remote.rows(Table::Income).is_empty());
}

/// Holds every upsert until released.
struct GatedRemote {
    inner: MemoryRemote,
    gate: Arc<Notify>,
}

impl RemoteStore for GatedRemote {
    async fn fetch_all(&self, table: Table) -> Result<Vec<Row>, RemoteError> {
        self.inner.fetch_all(table).await
    }

    async fn upsert(&self, table: Table, row: Row) -> Result<(), RemoteError> {
        self.gate.notified().await;
        self.inner.upsert(table, row).await
    }

    async fn delete(&self, table: Table, id: &str) -> Result<(), RemoteError> {
        self.inner.delete(table, id).await
    }
}

#[tokio::test]
async fn stale_sync_does_not_mark_newer_edit_as_synced() {
    let gate = Arc::new(Notify::new());
    let remote = GatedRemote {
        inner: MemoryRemote::new(),
        gate: gate.clone(),
    };
    let store = Store::builder(remote).build();
    let first = store
        .upsert_local(IncomeEntry::new(
            date("2025-01-10"),
            IncomeSource::RoomRent,
            amount(100.0),
            None,
        ))
        .unwrap();
    let mut edited = first.clone();
    edited.amount = amount(300.0);

    let (synced, ()) = tokio::join!(store.sync_to_remote(&first), async {
        while !store.is_syncing() {
            tokio::task::yield_now().await;
        }
        store.upsert_local(edited.clone()).unwrap();
        gate.notify_one();
    });

    assert!(synced);
    assert_eq!(store.sync_status(Table::Income, &first.id), Some(SyncStatus::Pending));
    assert_eq!(store.get::<IncomeEntry>(&first.id).unwrap().amount.value(), 300.0);
}

#[tokio::test]
async fn selected_date_drives_the_dashboard() {
    let remote = seeded_remote();
    let store = Store::builder(remote)
        .today(|| NaiveDate::from_ymd_opt(2025, 1, 10).unwrap())
        .selected_date(date("2025-01-09"))
        .build();
    store.initialize().await.unwrap();

    assert_eq!(store.selected_date(), date("2025-01-09"));
    assert_eq!(store.dashboard().daily.income, 0.0);

    assert_eq!(store.reset_to_today(), date("2025-01-10"));
    let dashboard = store.dashboard();
    assert_eq!(dashboard.pivot, date("2025-01-10"));
    assert_eq!(dashboard.daily.income, 1000.0);
    assert_eq!(dashboard.rolling.len(), 7);
    assert_eq!(dashboard.rolling[6].profit, 600.0);
    assert_eq!(dashboard.monthly.len(), 6);
    assert_eq!(dashboard.monthly[5].label, "Jan");

    store.set_selected_date(date("2024-12-31"));
    assert_eq!(store.dashboard().monthly[5].label, "Dec");
}
