use daybook_core::db::{open_db_in_memory, DbError};
use daybook_core::{
    Composer, ComposerPhase, DateKey, DiaryService, FontStyle, FontWeight, ImagePick, NoteRecord,
    NoteStore, RepoError, RepoResult, SqliteNoteStore, MEDIA_PERMISSION_ALERT,
};

fn key(value: &str) -> DateKey {
    value.parse().unwrap()
}

/// Store whose backing storage is permanently unavailable.
struct FailingStore;

fn unavailable() -> RepoError {
    RepoError::Db(DbError::Sqlite(rusqlite::Error::InvalidQuery))
}

impl NoteStore for FailingStore {
    fn put(&self, _key: &DateKey, _record: &NoteRecord) -> RepoResult<()> {
        Err(unavailable())
    }

    fn get(&self, _key: &DateKey) -> RepoResult<Option<NoteRecord>> {
        Err(unavailable())
    }

    fn delete(&self, _key: &DateKey) -> RepoResult<()> {
        Err(unavailable())
    }

    fn list_all(&self) -> RepoResult<Vec<(DateKey, NoteRecord)>> {
        Err(unavailable())
    }
}

#[test]
fn save_load_delete_happy_path() {
    let conn = open_db_in_memory().unwrap();
    let service = DiaryService::new(SqliteNoteStore::try_new(&conn).unwrap());
    let day = key("2024-03-05");

    let mut record = NoteRecord::new("wrote postcards");
    record.font_style = FontStyle::Italic;
    service.save_note(&day, &record).unwrap();

    assert_eq!(service.load_note(&day).unwrap(), Some(record));

    service.delete_note(&day).unwrap();
    assert_eq!(service.load_note(&day).unwrap(), None);
}

#[test]
fn load_note_masks_corrupt_body_as_absent() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO notes (date_key, body) VALUES ('2024-03-05', 'scrambled');",
        [],
    )
    .unwrap();

    let service = DiaryService::new(SqliteNoteStore::try_new(&conn).unwrap());
    assert_eq!(service.load_note(&key("2024-03-05")).unwrap(), None);
}

#[test]
fn calendar_overview_is_sorted_with_truncated_previews() {
    let conn = open_db_in_memory().unwrap();
    let service = DiaryService::new(SqliteNoteStore::try_new(&conn).unwrap());

    let long_body = "a ".repeat(60);
    service
        .save_note(&key("2024-03-07"), &NoteRecord::new(long_body))
        .unwrap();
    service
        .save_note(&key("2024-03-05"), &NoteRecord::new("first\nof two lines"))
        .unwrap();
    service
        .save_note(&key("2023-12-31"), &NoteRecord::new(""))
        .unwrap();

    let overview = service.calendar_overview().unwrap();
    let keys: Vec<String> = overview
        .iter()
        .map(|day| day.date_key.to_string())
        .collect();
    assert_eq!(keys, ["2023-12-31", "2024-03-05", "2024-03-07"]);

    assert_eq!(overview[0].preview, "");
    assert_eq!(overview[1].preview, "first of two lines");
    assert!(overview[2].preview.chars().count() <= 50);
}

#[test]
fn calendar_overview_survives_corrupt_rows() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO notes (date_key, body) VALUES ('2024-01-01', 'nope');",
        [],
    )
    .unwrap();

    let service = DiaryService::new(SqliteNoteStore::try_new(&conn).unwrap());
    service
        .save_note(&key("2024-01-02"), &NoteRecord::new("still here"))
        .unwrap();

    let overview = service.calendar_overview().unwrap();
    assert_eq!(overview.len(), 1);
    assert_eq!(overview[0].date_key, key("2024-01-02"));
}

#[test]
fn composer_opens_as_no_entry_for_fresh_date() {
    let conn = open_db_in_memory().unwrap();
    let service = DiaryService::new(SqliteNoteStore::try_new(&conn).unwrap());

    let composer = Composer::open(&service, key("2024-03-05"));
    assert_eq!(composer.phase(), ComposerPhase::NoEntry);
    assert_eq!(composer.draft(), &NoteRecord::default());
}

#[test]
fn composer_opens_as_viewing_for_stored_date() {
    let conn = open_db_in_memory().unwrap();
    let service = DiaryService::new(SqliteNoteStore::try_new(&conn).unwrap());
    let day = key("2024-03-05");
    service.save_note(&day, &NoteRecord::new("kept")).unwrap();

    let composer = Composer::open(&service, day);
    assert_eq!(composer.phase(), ComposerPhase::Viewing);
}

#[test]
fn editing_a_fresh_date_starts_from_defaults_and_save_clears() {
    let conn = open_db_in_memory().unwrap();
    let service = DiaryService::new(SqliteNoteStore::try_new(&conn).unwrap());
    let day = key("2024-03-05");

    let mut composer = Composer::open(&service, day);
    composer.begin_editing(&service);
    assert_eq!(composer.phase(), ComposerPhase::Editing);
    assert_eq!(composer.draft(), &NoteRecord::default());

    composer.set_note("went swimming");
    composer.toggle_bold();
    assert!(composer.set_font_family("Verdana"));
    composer.save(&service).unwrap();

    // Surface cleared after a successful save.
    assert_eq!(composer.phase(), ComposerPhase::NoEntry);
    assert_eq!(composer.draft(), &NoteRecord::default());

    let stored = service.load_note(&day).unwrap().unwrap();
    assert_eq!(stored.note, "went swimming");
    assert_eq!(stored.font_weight, FontWeight::Bold);
    assert_eq!(stored.font_family, "Verdana");
}

#[test]
fn editing_an_existing_date_loads_the_stored_record() {
    let conn = open_db_in_memory().unwrap();
    let service = DiaryService::new(SqliteNoteStore::try_new(&conn).unwrap());
    let day = key("2024-03-05");

    let mut original = NoteRecord::new("original");
    original.card_color = "#112233".to_string();
    service.save_note(&day, &original).unwrap();

    let mut composer = Composer::open(&service, day);
    composer.begin_editing(&service);
    assert_eq!(composer.draft(), &original);

    composer.set_note("revised");
    composer.save(&service).unwrap();

    let stored = service.load_note(&day).unwrap().unwrap();
    assert_eq!(stored.note, "revised");
    assert_eq!(stored.card_color, "#112233");
}

#[test]
fn editing_falls_back_to_defaults_when_load_fails() {
    let service = DiaryService::new(FailingStore);

    let mut composer = Composer::open(&service, key("2024-03-05"));
    assert_eq!(composer.phase(), ComposerPhase::NoEntry);

    composer.begin_editing(&service);
    assert_eq!(composer.phase(), ComposerPhase::Editing);
    assert_eq!(composer.draft(), &NoteRecord::default());
}

#[test]
fn failed_save_keeps_the_draft_and_stays_editing() {
    let service = DiaryService::new(FailingStore);

    let mut composer = Composer::new(key("2024-03-05"));
    composer.begin_editing(&service);
    composer.set_note("must not be lost");

    let err = composer.save(&service).unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));
    assert_eq!(composer.phase(), ComposerPhase::Editing);
    assert_eq!(composer.draft().note, "must not be lost");
}

#[test]
fn delete_returns_to_no_entry_even_when_nothing_was_stored() {
    let conn = open_db_in_memory().unwrap();
    let service = DiaryService::new(SqliteNoteStore::try_new(&conn).unwrap());
    let day = key("2024-03-05");

    let mut composer = Composer::open(&service, day);
    composer.delete(&service).unwrap();
    assert_eq!(composer.phase(), ComposerPhase::NoEntry);

    service.save_note(&day, &NoteRecord::new("kept")).unwrap();
    let mut composer = Composer::open(&service, day);
    assert_eq!(composer.phase(), ComposerPhase::Viewing);
    composer.delete(&service).unwrap();
    assert_eq!(composer.phase(), ComposerPhase::NoEntry);
    assert_eq!(service.load_note(&day).unwrap(), None);
}

#[test]
fn unknown_font_family_is_rejected_by_the_editor() {
    let conn = open_db_in_memory().unwrap();
    let service = DiaryService::new(SqliteNoteStore::try_new(&conn).unwrap());

    let mut composer = Composer::new(key("2024-03-05"));
    composer.begin_editing(&service);

    assert!(!composer.set_font_family("Papyrus"));
    assert_eq!(composer.draft().font_family, "sans-serif");
}

#[test]
fn image_pick_outcomes_drive_the_draft() {
    let conn = open_db_in_memory().unwrap();
    let service = DiaryService::new(SqliteNoteStore::try_new(&conn).unwrap());

    let mut composer = Composer::new(key("2024-03-05"));
    composer.begin_editing(&service);

    assert_eq!(composer.apply_image_pick(ImagePick::Cancelled), None);
    assert_eq!(composer.draft().image_uri, None);

    let alert = composer.apply_image_pick(ImagePick::Denied);
    assert_eq!(alert, Some(MEDIA_PERMISSION_ALERT));
    // Alerted once; the flow continues without an image.
    assert_eq!(composer.apply_image_pick(ImagePick::Denied), None);
    assert_eq!(composer.draft().image_uri, None);

    composer.apply_image_pick(ImagePick::Picked("file:///photos/cat.jpg".to_string()));
    assert_eq!(
        composer.draft().image_uri.as_deref(),
        Some("file:///photos/cat.jpg")
    );
}

#[test]
fn empty_note_save_produces_an_entry_not_no_entry() {
    let conn = open_db_in_memory().unwrap();
    let service = DiaryService::new(SqliteNoteStore::try_new(&conn).unwrap());
    let day = key("2024-03-05");

    let mut composer = Composer::open(&service, day);
    composer.begin_editing(&service);
    composer.save(&service).unwrap();

    let reopened = Composer::open(&service, day);
    assert_eq!(reopened.phase(), ComposerPhase::Viewing);
}
