use bamyang_core::db::open_db_in_memory;
use bamyang_core::{
    Entity, Experience, ExperienceContent, ExperienceDraft, ExperienceRepository, ExperienceValidationError,
    RepoError, SqliteExperienceRepository,
};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use rusqlite::Connection;
use uuid::Uuid;

fn at(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, min, sec)
        .unwrap()
}

fn draft(title: &str) -> ExperienceDraft {
    ExperienceDraft {
        title: title.to_string(),
        contents: vec![
            ExperienceContent::new("What did you do?", "Built the storage layer"),
            ExperienceContent::new("What did you learn?", "SQLite upserts"),
        ],
        strong_point_ids: vec![Uuid::new_v4(), Uuid::new_v4()],
        parent_tag_id: Some(Uuid::new_v4()),
        child_tag_id: Some(Uuid::new_v4()),
        started_at: at(2024, 3, 1, 9, 0, 0),
        ended_at: at(2024, 8, 31, 18, 0, 0),
    }
}

fn experience_created_at(user_id: Uuid, created_at: NaiveDateTime) -> Experience {
    let mut experience = Experience::create(user_id, draft("dated")).unwrap();
    experience.created_at = created_at;
    experience.updated_at = created_at;
    experience
}

fn experience_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM experience;", [], |row| row.get(0))
        .unwrap()
}

#[test]
fn save_then_find_roundtrips_all_fields() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteExperienceRepository::try_new(&conn).unwrap();

    let experience = Experience::create(Uuid::new_v4(), draft("Summer internship")).unwrap();
    repo.save(&experience).unwrap();

    let loaded = repo.find_by_experience_id(experience.experience_id).unwrap();
    assert_eq!(loaded, experience);
}

#[test]
fn caller_supplied_sub_millisecond_period_roundtrips_after_create() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteExperienceRepository::try_new(&conn).unwrap();

    let mut input = draft("Precise period");
    input.started_at = at(2024, 3, 1, 9, 0, 0) + Duration::microseconds(123_456);
    input.ended_at = at(2024, 8, 31, 18, 0, 0) + Duration::nanoseconds(999_999_999);
    let experience = Experience::create(Uuid::new_v4(), input).unwrap();
    assert_eq!(experience.started_at.to_string(), "2024-03-01 09:00:00.123");
    assert_eq!(experience.ended_at.to_string(), "2024-08-31 18:00:00.999");

    repo.save(&experience).unwrap();
    let loaded = repo.find_by_experience_id(experience.experience_id).unwrap();
    assert_eq!(loaded, experience);
}

#[test]
fn save_rejects_sub_millisecond_timestamp_instead_of_truncating() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteExperienceRepository::try_new(&conn).unwrap();
    let user = Uuid::new_v4();

    let past_bound = experience_created_at(
        user,
        at(2024, 12, 31, 23, 59, 0) + Duration::microseconds(500),
    );
    let err = repo.save(&past_bound).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ExperienceValidationError::SubMillisecondTimestamp {
            field: "created_at"
        })
    ));
    assert_eq!(experience_count(&conn), 0);
    assert!(repo
        .find_by_user_id_and_year_desc(2024, user)
        .unwrap()
        .is_empty());
}

#[test]
fn save_with_same_id_overwrites_fields_and_children() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteExperienceRepository::try_new(&conn).unwrap();

    let original = Experience::create(Uuid::new_v4(), draft("before")).unwrap();
    repo.save(&original).unwrap();

    let mut replacement_draft = draft("after");
    replacement_draft.contents = vec![ExperienceContent::new("only", "one")];
    replacement_draft.strong_point_ids = vec![Uuid::new_v4()];
    let edited = original.edit(replacement_draft).unwrap();
    repo.save(&edited).unwrap();

    let loaded = repo.find_by_experience_id(original.experience_id).unwrap();
    assert_eq!(loaded.title, "after");
    assert_eq!(loaded.contents, vec![ExperienceContent::new("only", "one")]);
    assert_eq!(loaded.strong_point_ids, edited.strong_point_ids);
    assert_eq!(experience_count(&conn), 1);
}

#[test]
fn overwrite_keeps_original_created_at() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteExperienceRepository::try_new(&conn).unwrap();

    let original = experience_created_at(Uuid::new_v4(), at(2023, 5, 1, 10, 0, 0));
    repo.save(&original).unwrap();

    let mut tampered = original.clone();
    tampered.created_at = at(2030, 1, 1, 0, 0, 0);
    tampered.title = "retitled".to_string();
    repo.save(&tampered).unwrap();

    let loaded = repo.find_by_experience_id(original.experience_id).unwrap();
    assert_eq!(loaded.created_at, original.created_at);
    assert_eq!(loaded.title, "retitled");
}

#[test]
fn find_unknown_id_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteExperienceRepository::try_new(&conn).unwrap();

    let missing = Uuid::new_v4();
    let err = repo.find_by_experience_id(missing).unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound { entity: Entity::Experience, id } if id == missing
    ));
}

#[test]
fn deleted_experience_is_not_found_and_children_are_removed() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteExperienceRepository::try_new(&conn).unwrap();

    let experience = Experience::create(Uuid::new_v4(), draft("to delete")).unwrap();
    repo.save(&experience).unwrap();
    repo.delete_by_experience_id(experience.experience_id)
        .unwrap();

    let err = repo
        .find_by_experience_id(experience.experience_id)
        .unwrap_err();
    assert!(err.is_not_found());

    let orphans: i64 = conn
        .query_row(
            "SELECT
                (SELECT COUNT(*) FROM experience_content)
                + (SELECT COUNT(*) FROM experience_strong_point);",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(orphans, 0);
}

#[test]
fn deleting_unknown_id_succeeds() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteExperienceRepository::try_new(&conn).unwrap();

    repo.delete_by_experience_id(Uuid::new_v4()).unwrap();
}

#[test]
fn find_all_by_user_id_returns_only_that_users_rows() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteExperienceRepository::try_new(&conn).unwrap();

    let user = Uuid::new_v4();
    let other = Uuid::new_v4();
    let first = Experience::create(user, draft("one")).unwrap();
    let second = Experience::create(user, draft("two")).unwrap();
    repo.save(&first).unwrap();
    repo.save(&second).unwrap();
    repo.save(&Experience::create(other, draft("other")).unwrap())
        .unwrap();

    let mut ids: Vec<Uuid> = repo
        .find_all_by_user_id(user)
        .unwrap()
        .into_iter()
        .map(|experience| experience.experience_id)
        .collect();
    ids.sort();
    let mut expected = vec![first.experience_id, second.experience_id];
    expected.sort();
    assert_eq!(ids, expected);
}

#[test]
fn find_all_for_user_without_rows_is_empty() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteExperienceRepository::try_new(&conn).unwrap();

    assert!(repo.find_all_by_user_id(Uuid::new_v4()).unwrap().is_empty());
    assert!(repo
        .find_by_user_id_and_year_desc(2024, Uuid::new_v4())
        .unwrap()
        .is_empty());
}

#[test]
fn year_query_uses_literal_23_59_00_upper_bound_and_sorts_desc() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteExperienceRepository::try_new(&conn).unwrap();
    let user = Uuid::new_v4();

    let previous_year_last_second = experience_created_at(user, at(2023, 12, 31, 23, 59, 59));
    let new_year = experience_created_at(user, at(2024, 1, 1, 0, 0, 0));
    let mid_year = experience_created_at(user, at(2024, 6, 15, 12, 0, 0));
    let last_minute = experience_created_at(user, at(2024, 12, 31, 23, 59, 30));
    let last_second = experience_created_at(user, at(2024, 12, 31, 23, 59, 59));
    for experience in [
        &previous_year_last_second,
        &new_year,
        &mid_year,
        &last_minute,
        &last_second,
    ] {
        repo.save(experience).unwrap();
    }

    let found: Vec<NaiveDateTime> = repo
        .find_by_user_id_and_year_desc(2024, user)
        .unwrap()
        .into_iter()
        .map(|experience| experience.created_at)
        .collect();

    assert_eq!(found, vec![mid_year.created_at, new_year.created_at]);
}

#[test]
fn year_query_includes_row_exactly_at_upper_bound() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteExperienceRepository::try_new(&conn).unwrap();
    let user = Uuid::new_v4();

    let boundary = experience_created_at(user, at(2024, 12, 31, 23, 59, 0));
    repo.save(&boundary).unwrap();
    repo.save(&experience_created_at(Uuid::new_v4(), at(2024, 7, 1, 0, 0, 0)))
        .unwrap();

    let found = repo.find_by_user_id_and_year_desc(2024, user).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].experience_id, boundary.experience_id);
}

#[test]
fn year_query_can_be_narrowed_by_parent_or_child_tag() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteExperienceRepository::try_new(&conn).unwrap();
    let user = Uuid::new_v4();
    let (parent, other_parent) = (Uuid::new_v4(), Uuid::new_v4());
    let (child_a, child_b) = (Uuid::new_v4(), Uuid::new_v4());

    let filed = |created_at, parent_tag_id, child_tag_id| {
        let mut experience = experience_created_at(user, created_at);
        experience.parent_tag_id = Some(parent_tag_id);
        experience.child_tag_id = Some(child_tag_id);
        experience
    };
    let march = filed(at(2024, 3, 1, 10, 0, 0), parent, child_a);
    let september = filed(at(2024, 9, 1, 10, 0, 0), parent, child_b);
    let elsewhere = filed(at(2024, 5, 1, 10, 0, 0), other_parent, Uuid::new_v4());
    let last_year = filed(at(2023, 6, 1, 10, 0, 0), parent, child_a);
    let final_minute = filed(at(2024, 12, 31, 23, 59, 30), parent, child_a);
    for experience in [&march, &september, &elsewhere, &last_year, &final_minute] {
        repo.save(experience).unwrap();
    }

    let ids = |found: Vec<Experience>| -> Vec<Uuid> {
        found.into_iter().map(|experience| experience.experience_id).collect()
    };
    assert_eq!(
        ids(repo
            .find_by_user_id_and_year_and_parent_tag_id_desc(2024, user, parent)
            .unwrap()),
        vec![september.experience_id, march.experience_id]
    );
    assert_eq!(
        ids(repo
            .find_by_user_id_and_year_and_child_tag_id_desc(2024, user, child_a)
            .unwrap()),
        vec![march.experience_id]
    );
    assert_eq!(
        ids(repo
            .find_by_user_id_and_year_and_child_tag_id_desc(2023, user, child_a)
            .unwrap()),
        vec![last_year.experience_id]
    );
    assert!(repo
        .find_by_user_id_and_year_and_parent_tag_id_desc(2024, Uuid::new_v4(), parent)
        .unwrap()
        .is_empty());
}

#[test]
fn distinct_years_follow_started_at_ascending() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteExperienceRepository::try_new(&conn).unwrap();
    let user = Uuid::new_v4();

    for started_at in [
        at(2023, 11, 30, 0, 0, 0),
        at(2021, 2, 1, 0, 0, 0),
        at(2023, 5, 1, 0, 0, 0),
        at(2020, 1, 1, 0, 0, 0),
    ] {
        let mut input = draft("period");
        input.started_at = started_at;
        repo.save(&Experience::create(user, input).unwrap()).unwrap();
    }
    let mut foreign = draft("someone else");
    foreign.started_at = at(2019, 7, 7, 0, 0, 0);
    repo.save(&Experience::create(Uuid::new_v4(), foreign).unwrap())
        .unwrap();

    assert_eq!(
        repo.find_distinct_years_by_user_id(user).unwrap(),
        vec![2020, 2021, 2023]
    );
    assert!(repo
        .find_distinct_years_by_user_id(Uuid::new_v4())
        .unwrap()
        .is_empty());
}

#[test]
fn year_query_rejects_unrepresentable_year() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteExperienceRepository::try_new(&conn).unwrap();

    let err = repo
        .find_by_user_id_and_year_desc(i32::MAX, Uuid::new_v4())
        .unwrap_err();
    assert!(matches!(err, RepoError::InvalidArgument(_)));
}

#[test]
fn save_rejects_invalid_experience_without_writing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteExperienceRepository::try_new(&conn).unwrap();

    let mut experience = Experience::create(Uuid::new_v4(), draft("valid")).unwrap();
    experience.strong_point_ids = (0..6).map(|_| Uuid::new_v4()).collect();

    let err = repo.save(&experience).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ExperienceValidationError::TooManyStrongPoints { count: 6 })
    ));
    assert_eq!(experience_count(&conn), 0);
}
