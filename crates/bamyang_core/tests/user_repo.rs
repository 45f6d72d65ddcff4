use bamyang_core::db::open_db_in_memory;
use bamyang_core::{SocialLoginProvider, SqliteUserRepository, User, UserLookup, UserRepository};
use uuid::Uuid;

#[test]
fn save_then_find_by_id_and_social_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::try_new(&conn).unwrap();

    let mut user = User::create(
        "kakao-123",
        SocialLoginProvider::Kakao,
        "https://img.example/profile.png",
        "bamyang",
    );
    user.goal = Some("land a backend role".to_string());
    repo.save(&user).unwrap();

    assert_eq!(repo.find_by_user_id(user.user_id).unwrap(), user);
    assert_eq!(
        repo.find_by_social_id(SocialLoginProvider::Kakao, "kakao-123")
            .unwrap(),
        Some(user.clone())
    );
    assert_eq!(
        repo.find_by_social_id(SocialLoginProvider::Google, "kakao-123")
            .unwrap(),
        None
    );
}

#[test]
fn exists_by_user_id_reports_presence() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::try_new(&conn).unwrap();

    let user = User::create("g-1", SocialLoginProvider::Google, "", "nick");
    repo.save(&user).unwrap();

    assert!(repo.exists_by_user_id(user.user_id).unwrap());
    assert!(!repo.exists_by_user_id(Uuid::new_v4()).unwrap());
}

#[test]
fn find_unknown_user_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::try_new(&conn).unwrap();

    assert!(repo
        .find_by_user_id(Uuid::new_v4())
        .unwrap_err()
        .is_not_found());
}

#[test]
fn same_social_id_cannot_register_twice_for_one_provider() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::try_new(&conn).unwrap();

    repo.save(&User::create("dup", SocialLoginProvider::Kakao, "", "first"))
        .unwrap();
    let err = repo
        .save(&User::create("dup", SocialLoginProvider::Kakao, "", "second"))
        .unwrap_err();
    assert!(matches!(err, bamyang_core::RepoError::Db(_)));
}
