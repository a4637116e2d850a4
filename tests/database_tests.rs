use anyhow::Result;
use growth_assistant_bot::database::{connection::DatabaseManager, models::*};
use std::time::Duration;
use tempfile::{tempdir, TempDir};

async fn setup_test_db() -> Result<(DatabaseManager, TempDir)> {
    let temp_dir = tempdir()?;
    let db_path = temp_dir.path().join("test.db");
    let database_url = format!("sqlite:{}", db_path.display());

    let db_manager = DatabaseManager::new(&database_url).await?;
    db_manager.run_migrations().await?;

    Ok((db_manager, temp_dir))
}

// Nudge the clock so created_at timestamps are strictly ordered.
async fn tick() {
    tokio::time::sleep(Duration::from_millis(5)).await;
}

#[tokio::test]
async fn test_user_creation_and_touch() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;
    let telegram_id = 12345i64;

    let (user, is_new) = User::create_or_touch(&db.pool, telegram_id, telegram_id).await?;
    assert!(is_new);
    assert_eq!(user.telegram_id, telegram_id);
    assert_eq!(user.chat_id, telegram_id);
    assert_eq!(user.created_at, user.last_active);

    tick().await;
    let (user2, is_new2) = User::create_or_touch(&db.pool, telegram_id, telegram_id).await?;
    assert!(!is_new2);
    assert_eq!(user2.created_at, user.created_at);
    assert!(user2.last_active > user.last_active);

    let all = User::find_all(&db.pool).await?;
    assert_eq!(all.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_user_not_found() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    let result = User::find_by_telegram_id(&db.pool, 99999).await?;
    assert!(result.is_none());

    Ok(())
}

#[tokio::test]
async fn test_situation_creation_and_retrieval() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;
    let user_id = 67890i64;

    let emotions = vec!["Anxious 😰".to_string(), "Hopeful 🌟".to_string()];
    let situation = Situation::create(
        &db.pool,
        user_id,
        "Career Decision".to_string(),
        "I was offered a new role in another city.".to_string(),
        "Decide with confidence".to_string(),
        &emotions,
        4,
    )
    .await?;

    assert_eq!(situation.user_id, user_id);
    assert_eq!(situation.topic, "Career Decision");
    assert_eq!(situation.mood_rating, 4);
    assert_eq!(situation.emotion_list(), emotions);
    assert!(!situation.is_resolved());
    assert!(!situation.id.is_empty()); // UUID should be generated

    let found = Situation::find_by_id(&db.pool, &situation.id).await?;
    assert!(found.is_some());
    let found = found.unwrap();
    assert_eq!(found.id, situation.id);
    assert_eq!(found.emotion_list(), emotions);

    Ok(())
}

#[tokio::test]
async fn test_situation_not_found() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    let result = Situation::find_by_id(&db.pool, "non-existent-uuid").await?;
    assert!(result.is_none());

    Ok(())
}

#[tokio::test]
async fn test_situation_resolution() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;
    let user_id = 1i64;

    let situation = Situation::create(
        &db.pool,
        user_id,
        "Conflict at work".to_string(),
        "Disagreement with a colleague".to_string(),
        "Clear the air".to_string(),
        &["Frustrated 😤".to_string()],
        3,
    )
    .await?;

    Situation::resolve(&db.pool, &situation.id, "We talked it through.").await?;

    let resolved = Situation::find_by_id(&db.pool, &situation.id).await?.unwrap();
    assert!(resolved.is_resolved());
    assert_eq!(resolved.resolution.as_deref(), Some("We talked it through."));

    // Resolved situations no longer show up in the advice picker
    let unresolved = Situation::find_unresolved(&db.pool, user_id, 5).await?;
    assert!(unresolved.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_situation_prune_evicts_oldest_and_advice() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;
    let user_id = 7i64;

    let mut ids = Vec::new();
    for i in 0..5 {
        let situation = Situation::create(
            &db.pool,
            user_id,
            format!("Topic {}", i),
            "description".to_string(),
            "outcome".to_string(),
            &[],
            5,
        )
        .await?;
        Advice::create(&db.pool, situation.id.clone(), format!("advice {}", i)).await?;
        ids.push(situation.id);
        tick().await;
    }

    let removed = Situation::prune_history(&db.pool, user_id, 3).await?;
    assert_eq!(removed, 2);

    // The two oldest situations are gone, along with their advice
    for old_id in &ids[..2] {
        assert!(Situation::find_by_id(&db.pool, old_id).await?.is_none());
        assert!(Advice::find_latest_for_situation(&db.pool, old_id)
            .await?
            .is_none());
    }
    for kept_id in &ids[2..] {
        assert!(Situation::find_by_id(&db.pool, kept_id).await?.is_some());
        assert!(Advice::find_latest_for_situation(&db.pool, kept_id)
            .await?
            .is_some());
    }

    let remaining = Situation::find_all_for_user(&db.pool, user_id).await?;
    assert_eq!(remaining.len(), 3);

    Ok(())
}

#[tokio::test]
async fn test_situation_prune_does_not_touch_other_users() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    for user_id in [1i64, 2i64] {
        for i in 0..3 {
            Situation::create(
                &db.pool,
                user_id,
                format!("Topic {}", i),
                "description".to_string(),
                "outcome".to_string(),
                &[],
                5,
            )
            .await?;
            tick().await;
        }
    }

    Situation::prune_history(&db.pool, 1, 1).await?;

    assert_eq!(Situation::find_all_for_user(&db.pool, 1).await?.len(), 1);
    assert_eq!(Situation::find_all_for_user(&db.pool, 2).await?.len(), 3);

    Ok(())
}

#[tokio::test]
async fn test_advice_rating() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    let situation = Situation::create(
        &db.pool,
        1,
        "Topic".to_string(),
        "description".to_string(),
        "outcome".to_string(),
        &[],
        5,
    )
    .await?;

    let advice = Advice::create(&db.pool, situation.id.clone(), "Try this.".to_string()).await?;
    assert!(advice.was_helpful.is_none());

    Advice::set_helpful(&db.pool, &advice.id, true).await?;
    let rated = Advice::find_by_id(&db.pool, &advice.id).await?.unwrap();
    assert_eq!(rated.was_helpful, Some(true));

    Advice::set_helpful(&db.pool, &advice.id, false).await?;
    let rated = Advice::find_by_id(&db.pool, &advice.id).await?.unwrap();
    assert_eq!(rated.was_helpful, Some(false));

    Ok(())
}

#[tokio::test]
async fn test_journal_creation_and_tags() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;
    let user_id = 5i64;

    let tags = vec!["Gratitude 🙏".to_string(), "Reflection 🤔".to_string()];
    let entry = JournalEntry::create(
        &db.pool,
        user_id,
        "Today was a good day.".to_string(),
        8,
        &tags,
    )
    .await?;

    assert_eq!(entry.user_id, user_id);
    assert_eq!(entry.mood_rating, 8);
    assert_eq!(entry.tag_list(), tags);

    let entries = JournalEntry::find_all_for_user(&db.pool, user_id).await?;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].content, "Today was a good day.");

    Ok(())
}

#[tokio::test]
async fn test_journal_find_since_cutoff() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;
    let user_id = 5i64;

    JournalEntry::create(&db.pool, user_id, "old".to_string(), 5, &[]).await?;
    tick().await;
    let cutoff = chrono::Utc::now().to_rfc3339();
    tick().await;
    JournalEntry::create(&db.pool, user_id, "new".to_string(), 6, &[]).await?;

    let recent = JournalEntry::find_since(&db.pool, user_id, &cutoff).await?;
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].content, "new");

    Ok(())
}

#[tokio::test]
async fn test_journal_prune_evicts_oldest() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;
    let user_id = 9i64;

    for i in 0..4 {
        JournalEntry::create(&db.pool, user_id, format!("entry {}", i), 5, &[]).await?;
        tick().await;
    }

    let removed = JournalEntry::prune_history(&db.pool, user_id, 2).await?;
    assert_eq!(removed, 2);

    let remaining = JournalEntry::find_all_for_user(&db.pool, user_id).await?;
    assert_eq!(remaining.len(), 2);
    // Newest first; the survivors are the two most recent entries
    assert_eq!(remaining[0].content, "entry 3");
    assert_eq!(remaining[1].content, "entry 2");

    Ok(())
}
