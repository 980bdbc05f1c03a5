use crate::db::models::{DeleteOutcome, Movie};
use crate::error::AppResult;
use sqlx::SqlitePool;

pub async fn list(pool: &SqlitePool) -> AppResult<Vec<Movie>> {
    let movies = sqlx::query_as::<_, Movie>("SELECT id, name FROM movie ORDER BY id")
        .fetch_all(pool)
        .await?;

    Ok(movies)
}

// Mutations run in a transaction; returning early with `?` drops it uncommitted,
// which rolls it back.

pub async fn create(pool: &SqlitePool, name: Option<&str>) -> AppResult<Movie> {
    let mut tx = pool.begin().await?;

    let movie = sqlx::query_as::<_, Movie>("INSERT INTO movie (name) VALUES (?) RETURNING id, name")
        .bind(name)
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(movie)
}

pub async fn delete_all(pool: &SqlitePool) -> AppResult<u64> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query("DELETE FROM movie").execute(&mut *tx).await?;

    tx.commit().await?;

    Ok(result.rows_affected())
}

pub async fn get_by_id(pool: &SqlitePool, id: i64) -> AppResult<Option<Movie>> {
    let movie = sqlx::query_as::<_, Movie>("SELECT id, name FROM movie WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(movie)
}

pub async fn delete_by_id(pool: &SqlitePool, id: i64) -> AppResult<DeleteOutcome> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query("DELETE FROM movie WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    if result.rows_affected() == 0 {
        Ok(DeleteOutcome::NotFound)
    } else {
        Ok(DeleteOutcome::Deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    #[tokio::test]
    async fn test_create_then_get_returns_same_name() {
        let pool = test_pool().await;

        let created = create(&pool, Some("Inception")).await.unwrap();
        let fetched = get_by_id(&pool, created.id).await.unwrap();

        assert_eq!(fetched, Some(created.clone()));
        assert_eq!(created.name.as_deref(), Some("Inception"));
    }

    #[tokio::test]
    async fn test_first_movie_gets_id_one() {
        let pool = test_pool().await;

        let created = create(&pool, Some("Inception")).await.unwrap();

        assert_eq!(created, Movie { id: 1, name: Some("Inception".into()) });
    }

    #[tokio::test]
    async fn test_create_without_name_stores_null() {
        let pool = test_pool().await;

        let created = create(&pool, None).await.unwrap();

        assert_eq!(created.name, None);
        assert_eq!(get_by_id(&pool, created.id).await.unwrap().unwrap().name, None);
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_id() {
        let pool = test_pool().await;
        assert!(list(&pool).await.unwrap().is_empty());

        for name in ["Alien", "Brazil", "Cube"] {
            create(&pool, Some(name)).await.unwrap();
        }

        let names: Vec<_> = list(&pool)
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.name.unwrap())
            .collect();
        assert_eq!(names, ["Alien", "Brazil", "Cube"]);
    }

    #[tokio::test]
    async fn test_delete_all_reports_rows_removed() {
        let pool = test_pool().await;
        for name in ["Alien", "Brazil", "Cube"] {
            create(&pool, Some(name)).await.unwrap();
        }

        assert_eq!(delete_all(&pool).await.unwrap(), 3);
        assert!(list(&pool).await.unwrap().is_empty());
        assert_eq!(delete_all(&pool).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_missing_id_leaves_other_rows() {
        let pool = test_pool().await;
        let kept = create(&pool, Some("Alien")).await.unwrap();

        let outcome = delete_by_id(&pool, kept.id + 100).await.unwrap();

        assert_eq!(outcome, DeleteOutcome::NotFound);
        assert_eq!(list(&pool).await.unwrap(), vec![kept]);
    }

    #[tokio::test]
    async fn test_delete_by_id_removes_only_that_row() {
        let pool = test_pool().await;
        let gone = create(&pool, Some("Alien")).await.unwrap();
        let kept = create(&pool, Some("Brazil")).await.unwrap();

        assert_eq!(delete_by_id(&pool, gone.id).await.unwrap(), DeleteOutcome::Deleted);
        assert_eq!(get_by_id(&pool, gone.id).await.unwrap(), None);
        assert_eq!(list(&pool).await.unwrap(), vec![kept]);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete_all() {
        let pool = test_pool().await;
        let first = create(&pool, Some("Alien")).await.unwrap();
        delete_all(&pool).await.unwrap();

        let second = create(&pool, Some("Alien")).await.unwrap();

        assert!(second.id > first.id);
    }
}
