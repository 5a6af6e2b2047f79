// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Carousel record CRUD operations.

use rusqlite::params;
use vitrine_core::{
    CarouselConfig, CarouselId, CarouselKind, CarouselRecord, CarouselSummary, VitrineError,
};

use crate::database::{Database, flatten_tr_err, map_tr_err, sql_err};

/// Insert a new carousel (`id = None`) or replace an existing one.
///
/// Title, kind and configuration are written in one transaction. Replacing
/// an id that does not exist fails with `NotFound` and writes nothing.
pub async fn save_carousel(
    db: &Database,
    id: Option<CarouselId>,
    title: &str,
    config: &CarouselConfig,
) -> Result<CarouselId, VitrineError> {
    let title = title.to_string();
    let kind = config.kind().to_string();
    let json = serde_json::to_string(config)?;
    let now = chrono::Utc::now().to_rfc3339();

    db.connection()
        .call(move |conn| -> Result<CarouselId, VitrineError> {
            let tx = conn.transaction().map_err(sql_err)?;
            let saved = match id {
                None => {
                    tx.execute(
                        "INSERT INTO carousels (title, kind, config, created_at, updated_at)
                         VALUES (?1, ?2, ?3, ?4, ?4)",
                        params![title, kind, json, now],
                    )
                    .map_err(sql_err)?;
                    CarouselId(tx.last_insert_rowid())
                }
                Some(id) => {
                    let changed = tx
                        .execute(
                            "UPDATE carousels SET title = ?1, kind = ?2, config = ?3, updated_at = ?4
                             WHERE id = ?5",
                            params![title, kind, json, now, id.0],
                        )
                        .map_err(sql_err)?;
                    if changed == 0 {
                        return Err(VitrineError::NotFound {
                            entity: "carousel",
                            id: id.0,
                        });
                    }
                    id
                }
            };
            tx.commit().map_err(sql_err)?;
            Ok(saved)
        })
        .await
        .map_err(flatten_tr_err)
}

/// Load a carousel by id.
pub async fn get_carousel(
    db: &Database,
    id: CarouselId,
) -> Result<Option<CarouselRecord>, VitrineError> {
    let row = db
        .connection()
        .call(move |conn| {
            let result = conn.query_row(
                "SELECT title, config, created_at, updated_at FROM carousels WHERE id = ?1",
                params![id.0],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                    ))
                },
            );
            match result {
                Ok(row) => Ok(Some(row)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(map_tr_err)?;

    let Some((title, config, created_at, updated_at)) = row else {
        return Ok(None);
    };
    Ok(Some(CarouselRecord {
        id,
        title,
        config: serde_json::from_str(&config)?,
        created_at,
        updated_at,
    }))
}

/// Delete a carousel. Returns whether a row was removed.
pub async fn delete_carousel(db: &Database, id: CarouselId) -> Result<bool, VitrineError> {
    db.connection()
        .call(move |conn| {
            let n = conn.execute("DELETE FROM carousels WHERE id = ?1", params![id.0])?;
            Ok(n > 0)
        })
        .await
        .map_err(map_tr_err)
}

/// All carousels, ordered by id.
pub async fn list_carousels(db: &Database) -> Result<Vec<CarouselSummary>, VitrineError> {
    let rows = db
        .connection()
        .call(|conn| {
            let mut stmt = conn.prepare("SELECT id, title, kind FROM carousels ORDER BY id")?;
            let rows = stmt
                .query_map([], |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                    ))
                })?
                .collect::<Result<Vec<_>, _>>();
            rows
        })
        .await
        .map_err(map_tr_err)?;

    rows.into_iter()
        .map(|(id, title, kind)| {
            let kind = kind.parse::<CarouselKind>().map_err(|_| {
                VitrineError::Internal(format!("carousel {id} has unknown kind `{kind}`"))
            })?;
            Ok(CarouselSummary {
                id: CarouselId(id),
                title,
                kind,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use tempfile::tempdir;
    use vitrine_core::{CarouselVariant, CategorySettings};

    use super::*;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        (db, dir)
    }

    fn categories_config() -> CarouselConfig {
        CarouselConfig::with_variant(CarouselVariant::Categories(CategorySettings {
            selected: BTreeSet::from([4, 5]),
            only_non_empty: true,
            ..CategorySettings::default()
        }))
    }

    #[tokio::test]
    async fn create_and_load_roundtrips() {
        let (db, _dir) = setup_db().await;
        let id = save_carousel(&db, None, "Front page", &categories_config())
            .await
            .unwrap();
        assert!(!id.is_empty());

        let record = get_carousel(&db, id).await.unwrap().unwrap();
        assert_eq!(record.title, "Front page");
        assert_eq!(record.config, categories_config());
        assert_eq!(record.created_at, record.updated_at);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn update_replaces_the_whole_config() {
        let (db, _dir) = setup_db().await;
        let id = save_carousel(&db, None, "A", &categories_config())
            .await
            .unwrap();
        let replacement = CarouselConfig::default();
        let same = save_carousel(&db, Some(id), "B", &replacement)
            .await
            .unwrap();
        assert_eq!(same, id);

        let record = get_carousel(&db, id).await.unwrap().unwrap();
        assert_eq!(record.title, "B");
        assert_eq!(record.config, replacement);
        assert_eq!(list_carousels(&db).await.unwrap()[0].kind, CarouselKind::Products);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn updating_unknown_id_is_not_found() {
        let (db, _dir) = setup_db().await;
        let err = save_carousel(&db, Some(CarouselId(41)), "X", &CarouselConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, VitrineError::NotFound { id: 41, .. }));
        assert!(list_carousels(&db).await.unwrap().is_empty());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn delete_and_list() {
        let (db, _dir) = setup_db().await;
        let a = save_carousel(&db, None, "A", &CarouselConfig::default())
            .await
            .unwrap();
        let b = save_carousel(&db, None, "B", &categories_config())
            .await
            .unwrap();

        let listed = list_carousels(&db).await.unwrap();
        assert_eq!(listed.iter().map(|s| s.id).collect::<Vec<_>>(), vec![a, b]);
        assert_eq!(listed[1].kind, CarouselKind::Categories);

        assert!(delete_carousel(&db, a).await.unwrap());
        assert!(!delete_carousel(&db, a).await.unwrap());
        assert!(get_carousel(&db, a).await.unwrap().is_none());
        assert_eq!(list_carousels(&db).await.unwrap().len(), 1);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let (db, _dir) = setup_db().await;
        let a = save_carousel(&db, None, "A", &CarouselConfig::default())
            .await
            .unwrap();
        delete_carousel(&db, a).await.unwrap();
        let b = save_carousel(&db, None, "B", &CarouselConfig::default())
            .await
            .unwrap();
        assert!(b.0 > a.0);
        db.close().await.unwrap();
    }
}
