use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::QueryFilter;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub station_id: String,
    pub name: String,
    pub city: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DbConn,
        station_id: &str,
        name: &str,
        city: Option<&str>,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        let station = ActiveModel {
            station_id: Set(station_id.to_owned()),
            name: Set(name.to_owned()),
            city: Set(city.map(str::to_owned)),
            latitude: Set(latitude),
            longitude: Set(longitude),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        station.insert(db).await
    }

    /// Looks a station up by its external `station_id` (not the row id).
    pub async fn find_by_station_id(db: &DbConn, station_id: &str) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::StationId.eq(station_id))
            .one(db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::Model as StationModel;
    use crate::test_utils::setup_test_db;

    #[tokio::test]
    async fn test_create_and_find_by_station_id() {
        let db = setup_test_db().await;

        let created = StationModel::create(
            &db,
            "SAVEDNIPRO_1",
            "Dnipro Central",
            Some("Dnipro"),
            Some(48.4647),
            Some(35.0462),
        )
        .await
        .unwrap();

        assert_eq!(created.station_id, "SAVEDNIPRO_1");

        let found = StationModel::find_by_station_id(&db, "SAVEDNIPRO_1")
            .await
            .unwrap()
            .expect("station should exist");
        assert_eq!(found.id, created.id);
        assert_eq!(found.name, "Dnipro Central");

        let missing = StationModel::find_by_station_id(&db, "NOSUCH")
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_station_id_rejected() {
        let db = setup_test_db().await;

        StationModel::create(&db, "S1", "First", None, None, None)
            .await
            .unwrap();
        let dup = StationModel::create(&db, "S1", "Second", None, None, None).await;
        assert!(dup.is_err());
    }
}
