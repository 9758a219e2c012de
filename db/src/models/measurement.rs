//! Air-quality measurement storage.
//!
//! A measurement is one timestamped observation event at a station. Its
//! pollutant readings live in the `measurement_readings` table (see
//! [`super::measurement_reading`]) and are re-attached in submission order
//! when a record is read back. At most one measurement may exist per
//! (station_id, measurement_time) pair; the unique index enforces this and
//! violations surface as [`StoreError::Validation`].

use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::{Condition, LoaderTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};
use serde::{Deserialize, Serialize};

use super::measurement_reading::{
    self as reading, AveragingPeriod, Pollutant, QualityFlag, Unit,
};
use crate::error::StoreError;

pub const DEFAULT_SOURCE: &str = "SaveEcoBot";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "measurements")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub station_id: String,
    pub measurement_time: DateTime<Utc>,

    pub source: String,
    pub import_time: DateTime<Utc>,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub original_data: Option<serde_json::Value>,
    pub processing_notes: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::measurement_reading::Entity")]
    Readings,
}

impl Related<super::measurement_reading::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Readings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// A single pollutant reading as it appears on the wire, embedded in a
/// measurement with no identity of its own.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PollutantReading {
    pub pollutant: Pollutant,
    pub value: f64,
    pub unit: Unit,
    #[serde(default)]
    pub averaging_period: AveragingPeriod,
    #[serde(default)]
    pub quality_flag: QualityFlag,
}

impl From<reading::Model> for PollutantReading {
    fn from(row: reading::Model) -> Self {
        Self {
            pollutant: row.pollutant,
            value: row.value,
            unit: row.unit,
            averaging_period: row.averaging_period,
            quality_flag: row.quality_flag,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub source: String,
    pub import_time: DateTime<Utc>,
    pub original_data: Option<serde_json::Value>,
    pub processing_notes: Option<String>,
}

/// The full persisted record shape returned to API callers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    pub id: i64,
    pub station_id: String,
    pub measurement_time: DateTime<Utc>,
    pub pollutants: Vec<PollutantReading>,
    pub metadata: Metadata,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MeasurementRecord {
    fn assemble(row: Model, readings: Vec<reading::Model>) -> Self {
        Self {
            id: row.id,
            station_id: row.station_id,
            measurement_time: row.measurement_time,
            pollutants: readings.into_iter().map(PollutantReading::from).collect(),
            metadata: Metadata {
                source: row.source,
                import_time: row.import_time,
                original_data: row.original_data,
                processing_notes: row.processing_notes,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct NewMetadata {
    pub source: Option<String>,
    pub import_time: Option<DateTime<Utc>>,
    pub original_data: Option<serde_json::Value>,
    pub processing_notes: Option<String>,
}

#[derive(Clone, Debug)]
pub struct NewMeasurement {
    pub station_id: String,
    pub measurement_time: DateTime<Utc>,
    pub pollutants: Vec<PollutantReading>,
    pub metadata: NewMetadata,
}

/// A partial update. `None` fields keep their stored values; a present
/// `pollutants` replaces the whole reading sequence.
#[derive(Clone, Debug, Default)]
pub struct MeasurementPatch {
    pub station_id: Option<String>,
    pub measurement_time: Option<DateTime<Utc>>,
    pub pollutants: Option<Vec<PollutantReading>>,
    pub metadata: Option<NewMetadata>,
}

#[derive(Clone, Debug, Default)]
pub struct MeasurementFilter {
    pub station_id: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub pollutant: Option<Pollutant>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Statistics {
    pub count: u64,
    pub avg: f64,
    pub min: f64,
    pub max: f64,
    pub latest: DateTime<Utc>,
}

fn validate_readings(readings: &[PollutantReading]) -> Result<(), StoreError> {
    for r in readings {
        if !r.value.is_finite() {
            return Err(StoreError::validation(format!(
                "Value for {} must be a finite number",
                r.pollutant
            )));
        }
    }
    Ok(())
}

async fn insert_readings(
    db: &DbConn,
    measurement_id: i64,
    readings: &[PollutantReading],
) -> Result<(), DbErr> {
    if readings.is_empty() {
        return Ok(());
    }

    let rows = readings.iter().enumerate().map(|(i, r)| reading::ActiveModel {
        measurement_id: Set(measurement_id),
        position: Set(i as i32),
        pollutant: Set(r.pollutant.clone()),
        value: Set(r.value),
        unit: Set(r.unit.clone()),
        averaging_period: Set(r.averaging_period.clone()),
        quality_flag: Set(r.quality_flag.clone()),
        ..Default::default()
    });

    reading::Entity::insert_many(rows).exec(db).await?;
    Ok(())
}

impl Model {
    /// Persists a new measurement with its readings. Fails with
    /// `Validation` on a non-finite value or a duplicate
    /// (station_id, measurement_time) pair. Station existence is the API
    /// layer's concern, not checked here.
    pub async fn create(db: &DbConn, input: NewMeasurement) -> Result<MeasurementRecord, StoreError> {
        validate_readings(&input.pollutants)?;

        let now = Utc::now();
        let meta = input.metadata;
        let row = ActiveModel {
            station_id: Set(input.station_id),
            measurement_time: Set(input.measurement_time),
            source: Set(meta.source.unwrap_or_else(|| DEFAULT_SOURCE.to_owned())),
            import_time: Set(meta.import_time.unwrap_or(now)),
            original_data: Set(meta.original_data),
            processing_notes: Set(meta.processing_notes),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let stored = row
            .insert(db)
            .await
            .map_err(|e| StoreError::from_insert(e, "A measurement for this station and time"))?;

        insert_readings(db, stored.id, &input.pollutants).await?;

        let readings = stored
            .find_related(reading::Entity)
            .order_by_asc(reading::Column::Position)
            .all(db)
            .await?;

        Ok(MeasurementRecord::assemble(stored, readings))
    }

    pub async fn find_by_id(db: &DbConn, id: i64) -> Result<Option<MeasurementRecord>, StoreError> {
        let Some(row) = Entity::find_by_id(id).one(db).await? else {
            return Ok(None);
        };

        let readings = row
            .find_related(reading::Entity)
            .order_by_asc(reading::Column::Position)
            .all(db)
            .await?;

        Ok(Some(MeasurementRecord::assemble(row, readings)))
    }

    /// Returns one page of measurements matching `filter`, newest first,
    /// along with the total match count. `page` is 1-based.
    pub async fn list(
        db: &DbConn,
        filter: &MeasurementFilter,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<MeasurementRecord>, u64), StoreError> {
        let mut condition = Condition::all();
        if let Some(ref station_id) = filter.station_id {
            condition = condition.add(Column::StationId.eq(station_id.as_str()));
        }
        if let Some(start) = filter.start {
            condition = condition.add(Column::MeasurementTime.gte(start));
        }
        if let Some(end) = filter.end {
            condition = condition.add(Column::MeasurementTime.lte(end));
        }

        let mut query = Entity::find().filter(condition);
        if let Some(ref pollutant) = filter.pollutant {
            // Containment within the embedded sequence: join on readings
            // and collapse duplicates from multi-reading measurements.
            query = query
                .inner_join(reading::Entity)
                .filter(reading::Column::Pollutant.eq(pollutant.clone()))
                .distinct();
        }

        let paginator = query
            .order_by_desc(Column::MeasurementTime)
            .paginate(db, limit.max(1));
        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(page.max(1) - 1).await?;

        let records = Self::load_records(db, rows).await?;
        Ok((records, total))
    }

    /// One record per distinct station: the one with the maximum
    /// measurement_time. Ordered by station_id for determinism.
    pub async fn latest_per_station(db: &DbConn) -> Result<Vec<MeasurementRecord>, StoreError> {
        let station_ids: Vec<String> = Entity::find()
            .select_only()
            .column(Column::StationId)
            .distinct()
            .order_by_asc(Column::StationId)
            .into_tuple()
            .all(db)
            .await?;

        let mut out = Vec::with_capacity(station_ids.len());
        for station_id in station_ids {
            if let Some(row) = Entity::find()
                .filter(Column::StationId.eq(station_id.as_str()))
                .order_by_desc(Column::MeasurementTime)
                .one(db)
                .await?
            {
                let readings = row
                    .find_related(reading::Entity)
                    .order_by_asc(reading::Column::Position)
                    .all(db)
                    .await?;
                out.push(MeasurementRecord::assemble(row, readings));
            }
        }

        Ok(out)
    }

    /// Merges `patch` over the stored record, re-validates, and persists.
    /// Fails with `NotFound` for an unknown id; the store is left
    /// unchanged in that case.
    pub async fn update(
        db: &DbConn,
        id: i64,
        patch: MeasurementPatch,
    ) -> Result<MeasurementRecord, StoreError> {
        let Some(existing) = Entity::find_by_id(id).one(db).await? else {
            return Err(StoreError::not_found("Measurement not found"));
        };

        if let Some(ref readings) = patch.pollutants {
            validate_readings(readings)?;
        }

        let mut active: ActiveModel = existing.into();
        if let Some(station_id) = patch.station_id {
            active.station_id = Set(station_id);
        }
        if let Some(time) = patch.measurement_time {
            active.measurement_time = Set(time);
        }
        if let Some(meta) = patch.metadata {
            if let Some(source) = meta.source {
                active.source = Set(source);
            }
            if let Some(import_time) = meta.import_time {
                active.import_time = Set(import_time);
            }
            if let Some(original_data) = meta.original_data {
                active.original_data = Set(Some(original_data));
            }
            if let Some(notes) = meta.processing_notes {
                active.processing_notes = Set(Some(notes));
            }
        }
        active.updated_at = Set(Utc::now());

        let updated = active
            .update(db)
            .await
            .map_err(|e| StoreError::from_insert(e, "A measurement for this station and time"))?;

        if let Some(readings) = patch.pollutants {
            reading::Entity::delete_many()
                .filter(reading::Column::MeasurementId.eq(id))
                .exec(db)
                .await?;
            insert_readings(db, id, &readings).await?;
        }

        let readings = updated
            .find_related(reading::Entity)
            .order_by_asc(reading::Column::Position)
            .all(db)
            .await?;

        Ok(MeasurementRecord::assemble(updated, readings))
    }

    /// Hard delete. Returns the removed record, `NotFound` if absent.
    pub async fn delete(db: &DbConn, id: i64) -> Result<MeasurementRecord, StoreError> {
        let record = Self::find_by_id(db, id)
            .await?
            .ok_or_else(|| StoreError::not_found("Measurement not found"))?;

        reading::Entity::delete_many()
            .filter(reading::Column::MeasurementId.eq(id))
            .exec(db)
            .await?;
        Entity::delete_by_id(id).exec(db).await?;

        Ok(record)
    }

    /// Aggregates readings of one pollutant for a station within
    /// [start, end] inclusive. Every reading with a matching name
    /// contributes, so a measurement listing the same pollutant twice
    /// counts twice. `None` when nothing matches.
    pub async fn statistics(
        db: &DbConn,
        station_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        pollutant: &Pollutant,
    ) -> Result<Option<Statistics>, StoreError> {
        let rows = Entity::find()
            .filter(Column::StationId.eq(station_id))
            .filter(Column::MeasurementTime.gte(start))
            .filter(Column::MeasurementTime.lte(end))
            .all(db)
            .await?;

        if rows.is_empty() {
            return Ok(None);
        }

        let readings = rows.load_many(reading::Entity, db).await?;

        let mut count: u64 = 0;
        let mut sum = 0.0_f64;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut latest: Option<DateTime<Utc>> = None;

        for (row, row_readings) in rows.iter().zip(readings.iter()) {
            let mut contributed = false;
            for r in row_readings.iter().filter(|r| &r.pollutant == pollutant) {
                count += 1;
                sum += r.value;
                min = min.min(r.value);
                max = max.max(r.value);
                contributed = true;
            }
            if contributed {
                latest = Some(match latest {
                    Some(t) => t.max(row.measurement_time),
                    None => row.measurement_time,
                });
            }
        }

        let Some(latest) = latest else {
            return Ok(None);
        };

        Ok(Some(Statistics {
            count,
            avg: sum / count as f64,
            min,
            max,
            latest,
        }))
    }

    async fn load_records(
        db: &DbConn,
        rows: Vec<Model>,
    ) -> Result<Vec<MeasurementRecord>, StoreError> {
        let readings = rows.load_many(reading::Entity, db).await?;

        Ok(rows
            .into_iter()
            .zip(readings)
            .map(|(row, mut row_readings)| {
                row_readings.sort_by_key(|r| r.position);
                MeasurementRecord::assemble(row, row_readings)
            })
            .collect())
    }
}
